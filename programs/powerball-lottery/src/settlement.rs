//! Draw settlement math: ticket matching, division classification and prize
//! computation. Everything here is pure so each draw batch can be checked
//! before any token moves.

use anchor_lang::prelude::*;

use crate::{
    constants::{DIVISION_COUNT, DIVISION_PERCENTAGES, MAIN_NUMBERS_PER_TICKET},
    error::LotteryError,
    state::Ticket,
};

pub type MainNumbers = [u32; MAIN_NUMBERS_PER_TICKET];

/// Winning tickets per division, division 1 first.
pub type DivisionCounts = [u32; DIVISION_COUNT];

/// Winning numbers chosen by the operator.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinningDraw {
    pub main_numbers: [u32; MAIN_NUMBERS_PER_TICKET],
    pub powerball: u32,
}

impl WinningDraw {
    // 4 * 5 main_numbers + 4 powerball
    pub const SIZE: usize = 4 * MAIN_NUMBERS_PER_TICKET + 4;

    pub fn new(main_numbers: &[u32], powerball: u32) -> Result<Self> {
        let main_numbers = MainNumbers::try_from(main_numbers)
            .map_err(|_| error!(LotteryError::InvalidWinningNumbers))?;
        Ok(Self {
            main_numbers,
            powerball,
        })
    }

    /// Division won by `ticket`, if any.
    pub fn division_of(&self, ticket: &Ticket) -> Option<u8> {
        division(
            match_count(&ticket.main_numbers, &self.main_numbers),
            ticket.powerball == self.powerball,
        )
    }
}

/// Number of distinct ticket values that appear among the winning numbers.
/// Repeated values on either side are counted once.
pub fn match_count(ticket: &MainNumbers, winning: &MainNumbers) -> u8 {
    ticket
        .iter()
        .enumerate()
        .filter(|&(position, number)| {
            !ticket[..position].contains(number) && winning.contains(number)
        })
        .count() as u8
}

/// Prize division for a match result, 1 being the best.
pub fn division(match_count: u8, powerball_match: bool) -> Option<u8> {
    match (match_count, powerball_match) {
        (5, true) => Some(1),
        (5, false) => Some(2),
        (4, true) => Some(3),
        (4, false) => Some(4),
        (3, true) => Some(5),
        _ => None,
    }
}

/// `amount * percentage / 100`, truncated.
pub fn percentage_of(amount: u64, percentage: u64) -> Result<u64> {
    let scaled = (amount as u128)
        .checked_mul(percentage as u128)
        .ok_or(LotteryError::Overflow)?
        / 100;
    u64::try_from(scaled).map_err(|_| error!(LotteryError::Overflow))
}

/// Winning tickets of `tickets` from position `from` on, with their division.
pub fn winning_tickets<'a>(
    draw: &'a WinningDraw,
    tickets: &'a [Ticket],
    from: usize,
) -> impl Iterator<Item = (usize, u8)> + 'a {
    tickets
        .iter()
        .enumerate()
        .skip(from)
        .filter_map(|(index, ticket)| draw.division_of(ticket).map(|division| (index, division)))
}

/// Adds the winning tickets of `tickets` to `counts`.
pub fn tally(draw: &WinningDraw, tickets: &[Ticket], counts: &mut DivisionCounts) -> Result<()> {
    for (_, division) in winning_tickets(draw, tickets, 0) {
        let slot = &mut counts[usize::from(division) - 1];
        *slot = slot.checked_add(1).ok_or(LotteryError::Overflow)?;
    }
    Ok(())
}

/// Amounts paid by a draw, all derived from the pool balance when the draw
/// starts.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrizeSchedule {
    pub pool_balance: u64,
    /// Amount paid to each winning ticket of divisions 1 through 5
    pub division_prizes: [u64; DIVISION_COUNT],
    pub management_fee: u64,
    /// Part of the management fee left in the pool for the next round
    pub next_pool_prize: u64,
}

impl PrizeSchedule {
    // 8 pool_balance + 8 * 5 division_prizes + 8 management_fee + 8 next_pool_prize
    pub const SIZE: usize = 8 + 8 * DIVISION_COUNT + 8 + 8;

    pub fn compute(
        pool_balance: u64,
        management_fee_percentage: u8,
        next_pool_prize_percentage: u8,
    ) -> Result<Self> {
        let mut division_prizes = [0u64; DIVISION_COUNT];
        for (prize, percentage) in division_prizes.iter_mut().zip(DIVISION_PERCENTAGES) {
            *prize = percentage_of(pool_balance, percentage)?;
        }
        let mut management_fee = percentage_of(pool_balance, management_fee_percentage as u64)?;

        // The jackpot and the fee leave nothing behind: part of the fee stays
        // in the pool to seed the next round.
        let remainder = pool_balance
            .checked_sub(division_prizes[0])
            .and_then(|rest| rest.checked_sub(management_fee))
            .ok_or(LotteryError::Overflow)?;
        let next_pool_prize = if remainder == 0 {
            let carried = percentage_of(management_fee, next_pool_prize_percentage as u64)?;
            management_fee -= carried;
            carried
        } else {
            0
        };

        Ok(Self {
            pool_balance,
            division_prizes,
            management_fee,
            next_pool_prize,
        })
    }

    pub fn prize_for(&self, division: u8) -> u64 {
        self.division_prizes[usize::from(division) - 1]
    }

    /// Everything leaving the pool for `winning_counts`: one full division
    /// prize per winning ticket plus the management fee.
    pub fn required_funds(&self, winning_counts: &DivisionCounts) -> Result<u64> {
        winning_counts
            .iter()
            .zip(self.division_prizes)
            .try_fold(self.management_fee, |total, (&count, prize)| {
                prize
                    .checked_mul(u64::from(count))
                    .and_then(|owed| total.checked_add(owed))
                    .ok_or_else(|| error!(LotteryError::Overflow))
            })
    }

    /// Fails when the pool cannot pay every winner and the fee.
    pub fn ensure_covered(&self, winning_counts: &DivisionCounts) -> Result<()> {
        require!(
            self.required_funds(winning_counts)? <= self.pool_balance,
            LotteryError::TransferFailed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use proptest::prelude::*;

    fn ticket(main_numbers: MainNumbers, powerball: u32) -> Ticket {
        Ticket {
            main_numbers,
            powerball,
        }
    }

    #[test]
    fn matching_ignores_order() {
        assert_eq!(match_count(&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1]), 5);
    }

    #[test]
    fn matching_counts_repeated_numbers_once() {
        assert_eq!(match_count(&[1, 1, 1, 1, 1], &[1, 2, 3, 4, 5]), 1);
        assert_eq!(match_count(&[1, 2, 3, 4, 5], &[1, 1, 1, 1, 1]), 1);
        assert_eq!(match_count(&[2, 2, 3, 3, 9], &[2, 3, 3, 2, 8]), 2);
    }

    #[test]
    fn division_table() {
        assert_eq!(division(5, true), Some(1));
        assert_eq!(division(5, false), Some(2));
        assert_eq!(division(4, true), Some(3));
        assert_eq!(division(4, false), Some(4));
        assert_eq!(division(3, true), Some(5));
        assert_eq!(division(3, false), None);
        for matches in 0..3 {
            assert_eq!(division(matches, true), None);
            assert_eq!(division(matches, false), None);
        }
    }

    #[test]
    fn a_perfect_ticket_wins_the_jackpot() {
        let draw = WinningDraw::new(&[10, 20, 30, 40, 50], 9).unwrap();
        assert_eq!(draw.division_of(&ticket([50, 40, 30, 20, 10], 9)), Some(1));
    }

    #[test]
    fn winning_numbers_need_five_entries() {
        for numbers in [&[1, 2, 3, 4][..], &[1, 2, 3, 4, 5, 6][..], &[][..]] {
            assert_eq!(
                WinningDraw::new(numbers, 1).unwrap_err(),
                Error::from(LotteryError::InvalidWinningNumbers)
            );
        }
    }

    #[test]
    fn prizes_are_fixed_shares_of_the_pool() {
        let schedule = PrizeSchedule::compute(1_000, 10, 50).unwrap();
        assert_eq!(schedule.division_prizes, [700, 100, 50, 30, 20]);
        assert_eq!(schedule.management_fee, 100);
        assert_eq!(schedule.next_pool_prize, 0);
    }

    #[test]
    fn shares_truncate() {
        let schedule = PrizeSchedule::compute(99, 7, 50).unwrap();
        assert_eq!(schedule.division_prizes, [69, 9, 4, 2, 1]);
        assert_eq!(schedule.management_fee, 6);
    }

    #[test]
    fn an_exhausted_pool_carries_part_of_the_fee_over() {
        let schedule = PrizeSchedule::compute(1_000, 30, 40).unwrap();
        assert_eq!(schedule.division_prizes[0], 700);
        assert_eq!(schedule.next_pool_prize, 120);
        assert_eq!(schedule.management_fee, 180);
    }

    #[test]
    fn an_empty_pool_pays_nothing() {
        let schedule = PrizeSchedule::compute(0, 10, 50).unwrap();
        assert_eq!(schedule.division_prizes, [0; DIVISION_COUNT]);
        assert_eq!(schedule.management_fee, 0);
        assert_eq!(schedule.next_pool_prize, 0);
        schedule.ensure_covered(&[0; DIVISION_COUNT]).unwrap();
    }

    #[test]
    fn four_numbers_and_the_powerball_win_division_three() {
        let tickets = [ticket([1, 2, 3, 4, 5], 7)];
        let draw = WinningDraw::new(&[1, 2, 3, 4, 99], 7).unwrap();
        let schedule = PrizeSchedule::compute(100, 10, 0).unwrap();

        let mut counts = [0; DIVISION_COUNT];
        tally(&draw, &tickets, &mut counts).unwrap();

        assert_eq!(counts, [0, 0, 1, 0, 0]);
        assert_eq!(schedule.prize_for(3), 5);
        assert_eq!(schedule.required_funds(&counts).unwrap(), 15);
        schedule.ensure_covered(&counts).unwrap();
    }

    #[test]
    fn winning_tickets_resume_from_a_position() {
        let tickets = [
            ticket([1, 2, 3, 4, 5], 6),
            ticket([7, 8, 9, 10, 11], 6),
            ticket([1, 2, 3, 40, 50], 6),
        ];
        let draw = WinningDraw::new(&[1, 2, 3, 4, 5], 6).unwrap();

        assert_eq!(
            winning_tickets(&draw, &tickets, 0).collect::<Vec<_>>(),
            vec![(0, 1), (2, 5)]
        );
        assert_eq!(
            winning_tickets(&draw, &tickets, 1).collect::<Vec<_>>(),
            vec![(2, 5)]
        );
        assert_eq!(winning_tickets(&draw, &tickets, 3).count(), 0);
    }

    #[test]
    fn every_winner_in_a_division_gets_the_full_prize() {
        let alice = [ticket([1, 2, 3, 4, 5], 6), ticket([9, 9, 9, 9, 9], 1)];
        let bob = [ticket([5, 4, 3, 2, 1], 6)];
        let draw = WinningDraw::new(&[1, 2, 3, 4, 5], 6).unwrap();
        let schedule = PrizeSchedule::compute(1_000, 10, 0).unwrap();

        let mut counts = [0; DIVISION_COUNT];
        tally(&draw, &alice, &mut counts).unwrap();
        tally(&draw, &bob, &mut counts).unwrap();

        assert_eq!(counts, [2, 0, 0, 0, 0]);
        // Two jackpots plus the fee ask for 1_500 out of a 1_000 pool.
        assert_eq!(schedule.required_funds(&counts).unwrap(), 1_500);
        assert_eq!(
            schedule.ensure_covered(&counts).unwrap_err(),
            Error::from(LotteryError::TransferFailed)
        );
    }

    #[test]
    fn several_small_winners_can_fit_in_the_pool() {
        let tickets = [ticket([1, 2, 3, 40, 50], 6), ticket([3, 2, 1, 60, 70], 6)];
        let draw = WinningDraw::new(&[1, 2, 3, 4, 5], 6).unwrap();
        let schedule = PrizeSchedule::compute(1_000, 10, 0).unwrap();

        let mut counts = [0; DIVISION_COUNT];
        tally(&draw, &tickets, &mut counts).unwrap();

        assert_eq!(counts, [0, 0, 0, 0, 2]);
        assert_eq!(schedule.required_funds(&counts).unwrap(), 140);
        schedule.ensure_covered(&counts).unwrap();
    }

    #[test]
    fn serialized_sizes_match() {
        let mut bytes = Vec::new();
        PrizeSchedule::default().serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), PrizeSchedule::SIZE);

        let mut bytes = Vec::new();
        WinningDraw::default().serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), WinningDraw::SIZE);
    }

    proptest! {
        #[test]
        fn match_count_is_order_independent(
            ticket in any::<[u32; 5]>(),
            winning in any::<[u32; 5]>(),
        ) {
            let mut reversed_ticket = ticket;
            reversed_ticket.reverse();
            let mut sorted_winning = winning;
            sorted_winning.sort_unstable();
            let count = match_count(&ticket, &winning);
            prop_assert!(count <= 5);
            prop_assert_eq!(count, match_count(&reversed_ticket, &sorted_winning));
        }

        #[test]
        fn jackpot_and_fee_never_exceed_the_pool(
            pool_balance in any::<u64>(),
            fee in 0u8..=30,
            carry in 0u8..=100,
        ) {
            let schedule = PrizeSchedule::compute(pool_balance, fee, carry).unwrap();
            let paid = schedule.division_prizes[0] as u128
                + schedule.management_fee as u128
                + schedule.next_pool_prize as u128;
            prop_assert!(paid <= pool_balance as u128);
        }
    }
}
