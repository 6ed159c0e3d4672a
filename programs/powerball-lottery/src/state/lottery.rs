use anchor_lang::prelude::*;

use crate::{
    constants::{DIVISION_COUNT, MAX_MANAGEMENT_FEE_PERCENTAGE, MAX_PARTICIPANTS, MAX_SETTLE_BATCH},
    error::LotteryError,
    settlement::{PrizeSchedule, WinningDraw},
};

// 8 discriminator + 32 operator + 32 mint + 32 vault + 1 management_fee_percentage
// + 1 next_pool_prize_percentage + 8 min_time_between_participation + 8 round
// + (4 + 32 * MAX_PARTICIPANTS) participants + 8 next_pool_reserve
// + DrawState::SIZE draw + 1 bump + 1 vault_bump
pub const LOTTERY_ACCOUNT_SIZE: usize =
    8 + 32 + 32 + 32 + 1 + 1 + 8 + 8 + (4 + 32 * MAX_PARTICIPANTS) + 8 + DrawState::SIZE + 1 + 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawPhase {
    /// Tickets can be bought
    #[default]
    Idle,
    /// Winning tickets are being counted, nothing has been paid
    Tallying,
    /// The pool is known to cover every winner and prizes are being paid
    Paying,
}

/// Progress of the draw of the current round. A draw spans several
/// transactions: one to start it, tally batches, then payout batches.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawState {
    pub phase: DrawPhase,
    pub winning_draw: WinningDraw,
    pub schedule: PrizeSchedule,
    /// Winning tickets per division, division 1 first
    pub winning_counts: [u32; DIVISION_COUNT],
    /// Prizes transferred so far
    pub paid: u64,
    /// Index into `Lottery.participants` of the next entrant to process
    pub entrant_cursor: u32,
    /// First unpaid ticket of the entrant at `entrant_cursor`
    pub ticket_cursor: u32,
}

impl DrawState {
    // 1 phase + WinningDraw::SIZE + PrizeSchedule::SIZE + 4 * 5 winning_counts
    // + 8 paid + 4 entrant_cursor + 4 ticket_cursor
    pub const SIZE: usize =
        1 + WinningDraw::SIZE + PrizeSchedule::SIZE + 4 * DIVISION_COUNT + 8 + 4 + 4;
}

#[account]
pub struct Lottery {
    /// Key allowed to manage packages, settings and draws.
    pub operator: Pubkey,
    /// Token the lottery is denominated in.
    pub mint: Pubkey,
    /// Token account holding the prize pool, owned by this PDA.
    pub vault: Pubkey,
    pub management_fee_percentage: u8,
    /// Share of the management fee kept in the vault when the fee and the
    /// division 1 prize exhaust the pool.
    pub next_pool_prize_percentage: u8,
    /// Seconds a user must wait between two participations.
    pub min_time_between_participation: i64,
    /// Current round. Participants and entries tagged with an older round
    /// are settled history.
    pub round: u64,
    /// Users holding tickets for the current round, in order of first entry.
    pub participants: Vec<Pubkey>,
    /// Amount earmarked by the last draw to seed the current round.
    pub next_pool_reserve: u64,
    pub draw: DrawState,
    pub bump: u8,
    pub vault_bump: u8,
}

impl Lottery {
    pub fn validate_settings(
        management_fee_percentage: u8,
        next_pool_prize_percentage: u8,
        min_time_between_participation: i64,
    ) -> Result<()> {
        require!(
            management_fee_percentage <= MAX_MANAGEMENT_FEE_PERCENTAGE,
            LotteryError::InvalidPercentage
        );
        require!(
            next_pool_prize_percentage <= 100,
            LotteryError::InvalidPercentage
        );
        require!(
            min_time_between_participation >= 0,
            LotteryError::InvalidInterval
        );
        Ok(())
    }

    pub fn participants_count(&self) -> usize {
        self.participants.len()
    }

    pub fn ensure_idle(&self) -> Result<()> {
        require!(
            self.draw.phase == DrawPhase::Idle,
            LotteryError::DrawInProgress
        );
        Ok(())
    }

    pub fn ensure_phase(&self, phase: DrawPhase) -> Result<()> {
        require!(self.draw.phase == phase, LotteryError::InvalidDrawPhase);
        Ok(())
    }

    /// Adds `user` to the current round's participants.
    ///
    /// Callers check membership through `Participant::is_enrolled` first, which
    /// keeps the set free of duplicates without scanning it.
    pub fn enroll(&mut self, user: Pubkey) -> Result<()> {
        require!(
            self.participants.len() < MAX_PARTICIPANTS,
            LotteryError::TooManyParticipants
        );
        self.participants.push(user);
        Ok(())
    }

    pub fn begin_draw(&mut self, winning_draw: WinningDraw, schedule: PrizeSchedule) -> Result<()> {
        self.ensure_idle()?;
        self.draw = DrawState {
            phase: DrawPhase::Tallying,
            winning_draw,
            schedule,
            ..DrawState::default()
        };
        Ok(())
    }

    /// Entrants a batch covers, given `supplied_accounts` remaining accounts
    /// at `stride` accounts per entrant.
    ///
    /// A batch always starts at the draw cursor, holds at most
    /// `MAX_SETTLE_BATCH` entrants, and may only be empty once every entrant
    /// has been processed.
    pub fn next_batch(&self, supplied_accounts: usize, stride: usize) -> Result<&[Pubkey]> {
        let pending = self
            .participants
            .get(self.draw.entrant_cursor as usize..)
            .unwrap_or_default();
        require!(
            supplied_accounts % stride == 0,
            LotteryError::MissingParticipantAccounts
        );
        let count = supplied_accounts / stride;
        require!(
            count <= MAX_SETTLE_BATCH && count <= pending.len(),
            LotteryError::MissingParticipantAccounts
        );
        require!(
            count > 0 || pending.is_empty(),
            LotteryError::MissingParticipantAccounts
        );
        Ok(&pending[..count])
    }

    /// Adds one tally batch. Once every entrant is counted the pool is checked
    /// against the winners and the draw moves on to payouts. Returns true when
    /// that happens.
    pub fn record_tally(
        &mut self,
        counts: &[u32; DIVISION_COUNT],
        entrants: usize,
    ) -> Result<bool> {
        self.ensure_phase(DrawPhase::Tallying)?;
        for (total, count) in self.draw.winning_counts.iter_mut().zip(counts) {
            *total = total.checked_add(*count).ok_or(LotteryError::Overflow)?;
        }
        self.advance_cursor(entrants)?;

        if (self.draw.entrant_cursor as usize) < self.participants.len() {
            return Ok(false);
        }
        self.draw.schedule.ensure_covered(&self.draw.winning_counts)?;
        self.draw.phase = DrawPhase::Paying;
        self.draw.entrant_cursor = 0;
        self.draw.ticket_cursor = 0;
        Ok(true)
    }

    /// Adds one payout batch. `settled` entrants were paid in full and
    /// `ticket_cursor` is where the next batch resumes inside the entrant that
    /// follows them. Returns true once every entrant has been paid.
    pub fn record_payouts(&mut self, settled: usize, ticket_cursor: u32, paid: u64) -> Result<bool> {
        self.ensure_phase(DrawPhase::Paying)?;
        self.draw.paid = self
            .draw
            .paid
            .checked_add(paid)
            .ok_or(LotteryError::Overflow)?;
        self.advance_cursor(settled)?;
        self.draw.ticket_cursor = ticket_cursor;
        Ok(self.draw.entrant_cursor as usize >= self.participants.len())
    }

    /// Abandons a draw that has not paid anything yet.
    pub fn cancel_draw(&mut self) -> Result<()> {
        self.ensure_phase(DrawPhase::Tallying)?;
        self.draw = DrawState::default();
        Ok(())
    }

    /// Closes the current round. Every contribution and entry tagged with the
    /// old round drops out of consideration without touching participant data.
    pub fn complete_round(&mut self, next_pool_prize: u64) -> Result<()> {
        self.round = self.round.checked_add(1).ok_or(LotteryError::Overflow)?;
        self.participants.clear();
        self.next_pool_reserve = next_pool_prize;
        self.draw = DrawState::default();
        Ok(())
    }

    fn advance_cursor(&mut self, entrants: usize) -> Result<()> {
        let entrants = u32::try_from(entrants).map_err(|_| error!(LotteryError::Overflow))?;
        self.draw.entrant_cursor = self
            .draw
            .entrant_cursor
            .checked_add(entrants)
            .ok_or(LotteryError::Overflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIRST_ROUND;
    use anchor_lang::error::Error;

    fn lottery() -> Lottery {
        Lottery {
            operator: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            management_fee_percentage: 10,
            next_pool_prize_percentage: 50,
            min_time_between_participation: 60,
            round: FIRST_ROUND,
            participants: Vec::new(),
            next_pool_reserve: 0,
            draw: DrawState::default(),
            bump: 255,
            vault_bump: 254,
        }
    }

    fn lottery_with(entrants: usize) -> Lottery {
        let mut lottery = lottery();
        for _ in 0..entrants {
            lottery.enroll(Pubkey::new_unique()).unwrap();
        }
        lottery
    }

    fn start(lottery: &mut Lottery, pool_balance: u64) {
        let draw = WinningDraw::new(&[1, 2, 3, 4, 5], 6).unwrap();
        let schedule = PrizeSchedule::compute(pool_balance, 10, 50).unwrap();
        lottery.begin_draw(draw, schedule).unwrap();
    }

    #[test]
    fn account_size_fits_a_full_round() {
        let mut lottery = lottery_with(MAX_PARTICIPANTS);
        start(&mut lottery, 1_000);
        let mut bytes = Vec::new();
        lottery.try_serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), LOTTERY_ACCOUNT_SIZE);
    }

    #[test]
    fn enroll_rejects_participants_beyond_capacity() {
        let mut lottery = lottery_with(MAX_PARTICIPANTS);
        assert_eq!(
            lottery.enroll(Pubkey::new_unique()).unwrap_err(),
            Error::from(LotteryError::TooManyParticipants)
        );
    }

    #[test]
    fn completing_a_round_clears_participants_and_the_draw() {
        let mut lottery = lottery_with(2);
        start(&mut lottery, 1_000);

        lottery.complete_round(42).unwrap();

        assert_eq!(lottery.participants_count(), 0);
        assert_eq!(lottery.round, FIRST_ROUND + 1);
        assert_eq!(lottery.next_pool_reserve, 42);
        assert_eq!(lottery.draw, DrawState::default());
        lottery.ensure_idle().unwrap();
    }

    #[test]
    fn a_draw_cannot_start_while_another_is_running() {
        let mut lottery = lottery();
        start(&mut lottery, 1_000);
        assert_eq!(
            lottery
                .begin_draw(WinningDraw::default(), PrizeSchedule::default())
                .unwrap_err(),
            Error::from(LotteryError::DrawInProgress)
        );
        assert_eq!(
            lottery.ensure_idle().unwrap_err(),
            Error::from(LotteryError::DrawInProgress)
        );
    }

    #[test]
    fn batches_follow_the_cursor_and_stay_bounded() {
        let mut lottery = lottery_with(MAX_SETTLE_BATCH + 2);
        start(&mut lottery, 1_000);

        let first = lottery.next_batch(MAX_SETTLE_BATCH, 1).unwrap().to_vec();
        assert_eq!(first, lottery.participants[..MAX_SETTLE_BATCH]);
        assert_eq!(
            lottery.next_batch(MAX_SETTLE_BATCH + 1, 1).unwrap_err(),
            Error::from(LotteryError::MissingParticipantAccounts)
        );
        assert_eq!(
            lottery.next_batch(3, 2).unwrap_err(),
            Error::from(LotteryError::MissingParticipantAccounts)
        );
        assert_eq!(
            lottery.next_batch(0, 1).unwrap_err(),
            Error::from(LotteryError::MissingParticipantAccounts)
        );

        assert!(!lottery.record_tally(&[0; DIVISION_COUNT], first.len()).unwrap());
        let rest = lottery.next_batch(4, 2).unwrap();
        assert_eq!(rest, &lottery.participants[MAX_SETTLE_BATCH..]);
        assert_eq!(
            lottery.next_batch(6, 2).unwrap_err(),
            Error::from(LotteryError::MissingParticipantAccounts)
        );
    }

    #[test]
    fn a_finished_tally_moves_the_draw_to_payouts() {
        let mut lottery = lottery_with(3);
        start(&mut lottery, 1_000);

        assert!(!lottery.record_tally(&[0, 0, 0, 0, 1], 2).unwrap());
        assert!(lottery.record_tally(&[0, 0, 0, 1, 0], 1).unwrap());

        assert_eq!(lottery.draw.phase, DrawPhase::Paying);
        assert_eq!(lottery.draw.winning_counts, [0, 0, 0, 1, 1]);
        assert_eq!(lottery.draw.entrant_cursor, 0);
        assert_eq!(
            lottery.record_tally(&[0; DIVISION_COUNT], 0).unwrap_err(),
            Error::from(LotteryError::InvalidDrawPhase)
        );
    }

    #[test]
    fn an_uncovered_tally_keeps_the_draw_cancellable() {
        let mut lottery = lottery_with(1);
        start(&mut lottery, 1_000);

        // Two jackpots plus the fee exceed the pool.
        assert_eq!(
            lottery.record_tally(&[2, 0, 0, 0, 0], 1).unwrap_err(),
            Error::from(LotteryError::TransferFailed)
        );

        let mut lottery = lottery_with(1);
        start(&mut lottery, 1_000);
        lottery.cancel_draw().unwrap();
        lottery.ensure_idle().unwrap();
        assert_eq!(lottery.participants_count(), 1);
    }

    #[test]
    fn a_paying_draw_cannot_be_cancelled() {
        let mut lottery = lottery_with(1);
        start(&mut lottery, 1_000);
        lottery.record_tally(&[0; DIVISION_COUNT], 1).unwrap();

        assert_eq!(
            lottery.cancel_draw().unwrap_err(),
            Error::from(LotteryError::InvalidDrawPhase)
        );
    }

    #[test]
    fn payouts_resume_inside_an_entrant() {
        let mut lottery = lottery_with(2);
        start(&mut lottery, 1_000);
        lottery.record_tally(&[0; DIVISION_COUNT], 2).unwrap();

        assert!(!lottery.record_payouts(0, 5, 20).unwrap());
        assert_eq!(lottery.draw.entrant_cursor, 0);
        assert_eq!(lottery.draw.ticket_cursor, 5);

        assert!(lottery.record_payouts(2, 0, 40).unwrap());
        assert_eq!(lottery.draw.paid, 60);
    }

    #[test]
    fn settings_are_bounded() {
        assert!(Lottery::validate_settings(30, 100, 0).is_ok());
        assert_eq!(
            Lottery::validate_settings(31, 0, 0).unwrap_err(),
            Error::from(LotteryError::InvalidPercentage)
        );
        assert_eq!(
            Lottery::validate_settings(10, 101, 0).unwrap_err(),
            Error::from(LotteryError::InvalidPercentage)
        );
        assert_eq!(
            Lottery::validate_settings(10, 10, -1).unwrap_err(),
            Error::from(LotteryError::InvalidInterval)
        );
    }
}
