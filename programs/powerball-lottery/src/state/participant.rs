use anchor_lang::prelude::*;

use crate::{constants::MAIN_NUMBERS_PER_TICKET, error::LotteryError, state::Package};

/// One set of numbers bought for a round. Never modified once recorded.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub main_numbers: [u32; MAIN_NUMBERS_PER_TICKET],
    pub powerball: u32,
}

impl Ticket {
    // 4 * 5 main_numbers + 4 powerball
    pub const SIZE: usize = 4 * MAIN_NUMBERS_PER_TICKET + 4;

    pub fn new(main_numbers: &[u32], powerball: u32) -> Result<Self> {
        let main_numbers = <[u32; MAIN_NUMBERS_PER_TICKET]>::try_from(main_numbers)
            .map_err(|_| error!(LotteryError::CombinationMismatch))?;
        Ok(Self {
            main_numbers,
            powerball,
        })
    }
}

// 8 discriminator + 32 owner + 8 round + 8 contribution + 8 last_participation + 1 bump
pub const PARTICIPANT_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 8 + 8 + 1;

/// Per-user participation record, one per user and lottery.
///
/// `round` and `contribution` describe the last round the user entered. Once
/// the lottery moves past that round the contribution reads as zero. Tickets
/// live in one `Entry` account per round.
#[account]
pub struct Participant {
    pub owner: Pubkey,
    pub round: u64,
    pub contribution: u64,
    pub last_participation: i64,
    pub bump: u8,
}

impl Participant {
    pub fn is_enrolled(&self, round: u64) -> bool {
        self.round == round
    }

    pub fn contribution(&self, round: u64) -> u64 {
        if self.is_enrolled(round) {
            self.contribution
        } else {
            0
        }
    }

    pub fn last_participation(&self) -> i64 {
        self.last_participation
    }

    /// Validates a purchase and turns the submitted numbers into tickets.
    ///
    /// Checks run in a fixed order and the first failure wins: ticket count
    /// against the package, powerball count, balance, rate limit, then the
    /// length of every main-number list.
    pub fn prepare_entry(
        &self,
        package: &Package,
        main_numbers_list: &[Vec<u32>],
        powerball_numbers: &[u32],
        balance: u64,
        now: i64,
        min_time_between_participation: i64,
    ) -> Result<Vec<Ticket>> {
        require!(package.is_purchasable(), LotteryError::InvalidPackage);
        require!(
            main_numbers_list.len() == package.combinations as usize,
            LotteryError::CombinationMismatch
        );
        require!(
            main_numbers_list.len() == powerball_numbers.len(),
            LotteryError::CombinationMismatch
        );
        require!(balance >= package.price, LotteryError::InsufficientBalance);

        let next_allowed = self
            .last_participation
            .checked_add(min_time_between_participation)
            .ok_or(LotteryError::Overflow)?;
        require!(now >= next_allowed, LotteryError::RateLimited);

        main_numbers_list
            .iter()
            .zip(powerball_numbers)
            .map(|(main_numbers, powerball)| Ticket::new(main_numbers, *powerball))
            .collect()
    }

    /// Records a paid entry. Returns true if this is the user's first entry
    /// of `round`, i.e. the caller must add them to the participants set.
    pub fn record_entry(&mut self, round: u64, price: u64, now: i64) -> Result<bool> {
        let first_entry = !self.is_enrolled(round);
        if first_entry {
            self.round = round;
            self.contribution = 0;
        }
        self.contribution = self
            .contribution
            .checked_add(price)
            .ok_or(LotteryError::Overflow)?;
        self.last_participation = now;
        Ok(first_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const ROUND: u64 = 3;
    const MIN_INTERVAL: i64 = 3_600;

    fn participant() -> Participant {
        Participant {
            owner: Pubkey::new_unique(),
            round: 0,
            contribution: 0,
            last_participation: 0,
            bump: 255,
        }
    }

    fn package(combinations: u32, price: u64) -> Package {
        Package {
            combinations,
            price,
            active: true,
        }
    }

    fn numbers(count: usize) -> (Vec<Vec<u32>>, Vec<u32>) {
        let mains = (0..count as u32)
            .map(|i| vec![i + 1, i + 2, i + 3, i + 4, i + 5])
            .collect();
        let powerballs = (0..count as u32).map(|i| i + 10).collect();
        (mains, powerballs)
    }

    #[test]
    fn an_entry_yields_one_ticket_per_combination_and_charges_once() {
        let mut participant = participant();
        let package = package(3, 300);
        let (mains, powerballs) = numbers(3);

        let tickets = participant
            .prepare_entry(&package, &mains, &powerballs, 1_000, 10_000, MIN_INTERVAL)
            .unwrap();
        assert!(participant.record_entry(ROUND, package.price, 10_000).unwrap());

        assert_eq!(tickets.len(), 3);
        assert_eq!(
            tickets[2],
            Ticket {
                main_numbers: [3, 4, 5, 6, 7],
                powerball: 12,
            }
        );
        assert_eq!(participant.contribution(ROUND), 300);
        assert_eq!(participant.last_participation(), 10_000);
    }

    #[test]
    fn second_entry_in_a_round_does_not_re_enroll() {
        let mut participant = participant();
        let (mains, powerballs) = numbers(1);
        participant
            .prepare_entry(&package(1, 100), &mains, &powerballs, 500, 10_000, MIN_INTERVAL)
            .unwrap();
        assert!(participant.record_entry(ROUND, 100, 10_000).unwrap());

        let now = 10_000 + MIN_INTERVAL;
        participant
            .prepare_entry(&package(1, 100), &mains, &powerballs, 400, now, MIN_INTERVAL)
            .unwrap();
        assert!(!participant.record_entry(ROUND, 100, now).unwrap());
        assert_eq!(participant.contribution(ROUND), 200);
    }

    #[test]
    fn rate_limit_boundary_is_inclusive() {
        let mut participant = participant();
        let package = package(1, 100);
        let (mains, powerballs) = numbers(1);
        participant.record_entry(ROUND, 100, 10_000).unwrap();

        assert_eq!(
            participant
                .prepare_entry(&package, &mains, &powerballs, 500, 10_000 + MIN_INTERVAL - 1, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::RateLimited)
        );
        assert!(participant
            .prepare_entry(&package, &mains, &powerballs, 500, 10_000 + MIN_INTERVAL, MIN_INTERVAL)
            .is_ok());
    }

    #[test]
    fn rate_limit_carries_across_rounds() {
        let mut participant = participant();
        let (mains, powerballs) = numbers(1);
        participant.record_entry(ROUND, 100, 10_000).unwrap();

        // The round moved on, the timestamp did not.
        assert_eq!(participant.contribution(ROUND + 1), 0);
        assert_eq!(
            participant
                .prepare_entry(&package(1, 100), &mains, &powerballs, 500, 10_001, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::RateLimited)
        );
    }

    #[test]
    fn checks_run_in_order() {
        let participant = Participant {
            last_participation: 10_000,
            ..participant()
        };
        let (mains, powerballs) = numbers(2);
        let inactive = Package {
            active: false,
            ..package(2, 100)
        };

        // Everything is wrong: the package check wins.
        assert_eq!(
            participant
                .prepare_entry(&inactive, &mains[..1], &powerballs, 0, 10_000, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::InvalidPackage)
        );
        // Wrong ticket count beats balance and rate limit.
        assert_eq!(
            participant
                .prepare_entry(&package(2, 100), &mains[..1], &powerballs[..1], 0, 10_000, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::CombinationMismatch)
        );
        // Powerball count mismatch.
        assert_eq!(
            participant
                .prepare_entry(&package(2, 100), &mains, &powerballs[..1], 0, 10_000, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::CombinationMismatch)
        );
        // Balance beats rate limit.
        assert_eq!(
            participant
                .prepare_entry(&package(2, 100), &mains, &powerballs, 99, 10_000, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::InsufficientBalance)
        );
        // Rate limit beats malformed tickets.
        let malformed = vec![vec![1, 2, 3], vec![1, 2, 3, 4, 5]];
        assert_eq!(
            participant
                .prepare_entry(&package(2, 100), &malformed, &powerballs, 100, 10_000, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::RateLimited)
        );
        assert_eq!(
            participant
                .prepare_entry(&package(2, 100), &malformed, &powerballs, 100, 10_000 + MIN_INTERVAL, MIN_INTERVAL)
                .unwrap_err(),
            Error::from(LotteryError::CombinationMismatch)
        );
    }

    #[test]
    fn a_new_round_starts_from_a_zero_contribution() {
        let mut participant = participant();
        participant.record_entry(ROUND, 100, 10_000).unwrap();
        assert_eq!(participant.contribution(ROUND + 1), 0);

        assert!(participant.record_entry(ROUND + 1, 70, 10_001).unwrap());
        assert_eq!(participant.contribution(ROUND + 1), 70);
        assert_eq!(participant.contribution(ROUND), 0);
    }

    #[test]
    fn account_size_matches_serialized_length() {
        let mut bytes = Vec::new();
        participant().try_serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), PARTICIPANT_ACCOUNT_SIZE);
    }
}
