use anchor_lang::prelude::*;

use crate::{
    constants::{MAIN_NUMBERS_PER_TICKET, WINNERS_PER_PAGE},
    error::LotteryError,
    state::Ticket,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinnerRecord {
    pub winner: Pubkey,
    /// Main numbers of the winning ticket
    pub matching_numbers: [u32; MAIN_NUMBERS_PER_TICKET],
    pub powerball: u32,
    pub division: u8,
    pub round: u64,
}

impl WinnerRecord {
    // 32 winner + 4 * 5 matching_numbers + 4 powerball + 1 division + 8 round
    pub const SIZE: usize = 32 + 4 * MAIN_NUMBERS_PER_TICKET + 4 + 1 + 8;

    pub fn new(winner: Pubkey, ticket: &Ticket, division: u8, round: u64) -> Self {
        Self {
            winner,
            matching_numbers: ticket.main_numbers,
            powerball: ticket.powerball,
            division,
            round,
        }
    }
}

// 8 discriminator + 32 lottery + 8 count + 1 bump
pub const WINNER_LEDGER_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 1;

/// Append-only history of every winning ticket across all rounds. Records are
/// stored in fixed-size `WinnerPage` accounts; the ledger only counts them.
#[account]
pub struct WinnerLedger {
    pub lottery: Pubkey,
    pub count: u64,
    pub bump: u8,
}

impl WinnerLedger {
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Page receiving the next record.
    pub fn current_page(&self) -> u64 {
        self.count / WINNERS_PER_PAGE as u64
    }

    /// Page and slot holding the record at `index`.
    pub fn locate(&self, index: u64) -> Result<(u64, usize)> {
        require!(index < self.count, LotteryError::OutOfRange);
        let per_page = WINNERS_PER_PAGE as u64;
        Ok((index / per_page, (index % per_page) as usize))
    }

    pub fn record(&mut self, page: &mut WinnerPage, record: WinnerRecord) -> Result<()> {
        require!(
            page.index == self.current_page() && !page.is_full(),
            LotteryError::OutOfRange
        );
        page.winners.push(record);
        self.count = self.count.checked_add(1).ok_or(LotteryError::Overflow)?;
        Ok(())
    }
}

#[account]
pub struct WinnerPage {
    pub lottery: Pubkey,
    pub index: u64,
    pub winners: Vec<WinnerRecord>,
    pub bump: u8,
}

impl WinnerPage {
    // 8 discriminator + 32 lottery + 8 index
    // + (4 + WINNERS_PER_PAGE * WinnerRecord::SIZE) winners + 1 bump
    pub const SPACE: usize = 8 + 32 + 8 + 4 + WINNERS_PER_PAGE * WinnerRecord::SIZE + 1;

    pub fn is_full(&self) -> bool {
        self.winners.len() >= WINNERS_PER_PAGE
    }

    pub fn winner(&self, slot: usize) -> Result<&WinnerRecord> {
        self.winners
            .get(slot)
            .ok_or_else(|| error!(LotteryError::OutOfRange))
    }
}
