use anchor_lang::prelude::*;

use crate::{constants::MAX_TICKETS_PER_ENTRY, error::LotteryError, state::Ticket};

/// Tickets one user bought for one round. Seeded by the round so every round
/// starts from an empty account and settled rounds stay readable.
#[account]
pub struct Entry {
    pub owner: Pubkey,
    pub round: u64,
    pub tickets: Vec<Ticket>,
    pub bump: u8,
}

impl Entry {
    /// 8 discriminator + 32 owner + 8 round + (4 + n * Ticket::SIZE) tickets + 1 bump
    pub fn space(ticket_count: usize) -> usize {
        8 + 32 + 8 + 4 + ticket_count * Ticket::SIZE + 1
    }

    pub fn ticket_count(&self) -> u64 {
        self.tickets.len() as u64
    }

    pub fn ticket(&self, index: u64) -> Result<&Ticket> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.tickets.get(index))
            .ok_or_else(|| error!(LotteryError::OutOfRange))
    }

    pub fn append(&mut self, tickets: Vec<Ticket>) -> Result<()> {
        let total = self
            .tickets
            .len()
            .checked_add(tickets.len())
            .ok_or(LotteryError::Overflow)?;
        require!(total <= MAX_TICKETS_PER_ENTRY, LotteryError::TooManyTickets);
        self.tickets.extend(tickets);
        Ok(())
    }
}
