use anchor_lang::prelude::*;

use crate::{
    constants::{DIVISION_COUNT, LOTTERY_SEED},
    error::LotteryError,
    settlement,
    state::{DrawPhase, Lottery},
    utils::load_entry,
};

/// Event emitted when every winning ticket of a draw has been counted
#[event]
pub struct DrawTallied {
    pub round: u64,
    /// Winning tickets per division
    pub winning_counts: [u32; DIVISION_COUNT],
    /// Prizes plus the management fee
    pub required_funds: u64,
}

/// Instruction to count the winning tickets of the next entrants
///
/// # Remaining Accounts
/// The entries of the next participants of the round, in enrollment order
/// starting at the draw cursor, at most `MAX_SETTLE_BATCH` of them. A round
/// without participants is tallied with no accounts.
///
/// # Implementation Notes
/// - Nothing is transferred. Once the last entrant is counted, a pool that
///   cannot pay every winner and the fee fails with `TransferFailed` and the
///   draw stays cancellable
pub fn tally_batch(ctx: Context<TallyBatch>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.ensure_phase(DrawPhase::Tallying)?;

    let round = lottery.round;
    let lottery_key = lottery.key();
    let winning_draw = lottery.draw.winning_draw;
    let entrants = lottery.next_batch(ctx.remaining_accounts.len(), 1)?;

    let mut counts = [0u32; DIVISION_COUNT];
    for (expected_owner, info) in entrants.iter().zip(ctx.remaining_accounts) {
        let entry = load_entry(info, ctx.program_id, &lottery_key, round, expected_owner)?;
        settlement::tally(&winning_draw, &entry.tickets, &mut counts)?;
    }
    let batch_len = entrants.len();

    if lottery.record_tally(&counts, batch_len)? {
        let winning_counts = lottery.draw.winning_counts;
        let required_funds = lottery.draw.schedule.required_funds(&winning_counts)?;

        msg!(
            "Round {} tallied: {:?} winners, {} required",
            round,
            winning_counts,
            required_funds
        );

        emit!(DrawTallied {
            round,
            winning_counts,
            required_funds,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct TallyBatch<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::Unauthorized,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}
