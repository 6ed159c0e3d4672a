use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, error::LotteryError, state::Lottery};

/// Event emitted when a draw is abandoned before any payout
#[event]
pub struct DrawCancelled {
    pub round: u64,
}

/// Instruction to abandon the current draw while winners are still being
/// counted. The round reopens with its participants and pool untouched.
/// Once payouts have started the draw can only run to completion.
pub fn cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.cancel_draw()?;

    msg!("Round {} draw cancelled", lottery.round);

    emit!(DrawCancelled {
        round: lottery.round,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CancelDraw<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::Unauthorized,
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}
