use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, error::LotteryError, state::Lottery};

/// Event emitted when the operator changes the lottery settings
#[event]
pub struct SettingsUpdated {
    pub management_fee_percentage: u8,
    pub next_pool_prize_percentage: u8,
    pub min_time_between_participation: i64,
}

/// Instruction to change the fee, carry-over and rate limit settings.
/// Takes effect from the next participation or draw.
pub fn update_settings(
    ctx: Context<UpdateSettings>,
    management_fee_percentage: u8,
    next_pool_prize_percentage: u8,
    min_time_between_participation: i64,
) -> Result<()> {
    Lottery::validate_settings(
        management_fee_percentage,
        next_pool_prize_percentage,
        min_time_between_participation,
    )?;

    let lottery = &mut ctx.accounts.lottery;
    lottery.ensure_idle()?;
    lottery.management_fee_percentage = management_fee_percentage;
    lottery.next_pool_prize_percentage = next_pool_prize_percentage;
    lottery.min_time_between_participation = min_time_between_participation;

    emit!(SettingsUpdated {
        management_fee_percentage,
        next_pool_prize_percentage,
        min_time_between_participation,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateSettings<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::Unauthorized,
    )]
    pub lottery: Account<'info, Lottery>,
}
