use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

use crate::{
    constants::{DIVISION_COUNT, LOTTERY_SEED, MAIN_NUMBERS_PER_TICKET},
    error::LotteryError,
    settlement::{PrizeSchedule, WinningDraw},
    state::Lottery,
};

/// Event emitted when the operator starts the draw of a round
#[event]
pub struct DrawStarted {
    pub round: u64,
    pub winning_numbers: [u32; MAIN_NUMBERS_PER_TICKET],
    pub powerball_number: u32,
    /// Vault balance the prizes are computed from
    pub pool_balance: u64,
    /// Prize paid to each winning ticket, per division
    pub division_prizes: [u64; DIVISION_COUNT],
    pub management_fee: u64,
    pub participants: u32,
}

/// Instruction to start settling the current round against the operator's
/// numbers
///
/// # Arguments
/// * `winning_numbers` - Exactly 5 main numbers
/// * `powerball_number` - The winning powerball
///
/// # Settlement
/// A draw runs over several instructions so that no single transaction has
/// to load every entry:
/// 1. `select_winner` fixes the numbers and computes every prize from the
///    vault balance
/// 2. `tally_batch` counts winning tickets, a few entrants at a time. The
///    last batch checks the vault covers every winner and the fee
/// 3. `pay_batch` pays winners and records them, then pays the fee and
///    advances the round
///
/// Until the round advances, participation and setting changes are refused.
/// While tallying, `cancel_draw` abandons the draw.
pub fn select_winner(
    ctx: Context<SelectWinner>,
    winning_numbers: Vec<u32>,
    powerball_number: u32,
) -> Result<()> {
    let draw = WinningDraw::new(&winning_numbers, powerball_number)?;
    let lottery = &mut ctx.accounts.lottery;
    lottery.ensure_idle()?;

    let schedule = PrizeSchedule::compute(
        ctx.accounts.vault.amount,
        lottery.management_fee_percentage,
        lottery.next_pool_prize_percentage,
    )?;
    lottery.begin_draw(draw, schedule)?;

    msg!(
        "Round {} draw started: pool {}, {} participants",
        lottery.round,
        schedule.pool_balance,
        lottery.participants_count()
    );

    emit!(DrawStarted {
        round: lottery.round,
        winning_numbers: draw.main_numbers,
        powerball_number: draw.powerball,
        pool_balance: schedule.pool_balance,
        division_prizes: schedule.division_prizes,
        management_fee: schedule.management_fee,
        participants: lottery.participants_count() as u32,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SelectWinner<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::Unauthorized,
        has_one = vault @ LotteryError::InvalidTokenAccount,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,
}
