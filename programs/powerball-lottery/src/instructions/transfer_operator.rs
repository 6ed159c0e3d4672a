use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, error::LotteryError, state::Lottery};

/// Event emitted when the operator role changes hands
#[event]
pub struct OperatorTransferred {
    pub previous_operator: Pubkey,
    pub new_operator: Pubkey,
}

/// Instruction to hand the operator role to another key. The new operator
/// receives future management fees and controls packages and draws.
pub fn transfer_operator(ctx: Context<TransferOperator>, new_operator: Pubkey) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    let previous_operator = lottery.operator;
    lottery.operator = new_operator;

    emit!(OperatorTransferred {
        previous_operator,
        new_operator,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct TransferOperator<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::Unauthorized,
    )]
    pub lottery: Account<'info, Lottery>,
}
