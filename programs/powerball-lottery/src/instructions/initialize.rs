use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{
        FIRST_ROUND, LOTTERY_SEED, PACKAGE_CATALOG_SEED, VAULT_SEED, WINNER_LEDGER_SEED,
    },
    state::{
        DrawState, Lottery, PackageCatalog, WinnerLedger, LOTTERY_ACCOUNT_SIZE,
        WINNER_LEDGER_ACCOUNT_SIZE,
    },
};

/// Event emitted when the lottery is created
#[event]
pub struct LotteryInitialized {
    pub operator: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub management_fee_percentage: u8,
    pub next_pool_prize_percentage: u8,
    pub min_time_between_participation: i64,
}

/// Instruction to create the lottery, its prize vault, an empty package
/// catalog and an empty winner ledger. Called once per deployment.
///
/// # Arguments
/// * `management_fee_percentage` - Share of the pool paid to the operator per draw (0-30)
/// * `next_pool_prize_percentage` - Share of the fee kept for the next round when the pool is exhausted (0-100)
/// * `min_time_between_participation` - Seconds a user must wait between two entries
///
/// # Account Validations
/// * Lottery - New PDA with seeds ["lottery"]
/// * Vault - New token account PDA with seeds ["vault", lottery], owned by the lottery PDA
/// * PackageCatalog - New PDA with seeds ["package_catalog", lottery]
/// * WinnerLedger - New PDA with seeds ["winner_ledger", lottery]
/// * Operator - Pays for every account and becomes the lottery operator
pub fn initialize(
    ctx: Context<Initialize>,
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
    lottery.operator = ctx.accounts.operator.key();
    lottery.mint = ctx.accounts.mint.key();
    lottery.vault = ctx.accounts.vault.key();
    lottery.management_fee_percentage = management_fee_percentage;
    lottery.next_pool_prize_percentage = next_pool_prize_percentage;
    lottery.min_time_between_participation = min_time_between_participation;
    lottery.round = FIRST_ROUND;
    lottery.participants = Vec::new();
    lottery.next_pool_reserve = 0;
    lottery.draw = DrawState::default();
    lottery.bump = ctx.bumps.lottery;
    lottery.vault_bump = ctx.bumps.vault;

    let lottery_key = lottery.key();
    ctx.accounts.package_catalog.lottery = lottery_key;
    ctx.accounts.package_catalog.packages = Vec::new();
    ctx.accounts.package_catalog.bump = ctx.bumps.package_catalog;

    ctx.accounts.winner_ledger.lottery = lottery_key;
    ctx.accounts.winner_ledger.count = 0;
    ctx.accounts.winner_ledger.bump = ctx.bumps.winner_ledger;

    msg!(
        "Lottery initialized: mint={}, fee={}%, next pool={}%, interval={}s",
        ctx.accounts.mint.key(),
        management_fee_percentage,
        next_pool_prize_percentage,
        min_time_between_participation
    );

    emit!(LotteryInitialized {
        operator: ctx.accounts.operator.key(),
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        management_fee_percentage,
        next_pool_prize_percentage,
        min_time_between_participation,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        init,
        payer = operator,
        space = LOTTERY_ACCOUNT_SIZE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Token the lottery is denominated in
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Prize pool, owned by the lottery PDA
    #[account(
        init,
        payer = operator,
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = lottery,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = operator,
        space = PackageCatalog::space(0),
        seeds = [PACKAGE_CATALOG_SEED, lottery.key().as_ref()],
        bump
    )]
    pub package_catalog: Account<'info, PackageCatalog>,

    #[account(
        init,
        payer = operator,
        space = WINNER_LEDGER_ACCOUNT_SIZE,
        seeds = [WINNER_LEDGER_SEED, lottery.key().as_ref()],
        bump
    )]
    pub winner_ledger: Account<'info, WinnerLedger>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
