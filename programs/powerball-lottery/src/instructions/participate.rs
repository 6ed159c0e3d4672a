use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{
        ENTRY_SEED, LOTTERY_SEED, MAX_TICKETS_PER_ENTRY, PACKAGE_CATALOG_SEED, PARTICIPANT_SEED,
    },
    error::LotteryError,
    ledger,
    state::{Entry, Lottery, PackageCatalog, Participant},
};

/// Event emitted when a user buys a package
#[event]
pub struct TicketsPurchased {
    pub user: Pubkey,
    pub round: u64,
    pub package_id: u64,
    /// Tickets added by this purchase
    pub ticket_count: u64,
    /// Amount charged, always the package price
    pub price: u64,
    /// User's total contribution to the current round after this purchase
    pub contribution: u64,
    /// True when this purchase enrolled the user in the round
    pub first_entry: bool,
}

/// Instruction to buy a package of tickets for the current round
///
/// # Arguments
/// * `package_id` - Catalog id of an active package
/// * `main_numbers_list` - One list of 5 main numbers per ticket
/// * `powerball_numbers` - One powerball per ticket
///
/// # Checks
/// Run in this order, the first failure aborts the purchase:
/// 1. The package exists and is active
/// 2. One main-number list and one powerball per ticket in the package
/// 3. The user's token balance covers the price
/// 4. `min_time_between_participation` has passed since the user's last entry
/// 5. Every main-number list holds exactly 5 numbers
/// 6. The user holds at most `MAX_TICKETS_PER_ENTRY` tickets in the round
///
/// # Implementation Notes
/// - The price is charged once per package, not per ticket
/// - Numbers are not range checked or deduplicated
/// - Tickets go to the user's entry for the round, created at full size on
///   the first purchase of the round
/// - State is updated before the token transfer and the vault balance is
///   verified afterwards
pub fn participate(
    ctx: Context<Participate>,
    package_id: u64,
    main_numbers_list: Vec<Vec<u32>>,
    powerball_numbers: Vec<u32>,
) -> Result<()> {
    ctx.accounts.lottery.ensure_idle()?;

    let round = ctx.accounts.lottery.round;
    let package = *ctx.accounts.package_catalog.purchasable(package_id)?;
    let now = Clock::get()?.unix_timestamp;

    let tickets = ctx.accounts.participant.prepare_entry(
        &package,
        &main_numbers_list,
        &powerball_numbers,
        ctx.accounts.user_token_account.amount,
        now,
        ctx.accounts.lottery.min_time_between_participation,
    )?;
    let ticket_count = tickets.len();

    let user = ctx.accounts.user.key();
    let entry = &mut ctx.accounts.entry;
    if entry.owner == Pubkey::default() {
        entry.owner = user;
        entry.round = round;
        entry.bump = ctx.bumps.entry;
    }
    entry.append(tickets)?;

    let participant = &mut ctx.accounts.participant;
    let first_entry = participant.record_entry(round, package.price, now)?;
    if first_entry {
        ctx.accounts.lottery.enroll(user)?;
    }
    let contribution = participant.contribution(round);

    let pre_transfer_balance = ctx.accounts.vault.amount;

    ledger::collect(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.user_token_account.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.mint.to_account_info(),
        ctx.accounts.user.to_account_info(),
        package.price,
        ctx.accounts.mint.decimals,
    )?;

    ctx.accounts.vault.reload()?;
    require!(
        ctx.accounts.vault.amount
            == pre_transfer_balance
                .checked_add(package.price)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    msg!(
        "Round {}: {} bought package {} ({} tickets)",
        round,
        user,
        package_id,
        ticket_count
    );

    emit!(TicketsPurchased {
        user,
        round,
        package_id,
        ticket_count: ticket_count as u64,
        price: package.price,
        contribution,
        first_entry,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Participate<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = mint @ LotteryError::InvalidTokenAccount,
        has_one = vault @ LotteryError::InvalidTokenAccount,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        seeds = [PACKAGE_CATALOG_SEED, lottery.key().as_ref()],
        bump = package_catalog.bump,
    )]
    pub package_catalog: Box<Account<'info, PackageCatalog>>,

    /// Created beforehand with `register_participant`
    #[account(
        mut,
        seeds = [
            PARTICIPANT_SEED,
            lottery.key().as_ref(),
            user.key().as_ref(),
        ],
        bump = participant.bump,
    )]
    pub participant: Box<Account<'info, Participant>>,

    /// Tickets of the user for the current round
    #[account(
        init_if_needed,
        payer = user,
        space = Entry::space(MAX_TICKETS_PER_ENTRY),
        seeds = [
            ENTRY_SEED,
            lottery.key().as_ref(),
            &lottery.round.to_le_bytes(),
            user.key().as_ref(),
        ],
        bump,
    )]
    pub entry: Box<Account<'info, Entry>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub mint: Box<InterfaceAccount<'info, Mint>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
