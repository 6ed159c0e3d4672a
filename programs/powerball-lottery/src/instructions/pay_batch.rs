use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{
        DIVISION_COUNT, LOTTERY_SEED, MAIN_NUMBERS_PER_TICKET, MAX_PAYOUTS_PER_BATCH,
        WINNER_LEDGER_SEED, WINNER_PAGE_SEED,
    },
    error::LotteryError,
    ledger, settlement,
    state::{DrawPhase, DrawState, Lottery, WinnerLedger, WinnerPage, WinnerRecord},
    utils::{check_payout_account, load_entry},
};

/// Event emitted when a draw settles a round
#[event]
pub struct DrawCompleted {
    /// The round that was settled
    pub round: u64,
    pub winning_numbers: [u32; MAIN_NUMBERS_PER_TICKET],
    pub powerball_number: u32,
    /// Vault balance the prizes were computed from
    pub pool_balance: u64,
    /// Winning tickets per division
    pub winning_counts: [u32; DIVISION_COUNT],
    /// Prize paid to each winning ticket, per division
    pub division_prizes: [u64; DIVISION_COUNT],
    /// Sum of every prize paid by the draw
    pub total_prizes: u64,
    pub management_fee: u64,
    /// Amount left in the vault for the next round
    pub next_pool_prize: u64,
}

/// Instruction to pay the winners of the next entrants
///
/// # Remaining Accounts
/// Two accounts per participant, in enrollment order starting at the draw
/// cursor, at most `MAX_SETTLE_BATCH` participants:
/// the participant's entry for the round, then the participant's token
/// account for the lottery mint (writable). A round without participants is
/// paid with no accounts.
///
/// # Settlement
/// - Every winning ticket is paid the full prize of its division and
///   recorded in the current winner page
/// - A batch stops early after `MAX_PAYOUTS_PER_BATCH` transfers or when the
///   page fills up. The next batch resumes at the first unpaid ticket
/// - The batch that pays the last entrant also pays the management fee and
///   advances the round, which clears every contribution and the
///   participant set at once. The next pool prize never leaves the vault
/// - The vault balance is verified after every batch
pub fn pay_batch<'info>(ctx: Context<'_, '_, 'info, 'info, PayBatch<'info>>) -> Result<()> {
    ctx.accounts.lottery.ensure_phase(DrawPhase::Paying)?;

    let round = ctx.accounts.lottery.round;
    let lottery_key = ctx.accounts.lottery.key();
    let lottery_bump = ctx.accounts.lottery.bump;
    let DrawState {
        winning_draw,
        schedule,
        winning_counts,
        ticket_cursor,
        ..
    } = ctx.accounts.lottery.draw;
    let remaining_accounts = ctx.remaining_accounts;
    let entrants = ctx
        .accounts
        .lottery
        .next_batch(remaining_accounts.len(), 2)?
        .to_vec();

    let page = &mut ctx.accounts.winner_page;
    if page.lottery == Pubkey::default() {
        page.lottery = lottery_key;
        page.index = ctx.accounts.winner_ledger.current_page();
        page.bump = ctx.bumps.winner_page;
    }

    let mint_key = ctx.accounts.mint.key();
    let token_program_key = ctx.accounts.token_program.key();
    let decimals = ctx.accounts.mint.decimals;
    let pre_transfer_balance = ctx.accounts.vault.amount;

    let mut paid = 0u64;
    let mut payouts = 0usize;
    let mut settled = 0usize;
    let mut resume_at = 0u32;
    let mut first_ticket = ticket_cursor as usize;

    'entrants: for (expected_owner, accounts) in
        entrants.iter().zip(remaining_accounts.chunks_exact(2))
    {
        let entry = load_entry(&accounts[0], ctx.program_id, &lottery_key, round, expected_owner)?;
        check_payout_account(&accounts[1], &entry.owner, &mint_key, &token_program_key)?;

        for (index, division) in
            settlement::winning_tickets(&winning_draw, &entry.tickets, first_ticket)
        {
            if payouts == MAX_PAYOUTS_PER_BATCH || ctx.accounts.winner_page.is_full() {
                resume_at = u32::try_from(index).map_err(|_| error!(LotteryError::Overflow))?;
                break 'entrants;
            }

            let prize = schedule.prize_for(division);
            ledger::pay_out(
                ctx.accounts.token_program.to_account_info(),
                ctx.accounts.vault.to_account_info(),
                accounts[1].clone(),
                ctx.accounts.mint.to_account_info(),
                ctx.accounts.lottery.to_account_info(),
                lottery_bump,
                prize,
                decimals,
            )?;
            ctx.accounts.winner_ledger.record(
                &mut ctx.accounts.winner_page,
                WinnerRecord::new(entry.owner, &entry.tickets[index], division, round),
            )?;
            paid = paid.checked_add(prize).ok_or(LotteryError::Overflow)?;
            payouts += 1;
        }

        settled += 1;
        first_ticket = 0;
    }

    let finished = ctx
        .accounts
        .lottery
        .record_payouts(settled, resume_at, paid)?;

    let mut disbursement = paid;
    if finished {
        ledger::pay_out(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.operator_token_account.to_account_info(),
            ctx.accounts.mint.to_account_info(),
            ctx.accounts.lottery.to_account_info(),
            lottery_bump,
            schedule.management_fee,
            decimals,
        )?;
        disbursement = disbursement
            .checked_add(schedule.management_fee)
            .ok_or(LotteryError::Overflow)?;
    }

    ctx.accounts.vault.reload()?;
    require!(
        ctx.accounts.vault.amount
            == pre_transfer_balance
                .checked_sub(disbursement)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    if !finished {
        msg!(
            "Round {}: paid {} to {} entrants, resuming at ticket {}",
            round,
            paid,
            settled,
            resume_at
        );
        return Ok(());
    }

    let total_prizes = ctx.accounts.lottery.draw.paid;
    ctx.accounts
        .lottery
        .complete_round(schedule.next_pool_prize)?;

    msg!(
        "Round {} settled: prizes {}, fee {}, carried {}",
        round,
        total_prizes,
        schedule.management_fee,
        schedule.next_pool_prize
    );

    emit!(DrawCompleted {
        round,
        winning_numbers: winning_draw.main_numbers,
        powerball_number: winning_draw.powerball,
        pool_balance: schedule.pool_balance,
        winning_counts,
        division_prizes: schedule.division_prizes,
        total_prizes,
        management_fee: schedule.management_fee,
        next_pool_prize: schedule.next_pool_prize,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct PayBatch<'info> {
    /// Pays for new winner pages
    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::Unauthorized,
        has_one = mint @ LotteryError::InvalidTokenAccount,
        has_one = vault @ LotteryError::InvalidTokenAccount,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        mut,
        seeds = [WINNER_LEDGER_SEED, lottery.key().as_ref()],
        bump = winner_ledger.bump,
    )]
    pub winner_ledger: Box<Account<'info, WinnerLedger>>,

    /// Page receiving this batch's winners, created when the previous one is
    /// full
    #[account(
        init_if_needed,
        payer = operator,
        space = WinnerPage::SPACE,
        seeds = [
            WINNER_PAGE_SEED,
            lottery.key().as_ref(),
            &winner_ledger.current_page().to_le_bytes(),
        ],
        bump,
    )]
    pub winner_page: Box<Account<'info, WinnerPage>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the management fee
    #[account(
        mut,
        token::mint = mint,
        token::authority = operator,
        token::token_program = token_program,
    )]
    pub operator_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub mint: Box<InterfaceAccount<'info, Mint>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
