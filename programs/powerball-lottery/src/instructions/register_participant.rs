use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, PARTICIPANT_SEED},
    state::{Lottery, Participant, PARTICIPANT_ACCOUNT_SIZE},
};

/// Creates the participation record for a user.
///
/// The account is a PDA derived from ["participant", lottery, user] and
/// starts with no round, so the user is not part of any draw until their
/// first participation. Tickets are kept apart in one entry per round.
///
/// # Access Control
/// - Anyone can register themselves, once per lottery
pub fn register_participant(ctx: Context<RegisterParticipant>) -> Result<()> {
    let participant = &mut ctx.accounts.participant;
    participant.owner = ctx.accounts.user.key();
    participant.round = 0;
    participant.contribution = 0;
    participant.last_participation = 0;
    participant.bump = ctx.bumps.participant;

    Ok(())
}

#[derive(Accounts)]
pub struct RegisterParticipant<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(seeds = [LOTTERY_SEED], bump = lottery.bump)]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = user,
        space = PARTICIPANT_ACCOUNT_SIZE,
        seeds = [
            PARTICIPANT_SEED,
            lottery.key().as_ref(),
            user.key().as_ref(),
        ],
        bump,
    )]
    pub participant: Account<'info, Participant>,

    pub system_program: Program<'info, System>,
}
