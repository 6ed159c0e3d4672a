use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::TokenAccount;

use crate::{constants::ENTRY_SEED, error::LotteryError, state::Entry};

/// Grows a program-owned account to `new_len` bytes, topping up rent from
/// `payer` first. Shrinking is never needed, so smaller lengths are a no-op.
pub fn grow_account<'info>(
    account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    new_len: usize,
) -> Result<()> {
    if new_len <= account.data_len() {
        return Ok(());
    }

    let required_lamports = Rent::get()?.minimum_balance(new_len);
    let current_lamports = account.lamports();
    if current_lamports < required_lamports {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: account.clone(),
                },
            ),
            required_lamports - current_lamports,
        )?;
    }

    #[allow(deprecated)]
    account.realloc(new_len, false)?;
    Ok(())
}

/// Reads an entry passed through the remaining accounts and checks it is the
/// `round` entry of `expected_owner` for this lottery.
pub fn load_entry(
    info: &AccountInfo,
    program_id: &Pubkey,
    lottery: &Pubkey,
    round: u64,
    expected_owner: &Pubkey,
) -> Result<Entry> {
    require_keys_eq!(*info.owner, *program_id, LotteryError::ParticipantMismatch);

    let entry = {
        let data = info.try_borrow_data()?;
        Entry::try_deserialize(&mut &data[..])
            .map_err(|_| error!(LotteryError::ParticipantMismatch))?
    };
    require_keys_eq!(entry.owner, *expected_owner, LotteryError::ParticipantMismatch);
    require!(entry.round == round, LotteryError::ParticipantMismatch);

    let address = Pubkey::create_program_address(
        &[
            ENTRY_SEED,
            lottery.as_ref(),
            &round.to_le_bytes(),
            entry.owner.as_ref(),
            &[entry.bump],
        ],
        program_id,
    )
    .map_err(|_| error!(LotteryError::ParticipantMismatch))?;
    require_keys_eq!(address, *info.key, LotteryError::ParticipantMismatch);

    Ok(entry)
}

/// A prize can only be paid to a writable token account of the lottery mint
/// owned by the winner.
pub fn check_payout_account(
    info: &AccountInfo,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<()> {
    require_keys_eq!(*info.owner, *token_program, LotteryError::InvalidTokenAccount);
    require!(info.is_writable, LotteryError::InvalidTokenAccount);

    let data = info.try_borrow_data()?;
    let token_account = TokenAccount::try_deserialize(&mut &data[..])
        .map_err(|_| error!(LotteryError::InvalidTokenAccount))?;
    require_keys_eq!(token_account.owner, *owner, LotteryError::InvalidTokenAccount);
    require_keys_eq!(token_account.mint, *mint, LotteryError::InvalidTokenAccount);

    Ok(())
}
