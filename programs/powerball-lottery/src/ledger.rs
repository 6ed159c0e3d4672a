//! Token movements in and out of the prize vault.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, TransferChecked};

use crate::constants::LOTTERY_SEED;

/// Moves `amount` from a user's token account into the vault. The user signs.
pub fn collect<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    owner: AccountInfo<'info>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                mint,
                to: vault,
                authority: owner,
            },
        ),
        amount,
        decimals,
    )
}

/// Moves `amount` out of the vault, signed by the lottery PDA. Zero amounts
/// are skipped.
pub fn pay_out<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    lottery: AccountInfo<'info>,
    lottery_bump: u8,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let signer_seeds: &[&[&[u8]]] = &[&[LOTTERY_SEED, &[lottery_bump]]];
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: vault,
                mint,
                to,
                authority: lottery,
            },
            signer_seeds,
        ),
        amount,
        decimals,
    )
}
