use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, PACKAGE_CATALOG_SEED},
    error::LotteryError,
    state::{Lottery, PackageCatalog},
};

/// Event emitted when a package is withdrawn from sale
#[event]
pub struct PackageRemoved {
    pub package_id: u64,
}

/// Instruction to deactivate a package. The entry stays in the catalog with
/// its values cleared so the id is never handed out again.
pub fn remove_package(ctx: Context<RemovePackage>, package_id: u64) -> Result<()> {
    ctx.accounts.package_catalog.remove(package_id)?;

    emit!(PackageRemoved { package_id });

    Ok(())
}

#[derive(Accounts)]
pub struct RemovePackage<'info> {
    pub operator: Signer<'info>,

    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = operator @ LotteryError::Unauthorized,
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [PACKAGE_CATALOG_SEED, lottery.key().as_ref()],
        bump = package_catalog.bump,
    )]
    pub package_catalog: Account<'info, PackageCatalog>,
}
