use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, PACKAGE_CATALOG_SEED},
    error::LotteryError,
    state::{Lottery, PackageCatalog},
};

/// Event emitted when an active package changes
#[event]
pub struct PackageUpdated {
    pub package_id: u64,
    pub combinations: u32,
    pub price: u64,
}

/// Instruction to change the size and price of an active package.
/// Fails with `PackageNotFound` for unknown or removed packages.
pub fn update_package(
    ctx: Context<UpdatePackage>,
    package_id: u64,
    combinations: u32,
    price: u64,
) -> Result<()> {
    ctx.accounts
        .package_catalog
        .update(package_id, combinations, price)?;

    emit!(PackageUpdated {
        package_id,
        combinations,
        price,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdatePackage<'info> {
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
