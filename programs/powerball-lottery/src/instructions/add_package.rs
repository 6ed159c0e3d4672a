use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, PACKAGE_CATALOG_SEED},
    error::LotteryError,
    state::{Lottery, PackageCatalog},
    utils::grow_account,
};

/// Event emitted when a package is added to the catalog
#[event]
pub struct PackageAdded {
    pub package_id: u64,
    /// Number of tickets in the package
    pub combinations: u32,
    /// Price of the package in token base units
    pub price: u64,
}

/// Instruction to add a ticket package to the catalog
///
/// # Arguments
/// * `combinations` - Number of tickets sold together
/// * `price` - Price of the whole package in token base units
///
/// # Implementation Notes
/// - The operator is trusted, so values are not range checked
/// - Grows the catalog account by one entry, the operator pays the extra rent
/// - Ids start at 1 and are never reused
/// - The catalog holds at most `MAX_PACKAGES` packages, removed ones included
pub fn add_package(ctx: Context<AddPackage>, combinations: u32, price: u64) -> Result<()> {
    let catalog_info = ctx.accounts.package_catalog.to_account_info();
    let new_len = PackageCatalog::space(ctx.accounts.package_catalog.packages.len() + 1);
    grow_account(
        &catalog_info,
        &ctx.accounts.operator.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        new_len,
    )?;

    let package_id = ctx.accounts.package_catalog.add(combinations, price)?;

    emit!(PackageAdded {
        package_id,
        combinations,
        price,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AddPackage<'info> {
    #[account(mut)]
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

    pub system_program: Program<'info, System>,
}
