use anchor_lang::prelude::*;

use crate::{constants::MAX_PACKAGES, error::LotteryError};

/// A bundle of tickets sold together at a fixed price.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Package {
    /// Number of tickets in the bundle
    pub combinations: u32,
    /// Price of the whole bundle in token base units
    pub price: u64,
    pub active: bool,
}

impl Package {
    // 4 combinations + 8 price + 1 active
    pub const SIZE: usize = 4 + 8 + 1;

    pub fn is_purchasable(&self) -> bool {
        self.active && self.combinations > 0
    }
}

/// Every package ever created, indexed by id - 1. Entries are deactivated,
/// never removed, so ids are never reused.
#[account]
pub struct PackageCatalog {
    pub lottery: Pubkey,
    pub packages: Vec<Package>,
    pub bump: u8,
}

impl PackageCatalog {
    /// 8 discriminator + 32 lottery + (4 + n * Package::SIZE) packages + 1 bump
    pub fn space(package_count: usize) -> usize {
        8 + 32 + 4 + package_count * Package::SIZE + 1
    }

    pub fn package_count(&self) -> u64 {
        self.packages.len() as u64
    }

    /// Looks up a package regardless of its active flag. Id 0 is never valid.
    pub fn package(&self, id: u64) -> Option<&Package> {
        Self::index_of(id).and_then(|index| self.packages.get(index))
    }

    /// Package that can be bought right now.
    pub fn purchasable(&self, id: u64) -> Result<&Package> {
        self.package(id)
            .filter(|package| package.is_purchasable())
            .ok_or_else(|| error!(LotteryError::InvalidPackage))
    }

    /// Active packages with their ids, in ascending id order.
    pub fn active_packages(&self) -> impl Iterator<Item = (u64, &Package)> + '_ {
        self.packages
            .iter()
            .enumerate()
            .filter(|(_, package)| package.active)
            .map(|(index, package)| (index as u64 + 1, package))
    }

    /// Appends a new active package and returns its id.
    pub fn add(&mut self, combinations: u32, price: u64) -> Result<u64> {
        require!(self.packages.len() < MAX_PACKAGES, LotteryError::CatalogFull);
        self.packages.push(Package {
            combinations,
            price,
            active: true,
        });
        Ok(self.package_count())
    }

    pub fn update(&mut self, id: u64, combinations: u32, price: u64) -> Result<()> {
        let package = self.active_package_mut(id)?;
        package.combinations = combinations;
        package.price = price;
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<()> {
        let package = self.active_package_mut(id)?;
        *package = Package::default();
        Ok(())
    }

    fn active_package_mut(&mut self, id: u64) -> Result<&mut Package> {
        Self::index_of(id)
            .and_then(|index| self.packages.get_mut(index))
            .filter(|package| package.active)
            .ok_or_else(|| error!(LotteryError::PackageNotFound))
    }

    fn index_of(id: u64) -> Option<usize> {
        id.checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
    }
}
