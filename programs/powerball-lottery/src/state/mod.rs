pub use entry::*;
pub use lottery::*;
pub use package_catalog::*;
pub use participant::*;
pub use winner_ledger::*;

pub mod entry;
pub mod lottery;
pub mod package_catalog;
pub mod participant;
pub mod winner_ledger;
