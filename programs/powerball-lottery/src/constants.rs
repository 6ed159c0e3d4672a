pub const LOTTERY_SEED: &[u8] = b"lottery";
pub const VAULT_SEED: &[u8] = b"vault";
pub const PACKAGE_CATALOG_SEED: &[u8] = b"package_catalog";
pub const PARTICIPANT_SEED: &[u8] = b"participant";
pub const ENTRY_SEED: &[u8] = b"entry";
pub const WINNER_LEDGER_SEED: &[u8] = b"winner_ledger";
pub const WINNER_PAGE_SEED: &[u8] = b"winner_page";

/// Main numbers on every ticket, excluding the powerball.
pub const MAIN_NUMBERS_PER_TICKET: usize = 5;

/// Number of prize divisions.
pub const DIVISION_COUNT: usize = 5;

/// Share of the pool paid per winning ticket, by division (1 through 5).
pub const DIVISION_PERCENTAGES: [u64; DIVISION_COUNT] = [70, 10, 5, 3, 2];

/// The division 1 share plus the management fee can never exceed the pool.
pub const MAX_MANAGEMENT_FEE_PERCENTAGE: u8 = 100 - DIVISION_PERCENTAGES[0] as u8;

/// Participants per round. Sizes the lottery account.
pub const MAX_PARTICIPANTS: usize = 64;

/// Packages the catalog can ever hold. Sizes the catalog account.
pub const MAX_PACKAGES: usize = 64;

/// Tickets one user can hold in a single round. Bounds the entry account
/// that every draw batch loads.
pub const MAX_TICKETS_PER_ENTRY: usize = 32;

/// Winner records stored per ledger page.
pub const WINNERS_PER_PAGE: usize = 32;

/// Entrants settled by one tally or payout instruction. A payout batch is
/// 10 fixed accounts plus two per entrant, which stays inside a legacy
/// transaction.
pub const MAX_SETTLE_BATCH: usize = 8;

/// Prize transfers made by one payout instruction. Bounds its compute use.
pub const MAX_PAYOUTS_PER_BATCH: usize = 16;

/// Round counters start at 1 so a freshly registered participant (round 0)
/// is never mistaken for an entrant.
pub const FIRST_ROUND: u64 = 1;
