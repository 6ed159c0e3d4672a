pub mod add_package;
pub mod cancel_draw;
pub mod initialize;
pub mod participate;
pub mod pay_batch;
pub mod register_participant;
pub mod remove_package;
pub mod select_winner;
pub mod tally_batch;
pub mod transfer_operator;
pub mod update_package;
pub mod update_settings;

pub use add_package::*;
pub use cancel_draw::*;
pub use initialize::*;
pub use participate::*;
pub use pay_batch::*;
pub use register_participant::*;
pub use remove_package::*;
pub use select_winner::*;
pub use tally_batch::*;
pub use transfer_operator::*;
pub use update_package::*;
pub use update_settings::*;
