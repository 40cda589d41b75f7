pub mod admin;
pub mod advance;
pub mod buy_native;
pub mod buy_stable;
pub mod claim;
pub mod initialize;
pub mod rescue_unsold;
pub mod stages;
pub mod update_config;
pub mod utils;
pub mod views;

pub use admin::*;
pub use advance::*;
pub use buy_native::*;
pub use buy_stable::*;
pub use claim::*;
pub use initialize::*;
pub use rescue_unsold::*;
pub use stages::*;
pub use update_config::*;
pub use views::*;
