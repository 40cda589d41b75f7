pub mod buyer;
pub mod sale;
pub mod stage;

pub use buyer::*;
pub use sale::*;
pub use stage::*;
