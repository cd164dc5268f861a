pub mod initialize_pool;
pub mod liquidity;
pub mod swap;
pub mod unstake;
pub mod views;

pub use initialize_pool::*;
pub use liquidity::*;
pub use swap::*;
pub use unstake::*;
pub use views::*;
