pub mod pool;
pub mod staking_pool;
pub mod stake_position;
pub mod treasury;

pub use pool::*;
pub use staking_pool::*;
pub use stake_position::*;
pub use treasury::*;
