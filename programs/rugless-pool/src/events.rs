use anchor_lang::prelude::*;

/// Emitted when a pool, its staking pool and treasury are created
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub staking_pool: Pubkey,
    pub treasury: Pubkey,
    pub swap_fee_percentage: u8,
    pub unstake_fee_percentage: u8,
    pub max_stake_percentage_a: u8,
    pub timestamp: i64,
}

/// Emitted when the authority seeds reserves
#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub timestamp: i64,
}

/// Emitted when the authority withdraws from the swappable reserves
#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub timestamp: i64,
}

/// Emitted on every swap, staked or not
#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee: u64,
    pub staked: bool,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_reserve_a: u64,
    pub total_reserve_b: u64,
    pub timestamp: i64,
}

/// Emitted when a staked swap credits a position
#[event]
pub struct StakeDeposited {
    pub staking_pool: Pubkey,
    pub holder: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub position_a: u64,
    pub position_b: u64,
    pub pool_total_staked_a: u64,
    pub timestamp: i64,
}

/// Emitted when a holder withdraws a position
#[event]
pub struct Unstaked {
    pub staking_pool: Pubkey,
    pub holder: Pubkey,
    pub payout_a: u64,
    pub payout_b: u64,
    pub fee_a: u64,
    pub treasury: Pubkey,
    pub timestamp: i64,
}
