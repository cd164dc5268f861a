use anchor_lang::prelude::*;

/// A holder's staked position.
/// PDA seeds: [b"stake", staking_pool.as_ref(), holder.as_ref()]
#[account]
#[derive(Default)]
pub struct StakePosition {
    /// Owner of this position
    pub holder: Pubkey,

    /// Staking pool this position belongs to
    pub staking_pool: Pubkey,

    /// Token A staked
    pub amount_a: u64,

    /// Token B staked
    pub amount_b: u64,

    /// Unix timestamp of the first deposit into the current position
    pub staked_at: i64,

    /// Unix timestamp of the latest deposit
    pub last_deposit_at: i64,

    /// PDA bump
    pub bump: u8,
}

impl StakePosition {
    pub const SIZE: usize = 32 + // holder
                            32 + // staking_pool
                            8 +  // amount_a
                            8 +  // amount_b
                            8 +  // staked_at
                            8 +  // last_deposit_at
                            1;   // bump

    pub fn is_empty(&self) -> bool {
        self.amount_a == 0 && self.amount_b == 0
    }

    pub fn balance(&self) -> StakedBalance {
        StakedBalance {
            amount_a: self.amount_a,
            amount_b: self.amount_b,
        }
    }
}

/// Returned by `get_staked_balance`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakedBalance {
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Seeds for StakePosition PDA
pub const STAKE_POSITION_SEED: &[u8] = b"stake";
