use anchor_lang::prelude::*;

use crate::errors::RuglessError;
use crate::math;
use crate::state::StakePosition;

/// Custody and accounting for positions opened by staked swaps.
/// PDA seeds: [b"staking_pool", pool.as_ref()]
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// The only pool allowed to deposit into this staking pool
    pub pool: Pubkey,

    /// Treasury receiving unstake fees
    pub fee_recipient: Pubkey,

    /// Token A mint
    pub mint_a: Pubkey,

    /// Token B mint
    pub mint_b: Pubkey,

    /// Staking-owned token account holding staked token A
    pub vault_a: Pubkey,

    /// Staking-owned token account holding staked token B
    pub vault_b: Pubkey,

    /// Fee charged on the A side of a position at unstake (0-100)
    pub unstake_fee_percentage: u8,

    /// Token A currently staked across all positions
    pub total_staked_a: u64,

    /// Token B currently staked across all positions
    pub total_staked_b: u64,

    /// Number of non-empty positions
    pub staker_count: u32,

    /// Unstake fees sent to the treasury lifetime
    pub total_fees_a: u64,

    /// PDA bump
    pub bump: u8,
}

/// Amounts moved by a full unstake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnstakeSettlement {
    /// Position size on the A side, before the fee
    pub amount_a: u64,
    /// Token A sent to the treasury
    pub fee_a: u64,
    /// Token A sent to the holder
    pub payout_a: u64,
    /// Token B sent to the holder, never charged
    pub payout_b: u64,
}

impl StakingPool {
    pub const SIZE: usize = 32 + // pool
                            32 + // fee_recipient
                            32 + // mint_a
                            32 + // mint_b
                            32 + // vault_a
                            32 + // vault_b
                            1 +  // unstake_fee_percentage
                            8 +  // total_staked_a
                            8 +  // total_staked_b
                            4 +  // staker_count
                            8 +  // total_fees_a
                            1;   // bump

    /// Seeds the staking pool PDA signs vault transfers with.
    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [
            STAKING_POOL_SEED,
            self.pool.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    /// Credits a position. Only the owning pool may call this.
    pub fn record_deposit(
        &mut self,
        caller: &Pubkey,
        position: &mut StakePosition,
        holder: &Pubkey,
        amount_a: u64,
        amount_b: u64,
        now: i64,
    ) -> Result<()> {
        require_keys_eq!(*caller, self.pool, RuglessError::Unauthorized);
        require!(amount_a > 0 || amount_b > 0, RuglessError::InvalidAmount);

        let is_new_staker = position.is_empty();
        if !is_new_staker {
            require_keys_eq!(position.holder, *holder, RuglessError::Unauthorized);
        }

        let total_staked_a = self.total_staked_a.checked_add(amount_a).ok_or(RuglessError::Overflow)?;
        let total_staked_b = self.total_staked_b.checked_add(amount_b).ok_or(RuglessError::Overflow)?;
        let position_a = position.amount_a.checked_add(amount_a).ok_or(RuglessError::Overflow)?;
        let position_b = position.amount_b.checked_add(amount_b).ok_or(RuglessError::Overflow)?;
        let staker_count = if is_new_staker {
            self.staker_count.checked_add(1).ok_or(RuglessError::Overflow)?
        } else {
            self.staker_count
        };

        if is_new_staker {
            position.holder = *holder;
            position.staked_at = now;
        }
        position.amount_a = position_a;
        position.amount_b = position_b;
        position.last_deposit_at = now;

        self.total_staked_a = total_staked_a;
        self.total_staked_b = total_staked_b;
        self.staker_count = staker_count;
        Ok(())
    }

    /// Splits a whole position into fee and payouts. Reads only.
    pub fn quote_unstake(&self, position: &StakePosition) -> Result<UnstakeSettlement> {
        require!(!position.is_empty(), RuglessError::NoStakedPosition);

        let fee_a = math::percentage_of(position.amount_a, self.unstake_fee_percentage)?;
        Ok(UnstakeSettlement {
            amount_a: position.amount_a,
            fee_a,
            payout_a: position.amount_a - fee_a,
            payout_b: position.amount_b,
        })
    }

    /// Zeroes the position and removes it from the pool-wide totals.
    pub fn apply_unstake(
        &mut self,
        position: &mut StakePosition,
        settlement: &UnstakeSettlement,
    ) -> Result<()> {
        require!(
            position.amount_a == settlement.amount_a && position.amount_b == settlement.payout_b,
            RuglessError::NoStakedPosition
        );

        let total_staked_a = self
            .total_staked_a
            .checked_sub(settlement.amount_a)
            .ok_or(RuglessError::Overflow)?;
        let total_staked_b = self
            .total_staked_b
            .checked_sub(settlement.payout_b)
            .ok_or(RuglessError::Overflow)?;
        let total_fees_a = self
            .total_fees_a
            .checked_add(settlement.fee_a)
            .ok_or(RuglessError::Overflow)?;

        position.amount_a = 0;
        position.amount_b = 0;

        self.total_staked_a = total_staked_a;
        self.total_staked_b = total_staked_b;
        self.total_fees_a = total_fees_a;
        self.staker_count = self.staker_count.saturating_sub(1);
        Ok(())
    }
}

/// Seeds for StakingPool PDA
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
