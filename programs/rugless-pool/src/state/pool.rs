use anchor_lang::prelude::*;

use crate::errors::RuglessError;
use crate::math;

/// Two-asset constant-product pool.
/// PDA seeds: [b"pool", mint_a.as_ref(), mint_b.as_ref()]
#[account]
#[derive(Default)]
pub struct Pool {
    /// Owner allowed to add and remove liquidity
    pub authority: Pubkey,

    /// Token A mint
    pub mint_a: Pubkey,

    /// Token B mint
    pub mint_b: Pubkey,

    /// Pool-owned token account holding reserve A
    pub vault_a: Pubkey,

    /// Pool-owned token account holding reserve B
    pub vault_b: Pubkey,

    /// Token A available for swaps and withdrawal
    pub reserve_a: u64,

    /// Token B available for swaps and withdrawal
    pub reserve_b: u64,

    /// reserve_a plus token A routed into staking and not yet unstaked
    pub total_reserve_a: u64,

    /// reserve_b plus token B routed into staking and not yet unstaked
    pub total_reserve_b: u64,

    /// Fee withheld from every swap input (0-100)
    pub swap_fee_percentage: u8,

    /// Fee charged on the A side of a position at unstake (0-100)
    pub unstake_fee_percentage: u8,

    /// Cap on token A staked pool-wide, as a percentage of reserve_a
    pub max_stake_percentage_a: u8,

    /// Staking pool created alongside this pool
    pub staking_pool: Pubkey,

    /// Number of executed swaps
    pub total_swaps: u64,

    /// Unix timestamp when created
    pub created_at: i64,

    /// PDA bump
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    /// Token A in, token B out
    AToB,
    /// Token B in, token A out
    BToA,
}

/// Fully priced swap, computed before any state is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub amount_in_after_fee: u64,
    pub amount_out: u64,
}

impl SwapQuote {
    /// Part of `amount_in` retained by the pool.
    pub fn fee(&self) -> u64 {
        self.amount_in - self.amount_in_after_fee
    }

    /// (token A, token B) legs credited to a position when the swap is staked.
    pub fn staked_amounts(&self) -> (u64, u64) {
        match self.direction {
            SwapDirection::AToB => (self.amount_in, self.amount_out),
            SwapDirection::BToA => (self.amount_out, self.amount_in),
        }
    }
}

impl Pool {
    pub const SIZE: usize = 32 + // authority
                            32 + // mint_a
                            32 + // mint_b
                            32 + // vault_a
                            32 + // vault_b
                            8 +  // reserve_a
                            8 +  // reserve_b
                            8 +  // total_reserve_a
                            8 +  // total_reserve_b
                            1 +  // swap_fee_percentage
                            1 +  // unstake_fee_percentage
                            1 +  // max_stake_percentage_a
                            32 + // staking_pool
                            8 +  // total_swaps
                            8 +  // created_at
                            1;   // bump

    pub fn validate_percentages(
        swap_fee_percentage: u8,
        unstake_fee_percentage: u8,
        max_stake_percentage_a: u8,
    ) -> Result<()> {
        require!(
            swap_fee_percentage <= math::MAX_PERCENTAGE
                && unstake_fee_percentage <= math::MAX_PERCENTAGE
                && max_stake_percentage_a <= math::MAX_PERCENTAGE,
            RuglessError::InvalidPercentage
        );
        Ok(())
    }

    pub fn record_liquidity_added(&mut self, amount_a: u64, amount_b: u64) -> Result<()> {
        require!(amount_a > 0 && amount_b > 0, RuglessError::InvalidAmount);

        let reserve_a = self.reserve_a.checked_add(amount_a).ok_or(RuglessError::Overflow)?;
        let reserve_b = self.reserve_b.checked_add(amount_b).ok_or(RuglessError::Overflow)?;
        let total_reserve_a = self
            .total_reserve_a
            .checked_add(amount_a)
            .ok_or(RuglessError::Overflow)?;
        let total_reserve_b = self
            .total_reserve_b
            .checked_add(amount_b)
            .ok_or(RuglessError::Overflow)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_reserve_a = total_reserve_a;
        self.total_reserve_b = total_reserve_b;
        Ok(())
    }

    /// Withdraws from the swappable reserves only. Staked amounts stay put.
    pub fn record_liquidity_removed(&mut self, amount_a: u64, amount_b: u64) -> Result<()> {
        require!(amount_a > 0 || amount_b > 0, RuglessError::InvalidAmount);
        require!(
            amount_a <= self.reserve_a && amount_b <= self.reserve_b,
            RuglessError::InsufficientLiquidity
        );

        self.reserve_a -= amount_a;
        self.reserve_b -= amount_b;
        self.total_reserve_a -= amount_a;
        self.total_reserve_b -= amount_b;
        Ok(())
    }

    /// Prices a swap against the current swappable reserves.
    pub fn quote_swap(
        &self,
        direction: SwapDirection,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapQuote> {
        require!(amount_in > 0, RuglessError::InvalidAmount);

        let (reserve_in, reserve_out) = match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        };

        let amount_in_after_fee = math::amount_after_fee(amount_in, self.swap_fee_percentage)?;
        let amount_out = math::constant_product_out(reserve_in, reserve_out, amount_in_after_fee)?;

        require!(amount_out > 0, RuglessError::InvalidAmount);
        require!(amount_out >= min_amount_out, RuglessError::SlippageExceeded);

        Ok(SwapQuote {
            direction,
            amount_in,
            amount_in_after_fee,
            amount_out,
        })
    }

    /// Rejects a staked swap that would push pool-wide staked token A above
    /// `max_stake_percentage_a` of the swappable reserve A as it stands before
    /// the swap settles.
    pub fn check_stake_cap(&self, quote: &SwapQuote, total_staked_a: u64) -> Result<()> {
        let (staked_a, _) = quote.staked_amounts();
        require!(
            math::within_stake_cap(
                total_staked_a,
                staked_a,
                self.reserve_a,
                self.max_stake_percentage_a
            )?,
            RuglessError::StakeCapExceeded
        );
        Ok(())
    }

    /// Settles a quote against the reserves.
    ///
    /// Direct swaps move both the swappable and the total reserves. Staked
    /// swaps send the input straight to staking, so only the total input
    /// reserve grows, and the output leaves the swappable reserve while staying
    /// in the total.
    pub fn apply_swap(&mut self, quote: &SwapQuote, stake: bool) -> Result<()> {
        let (reserve_in, total_in, reserve_out, total_out) = match quote.direction {
            SwapDirection::AToB => (
                self.reserve_a,
                self.total_reserve_a,
                self.reserve_b,
                self.total_reserve_b,
            ),
            SwapDirection::BToA => (
                self.reserve_b,
                self.total_reserve_b,
                self.reserve_a,
                self.total_reserve_a,
            ),
        };

        let reserve_in = if stake {
            reserve_in
        } else {
            reserve_in.checked_add(quote.amount_in).ok_or(RuglessError::Overflow)?
        };
        let total_in = total_in.checked_add(quote.amount_in).ok_or(RuglessError::Overflow)?;
        let reserve_out = reserve_out
            .checked_sub(quote.amount_out)
            .ok_or(RuglessError::InsufficientLiquidity)?;
        let total_out = if stake {
            total_out
        } else {
            total_out
                .checked_sub(quote.amount_out)
                .ok_or(RuglessError::InsufficientLiquidity)?
        };
        let total_swaps = self.total_swaps.checked_add(1).ok_or(RuglessError::Overflow)?;

        match quote.direction {
            SwapDirection::AToB => {
                self.reserve_a = reserve_in;
                self.total_reserve_a = total_in;
                self.reserve_b = reserve_out;
                self.total_reserve_b = total_out;
            }
            SwapDirection::BToA => {
                self.reserve_b = reserve_in;
                self.total_reserve_b = total_in;
                self.reserve_a = reserve_out;
                self.total_reserve_a = total_out;
            }
        }
        self.total_swaps = total_swaps;
        Ok(())
    }

    /// Drops unstaked amounts from the total reserves.
    pub fn release_staked(&mut self, amount_a: u64, amount_b: u64) -> Result<()> {
        let total_reserve_a = self
            .total_reserve_a
            .checked_sub(amount_a)
            .filter(|total| *total >= self.reserve_a)
            .ok_or(RuglessError::Overflow)?;
        let total_reserve_b = self
            .total_reserve_b
            .checked_sub(amount_b)
            .filter(|total| *total >= self.reserve_b)
            .ok_or(RuglessError::Overflow)?;

        self.total_reserve_a = total_reserve_a;
        self.total_reserve_b = total_reserve_b;
        Ok(())
    }

    /// reserve_a * reserve_b
    pub fn invariant_product(&self) -> u128 {
        self.reserve_a as u128 * self.reserve_b as u128
    }

    /// total_reserve_a * total_reserve_b
    pub fn total_invariant_product(&self) -> u128 {
        self.total_reserve_a as u128 * self.total_reserve_b as u128
    }

    /// Seeds the pool PDA signs vault transfers with.
    pub fn signer_seeds(&self) -> [&[u8]; 4] {
        [
            POOL_SEED,
            self.mint_a.as_ref(),
            self.mint_b.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    /// (input mint, output mint)
    pub fn mints_for(&self, direction: SwapDirection) -> (Pubkey, Pubkey) {
        match direction {
            SwapDirection::AToB => (self.mint_a, self.mint_b),
            SwapDirection::BToA => (self.mint_b, self.mint_a),
        }
    }
}

/// Seeds for Pool PDA
pub const POOL_SEED: &[u8] = b"pool";

/// Seeds for program-owned token vaults: [b"vault", owner.as_ref(), mint.as_ref()]
pub const VAULT_SEED: &[u8] = b"vault";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_rugless_err;

    fn seeded_pool() -> Pool {
        let mut pool = Pool {
            swap_fee_percentage: 2,
            unstake_fee_percentage: 5,
            max_stake_percentage_a: 50,
            ..Pool::default()
        };
        pool.record_liquidity_added(1_500, 1_000).unwrap();
        pool
    }

    #[test]
    fn liquidity_grows_both_reserve_views() {
        let pool = seeded_pool();
        assert_eq!((pool.reserve_a, pool.reserve_b), (1_500, 1_000));
        assert_eq!((pool.total_reserve_a, pool.total_reserve_b), (1_500, 1_000));
    }

    #[test]
    fn liquidity_requires_both_legs() {
        let mut pool = seeded_pool();
        assert_rugless_err(pool.record_liquidity_added(0, 10), RuglessError::InvalidAmount);
        assert_rugless_err(pool.record_liquidity_added(10, 0), RuglessError::InvalidAmount);
        assert_eq!((pool.reserve_a, pool.reserve_b), (1_500, 1_000));
    }

    #[test]
    fn liquidity_overflow_leaves_reserves() {
        let mut pool = seeded_pool();
        assert_rugless_err(
            pool.record_liquidity_added(1, u64::MAX),
            RuglessError::Overflow,
        );
        assert_eq!((pool.reserve_a, pool.reserve_b), (1_500, 1_000));
        assert_eq!(pool.total_reserve_a, 1_500);
    }

    #[test]
    fn removal_limited_to_swappable_reserve() {
        let mut pool = seeded_pool();
        let quote = pool.quote_swap(SwapDirection::BToA, 10, 0).unwrap();
        pool.apply_swap(&quote, true).unwrap();

        assert_rugless_err(
            pool.record_liquidity_removed(pool.reserve_a + 1, 0),
            RuglessError::InsufficientLiquidity,
        );
        let reserve_a = pool.reserve_a;
        pool.record_liquidity_removed(reserve_a, 0).unwrap();
        assert_eq!(pool.reserve_a, 0);
        assert_eq!(pool.total_reserve_a, quote.amount_out);
    }

    #[test]
    fn direct_b_for_a_matches_reference() {
        let mut pool = seeded_pool();
        let quote = pool.quote_swap(SwapDirection::BToA, 10, 5).unwrap();
        assert_eq!(quote.amount_in_after_fee, 9);
        assert_eq!(quote.fee(), 1);
        assert_eq!(quote.amount_out, 13);

        pool.apply_swap(&quote, false).unwrap();
        assert_eq!(pool.reserve_b, 1_010);
        assert_eq!(pool.total_reserve_b, 1_010);
        assert_eq!(pool.reserve_a, 1_487);
        assert_eq!(pool.total_reserve_a, 1_487);
        assert_eq!(pool.total_swaps, 1);
    }

    #[test]
    fn slippage_guard() {
        let pool = seeded_pool();
        assert_rugless_err(
            pool.quote_swap(SwapDirection::BToA, 10, 14),
            RuglessError::SlippageExceeded,
        );
        assert!(pool.quote_swap(SwapDirection::BToA, 10, 13).is_ok());
    }

    #[test]
    fn zero_input_and_dust_rejected() {
        let pool = seeded_pool();
        assert_rugless_err(pool.quote_swap(SwapDirection::AToB, 0, 0), RuglessError::InvalidAmount);
        // 1 * 98 / 100 rounds to nothing
        assert_rugless_err(pool.quote_swap(SwapDirection::AToB, 1, 0), RuglessError::InvalidAmount);
    }

    #[test]
    fn empty_pool_cannot_swap() {
        let pool = Pool::default();
        assert_rugless_err(
            pool.quote_swap(SwapDirection::BToA, 10, 0),
            RuglessError::InsufficientLiquidity,
        );
    }

    #[test]
    fn staked_b_for_a_keeps_swappable_b() {
        let mut pool = seeded_pool();
        let quote = pool.quote_swap(SwapDirection::BToA, 10, 5).unwrap();
        pool.check_stake_cap(&quote, 0).unwrap();
        pool.apply_swap(&quote, true).unwrap();

        assert_eq!(pool.reserve_b, 1_000);
        assert_eq!(pool.total_reserve_b, 1_010);
        assert_eq!(pool.reserve_a, 1_500 - quote.amount_out);
        assert_eq!(pool.total_reserve_a, 1_500);
        assert_eq!(quote.staked_amounts(), (quote.amount_out, 10));
    }

    #[test]
    fn staked_a_for_b_keeps_swappable_a() {
        let mut pool = seeded_pool();
        let quote = pool.quote_swap(SwapDirection::AToB, 15, 0).unwrap();
        pool.apply_swap(&quote, true).unwrap();

        assert_eq!(pool.reserve_a, 1_500);
        assert_eq!(pool.total_reserve_a, 1_515);
        assert_eq!(pool.reserve_b, 1_000 - quote.amount_out);
        assert_eq!(pool.total_reserve_b, 1_000);
        assert_eq!(quote.staked_amounts(), (15, quote.amount_out));
    }

    #[test]
    fn stake_cap_checked_against_reserve_before_swap() {
        let pool = seeded_pool();
        let quote = pool.quote_swap(SwapDirection::BToA, 10, 0).unwrap();
        assert_eq!(quote.amount_out, 13);

        // 750 is exactly 50% of 1500
        pool.check_stake_cap(&quote, 750 - 13).unwrap();
        assert_rugless_err(
            pool.check_stake_cap(&quote, 750 - 12),
            RuglessError::StakeCapExceeded,
        );
    }

    #[test]
    fn zero_cap_blocks_all_staking() {
        let mut pool = seeded_pool();
        pool.max_stake_percentage_a = 0;
        let quote = pool.quote_swap(SwapDirection::AToB, 10, 0).unwrap();
        assert_rugless_err(pool.check_stake_cap(&quote, 0), RuglessError::StakeCapExceeded);
    }

    #[test]
    fn release_restores_total_to_swappable() {
        let mut pool = seeded_pool();
        let quote = pool.quote_swap(SwapDirection::BToA, 10, 0).unwrap();
        pool.apply_swap(&quote, true).unwrap();

        let (staked_a, staked_b) = quote.staked_amounts();
        pool.release_staked(staked_a, staked_b).unwrap();
        assert_eq!(pool.total_reserve_a, pool.reserve_a);
        assert_eq!(pool.total_reserve_b, pool.reserve_b);
    }

    #[test]
    fn release_cannot_dip_into_swappable_reserve() {
        let mut pool = seeded_pool();
        assert_rugless_err(pool.release_staked(1, 0), RuglessError::Overflow);
        assert_eq!(pool.total_reserve_a, 1_500);
    }

    #[test]
    fn percentages_validated() {
        assert!(Pool::validate_percentages(0, 100, 100).is_ok());
        assert_rugless_err(Pool::validate_percentages(101, 0, 0), RuglessError::InvalidPercentage);
        assert_rugless_err(Pool::validate_percentages(0, 101, 0), RuglessError::InvalidPercentage);
        assert_rugless_err(Pool::validate_percentages(0, 0, 101), RuglessError::InvalidPercentage);
    }
}
