//! Integer pricing and fee math.
//!
//! Every amount is a `u64` in the token's smallest unit. Intermediate
//! products are taken in `u128` and every operation is checked. Rounding
//! always goes in the pool's favour.

use anchor_lang::prelude::*;

use crate::errors::RuglessError;

/// Denominator for all percentage parameters.
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Largest accepted percentage parameter.
pub const MAX_PERCENTAGE: u8 = 100;

/// `floor(amount * percentage / 100)`.
pub fn percentage_of(amount: u64, percentage: u8) -> Result<u64> {
    require!(percentage <= MAX_PERCENTAGE, RuglessError::InvalidPercentage);

    let scaled = (amount as u128)
        .checked_mul(percentage as u128)
        .ok_or(RuglessError::Overflow)?;
    let result = scaled / PERCENT_DENOMINATOR as u128;

    u64::try_from(result).map_err(|_| error!(RuglessError::Overflow))
}

/// Input left to price a swap once the swap fee is withheld:
/// `floor(amount_in * (100 - fee) / 100)`.
///
/// The withheld part (`amount_in - result`) stays in the input reserve.
pub fn amount_after_fee(amount_in: u64, swap_fee_percentage: u8) -> Result<u64> {
    require!(
        swap_fee_percentage <= MAX_PERCENTAGE,
        RuglessError::InvalidPercentage
    );
    percentage_of(amount_in, MAX_PERCENTAGE - swap_fee_percentage)
}

/// Constant-product output for a fee-adjusted input:
///
/// ```text
/// out = floor(reserve_out * dx / (reserve_in + dx))
///     = reserve_out - ceil(reserve_in * reserve_out / (reserve_in + dx))
/// ```
///
/// Flooring the output keeps `(reserve_in + dx) * (reserve_out - out)` at or
/// above `reserve_in * reserve_out`.
pub fn constant_product_out(reserve_in: u64, reserve_out: u64, amount_in_after_fee: u64) -> Result<u64> {
    require!(
        reserve_in > 0 && reserve_out > 0,
        RuglessError::InsufficientLiquidity
    );

    let numerator = (reserve_out as u128)
        .checked_mul(amount_in_after_fee as u128)
        .ok_or(RuglessError::Overflow)?;
    let denominator = (reserve_in as u128)
        .checked_add(amount_in_after_fee as u128)
        .ok_or(RuglessError::Overflow)?;

    // reserve_in > 0 so the quotient is strictly below reserve_out
    u64::try_from(numerator / denominator).map_err(|_| error!(RuglessError::Overflow))
}

/// Whether staking `additional_a` on top of `staked_a` stays within
/// `max_percentage` of `reserve_a`. Compared as
/// `(staked_a + additional_a) * 100 <= reserve_a * max_percentage`
/// so no rounding is involved.
pub fn within_stake_cap(
    staked_a: u64,
    additional_a: u64,
    reserve_a: u64,
    max_percentage: u8,
) -> Result<bool> {
    require!(max_percentage <= MAX_PERCENTAGE, RuglessError::InvalidPercentage);

    let projected = (staked_a as u128)
        .checked_add(additional_a as u128)
        .ok_or(RuglessError::Overflow)?
        .checked_mul(PERCENT_DENOMINATOR as u128)
        .ok_or(RuglessError::Overflow)?;
    let limit = (reserve_a as u128)
        .checked_mul(max_percentage as u128)
        .ok_or(RuglessError::Overflow)?;

    Ok(projected <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_rugless_err;

    #[test]
    fn percentage_boundaries() {
        assert_eq!(percentage_of(1_000, 0).unwrap(), 0);
        assert_eq!(percentage_of(1_000, 100).unwrap(), 1_000);
        // exact
        assert_eq!(percentage_of(200, 5).unwrap(), 10);
        // inexact rounds down
        assert_eq!(percentage_of(199, 5).unwrap(), 9);
        assert_eq!(percentage_of(19, 5).unwrap(), 0);
        assert_eq!(percentage_of(u64::MAX, 100).unwrap(), u64::MAX);
    }

    #[test]
    fn percentage_above_hundred_rejected() {
        assert_rugless_err(percentage_of(1, 101), RuglessError::InvalidPercentage);
    }

    #[test]
    fn fee_is_withheld_from_input() {
        assert_eq!(amount_after_fee(10, 2).unwrap(), 9);
        assert_eq!(amount_after_fee(100, 2).unwrap(), 98);
        assert_eq!(amount_after_fee(100, 0).unwrap(), 100);
        assert_eq!(amount_after_fee(100, 100).unwrap(), 0);
        assert_eq!(amount_after_fee(1, 1).unwrap(), 0);
    }

    #[test]
    fn constant_product_reference_values() {
        // 1500 * 9 / 1009 = 13.38
        assert_eq!(constant_product_out(1_000, 1_500, 9).unwrap(), 13);
        // exact division
        assert_eq!(constant_product_out(100, 100, 100).unwrap(), 50);
        assert_eq!(constant_product_out(1_000, 1_500, 0).unwrap(), 0);
    }

    #[test]
    fn constant_product_never_drains_reserve() {
        let out = constant_product_out(1, 1_000_000, u64::MAX).unwrap();
        assert!(out < 1_000_000);
    }

    #[test]
    fn empty_reserves_rejected() {
        assert_rugless_err(constant_product_out(0, 1_000, 10), RuglessError::InsufficientLiquidity);
        assert_rugless_err(constant_product_out(1_000, 0, 10), RuglessError::InsufficientLiquidity);
    }

    #[test]
    fn stake_cap_boundary() {
        // 50% of 1500 is exactly 750
        assert!(within_stake_cap(0, 750, 1_500, 50).unwrap());
        assert!(!within_stake_cap(0, 751, 1_500, 50).unwrap());
        assert!(within_stake_cap(700, 50, 1_500, 50).unwrap());
        assert!(!within_stake_cap(700, 51, 1_500, 50).unwrap());
        // odd reserve: 50% of 1501 is 750.5
        assert!(within_stake_cap(0, 750, 1_501, 50).unwrap());
        assert!(!within_stake_cap(0, 751, 1_501, 50).unwrap());
        assert!(!within_stake_cap(0, 1, 1_500, 0).unwrap());
        assert!(within_stake_cap(0, 0, 1_500, 0).unwrap());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn product_never_decreases(
            reserve_in in 1u64..1_000_000_000_000,
            reserve_out in 1u64..1_000_000_000_000,
            amount_in in 1u64..1_000_000_000,
            fee in 0u8..=100,
        ) {
            let net = amount_after_fee(amount_in, fee).unwrap();
            let out = constant_product_out(reserve_in, reserve_out, net).unwrap();
            prop_assert!(out < reserve_out);

            let before = reserve_in as u128 * reserve_out as u128;
            let after = (reserve_in as u128 + amount_in as u128) * (reserve_out - out) as u128;
            prop_assert!(after >= before);
        }

        #[test]
        fn fee_and_net_sum_to_input(amount in any::<u64>(), fee in 0u8..=100) {
            let net = amount_after_fee(amount, fee).unwrap();
            prop_assert!(net <= amount);
            let withheld = amount - net;
            // withheld fee is the ceiling of amount * fee / 100
            let exact = amount as u128 * fee as u128;
            prop_assert_eq!(withheld as u128, (exact + 99) / 100);
        }
    }
}
