use anchor_lang::prelude::*;

use crate::errors::RuglessError;

/// Protocol treasury receiving unstake fees.
/// Holds one vault per asset and never pays out through this program.
/// PDA seeds: [b"treasury", staking_pool.as_ref()]
#[account]
#[derive(Default)]
pub struct Treasury {
    /// Staking pool whose unstake fees land here
    pub staking_pool: Pubkey,

    /// Treasury-owned token account for token A
    pub vault_a: Pubkey,

    /// Treasury-owned token account for token B
    pub vault_b: Pubkey,

    /// Token A received lifetime
    pub total_received_a: u64,

    /// Token B received lifetime
    pub total_received_b: u64,

    /// Unix timestamp of the last credit
    pub last_credit_at: i64,

    /// PDA bump
    pub bump: u8,
}

impl Treasury {
    pub const SIZE: usize = 32 + // staking_pool
                            32 + // vault_a
                            32 + // vault_b
                            8 +  // total_received_a
                            8 +  // total_received_b
                            8 +  // last_credit_at
                            1;   // bump

    /// Records an unstake fee. Unstake fees are only ever taken in token A.
    pub fn credit_unstake_fee(&mut self, fee_a: u64, now: i64) -> Result<()> {
        self.total_received_a = self
            .total_received_a
            .checked_add(fee_a)
            .ok_or(RuglessError::Overflow)?;
        self.last_credit_at = now;
        Ok(())
    }
}

/// Returned by `treasury_balance`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreasuryBalance {
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Seeds for Treasury PDA
pub const TREASURY_SEED: &[u8] = b"treasury";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_accumulates_token_a_only() {
        let mut treasury = Treasury::default();
        treasury.credit_unstake_fee(10, 1).unwrap();
        treasury.credit_unstake_fee(0, 2).unwrap();
        treasury.credit_unstake_fee(5, 3).unwrap();

        assert_eq!(treasury.total_received_a, 15);
        assert_eq!(treasury.total_received_b, 0);
        assert_eq!(treasury.last_credit_at, 3);
    }
}
