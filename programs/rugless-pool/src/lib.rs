use anchor_lang::prelude::*;

pub mod state;
pub mod instructions;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod math;


use instructions::*;
use state::{StakedBalance, SwapDirection, TreasuryBalance};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Rugless Pool
///
/// Two-token constant-product pool where traders can route a swap into a
/// staking position instead of taking the output:
/// - Swap fee retained in the reserves
/// - Pool-wide cap on staked token A
/// - Unstake fee on token A forwarded to the treasury
#[program]
pub mod rugless_pool {
    use super::*;

    /// Create the pool, its staking pool and treasury
    ///
    /// # Arguments
    /// * `swap_fee_percentage` - Fee withheld from swap inputs (0-100)
    /// * `unstake_fee_percentage` - Fee on the token A side of a position (0-100)
    /// * `max_stake_percentage_a` - Cap on staked token A as a share of reserve A (0-100)
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        swap_fee_percentage: u8,
        unstake_fee_percentage: u8,
        max_stake_percentage_a: u8,
    ) -> Result<()> {
        instructions::initialize_pool::initialize_pool(
            ctx,
            swap_fee_percentage,
            unstake_fee_percentage,
            max_stake_percentage_a,
        )
    }

    /// Seed reserves with both tokens (authority only)
    pub fn add_liquidity(ctx: Context<ManageLiquidity>, amount_a: u64, amount_b: u64) -> Result<()> {
        instructions::liquidity::add_liquidity(ctx, amount_a, amount_b)
    }

    /// Withdraw from the swappable reserves (authority only)
    pub fn remove_liquidity(ctx: Context<ManageLiquidity>, amount_a: u64, amount_b: u64) -> Result<()> {
        instructions::liquidity::remove_liquidity(ctx, amount_a, amount_b)
    }

    /// Swap token A for token B, output paid to the caller
    pub fn swap_a_for_b(ctx: Context<Swap>, amount_in: u64, min_amount_out: u64) -> Result<()> {
        instructions::swap::swap(ctx, SwapDirection::AToB, amount_in, min_amount_out)
    }

    /// Swap token B for token A, output paid to the caller
    pub fn swap_b_for_a(ctx: Context<Swap>, amount_in: u64, min_amount_out: u64) -> Result<()> {
        instructions::swap::swap(ctx, SwapDirection::BToA, amount_in, min_amount_out)
    }

    /// Swap token A for token B and stake both legs
    ///
    /// Fails with `StakeCapExceeded` if staked token A would exceed the cap
    pub fn swap_a_for_b_and_stake(
        ctx: Context<SwapAndStake>,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<()> {
        instructions::swap::swap_and_stake(ctx, SwapDirection::AToB, amount_in, min_amount_out)
    }

    /// Swap token B for token A and stake both legs
    ///
    /// Fails with `StakeCapExceeded` if staked token A would exceed the cap
    pub fn swap_b_for_a_and_stake(
        ctx: Context<SwapAndStake>,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<()> {
        instructions::swap::swap_and_stake(ctx, SwapDirection::BToA, amount_in, min_amount_out)
    }

    /// Withdraw the caller's whole position, paying the unstake fee to the treasury
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::unstake(ctx)
    }

    /// Staked amounts for a holder (return data)
    pub fn get_staked_balance(ctx: Context<GetStakedBalance>, holder: Pubkey) -> Result<StakedBalance> {
        instructions::views::get_staked_balance(ctx, holder)
    }

    /// Treasury balances (return data)
    pub fn treasury_balance(ctx: Context<GetTreasuryBalance>) -> Result<TreasuryBalance> {
        instructions::views::treasury_balance(ctx)
    }
}
