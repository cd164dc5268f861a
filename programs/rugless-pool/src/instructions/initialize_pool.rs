use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::RuglessError;
use crate::state::*;

/// Create a pool together with its staking pool, treasury and all vaults
pub fn initialize_pool(
    ctx: Context<InitializePool>,
    swap_fee_percentage: u8,
    unstake_fee_percentage: u8,
    max_stake_percentage_a: u8,
) -> Result<()> {
    Pool::validate_percentages(
        swap_fee_percentage,
        unstake_fee_percentage,
        max_stake_percentage_a,
    )?;

    let clock = Clock::get()?;
    let pool_key = ctx.accounts.pool.key();
    let staking_pool_key = ctx.accounts.staking_pool.key();
    let treasury_key = ctx.accounts.treasury.key();

    // Initialize Pool
    let pool = &mut ctx.accounts.pool;
    pool.authority = ctx.accounts.authority.key();
    pool.mint_a = ctx.accounts.mint_a.key();
    pool.mint_b = ctx.accounts.mint_b.key();
    pool.vault_a = ctx.accounts.pool_vault_a.key();
    pool.vault_b = ctx.accounts.pool_vault_b.key();
    pool.reserve_a = 0;
    pool.reserve_b = 0;
    pool.total_reserve_a = 0;
    pool.total_reserve_b = 0;
    pool.swap_fee_percentage = swap_fee_percentage;
    pool.unstake_fee_percentage = unstake_fee_percentage;
    pool.max_stake_percentage_a = max_stake_percentage_a;
    pool.staking_pool = staking_pool_key;
    pool.total_swaps = 0;
    pool.created_at = clock.unix_timestamp;
    pool.bump = ctx.bumps.pool;

    // Initialize Staking Pool
    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.pool = pool_key;
    staking_pool.fee_recipient = treasury_key;
    staking_pool.mint_a = ctx.accounts.mint_a.key();
    staking_pool.mint_b = ctx.accounts.mint_b.key();
    staking_pool.vault_a = ctx.accounts.staking_vault_a.key();
    staking_pool.vault_b = ctx.accounts.staking_vault_b.key();
    staking_pool.unstake_fee_percentage = unstake_fee_percentage;
    staking_pool.total_staked_a = 0;
    staking_pool.total_staked_b = 0;
    staking_pool.staker_count = 0;
    staking_pool.total_fees_a = 0;
    staking_pool.bump = ctx.bumps.staking_pool;

    // Initialize Treasury
    let treasury = &mut ctx.accounts.treasury;
    treasury.staking_pool = staking_pool_key;
    treasury.vault_a = ctx.accounts.treasury_vault_a.key();
    treasury.vault_b = ctx.accounts.treasury_vault_b.key();
    treasury.total_received_a = 0;
    treasury.total_received_b = 0;
    treasury.last_credit_at = 0;
    treasury.bump = ctx.bumps.treasury;

    emit!(crate::events::PoolInitialized {
        pool: pool_key,
        authority: ctx.accounts.authority.key(),
        mint_a: ctx.accounts.mint_a.key(),
        mint_b: ctx.accounts.mint_b.key(),
        staking_pool: staking_pool_key,
        treasury: treasury_key,
        swap_fee_percentage,
        unstake_fee_percentage,
        max_stake_percentage_a,
        timestamp: clock.unix_timestamp,
    });

    msg!("Pool initialized: {}", pool_key);
    msg!("Swap fee: {}%, Unstake fee: {}%, Max stake A: {}%",
        swap_fee_percentage, unstake_fee_percentage, max_stake_percentage_a);

    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Pool owner, pays for account creation
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Token A mint
    pub mint_a: Box<Account<'info, Mint>>,

    /// Token B mint
    #[account(constraint = mint_b.key() != mint_a.key() @ RuglessError::InvalidTokenMint)]
    pub mint_b: Box<Account<'info, Mint>>,

    /// Pool PDA
    #[account(
        init,
        payer = authority,
        space = 8 + Pool::SIZE,
        seeds = [POOL_SEED, mint_a.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// Reserve A vault
    #[account(
        init,
        payer = authority,
        token::mint = mint_a,
        token::authority = pool,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_a.key().as_ref()],
        bump
    )]
    pub pool_vault_a: Box<Account<'info, TokenAccount>>,

    /// Reserve B vault
    #[account(
        init,
        payer = authority,
        token::mint = mint_b,
        token::authority = pool,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub pool_vault_b: Box<Account<'info, TokenAccount>>,

    /// Staking pool PDA
    #[account(
        init,
        payer = authority,
        space = 8 + StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, pool.key().as_ref()],
        bump
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    /// Staked token A custody
    #[account(
        init,
        payer = authority,
        token::mint = mint_a,
        token::authority = staking_pool,
        seeds = [VAULT_SEED, staking_pool.key().as_ref(), mint_a.key().as_ref()],
        bump
    )]
    pub staking_vault_a: Box<Account<'info, TokenAccount>>,

    /// Staked token B custody
    #[account(
        init,
        payer = authority,
        token::mint = mint_b,
        token::authority = staking_pool,
        seeds = [VAULT_SEED, staking_pool.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub staking_vault_b: Box<Account<'info, TokenAccount>>,

    /// Treasury PDA
    #[account(
        init,
        payer = authority,
        space = 8 + Treasury::SIZE,
        seeds = [TREASURY_SEED, staking_pool.key().as_ref()],
        bump
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    /// Treasury token A vault
    #[account(
        init,
        payer = authority,
        token::mint = mint_a,
        token::authority = treasury,
        seeds = [VAULT_SEED, treasury.key().as_ref(), mint_a.key().as_ref()],
        bump
    )]
    pub treasury_vault_a: Box<Account<'info, TokenAccount>>,

    /// Treasury token B vault
    #[account(
        init,
        payer = authority,
        token::mint = mint_b,
        token::authority = treasury,
        seeds = [VAULT_SEED, treasury.key().as_ref(), mint_b.key().as_ref()],
        bump
    )]
    pub treasury_vault_b: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}
