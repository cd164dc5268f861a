use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::RuglessError;
use crate::events::{StakeDeposited, SwapExecuted};
use crate::ledger;
use crate::state::*;

/// Swap against the reserves and pay the output to the caller
pub fn swap(
    ctx: Context<Swap>,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<()> {
    let user = ctx.accounts.user.key();
    let quote = ctx.accounts.pool.quote_swap(direction, amount_in, min_amount_out)?;

    let accounts = &ctx.accounts;
    let (user_source, user_destination, vault_in, vault_out) = match direction {
        SwapDirection::AToB => (
            &accounts.user_token_a,
            &accounts.user_token_b,
            &accounts.vault_a,
            &accounts.vault_b,
        ),
        SwapDirection::BToA => (
            &accounts.user_token_b,
            &accounts.user_token_a,
            &accounts.vault_b,
            &accounts.vault_a,
        ),
    };
    ledger::ensure_spendable(user_source, &user, amount_in)?;
    ledger::ensure_custody(vault_out, quote.amount_out)?;

    let user_source = user_source.to_account_info();
    let user_destination = user_destination.to_account_info();
    let vault_in = vault_in.to_account_info();
    let vault_out = vault_out.to_account_info();

    ctx.accounts.pool.apply_swap(&quote, false)?;

    let pool = &ctx.accounts.pool;
    let signer_seeds = pool.signer_seeds();
    let token_program = ctx.accounts.token_program.to_account_info();

    // Input from the caller into the pool
    ledger::transfer(
        token_program.clone(),
        user_source,
        vault_in,
        ctx.accounts.user.to_account_info(),
        amount_in,
    )?;

    // Output from the pool to the caller
    ledger::transfer_signed(
        token_program,
        vault_out,
        user_destination,
        pool.to_account_info(),
        &[&signer_seeds[..]],
        quote.amount_out,
    )?;

    let (input_mint, output_mint) = pool.mints_for(direction);
    emit!(SwapExecuted {
        pool: pool.key(),
        user,
        input_mint,
        output_mint,
        amount_in,
        amount_out: quote.amount_out,
        fee: quote.fee(),
        staked: false,
        reserve_a: pool.reserve_a,
        reserve_b: pool.reserve_b,
        total_reserve_a: pool.total_reserve_a,
        total_reserve_b: pool.total_reserve_b,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Swapped {} {} for {} {}", amount_in, input_mint, quote.amount_out, output_mint);
    msg!("Reserves: {} A, {} B", pool.reserve_a, pool.reserve_b);

    Ok(())
}

/// Swap and deposit both legs into the caller's staking position
pub fn swap_and_stake(
    ctx: Context<SwapAndStake>,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<()> {
    let user = ctx.accounts.user.key();
    let pool_key = ctx.accounts.pool.key();
    let staking_pool_key = ctx.accounts.staking_pool.key();
    let clock = Clock::get()?;

    let quote = ctx.accounts.pool.quote_swap(direction, amount_in, min_amount_out)?;
    ctx.accounts
        .pool
        .check_stake_cap(&quote, ctx.accounts.staking_pool.total_staked_a)?;

    let accounts = &ctx.accounts;
    let (user_source, vault_out, staking_vault_in, staking_vault_out) = match direction {
        SwapDirection::AToB => (
            &accounts.user_token_a,
            &accounts.vault_b,
            &accounts.staking_vault_a,
            &accounts.staking_vault_b,
        ),
        SwapDirection::BToA => (
            &accounts.user_token_b,
            &accounts.vault_a,
            &accounts.staking_vault_b,
            &accounts.staking_vault_a,
        ),
    };
    ledger::ensure_spendable(user_source, &user, amount_in)?;
    ledger::ensure_custody(vault_out, quote.amount_out)?;

    let user_source = user_source.to_account_info();
    let vault_out = vault_out.to_account_info();
    let staking_vault_in = staking_vault_in.to_account_info();
    let staking_vault_out = staking_vault_out.to_account_info();

    ctx.accounts.pool.apply_swap(&quote, true)?;

    let (stake_a, stake_b) = quote.staked_amounts();
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.stake_position;
    if position.staking_pool == Pubkey::default() {
        position.staking_pool = staking_pool_key;
        position.bump = ctx.bumps.stake_position;
    }
    staking_pool.record_deposit(
        &pool_key,
        position,
        &user,
        stake_a,
        stake_b,
        clock.unix_timestamp,
    )?;

    let pool = &ctx.accounts.pool;
    let signer_seeds = pool.signer_seeds();
    let token_program = ctx.accounts.token_program.to_account_info();

    // Input goes straight from the caller into staking custody
    ledger::transfer(
        token_program.clone(),
        user_source,
        staking_vault_in,
        ctx.accounts.user.to_account_info(),
        amount_in,
    )?;

    // Output moves from the reserve into staking custody
    ledger::transfer_signed(
        token_program,
        vault_out,
        staking_vault_out,
        pool.to_account_info(),
        &[&signer_seeds[..]],
        quote.amount_out,
    )?;

    let (input_mint, output_mint) = pool.mints_for(direction);
    emit!(SwapExecuted {
        pool: pool_key,
        user,
        input_mint,
        output_mint,
        amount_in,
        amount_out: quote.amount_out,
        fee: quote.fee(),
        staked: true,
        reserve_a: pool.reserve_a,
        reserve_b: pool.reserve_b,
        total_reserve_a: pool.total_reserve_a,
        total_reserve_b: pool.total_reserve_b,
        timestamp: clock.unix_timestamp,
    });

    let staking_pool = &ctx.accounts.staking_pool;
    let position = &ctx.accounts.stake_position;
    emit!(StakeDeposited {
        staking_pool: staking_pool_key,
        holder: user,
        amount_a: stake_a,
        amount_b: stake_b,
        position_a: position.amount_a,
        position_b: position.amount_b,
        pool_total_staked_a: staking_pool.total_staked_a,
        timestamp: clock.unix_timestamp,
    });

    msg!("Swapped {} {} for {} {} into stake", amount_in, input_mint, quote.amount_out, output_mint);
    msg!("Position: {} A, {} B. Pool staked A: {}",
        position.amount_a, position.amount_b, staking_pool.total_staked_a);

    Ok(())
}

#[derive(Accounts)]
pub struct Swap<'info> {
    /// The trader
    #[account(mut)]
    pub user: Signer<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Reserve A vault
    #[account(mut, address = pool.vault_a @ RuglessError::InvalidTokenMint)]
    pub vault_a: Account<'info, TokenAccount>,

    /// Reserve B vault
    #[account(mut, address = pool.vault_b @ RuglessError::InvalidTokenMint)]
    pub vault_b: Account<'info, TokenAccount>,

    /// Trader's token A account
    #[account(
        mut,
        constraint = user_token_a.mint == pool.mint_a @ RuglessError::InvalidTokenMint,
    )]
    pub user_token_a: Account<'info, TokenAccount>,

    /// Trader's token B account
    #[account(
        mut,
        constraint = user_token_b.mint == pool.mint_b @ RuglessError::InvalidTokenMint,
    )]
    pub user_token_b: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SwapAndStake<'info> {
    /// The trader, becomes the position holder
    #[account(mut)]
    pub user: Signer<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Reserve A vault
    #[account(mut, address = pool.vault_a @ RuglessError::InvalidTokenMint)]
    pub vault_a: Account<'info, TokenAccount>,

    /// Reserve B vault
    #[account(mut, address = pool.vault_b @ RuglessError::InvalidTokenMint)]
    pub vault_b: Account<'info, TokenAccount>,

    /// Trader's token A account
    #[account(
        mut,
        constraint = user_token_a.mint == pool.mint_a @ RuglessError::InvalidTokenMint,
    )]
    pub user_token_a: Account<'info, TokenAccount>,

    /// Trader's token B account
    #[account(
        mut,
        constraint = user_token_b.mint == pool.mint_b @ RuglessError::InvalidTokenMint,
    )]
    pub user_token_b: Account<'info, TokenAccount>,

    /// Staking pool owned by this pool
    #[account(
        mut,
        address = pool.staking_pool @ RuglessError::Unauthorized,
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Staked token A custody
    #[account(mut, address = staking_pool.vault_a @ RuglessError::InvalidTokenMint)]
    pub staking_vault_a: Account<'info, TokenAccount>,

    /// Staked token B custody
    #[account(mut, address = staking_pool.vault_b @ RuglessError::InvalidTokenMint)]
    pub staking_vault_b: Account<'info, TokenAccount>,

    /// Trader's position (created on first stake)
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + StakePosition::SIZE,
        seeds = [STAKE_POSITION_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub stake_position: Account<'info, StakePosition>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}
