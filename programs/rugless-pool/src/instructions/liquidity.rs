use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::RuglessError;
use crate::ledger;
use crate::state::*;

/// Seed the reserves with both tokens (authority only)
pub fn add_liquidity(
    ctx: Context<ManageLiquidity>,
    amount_a: u64,
    amount_b: u64,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();

    // Both legs are checked up front so neither reserve moves on failure
    ledger::ensure_spendable(&ctx.accounts.authority_token_a, &authority, amount_a)?;
    ledger::ensure_spendable(&ctx.accounts.authority_token_b, &authority, amount_b)?;

    let pool = &mut ctx.accounts.pool;
    pool.record_liquidity_added(amount_a, amount_b)?;

    let token_program = ctx.accounts.token_program.to_account_info();
    ledger::transfer(
        token_program.clone(),
        ctx.accounts.authority_token_a.to_account_info(),
        ctx.accounts.vault_a.to_account_info(),
        ctx.accounts.authority.to_account_info(),
        amount_a,
    )?;
    ledger::transfer(
        token_program,
        ctx.accounts.authority_token_b.to_account_info(),
        ctx.accounts.vault_b.to_account_info(),
        ctx.accounts.authority.to_account_info(),
        amount_b,
    )?;

    let pool = &ctx.accounts.pool;
    emit!(crate::events::LiquidityAdded {
        pool: pool.key(),
        provider: authority,
        amount_a,
        amount_b,
        reserve_a: pool.reserve_a,
        reserve_b: pool.reserve_b,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Liquidity added: {} A, {} B", amount_a, amount_b);
    msg!("Reserves: {} A, {} B", pool.reserve_a, pool.reserve_b);

    Ok(())
}

/// Withdraw from the swappable reserves (authority only).
/// Token routed into staking is never touched.
pub fn remove_liquidity(
    ctx: Context<ManageLiquidity>,
    amount_a: u64,
    amount_b: u64,
) -> Result<()> {
    ledger::ensure_custody(&ctx.accounts.vault_a, amount_a)?;
    ledger::ensure_custody(&ctx.accounts.vault_b, amount_b)?;

    let pool = &mut ctx.accounts.pool;
    pool.record_liquidity_removed(amount_a, amount_b)?;

    let pool = &ctx.accounts.pool;
    let signer_seeds = pool.signer_seeds();
    let token_program = ctx.accounts.token_program.to_account_info();
    ledger::transfer_signed(
        token_program.clone(),
        ctx.accounts.vault_a.to_account_info(),
        ctx.accounts.authority_token_a.to_account_info(),
        pool.to_account_info(),
        &[&signer_seeds[..]],
        amount_a,
    )?;
    ledger::transfer_signed(
        token_program,
        ctx.accounts.vault_b.to_account_info(),
        ctx.accounts.authority_token_b.to_account_info(),
        pool.to_account_info(),
        &[&signer_seeds[..]],
        amount_b,
    )?;

    emit!(crate::events::LiquidityRemoved {
        pool: pool.key(),
        provider: ctx.accounts.authority.key(),
        amount_a,
        amount_b,
        reserve_a: pool.reserve_a,
        reserve_b: pool.reserve_b,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Liquidity removed: {} A, {} B", amount_a, amount_b);
    msg!("Reserves: {} A, {} B", pool.reserve_a, pool.reserve_b);

    Ok(())
}

#[derive(Accounts)]
pub struct ManageLiquidity<'info> {
    /// Pool owner
    pub authority: Signer<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
        has_one = authority @ RuglessError::Unauthorized,
    )]
    pub pool: Account<'info, Pool>,

    /// Reserve A vault
    #[account(mut, address = pool.vault_a @ RuglessError::InvalidTokenMint)]
    pub vault_a: Account<'info, TokenAccount>,

    /// Reserve B vault
    #[account(mut, address = pool.vault_b @ RuglessError::InvalidTokenMint)]
    pub vault_b: Account<'info, TokenAccount>,

    /// Authority's token A account
    #[account(
        mut,
        constraint = authority_token_a.mint == pool.mint_a @ RuglessError::InvalidTokenMint,
    )]
    pub authority_token_a: Account<'info, TokenAccount>,

    /// Authority's token B account
    #[account(
        mut,
        constraint = authority_token_b.mint == pool.mint_b @ RuglessError::InvalidTokenMint,
    )]
    pub authority_token_b: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
