use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::RuglessError;
use crate::ledger;
use crate::state::*;

/// Withdraw the caller's whole position.
///
/// The unstake fee is taken from the token A side only and sent to the
/// treasury; token B is returned in full.
pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
    let holder = ctx.accounts.holder.key();
    let clock = Clock::get()?;

    let settlement = ctx
        .accounts
        .staking_pool
        .quote_unstake(&ctx.accounts.stake_position)?;

    // Custody must cover every leg before anything moves
    ledger::ensure_custody(&ctx.accounts.staking_vault_a, settlement.amount_a)?;
    ledger::ensure_custody(&ctx.accounts.staking_vault_b, settlement.payout_b)?;

    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.stake_position;
    staking_pool.apply_unstake(position, &settlement)?;

    ctx.accounts
        .pool
        .release_staked(settlement.amount_a, settlement.payout_b)?;

    ctx.accounts
        .treasury
        .credit_unstake_fee(settlement.fee_a, clock.unix_timestamp)?;

    let staking_pool = &ctx.accounts.staking_pool;
    let signer_seeds = staking_pool.signer_seeds();
    let token_program = ctx.accounts.token_program.to_account_info();

    // Fee to the treasury
    ledger::transfer_signed(
        token_program.clone(),
        ctx.accounts.staking_vault_a.to_account_info(),
        ctx.accounts.treasury_vault_a.to_account_info(),
        staking_pool.to_account_info(),
        &[&signer_seeds[..]],
        settlement.fee_a,
    )?;

    // Principal A, net of fee
    ledger::transfer_signed(
        token_program.clone(),
        ctx.accounts.staking_vault_a.to_account_info(),
        ctx.accounts.holder_token_a.to_account_info(),
        staking_pool.to_account_info(),
        &[&signer_seeds[..]],
        settlement.payout_a,
    )?;

    // Principal B, never charged
    ledger::transfer_signed(
        token_program,
        ctx.accounts.staking_vault_b.to_account_info(),
        ctx.accounts.holder_token_b.to_account_info(),
        staking_pool.to_account_info(),
        &[&signer_seeds[..]],
        settlement.payout_b,
    )?;

    emit!(crate::events::Unstaked {
        staking_pool: staking_pool.key(),
        holder,
        payout_a: settlement.payout_a,
        payout_b: settlement.payout_b,
        fee_a: settlement.fee_a,
        treasury: ctx.accounts.treasury.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Unstaked {} A and {} B. Fee to treasury: {} A",
        settlement.payout_a, settlement.payout_b, settlement.fee_a);
    msg!("Pool staked: {} A, {} B", staking_pool.total_staked_a, staking_pool.total_staked_b);

    Ok(())
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    /// Position holder
    #[account(mut)]
    pub holder: Signer<'info>,

    /// Pool the position was opened through
    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, pool.key().as_ref()],
        bump = staking_pool.bump,
        has_one = pool @ RuglessError::Unauthorized,
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Holder's position
    #[account(
        mut,
        seeds = [STAKE_POSITION_SEED, staking_pool.key().as_ref(), holder.key().as_ref()],
        bump = stake_position.bump,
        constraint = stake_position.holder == holder.key() @ RuglessError::Unauthorized,
    )]
    pub stake_position: Account<'info, StakePosition>,

    /// Staked token A custody
    #[account(mut, address = staking_pool.vault_a @ RuglessError::InvalidTokenMint)]
    pub staking_vault_a: Account<'info, TokenAccount>,

    /// Staked token B custody
    #[account(mut, address = staking_pool.vault_b @ RuglessError::InvalidTokenMint)]
    pub staking_vault_b: Account<'info, TokenAccount>,

    /// Fee recipient
    #[account(
        mut,
        address = staking_pool.fee_recipient @ RuglessError::Unauthorized,
    )]
    pub treasury: Account<'info, Treasury>,

    /// Treasury token A vault
    #[account(mut, address = treasury.vault_a @ RuglessError::InvalidTokenMint)]
    pub treasury_vault_a: Account<'info, TokenAccount>,

    /// Holder's token A account
    #[account(
        mut,
        constraint = holder_token_a.mint == staking_pool.mint_a @ RuglessError::InvalidTokenMint,
    )]
    pub holder_token_a: Account<'info, TokenAccount>,

    /// Holder's token B account
    #[account(
        mut,
        constraint = holder_token_b.mint == staking_pool.mint_b @ RuglessError::InvalidTokenMint,
    )]
    pub holder_token_b: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
