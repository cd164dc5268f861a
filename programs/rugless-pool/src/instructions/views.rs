use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::errors::RuglessError;
use crate::state::*;

/// Staked amounts of `holder`, zero if they never staked
pub fn get_staked_balance(ctx: Context<GetStakedBalance>, _holder: Pubkey) -> Result<StakedBalance> {
    let info = ctx.accounts.stake_position.to_account_info();
    if info.data_is_empty() || *info.owner != crate::ID {
        return Ok(StakedBalance::default());
    }

    let data = info.try_borrow_data()?;
    let position = StakePosition::try_deserialize(&mut &data[..])?;
    Ok(position.balance())
}

/// Treasury vault balances
pub fn treasury_balance(ctx: Context<GetTreasuryBalance>) -> Result<TreasuryBalance> {
    Ok(TreasuryBalance {
        amount_a: ctx.accounts.treasury_vault_a.amount,
        amount_b: ctx.accounts.treasury_vault_b.amount,
    })
}

#[derive(Accounts)]
#[instruction(holder: Pubkey)]
pub struct GetStakedBalance<'info> {
    /// Staking pool
    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: position PDA for `holder`; may not exist yet
    #[account(
        seeds = [STAKE_POSITION_SEED, staking_pool.key().as_ref(), holder.as_ref()],
        bump,
    )]
    pub stake_position: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct GetTreasuryBalance<'info> {
    /// Treasury
    pub treasury: Account<'info, Treasury>,

    /// Treasury token A vault
    #[account(address = treasury.vault_a @ RuglessError::InvalidTokenMint)]
    pub treasury_vault_a: Account<'info, TokenAccount>,

    /// Treasury token B vault
    #[account(address = treasury.vault_b @ RuglessError::InvalidTokenMint)]
    pub treasury_vault_b: Account<'info, TokenAccount>,
}
