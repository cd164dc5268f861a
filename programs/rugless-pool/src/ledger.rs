//! Token ledger boundary.
//!
//! Balances live in the SPL Token program. These helpers surface the
//! ledger's own spending rules as typed errors before any leg of an
//! instruction moves, and wrap the transfer CPIs used by every handler.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::spl_token::state::Account as SplTokenAccount;
use anchor_spl::token::{self, Transfer};

use crate::errors::RuglessError;

/// Whether `authority` may move `amount` out of `source`, either as the
/// owner or as an approved delegate.
pub fn ensure_spendable(source: &SplTokenAccount, authority: &Pubkey, amount: u64) -> Result<()> {
    if source.owner == *authority {
        require!(source.amount >= amount, RuglessError::InsufficientBalance);
        return Ok(());
    }

    match source.delegate {
        COption::Some(delegate) if delegate == *authority => {
            require!(
                source.delegated_amount >= amount,
                RuglessError::InsufficientAllowance
            );
            require!(source.amount >= amount, RuglessError::InsufficientBalance);
            Ok(())
        }
        _ => err!(RuglessError::InsufficientAllowance),
    }
}

/// Program-owned vaults must hold what the accounting says they hold.
pub fn ensure_custody(vault: &SplTokenAccount, amount: u64) -> Result<()> {
    require!(vault.amount >= amount, RuglessError::TransferFailed);
    Ok(())
}

/// Transfer signed by the user. Zero amounts are skipped.
pub fn transfer<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new(token_program, Transfer { from, to, authority }),
        amount,
    )
}

/// Transfer out of a vault, signed by the owning PDA. Zero amounts are skipped.
pub fn transfer_signed<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new_with_signer(token_program, Transfer { from, to, authority }, signer_seeds),
        amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_rugless_err;

    fn account(owner: Pubkey, amount: u64) -> SplTokenAccount {
        SplTokenAccount {
            owner,
            amount,
            ..SplTokenAccount::default()
        }
    }

    #[test]
    fn owner_limited_by_balance() {
        let owner = Pubkey::new_unique();
        let source = account(owner, 100);

        assert!(ensure_spendable(&source, &owner, 100).is_ok());
        assert_rugless_err(
            ensure_spendable(&source, &owner, 101),
            RuglessError::InsufficientBalance,
        );
    }

    #[test]
    fn delegate_limited_by_allowance_then_balance() {
        let owner = Pubkey::new_unique();
        let spender = Pubkey::new_unique();
        let mut source = account(owner, 100);
        source.delegate = COption::Some(spender);
        source.delegated_amount = 40;

        assert!(ensure_spendable(&source, &spender, 40).is_ok());
        assert_rugless_err(
            ensure_spendable(&source, &spender, 41),
            RuglessError::InsufficientAllowance,
        );

        source.amount = 30;
        assert_rugless_err(
            ensure_spendable(&source, &spender, 40),
            RuglessError::InsufficientBalance,
        );
    }

    #[test]
    fn stranger_has_no_allowance() {
        let source = account(Pubkey::new_unique(), 100);
        assert_rugless_err(
            ensure_spendable(&source, &Pubkey::new_unique(), 1),
            RuglessError::InsufficientAllowance,
        );
    }

    #[test]
    fn custody_shortfall_is_transfer_failure() {
        let vault = account(Pubkey::new_unique(), 5);
        assert!(ensure_custody(&vault, 5).is_ok());
        assert_rugless_err(ensure_custody(&vault, 6), RuglessError::TransferFailed);
    }
}
