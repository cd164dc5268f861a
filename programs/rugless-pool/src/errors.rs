use anchor_lang::prelude::*;

#[error_code]
pub enum RuglessError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Percentage must be between 0 and 100")]
    InvalidPercentage,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Insufficient allowance for transfer")]
    InsufficientAllowance,

    #[msg("Insufficient balance for transfer")]
    InsufficientBalance,

    #[msg("Insufficient pool liquidity")]
    InsufficientLiquidity,

    #[msg("Output amount below minimum")]
    SlippageExceeded,

    #[msg("Staking cap for token A exceeded")]
    StakeCapExceeded,

    #[msg("No staked position")]
    NoStakedPosition,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("Arithmetic overflow")]
    Overflow,
}

#[cfg(test)]
pub(crate) fn assert_rugless_err<T: std::fmt::Debug>(result: Result<T>, expected: RuglessError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, u32::from(expected), "{}", err.error_msg)
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
