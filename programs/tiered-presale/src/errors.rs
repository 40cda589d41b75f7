use anchor_lang::prelude::*;

#[error_code]
pub enum PresaleError {
    // Validation
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Stage index out of range")]
    IndexOutOfRange,
    #[msg("Target stage is the same as the current stage")]
    SameStage,
    #[msg("Stage price must be greater than zero")]
    InvalidStagePrice,
    #[msg("Stage token cap must be greater than zero")]
    InvalidStageCap,
    #[msg("Stage end time must be after its start time")]
    InvalidStageWindow,
    #[msg("Maximum number of stages reached")]
    StageLimitReached,
    #[msg("Minimum purchase must be greater than zero")]
    InvalidMinPurchase,
    #[msg("Token mint decimals exceed 18")]
    InvalidMintDecimals,
    #[msg("Total stage caps exceed what the token mint can transfer")]
    StageCapsExceedMintRange,

    // Policy
    #[msg("Sale is globally paused")]
    GloballyPaused,
    #[msg("Purchase is below the minimum USD amount")]
    BelowMinimum,
    #[msg("Stage is paused")]
    StagePaused,
    #[msg("Stage has not started")]
    StageNotStarted,
    #[msg("Stage has expired")]
    StageExpired,
    #[msg("Stage is sold out")]
    StageSoldOut,
    #[msg("Stage USD cap reached")]
    StageUsdCapped,
    #[msg("No stages left to fill this purchase")]
    SoldOut,
    #[msg("Current stage is still active")]
    CurrentStageStillActive,
    #[msg("Nothing to end: stage already fully sold")]
    NothingToEnd,
    #[msg("No active stage")]
    NoActiveStage,
    #[msg("Claiming is disabled")]
    ClaimDisabled,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Amount exceeds unsold tokens held by the vault")]
    InsufficientUnsold,

    // Collaborators
    #[msg("Price oracle unavailable or stale")]
    OracleUnavailable,
    #[msg("No staking manager configured")]
    NoStakingManager,
    #[msg("Staking manager account does not match configuration")]
    InvalidStakingManager,
    #[msg("Staking manager and staking vault must be set together")]
    IncompleteStakingConfig,
    #[msg("Staking manager rejected the deposit")]
    StakeDepositFailed,

    // Accounts and authorization
    #[msg("Unauthorized - admin only")]
    Unauthorized,
    #[msg("Invalid token account")]
    InvalidTokenAccount,
    #[msg("Invalid treasury account")]
    InvalidTreasuryAccount,
    #[msg("Invalid token mint")]
    InvalidTokenMint,
    #[msg("Invalid price feed account")]
    InvalidPriceFeed,

    // Invariants
    #[msg("Ledger totals do not match the sum of stages")]
    LedgerInvariantViolated,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
