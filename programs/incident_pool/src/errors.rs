// programs/incident_pool/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[msg("Invalid amount: zero or above the configured cap")]
    InvalidAmount,

    #[msg("Insufficient available liquidity for this reservation")]
    InsufficientLiquidity,

    #[msg("Insufficient funds in the emergency pool")]
    InsufficientEmergencyFunds,

    #[msg("Claim not found")]
    ClaimNotFound,

    #[msg("Claim already finalized")]
    ClaimAlreadyFinalized,

    #[msg("Emergency payout would exceed the per-claim emergency ceiling")]
    EmergencyCapExceeded,

    #[msg("Payout exceeds the reserved amount")]
    PayoutExceedsReservation,

    #[msg("Payout is below the amount already paid out in emergencies")]
    PayoutBelowEmergencyPaid,

    #[msg("Pool is paused")]
    PoolPaused,

    #[msg("Invalid pool parameters")]
    InvalidPoolParams,

    #[msg("Evidence reference is empty")]
    InvalidEvidenceRef,

    #[msg("Address already holds this role")]
    RoleAlreadyGranted,

    #[msg("Address does not hold this role")]
    RoleNotGranted,

    #[msg("Maximum members for this role reached")]
    RoleListFull,

    #[msg("Cannot revoke the last admin")]
    LastAdmin,

    #[msg("Vault does not belong to this pool")]
    InvalidVault,

    #[msg("Token account mint does not match the pool mint")]
    InvalidMint,

    #[msg("Recipient token account is not owned by the claimant")]
    ClaimantMismatch,

    #[msg("Math overflow in calculation")]
    MathOverflow,

    #[msg("Pool accounting invariant violated")]
    InvariantViolation,
}
