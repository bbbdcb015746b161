// programs/incident_pool/src/events.rs

use crate::state::{DepositTarget, Role};
use anchor_lang::prelude::*;

/// Emitted when the pool is initialized
#[event]
pub struct PoolInitialized {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub per_claim_cap: u64,
    pub emergency_cap: u64,
    pub timestamp: i64,
}

/// Emitted on every deposit, main or emergency
#[event]
pub struct Deposited {
    pub depositor: Pubkey,
    pub target: DepositTarget,
    pub amount: u64,
    pub new_balance: u64,
    pub timestamp: i64,
}

/// Emitted when an oracle reserves liquidity against an incident
#[event]
pub struct ClaimReserved {
    pub claim_id: u64,
    pub claimant: Pubkey,
    pub evidence_ref: [u8; 32],
    pub amount: u64,
    pub timestamp: i64,
}

/// Emitted when an emergency payout is disbursed
#[event]
pub struct EmergencyPayout {
    pub claim_id: u64,
    pub claimant: Pubkey,
    pub amount: u64,
    pub total_emergency_paid: u64,
    pub emergency_balance: u64,
    pub timestamp: i64,
}

/// Emitted when an underwriter settles a claim
#[event]
pub struct ClaimFinalized {
    pub claim_id: u64,
    pub approved: bool,
    pub payout_amount: u64,
    /// Amount moved from the main pool at settlement (payout net of emergency payouts)
    pub settled_transfer: u64,
    pub underwriter: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RoleGranted {
    pub role: Role,
    pub account: Pubkey,
    pub granted_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Pubkey,
    pub revoked_by: Pubkey,
    pub timestamp: i64,
}

/// Emitted when an admin changes pool parameters
#[event]
pub struct PoolParamsUpdated {
    pub per_claim_cap: u64,
    pub emergency_cap: u64,
    pub cooldown_period: i64,
    pub fee_bps: u16,
    pub updater: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PoolPauseChanged {
    pub paused: bool,
    pub changed_by: Pubkey,
    pub timestamp: i64,
}
