// programs/incident_pool/src/state.rs

use anchor_lang::prelude::*;

use crate::errors::PoolError;

// =============================================================================
// POOL STATE
// =============================================================================

/// Singleton pool account: balances, reservation total and parameters
/// PDA seeds: ["pool_state"]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct PoolState {
    /// Initializer of the pool (first admin)
    pub authority: Pubkey,

    /// Mint of the token the pool is denominated in
    pub token_mint: Pubkey,

    /// Main pot, mirrors the pool vault balance
    pub total_balance: u64,

    /// Ring-fenced emergency pot, mirrors the emergency vault balance
    pub emergency_balance: u64,

    /// Sum of reserved_amount over all claims not yet finalized
    pub reserved_total: u64,

    /// Last claim id handed out (ids start at 1)
    pub claim_count: u64,

    /// Upper bound on a single reservation
    pub per_claim_cap: u64,

    /// Upper bound on cumulative emergency payouts for a single claim
    pub emergency_cap: u64,

    /// Cooldown for external liquidity withdrawal flows (seconds)
    pub cooldown_period: i64,

    /// Fee percentage for external LP flows (basis points)
    pub fee_bps: u16,

    /// New reservations and emergency payouts are blocked while paused
    pub is_paused: bool,

    /// Lifetime deposits into the main pot
    pub total_deposited: u64,

    /// Lifetime deposits into the emergency pot
    pub total_emergency_deposited: u64,

    /// Lifetime emergency disbursements
    pub total_emergency_paid: u64,

    /// Lifetime settlement transfers from the main pot
    pub total_settled: u64,

    pub claims_approved: u64,

    pub claims_rejected: u64,

    /// Bump seed
    pub bump: u8,
}

impl PoolState {
    pub const SEED_PREFIX: &'static [u8] = b"pool_state";
    pub const POOL_VAULT_SEED: &'static [u8] = b"pool_vault";
    pub const EMERGENCY_VAULT_SEED: &'static [u8] = b"emergency_vault";

    // Defaults match the reference deployment, expressed in 6-decimal units:
    // 5 units per claim, 0.5 units emergency ceiling, 7 day cooldown, 2.5% fee.
    pub const DEFAULT_PER_CLAIM_CAP: u64 = 5_000_000;
    pub const DEFAULT_EMERGENCY_CAP: u64 = 500_000;
    pub const DEFAULT_COOLDOWN_PERIOD: i64 = 7 * 24 * 60 * 60;
    pub const DEFAULT_FEE_BPS: u16 = 250;

    pub const MAX_FEE_BPS: u16 = 10_000;

    /// Id the next reservation will receive
    pub fn next_claim_id(&self) -> u64 {
        self.claim_count.saturating_add(1)
    }

    /// True if `claim_id` has been handed out by this pool
    pub fn claim_exists(&self, claim_id: u64) -> bool {
        claim_id != 0 && claim_id <= self.claim_count
    }

    /// Validate a parameter set before it is written
    pub fn validate_params(
        per_claim_cap: u64,
        emergency_cap: u64,
        cooldown_period: i64,
        fee_bps: u16,
    ) -> Result<()> {
        require!(per_claim_cap > 0, PoolError::InvalidPoolParams);
        require!(emergency_cap > 0, PoolError::InvalidPoolParams);
        require!(cooldown_period >= 0, PoolError::InvalidPoolParams);
        require!(fee_bps <= Self::MAX_FEE_BPS, PoolError::InvalidPoolParams);
        Ok(())
    }
}

/// Which pot a deposit lands in
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum DepositTarget {
    Main,
    Emergency,
}

// =============================================================================
// CLAIMS
// =============================================================================

/// Individual claim account
/// PDA seeds: ["claim", claim_id]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct ClaimAccount {
    /// Unique claim ID, assigned at reservation
    pub claim_id: u64,

    /// Party eligible for payout
    pub claimant: Pubkey,

    /// Opaque content hash of off-chain evidence
    pub evidence_ref: [u8; 32],

    /// Amount earmarked against the pool, fixed at creation
    pub reserved_amount: u64,

    /// Amount already disbursed from the emergency pot
    pub emergency_paid: u64,

    /// Number of emergency payouts made
    pub emergency_payout_count: u32,

    /// Lifecycle status
    pub status: ClaimStatus,

    /// Total paid to the claimant for an approved claim (0 otherwise)
    pub final_payout: u64,

    /// Oracle that created the reservation
    pub reserved_by: Pubkey,

    /// Underwriter that settled the claim
    pub finalized_by: Pubkey,

    pub reserved_at: i64,

    pub last_emergency_at: i64,

    pub finalized_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl ClaimAccount {
    pub const SEED_PREFIX: &'static [u8] = b"claim";

    pub fn is_finalized(&self) -> bool {
        self.status.is_finalized()
    }

    /// Ceiling on cumulative emergency payouts given the pool's current cap
    pub fn emergency_ceiling(&self, emergency_cap: u64) -> u64 {
        self.reserved_amount.min(emergency_cap)
    }
}

/// Claim status state machine
///
/// Emergency payouts do not change the status; they are tracked by
/// `emergency_paid` / `emergency_payout_count` while the claim is `Reserved`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum ClaimStatus {
    /// Liquidity earmarked, awaiting adjudication
    #[default]
    Reserved,
    /// Finalized with a payout
    Approved,
    /// Finalized without a payout
    Rejected,
}

impl ClaimStatus {
    pub fn is_finalized(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

/// Read-only snapshot returned by `get_claim`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClaimView {
    pub claim_id: u64,
    pub claimant: Pubkey,
    pub evidence_ref: [u8; 32],
    pub reserved_amount: u64,
    pub emergency_paid: u64,
    pub status: ClaimStatus,
    pub final_payout: u64,
}

impl From<&ClaimAccount> for ClaimView {
    fn from(claim: &ClaimAccount) -> Self {
        Self {
            claim_id: claim.claim_id,
            claimant: claim.claimant,
            evidence_ref: claim.evidence_ref,
            reserved_amount: claim.reserved_amount,
            emergency_paid: claim.emergency_paid,
            status: claim.status,
            final_payout: claim.final_payout,
        }
    }
}

// =============================================================================
// ACCESS CONTROL
// =============================================================================

/// Capabilities checked by privileged entry points
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum Role {
    /// Manages role membership and pool parameters
    Admin,
    /// Creates reservations and triggers emergency payouts
    Oracle,
    /// Finalizes claims
    Underwriter,
}

/// Role membership store
/// PDA seeds: ["role_registry"]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct RoleRegistry {
    #[max_len(10)]
    pub admins: Vec<Pubkey>,

    #[max_len(10)]
    pub oracles: Vec<Pubkey>,

    #[max_len(10)]
    pub underwriters: Vec<Pubkey>,

    /// Bump seed
    pub bump: u8,
}

impl RoleRegistry {
    pub const SEED_PREFIX: &'static [u8] = b"role_registry";
    pub const MAX_MEMBERS: usize = 10;

    pub fn members(&self, role: Role) -> &[Pubkey] {
        match role {
            Role::Admin => &self.admins,
            Role::Oracle => &self.oracles,
            Role::Underwriter => &self.underwriters,
        }
    }

    fn members_mut(&mut self, role: Role) -> &mut Vec<Pubkey> {
        match role {
            Role::Admin => &mut self.admins,
            Role::Oracle => &mut self.oracles,
            Role::Underwriter => &mut self.underwriters,
        }
    }

    pub fn has_role(&self, role: Role, key: &Pubkey) -> bool {
        self.members(role).contains(key)
    }

    pub fn require_role(&self, role: Role, key: &Pubkey) -> Result<()> {
        require!(self.has_role(role, key), PoolError::Unauthorized);
        Ok(())
    }

    pub fn grant(&mut self, role: Role, key: Pubkey) -> Result<()> {
        require!(!self.has_role(role, &key), PoolError::RoleAlreadyGranted);
        let members = self.members_mut(role);
        require!(members.len() < Self::MAX_MEMBERS, PoolError::RoleListFull);
        members.push(key);
        Ok(())
    }

    pub fn revoke(&mut self, role: Role, key: Pubkey) -> Result<()> {
        require!(self.has_role(role, &key), PoolError::RoleNotGranted);
        if role == Role::Admin {
            require!(self.admins.len() > 1, PoolError::LastAdmin);
        }
        self.members_mut(role).retain(|member| member != &key);
        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
