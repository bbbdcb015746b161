// programs/incident_pool/src/lib.rs
//
// Incident Pool Program
// =====================
// Mutual insurance pool for incident claims:
// - Open deposits into a main pot and a ring-fenced emergency pot
// - Oracle-reserved claims that earmark main-pot liquidity
// - Capped emergency payouts against a reserved claim
// - Underwriter settlement (approve with payout, or reject)
// - Admin-managed roles, pool parameters and pause switch

use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod state;

use instructions::*;
use state::{ClaimView, Role};

declare_id!("PooL1nc1dent1111111111111111111111111111111");

#[program]
pub mod incident_pool {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Create the pool, its two vaults and the role registry.
    /// The signer becomes the first admin.
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        params: InitializePoolParams,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Update caps, cooldown and fee (admin only)
    pub fn update_pool_params(
        ctx: Context<UpdatePoolParams>,
        params: PoolParamsInput,
    ) -> Result<()> {
        instructions::initialize::update_pool_params(ctx, params)
    }

    /// Pause or resume reservations and emergency payouts (admin only)
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        instructions::initialize::set_paused(ctx, paused)
    }

    // ==================== DEPOSITS ====================

    /// Deposit into the main pot
    pub fn deposit_to_pool(ctx: Context<DepositToPool>, amount: u64) -> Result<()> {
        instructions::deposits::deposit_to_pool(ctx, amount)
    }

    /// Deposit into the emergency pot
    pub fn deposit_to_emergency_pool(
        ctx: Context<DepositToEmergencyPool>,
        amount: u64,
    ) -> Result<()> {
        instructions::deposits::deposit_to_emergency_pool(ctx, amount)
    }

    // ==================== CLAIMS ====================

    /// Reserve liquidity for a new claim (oracle only). Returns the claim id.
    pub fn reserve_claim(
        ctx: Context<ReserveClaim>,
        claimant: Pubkey,
        evidence_ref: [u8; 32],
        amount: u64,
    ) -> Result<u64> {
        instructions::claims::reserve_claim(ctx, claimant, evidence_ref, amount)
    }

    /// Pay part of a reserved claim early from the emergency pot (oracle only)
    pub fn emergency_payout(
        ctx: Context<ProcessEmergencyPayout>,
        claim_id: u64,
        amount: u64,
    ) -> Result<()> {
        instructions::claims::emergency_payout(ctx, claim_id, amount)
    }

    /// Approve or reject a claim and release its reservation (underwriter only)
    pub fn finalize_claim(
        ctx: Context<FinalizeClaim>,
        claim_id: u64,
        approved: bool,
        payout_amount: u64,
    ) -> Result<()> {
        instructions::claims::finalize_claim(ctx, claim_id, approved, payout_amount)
    }

    // ==================== ROLES ====================

    pub fn grant_role(ctx: Context<ManageRole>, role: Role, account: Pubkey) -> Result<()> {
        instructions::roles::grant_role(ctx, role, account)
    }

    pub fn revoke_role(ctx: Context<ManageRole>, role: Role, account: Pubkey) -> Result<()> {
        instructions::roles::revoke_role(ctx, role, account)
    }

    // ==================== VIEWS ====================

    pub fn get_pool_balance(ctx: Context<ReadPool>) -> Result<u64> {
        instructions::views::get_pool_balance(ctx)
    }

    pub fn emergency_pool_balance(ctx: Context<ReadPool>) -> Result<u64> {
        instructions::views::emergency_pool_balance(ctx)
    }

    /// Main-pot balance not earmarked by open reservations
    pub fn available_liquidity(ctx: Context<ReadPool>) -> Result<u64> {
        instructions::views::available_liquidity(ctx)
    }

    pub fn get_claim(ctx: Context<ReadClaim>, claim_id: u64) -> Result<ClaimView> {
        instructions::views::get_claim(ctx, claim_id)
    }
}
