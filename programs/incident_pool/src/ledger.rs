// programs/incident_pool/src/ledger.rs
//
// Pool accounting and the claim state machine.
// Every transition validates all of its preconditions before writing any
// field, so a failed call leaves both the pool and the claim untouched.
// Instruction handlers call into these methods and perform token transfers
// only after the new state has been written.

use anchor_lang::prelude::*;

use crate::errors::PoolError;
use crate::state::{ClaimAccount, ClaimStatus, PoolState};

/// Outcome of a settlement, consumed by the finalize handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Gross payout recorded on the claim (0 when rejected)
    pub final_payout: u64,
    /// Amount to move from the main pot to the claimant now
    pub transfer: u64,
}

impl PoolState {
    /// `total_balance - reserved_total`
    ///
    /// A negative result means the state machine is broken; the call aborts
    /// instead of clamping.
    pub fn available_liquidity(&self) -> Result<u64> {
        match self.total_balance.checked_sub(self.reserved_total) {
            Some(available) => Ok(available),
            None => {
                msg!(
                    "Invariant violated: reserved {} exceeds pool balance {}",
                    self.reserved_total,
                    self.total_balance
                );
                err!(PoolError::InvariantViolation)
            }
        }
    }

    pub fn require_active(&self) -> Result<()> {
        require!(!self.is_paused, PoolError::PoolPaused);
        Ok(())
    }

    /// Credit the main pot. Returns the new balance.
    pub fn record_deposit(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, PoolError::InvalidAmount);

        let total_balance = self
            .total_balance
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let total_deposited = self.total_deposited.saturating_add(amount);

        self.total_balance = total_balance;
        self.total_deposited = total_deposited;
        Ok(total_balance)
    }

    /// Credit the emergency pot. Returns the new emergency balance.
    pub fn record_emergency_deposit(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, PoolError::InvalidAmount);

        let emergency_balance = self
            .emergency_balance
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;

        self.emergency_balance = emergency_balance;
        self.total_emergency_deposited = self.total_emergency_deposited.saturating_add(amount);
        Ok(emergency_balance)
    }

    /// Earmark `amount` of pool liquidity against a new claim.
    ///
    /// `claim` is a freshly allocated account; it is filled in and the new
    /// claim id is returned.
    pub fn reserve_claim(
        &mut self,
        claim: &mut ClaimAccount,
        claimant: Pubkey,
        evidence_ref: [u8; 32],
        amount: u64,
        oracle: Pubkey,
        now: i64,
    ) -> Result<u64> {
        self.require_active()?;
        require!(evidence_ref != [0u8; 32], PoolError::InvalidEvidenceRef);
        require!(
            amount > 0 && amount <= self.per_claim_cap,
            PoolError::InvalidAmount
        );
        require!(
            self.available_liquidity()? >= amount,
            PoolError::InsufficientLiquidity
        );

        let claim_id = self
            .claim_count
            .checked_add(1)
            .ok_or(PoolError::MathOverflow)?;
        let reserved_total = self
            .reserved_total
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;

        self.claim_count = claim_id;
        self.reserved_total = reserved_total;

        claim.claim_id = claim_id;
        claim.claimant = claimant;
        claim.evidence_ref = evidence_ref;
        claim.reserved_amount = amount;
        claim.emergency_paid = 0;
        claim.emergency_payout_count = 0;
        claim.status = ClaimStatus::Reserved;
        claim.final_payout = 0;
        claim.reserved_by = oracle;
        claim.finalized_by = Pubkey::default();
        claim.reserved_at = now;
        claim.last_emergency_at = 0;
        claim.finalized_at = 0;

        Ok(claim_id)
    }

    pub fn require_claim(&self, claim: &ClaimAccount) -> Result<()> {
        require!(self.claim_exists(claim.claim_id), PoolError::ClaimNotFound);
        Ok(())
    }

    /// Disburse `amount` from the emergency pot against an open claim.
    ///
    /// The reservation keeps encumbering pool liquidity until settlement, so
    /// `reserved_total` is left alone.
    pub fn emergency_payout(
        &mut self,
        claim: &mut ClaimAccount,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        self.require_active()?;
        self.require_claim(claim)?;
        require!(!claim.is_finalized(), PoolError::ClaimAlreadyFinalized);
        require!(amount > 0, PoolError::InvalidAmount);

        let emergency_paid = claim
            .emergency_paid
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        require!(
            emergency_paid <= claim.emergency_ceiling(self.emergency_cap),
            PoolError::EmergencyCapExceeded
        );
        let emergency_balance = self
            .emergency_balance
            .checked_sub(amount)
            .ok_or(PoolError::InsufficientEmergencyFunds)?;
        let payout_count = claim
            .emergency_payout_count
            .checked_add(1)
            .ok_or(PoolError::MathOverflow)?;

        self.emergency_balance = emergency_balance;
        self.total_emergency_paid = self.total_emergency_paid.saturating_add(amount);

        claim.emergency_paid = emergency_paid;
        claim.emergency_payout_count = payout_count;
        claim.last_emergency_at = now;

        Ok(())
    }

    /// Settle a claim permanently.
    ///
    /// Approved claims pay `payout_amount - emergency_paid` from the main
    /// pot. Rejected claims pay nothing further and keep whatever emergency
    /// payouts they already received. Either way the full reservation is
    /// released.
    pub fn finalize_claim(
        &mut self,
        claim: &mut ClaimAccount,
        approved: bool,
        payout_amount: u64,
        underwriter: Pubkey,
        now: i64,
    ) -> Result<Settlement> {
        self.require_claim(claim)?;
        require!(!claim.is_finalized(), PoolError::ClaimAlreadyFinalized);

        let settlement = if approved {
            require!(
                payout_amount <= claim.reserved_amount,
                PoolError::PayoutExceedsReservation
            );
            require!(
                payout_amount >= claim.emergency_paid,
                PoolError::PayoutBelowEmergencyPaid
            );
            Settlement {
                final_payout: payout_amount,
                transfer: payout_amount - claim.emergency_paid,
            }
        } else {
            Settlement {
                final_payout: 0,
                transfer: 0,
            }
        };

        let reserved_total = self.reserved_total.checked_sub(claim.reserved_amount);
        let total_balance = self.total_balance.checked_sub(settlement.transfer);
        let (reserved_total, total_balance) = match (reserved_total, total_balance) {
            (Some(reserved), Some(total)) if total >= reserved => (reserved, total),
            _ => {
                msg!(
                    "Invariant violated settling claim {}: reserved {} / balance {} / release {} / transfer {}",
                    claim.claim_id,
                    self.reserved_total,
                    self.total_balance,
                    claim.reserved_amount,
                    settlement.transfer
                );
                return err!(PoolError::InvariantViolation);
            }
        };

        self.reserved_total = reserved_total;
        self.total_balance = total_balance;
        self.total_settled = self.total_settled.saturating_add(settlement.transfer);
        if approved {
            self.claims_approved = self.claims_approved.saturating_add(1);
        } else {
            self.claims_rejected = self.claims_rejected.saturating_add(1);
        }

        claim.status = if approved {
            ClaimStatus::Approved
        } else {
            ClaimStatus::Rejected
        };
        claim.final_payout = settlement.final_payout;
        claim.finalized_by = underwriter;
        claim.finalized_at = now;

        Ok(settlement)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
