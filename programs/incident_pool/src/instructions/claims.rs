// programs/incident_pool/src/instructions/claims.rs
//
// Claim lifecycle: reserve -> emergency payouts -> finalize.
// Role checks run in account validation, before any handler code.
// Claim PDAs are taken unchecked and loaded by `load_claim`, so an unknown id
// surfaces as ClaimNotFound rather than an account-loading error.
// Handlers write pool and claim state first and only then move tokens.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_lang::AccountsExit;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::state::{ClaimAccount, PoolState, Role, RoleRegistry};
use crate::errors::PoolError;
use crate::events::{ClaimFinalized, ClaimReserved, EmergencyPayout};

// =============================================================================
// RESERVE
// =============================================================================

#[derive(Accounts)]
pub struct ReserveClaim<'info> {
    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        seeds = [RoleRegistry::SEED_PREFIX],
        bump = role_registry.bump,
        constraint = role_registry.has_role(Role::Oracle, &oracle.key()) @ PoolError::Unauthorized
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    /// CHECK: PDA for the next claim id; allocated by the handler once the
    /// reservation has been validated
    #[account(
        mut,
        seeds = [ClaimAccount::SEED_PREFIX, &pool_state.next_claim_id().to_le_bytes()],
        bump
    )]
    pub claim: UncheckedAccount<'info>,

    #[account(mut)]
    pub oracle: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn reserve_claim(
    ctx: Context<ReserveClaim>,
    claimant: Pubkey,
    evidence_ref: [u8; 32],
    amount: u64,
) -> Result<u64> {
    let clock = Clock::get()?;
    let bump = ctx.bumps.claim;
    let pool = &mut ctx.accounts.pool_state;

    let mut record = ClaimAccount::default();
    let claim_id = pool.reserve_claim(
        &mut record,
        claimant,
        evidence_ref,
        amount,
        ctx.accounts.oracle.key(),
        clock.unix_timestamp,
    )?;
    record.bump = bump;

    let id_bytes = claim_id.to_le_bytes();
    let bump_seed = [bump];
    let seeds: &[&[u8]] = &[ClaimAccount::SEED_PREFIX, &id_bytes, &bump_seed];
    let claim_info: &AccountInfo = Box::leak(Box::new(ctx.accounts.claim.to_account_info()));
    create_claim_account(
        &ctx.accounts.oracle,
        claim_info,
        &ctx.accounts.system_program,
        seeds,
    )?;

    let mut claim = Account::<ClaimAccount>::try_from_unchecked(claim_info)?;
    claim.set_inner(record);
    claim.exit(&crate::ID)?;

    emit!(ClaimReserved {
        claim_id,
        claimant,
        evidence_ref,
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(claim_id)
}

// =============================================================================
// EMERGENCY PAYOUT
// =============================================================================

#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct ProcessEmergencyPayout<'info> {
    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        seeds = [RoleRegistry::SEED_PREFIX],
        bump = role_registry.bump,
        constraint = role_registry.has_role(Role::Oracle, &oracle.key()) @ PoolError::Unauthorized
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    /// CHECK: claim PDA for `claim_id`; loaded by `load_claim`
    #[account(
        mut,
        seeds = [ClaimAccount::SEED_PREFIX, &claim_id.to_le_bytes()],
        bump,
    )]
    pub claim: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [PoolState::EMERGENCY_VAULT_SEED],
        bump,
    )]
    pub emergency_vault: Account<'info, TokenAccount>,

    /// Claimant's token account
    #[account(mut)]
    pub recipient: Account<'info, TokenAccount>,

    pub oracle: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn emergency_payout(
    ctx: Context<ProcessEmergencyPayout>,
    claim_id: u64,
    amount: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let claim_info: &AccountInfo = Box::leak(Box::new(ctx.accounts.claim.to_account_info()));
    let mut claim = load_claim(&ctx.accounts.pool_state, claim_info, claim_id)?;
    require_recipient(
        &ctx.accounts.recipient.owner,
        &ctx.accounts.recipient.mint,
        &claim,
        &ctx.accounts.pool_state,
    )?;

    let pool = &mut ctx.accounts.pool_state;
    pool.emergency_payout(&mut claim, amount, clock.unix_timestamp)?;
    claim.exit(&crate::ID)?;

    let event = EmergencyPayout {
        claim_id,
        claimant: claim.claimant,
        amount,
        total_emergency_paid: claim.emergency_paid,
        emergency_balance: pool.emergency_balance,
        timestamp: clock.unix_timestamp,
    };

    pay_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.emergency_vault,
        &ctx.accounts.recipient,
        &ctx.accounts.pool_state,
        amount,
    )?;

    emit!(event);

    Ok(())
}

// =============================================================================
// FINALIZE
// =============================================================================

#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct FinalizeClaim<'info> {
    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(
        seeds = [RoleRegistry::SEED_PREFIX],
        bump = role_registry.bump,
        constraint = role_registry.has_role(Role::Underwriter, &underwriter.key()) @ PoolError::Unauthorized
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    /// CHECK: claim PDA for `claim_id`; loaded by `load_claim`
    #[account(
        mut,
        seeds = [ClaimAccount::SEED_PREFIX, &claim_id.to_le_bytes()],
        bump,
    )]
    pub claim: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [PoolState::POOL_VAULT_SEED],
        bump,
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    /// Claimant's token account (untouched when the claim is rejected)
    #[account(mut)]
    pub recipient: Account<'info, TokenAccount>,

    pub underwriter: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn finalize_claim(
    ctx: Context<FinalizeClaim>,
    claim_id: u64,
    approved: bool,
    payout_amount: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let claim_info: &AccountInfo = Box::leak(Box::new(ctx.accounts.claim.to_account_info()));
    let mut claim = load_claim(&ctx.accounts.pool_state, claim_info, claim_id)?;
    require_recipient(
        &ctx.accounts.recipient.owner,
        &ctx.accounts.recipient.mint,
        &claim,
        &ctx.accounts.pool_state,
    )?;

    let underwriter = ctx.accounts.underwriter.key();
    let pool = &mut ctx.accounts.pool_state;
    let settlement = pool.finalize_claim(
        &mut claim,
        approved,
        payout_amount,
        underwriter,
        clock.unix_timestamp,
    )?;
    claim.exit(&crate::ID)?;

    msg!(
        "Claim {} {}: payout {}, transfer {}",
        claim_id,
        if approved { "approved" } else { "rejected" },
        settlement.final_payout,
        settlement.transfer
    );

    pay_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        &ctx.accounts.recipient,
        &ctx.accounts.pool_state,
        settlement.transfer,
    )?;

    emit!(ClaimFinalized {
        claim_id,
        approved,
        payout_amount: settlement.final_payout,
        settled_transfer: settlement.transfer,
        underwriter,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

/// Load the claim stored at `info`, mapping anything that is not a claim this
/// pool handed out to `ClaimNotFound`
pub fn load_claim<'info>(
    pool: &PoolState,
    info: &'info AccountInfo<'info>,
    claim_id: u64,
) -> Result<Account<'info, ClaimAccount>> {
    if info.data_is_empty() || !pool.claim_exists(claim_id) {
        return err!(PoolError::ClaimNotFound);
    }
    let claim = Account::<ClaimAccount>::try_from(info)?;
    require!(claim.claim_id == claim_id, PoolError::ClaimNotFound);
    Ok(claim)
}

/// Payouts only go to a token account of the claimant in the pool's mint
pub fn require_recipient(
    owner: &Pubkey,
    mint: &Pubkey,
    claim: &ClaimAccount,
    pool: &PoolState,
) -> Result<()> {
    require_keys_eq!(*owner, claim.claimant, PoolError::ClaimantMismatch);
    require_keys_eq!(*mint, pool.token_mint, PoolError::InvalidMint);
    Ok(())
}

/// Allocate a claim PDA owned by this program, paid by `payer`.
/// A PDA that was pre-funded by a third party is topped up, allocated and
/// assigned instead of created.
fn create_claim_account<'info>(
    payer: &Signer<'info>,
    claim: &AccountInfo<'info>,
    system: &Program<'info, System>,
    seeds: &[&[u8]],
) -> Result<()> {
    let space = 8 + ClaimAccount::INIT_SPACE;
    let required = Rent::get()?.minimum_balance(space);
    let signer_seeds = &[seeds];
    let current = claim.lamports();

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system.to_account_info(),
                system_program::CreateAccount {
                    from: payer.to_account_info(),
                    to: claim.clone(),
                },
                signer_seeds,
            ),
            required,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = required.saturating_sub(current);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.to_account_info(),
                system_program::Transfer {
                    from: payer.to_account_info(),
                    to: claim.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system.to_account_info(),
            system_program::Allocate {
                account_to_allocate: claim.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system.to_account_info(),
            system_program::Assign {
                account_to_assign: claim.clone(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}

/// Move `amount` out of a pool-owned vault, signing as the pool PDA
fn pay_from_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    recipient: &Account<'info, TokenAccount>,
    pool_state: &Account<'info, PoolState>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require_keys_eq!(vault.owner, pool_state.key(), PoolError::InvalidVault);

    let seeds = &[PoolState::SEED_PREFIX, &[pool_state.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            token::Transfer {
                from: vault.to_account_info(),
                to: recipient.to_account_info(),
                authority: pool_state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}

// =============================================================================
// UNIT TESTS
// =============================================================================
