use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    helpers::{assert_buyside_sol_escrow, assert_cosigner},
    state::Pool,
};

pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, ClosePool<'info>>) -> Result<()> {
    assert_cosigner(
        &ctx.accounts.pool,
        &ctx.accounts.cosigner,
        ctx.remaining_accounts,
    )?;
    assert_buyside_sol_escrow(
        ctx.program_id,
        &ctx.accounts.pool.key(),
        ctx.accounts.buyside_sol_escrow_account.key,
    )?;

    require!(
        ctx.accounts.buyside_sol_escrow_account.lamports() == 0,
        ErrorCode::EscrowNotEmpty
    );
    require!(
        ctx.accounts.pool.sellside_orders_count == 0,
        ErrorCode::EscrowNotEmpty
    );

    Ok(())
}

#[derive(Accounts)]
pub struct ClosePool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    /// CHECK: validated against the pool cosigner in `assert_cosigner`.
    pub cosigner: UncheckedAccount<'info>,
    #[account(
        mut,
        close = owner,
        seeds = [b"pool", owner.key().as_ref(), pool.uuid.as_ref()],
        bump = pool.bump,
        has_one = owner @ ErrorCode::InvalidOwner,
    )]
    pub pool: Box<Account<'info, Pool>>,
    /// CHECK: address re-derived and compared in `assert_buyside_sol_escrow`.
    pub buyside_sol_escrow_account: UncheckedAccount<'info>,
}
