use anchor_lang::{
    prelude::*,
    system_program::{self, Transfer},
};

use crate::{
    error::ErrorCode,
    helpers::{assert_buyside_sol_escrow, assert_cosigner},
    state::Pool,
};

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, SolDepositBuy<'info>>,
    payment_amount: u64,
) -> Result<()> {
    require!(payment_amount > 0, ErrorCode::InvalidAmount);
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

    // First deposit creates the escrow as a zero-data system account.
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.owner.to_account_info(),
                to: ctx.accounts.buyside_sol_escrow_account.to_account_info(),
            },
        ),
        payment_amount,
    )?;

    Ok(())
}

#[derive(Accounts)]
pub struct SolDepositBuy<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    /// CHECK: validated against the pool cosigner in `assert_cosigner`.
    pub cosigner: UncheckedAccount<'info>,
    #[account(
        seeds = [b"pool", owner.key().as_ref(), pool.uuid.as_ref()],
        bump = pool.bump,
        has_one = owner @ ErrorCode::InvalidOwner,
    )]
    pub pool: Box<Account<'info, Pool>>,
    /// CHECK: address re-derived and compared in `assert_buyside_sol_escrow`.
    #[account(mut)]
    pub buyside_sol_escrow_account: UncheckedAccount<'info>,
    pub system_program: Program<'info, System>,
}
