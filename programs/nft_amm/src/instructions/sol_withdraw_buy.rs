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
    ctx: Context<'_, '_, '_, 'info, SolWithdrawBuy<'info>>,
    payment_amount: u64,
) -> Result<()> {
    require!(payment_amount > 0, ErrorCode::InvalidAmount);
    assert_cosigner(
        &ctx.accounts.pool,
        &ctx.accounts.cosigner,
        ctx.remaining_accounts,
    )?;
    let pool_key = ctx.accounts.pool.key();
    let escrow_bump = assert_buyside_sol_escrow(
        ctx.program_id,
        &pool_key,
        ctx.accounts.buyside_sol_escrow_account.key,
    )?;

    let escrow_lamports = ctx.accounts.buyside_sol_escrow_account.lamports();
    require!(
        payment_amount <= escrow_lamports,
        ErrorCode::InsufficientEscrowBalance
    );

    // Sweep a sub-rent remainder so the escrow never lingers below the
    // rent-exempt minimum for a zero-data account.
    let remaining = escrow_lamports - payment_amount;
    let withdraw_amount = if remaining > 0 && remaining < Rent::get()?.minimum_balance(0) {
        escrow_lamports
    } else {
        payment_amount
    };

    let signer_seed_group: &[&[u8]] = &[
        b"buyside-sol-escrow",
        pool_key.as_ref(),
        &[escrow_bump],
    ];
    let signer_seeds = &[signer_seed_group];
    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.buyside_sol_escrow_account.to_account_info(),
                to: ctx.accounts.owner.to_account_info(),
            },
            signer_seeds,
        ),
        withdraw_amount,
    )?;

    Ok(())
}

#[derive(Accounts)]
pub struct SolWithdrawBuy<'info> {
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
