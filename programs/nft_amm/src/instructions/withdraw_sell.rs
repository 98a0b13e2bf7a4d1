use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer},
};

use crate::{
    error::ErrorCode,
    helpers::assert_cosigner,
    state::Pool,
};

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, WithdrawSell<'info>>,
    asset_amount: u64,
) -> Result<()> {
    require!(asset_amount > 0, ErrorCode::InvalidAmount);
    assert_cosigner(
        &ctx.accounts.pool,
        &ctx.accounts.cosigner,
        ctx.remaining_accounts,
    )?;

    let escrow_amount_before = ctx.accounts.sellside_escrow_token_account.amount;
    require!(
        asset_amount <= escrow_amount_before,
        ErrorCode::InsufficientEscrowBalance
    );

    let owner_key = ctx.accounts.owner.key();
    let uuid = ctx.accounts.pool.uuid;
    let pool_bump = ctx.accounts.pool.bump;
    let signer_seed_group: &[&[u8]] = &[
        b"pool",
        owner_key.as_ref(),
        uuid.as_ref(),
        &[pool_bump],
    ];
    let signer_seeds = &[signer_seed_group];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.sellside_escrow_token_account.to_account_info(),
                to: ctx.accounts.asset_token_account.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        asset_amount,
    )?;

    if escrow_amount_before == asset_amount {
        token::close_account(CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            CloseAccount {
                account: ctx.accounts.sellside_escrow_token_account.to_account_info(),
                destination: ctx.accounts.owner.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ))?;
    }

    let pool = &mut ctx.accounts.pool;
    pool.sellside_orders_count = pool
        .sellside_orders_count
        .checked_sub(asset_amount)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawSell<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    /// CHECK: validated against the pool cosigner in `assert_cosigner`.
    pub cosigner: UncheckedAccount<'info>,
    #[account(
        mut,
        seeds = [b"pool", owner.key().as_ref(), pool.uuid.as_ref()],
        bump = pool.bump,
        has_one = owner @ ErrorCode::InvalidOwner,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub asset_mint: Box<Account<'info, Mint>>,
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = asset_mint,
        associated_token::authority = owner,
    )]
    pub asset_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = pool,
    )]
    pub sellside_escrow_token_account: Box<Account<'info, TokenAccount>>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
