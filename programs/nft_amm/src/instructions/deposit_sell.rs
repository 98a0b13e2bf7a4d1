use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer},
};

use crate::{
    error::ErrorCode,
    helpers::{assert_cosigner, assert_master_edition, check_allowlists_for_mint},
    state::Pool,
};

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, DepositSell<'info>>,
    asset_amount: u64,
) -> Result<()> {
    require!(asset_amount > 0, ErrorCode::InvalidAmount);
    assert_cosigner(
        &ctx.accounts.pool,
        &ctx.accounts.cosigner,
        ctx.remaining_accounts,
    )?;
    check_allowlists_for_mint(
        &ctx.accounts.pool.allowlists,
        &ctx.accounts.asset_mint.key(),
        &ctx.accounts.asset_metadata,
    )?;
    assert_master_edition(
        &ctx.accounts.asset_mint.key(),
        &ctx.accounts.asset_master_edition,
    )?;

    let depositor_amount_before = ctx.accounts.asset_token_account.amount;
    require!(
        asset_amount <= depositor_amount_before,
        ErrorCode::InvalidAmount
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.asset_token_account.to_account_info(),
                to: ctx.accounts.sellside_escrow_token_account.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        asset_amount,
    )?;

    // Emptied depositor account is closed so rent flows back to the owner.
    if depositor_amount_before == asset_amount {
        token::close_account(CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            CloseAccount {
                account: ctx.accounts.asset_token_account.to_account_info(),
                destination: ctx.accounts.owner.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ))?;
    }

    let pool = &mut ctx.accounts.pool;
    pool.sellside_orders_count = pool
        .sellside_orders_count
        .checked_add(asset_amount)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;

    Ok(())
}

#[derive(Accounts)]
pub struct DepositSell<'info> {
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
    /// CHECK: metadata PDA verified and deserialized in `check_allowlists_for_mint`.
    pub asset_metadata: UncheckedAccount<'info>,
    /// CHECK: address verified in `assert_master_edition`.
    pub asset_master_edition: UncheckedAccount<'info>,
    pub asset_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        constraint = asset_token_account.mint == asset_mint.key() @ ErrorCode::InvalidTokenAccount,
        constraint = asset_token_account.owner == owner.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub asset_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = asset_mint,
        associated_token::authority = pool,
    )]
    pub sellside_escrow_token_account: Box<Account<'info, TokenAccount>>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
