use anchor_lang::prelude::*;

use crate::{
    constants::{ALLOWLIST_MAX_LEN, MAX_LP_FEE_BPS},
    error::ErrorCode,
    helpers::{assert_cosigner, assert_valid_allowlists, assert_valid_curve},
    state::{Allowlist, Pool},
};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdatePoolArgs {
    pub cosigner: Pubkey,
    pub spot_price: u64,
    pub curve_kind: u8,
    pub curve_delta: u64,
    pub reinvest: bool,
    pub lp_fee_bps: u16,
    pub allowlists: [Allowlist; ALLOWLIST_MAX_LEN],
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, UpdatePool<'info>>,
    args: UpdatePoolArgs,
) -> Result<()> {
    assert_cosigner(
        &ctx.accounts.pool,
        &ctx.accounts.cosigner,
        ctx.remaining_accounts,
    )?;
    assert_valid_curve(args.curve_kind, args.curve_delta, args.spot_price)?;
    require!(args.lp_fee_bps <= MAX_LP_FEE_BPS, ErrorCode::InvalidBps);
    assert_valid_allowlists(&args.allowlists)?;

    let pool = &mut ctx.accounts.pool;
    pool.cosigner = args.cosigner;
    pool.spot_price = args.spot_price;
    pool.curve_kind = args.curve_kind;
    pool.curve_delta = args.curve_delta;
    pool.reinvest = args.reinvest;
    pool.lp_fee_bps = args.lp_fee_bps;
    pool.allowlists = args.allowlists;

    Ok(())
}

#[derive(Accounts)]
pub struct UpdatePool<'info> {
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
}
