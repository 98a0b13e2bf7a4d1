use anchor_lang::prelude::*;

use crate::{
    constants::{ALLOWLIST_MAX_LEN, MAX_LP_FEE_BPS},
    error::ErrorCode,
    helpers::{assert_valid_allowlists, assert_valid_curve},
    state::{Allowlist, Pool},
};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreatePoolArgs {
    pub uuid: Pubkey,
    pub cosigner: Pubkey,
    pub spot_price: u64,
    pub curve_kind: u8,
    pub curve_delta: u64,
    pub reinvest: bool,
    pub lp_fee_bps: u16,
    pub allowlists: [Allowlist; ALLOWLIST_MAX_LEN],
}

pub fn handler(ctx: Context<CreatePool>, args: CreatePoolArgs) -> Result<()> {
    assert_valid_curve(args.curve_kind, args.curve_delta, args.spot_price)?;
    require!(args.lp_fee_bps <= MAX_LP_FEE_BPS, ErrorCode::InvalidBps);
    assert_valid_allowlists(&args.allowlists)?;

    let pool = &mut ctx.accounts.pool;
    pool.owner = ctx.accounts.owner.key();
    pool.cosigner = args.cosigner;
    pool.uuid = args.uuid;
    pool.spot_price = args.spot_price;
    pool.curve_kind = args.curve_kind;
    pool.curve_delta = args.curve_delta;
    pool.reinvest = args.reinvest;
    pool.lp_fee_bps = args.lp_fee_bps;
    pool.allowlists = args.allowlists;
    pool.sellside_orders_count = 0;
    pool.lp_fee_earned = 0;
    pool.bump = ctx.bumps.pool;

    Ok(())
}

#[derive(Accounts)]
#[instruction(args: CreatePoolArgs)]
pub struct CreatePool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(
        init,
        payer = owner,
        seeds = [b"pool", owner.key().as_ref(), args.uuid.as_ref()],
        bump,
        space = 8 + Pool::INIT_SPACE,
    )]
    pub pool: Box<Account<'info, Pool>>,
    pub system_program: Program<'info, System>,
}
