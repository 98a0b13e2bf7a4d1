use anchor_lang::{
    prelude::*,
    system_program::{self, Transfer as SolTransfer},
};
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, CloseAccount, Mint, Token, TokenAccount, Transfer},
};

use crate::{
    error::ErrorCode,
    helpers::{
        assert_buyside_sol_escrow, assert_cosigner, assert_master_edition,
        check_allowlists_for_mint, get_lp_fee, quote_fulfill_buy,
    },
    state::Pool,
};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct FulfillBuyArgs {
    pub asset_amount: u64,
    /// Slippage bound: the seller refuses to receive less than this in total.
    pub min_payment_amount: u64,
}

// A seller hands NFT/SFT units to the pool against its buyside SOL escrow.
// The asset lands in sellside escrow when the pool reinvests, otherwise it
// goes straight to the owner. The curve position walks down one step per unit.
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, FulfillBuy<'info>>,
    args: FulfillBuyArgs,
) -> Result<()> {
    require!(args.asset_amount > 0, ErrorCode::InvalidAmount);
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
    let pool_key = ctx.accounts.pool.key();
    let escrow_bump = assert_buyside_sol_escrow(
        ctx.program_id,
        &pool_key,
        ctx.accounts.buyside_sol_escrow_account.key,
    )?;

    let quote = quote_fulfill_buy(
        ctx.accounts.pool.curve_kind,
        ctx.accounts.pool.spot_price,
        ctx.accounts.pool.curve_delta,
        args.asset_amount,
    )?;
    require!(
        quote.total_price >= args.min_payment_amount,
        ErrorCode::InvalidRequestedPrice
    );

    let escrow_lamports = ctx.accounts.buyside_sol_escrow_account.lamports();
    require!(
        quote.total_price <= escrow_lamports,
        ErrorCode::InsufficientEscrowBalance
    );
    let lp_fee = get_lp_fee(
        ctx.accounts.pool.lp_fee_bps,
        escrow_lamports,
        ctx.accounts.pool.spot_price,
        quote.total_price,
    )?;
    let payout = quote
        .total_price
        .checked_sub(lp_fee)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;

    // Sweep a sub-rent remainder to the owner so the escrow never lingers
    // below the rent-exempt minimum for a zero-data account.
    let remaining = escrow_lamports - quote.total_price;
    let sweep = if remaining > 0 && remaining < Rent::get()?.minimum_balance(0) {
        remaining
    } else {
        0
    };

    let payer_amount_before = ctx.accounts.payer_asset_account.amount;
    require!(
        args.asset_amount <= payer_amount_before,
        ErrorCode::InvalidAmount
    );

    let asset_destination = if ctx.accounts.pool.reinvest {
        ctx.accounts.sellside_escrow_token_account.to_account_info()
    } else {
        ctx.accounts.owner_asset_account.to_account_info()
    };
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.payer_asset_account.to_account_info(),
                to: asset_destination,
                authority: ctx.accounts.payer.to_account_info(),
            },
        ),
        args.asset_amount,
    )?;
    if payer_amount_before == args.asset_amount {
        token::close_account(CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            CloseAccount {
                account: ctx.accounts.payer_asset_account.to_account_info(),
                destination: ctx.accounts.payer.to_account_info(),
                authority: ctx.accounts.payer.to_account_info(),
            },
        ))?;
    }

    let signer_seed_group: &[&[u8]] = &[
        b"buyside-sol-escrow",
        pool_key.as_ref(),
        &[escrow_bump],
    ];
    let signer_seeds = &[signer_seed_group];
    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            SolTransfer {
                from: ctx.accounts.buyside_sol_escrow_account.to_account_info(),
                to: ctx.accounts.payer.to_account_info(),
            },
            signer_seeds,
        ),
        payout,
    )?;
    let owner_lamports = lp_fee
        .checked_add(sweep)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    if owner_lamports > 0 {
        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                SolTransfer {
                    from: ctx.accounts.buyside_sol_escrow_account.to_account_info(),
                    to: ctx.accounts.owner.to_account_info(),
                },
                signer_seeds,
            ),
            owner_lamports,
        )?;
    }

    let reinvest = ctx.accounts.pool.reinvest;
    let pool = &mut ctx.accounts.pool;
    if reinvest {
        pool.sellside_orders_count = pool
            .sellside_orders_count
            .checked_add(args.asset_amount)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    }
    pool.lp_fee_earned = pool
        .lp_fee_earned
        .checked_add(lp_fee)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    pool.spot_price = quote.next_spot_price;

    Ok(())
}

#[derive(Accounts)]
#[instruction(args: FulfillBuyArgs)]
pub struct FulfillBuy<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    /// CHECK: compared against the pool owner via `has_one`.
    #[account(mut)]
    pub owner: UncheckedAccount<'info>,
    /// CHECK: validated against the pool cosigner in `assert_cosigner`.
    pub cosigner: UncheckedAccount<'info>,
    #[account(
        mut,
        seeds = [b"pool", owner.key().as_ref(), pool.uuid.as_ref()],
        bump = pool.bump,
        has_one = owner @ ErrorCode::InvalidOwner,
    )]
    pub pool: Box<Account<'info, Pool>>,
    /// CHECK: address re-derived and compared in `assert_buyside_sol_escrow`.
    #[account(mut)]
    pub buyside_sol_escrow_account: UncheckedAccount<'info>,
    /// CHECK: metadata PDA verified and deserialized in `check_allowlists_for_mint`.
    pub asset_metadata: UncheckedAccount<'info>,
    /// CHECK: address verified in `assert_master_edition`.
    pub asset_master_edition: UncheckedAccount<'info>,
    pub asset_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        constraint = payer_asset_account.mint == asset_mint.key() @ ErrorCode::InvalidTokenAccount,
        constraint = payer_asset_account.owner == payer.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub payer_asset_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = pool,
    )]
    pub sellside_escrow_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = owner,
    )]
    pub owner_asset_account: Box<Account<'info, TokenAccount>>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
