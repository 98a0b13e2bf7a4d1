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
        assert_buyside_sol_escrow, assert_cosigner, check_allowlists_for_mint, get_lp_fee,
        quote_fulfill_sell,
    },
    state::Pool,
};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct FulfillSellArgs {
    pub asset_amount: u64,
    /// Slippage bound: the buyer refuses to pay more than this in total.
    pub max_payment_amount: u64,
}

// A buyer takes NFT/SFT units out of the pool's sellside escrow and pays
// lamports at the curve price plus the lp fee. The curve position walks up
// one step per unit.
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, FulfillSell<'info>>,
    args: FulfillSellArgs,
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
    let pool_key = ctx.accounts.pool.key();
    assert_buyside_sol_escrow(
        ctx.program_id,
        &pool_key,
        ctx.accounts.buyside_sol_escrow_account.key,
    )?;

    let escrow_amount_before = ctx.accounts.sellside_escrow_token_account.amount;
    require!(
        args.asset_amount <= escrow_amount_before,
        ErrorCode::InsufficientEscrowBalance
    );

    let quote = quote_fulfill_sell(
        ctx.accounts.pool.curve_kind,
        ctx.accounts.pool.spot_price,
        ctx.accounts.pool.curve_delta,
        args.asset_amount,
    )?;
    require!(
        quote.total_price <= args.max_payment_amount,
        ErrorCode::InvalidRequestedPrice
    );
    let lp_fee = get_lp_fee(
        ctx.accounts.pool.lp_fee_bps,
        ctx.accounts.buyside_sol_escrow_account.lamports(),
        ctx.accounts.pool.spot_price,
        quote.total_price,
    )?;

    let transfer_sol_to = if ctx.accounts.pool.reinvest {
        ctx.accounts.buyside_sol_escrow_account.to_account_info()
    } else {
        ctx.accounts.owner.to_account_info()
    };
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            SolTransfer {
                from: ctx.accounts.payer.to_account_info(),
                to: transfer_sol_to,
            },
        ),
        quote.total_price,
    )?;
    if lp_fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                SolTransfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.owner.to_account_info(),
                },
            ),
            lp_fee,
        )?;
    }

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
                to: ctx.accounts.payer_asset_account.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        args.asset_amount,
    )?;
    if escrow_amount_before == args.asset_amount {
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
        .checked_sub(args.asset_amount)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    pool.lp_fee_earned = pool
        .lp_fee_earned
        .checked_add(lp_fee)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    pool.spot_price = quote.next_spot_price;

    Ok(())
}

#[derive(Accounts)]
#[instruction(args: FulfillSellArgs)]
pub struct FulfillSell<'info> {
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
    pub asset_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = pool,
    )]
    pub sellside_escrow_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = payer,
    )]
    pub payer_asset_account: Box<Account<'info, TokenAccount>>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
