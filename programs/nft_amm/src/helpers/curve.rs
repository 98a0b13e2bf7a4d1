use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOM, CURVE_KIND_EXPONENTIAL, CURVE_KIND_LINEAR},
    error::ErrorCode,
};

#[derive(Debug)]
pub struct Quote {
    pub total_price: u64,
    pub next_spot_price: u64,
}

pub fn assert_valid_curve(curve_kind: u8, curve_delta: u64, spot_price: u64) -> Result<()> {
    require!(spot_price > 0, ErrorCode::InvalidCurveParams);
    match curve_kind {
        CURVE_KIND_LINEAR => Ok(()),
        CURVE_KIND_EXPONENTIAL => {
            require!(curve_delta < BPS_DENOM, ErrorCode::InvalidCurveParams);
            Ok(())
        }
        _ => Err(ErrorCode::UnsupportedCurveKind.into()),
    }
}

/// Total a buyer pays for `asset_amount` units leaving the pool: unit `i`
/// costs the spot after `i - 1` upward steps, and the returned spot is the
/// position after all units settle.
pub fn quote_fulfill_sell(
    curve_kind: u8,
    spot_price: u64,
    curve_delta: u64,
    asset_amount: u64,
) -> Result<Quote> {
    let mut total: u128 = 0;
    let mut spot = spot_price;
    for _ in 0..asset_amount {
        total = total
            .checked_add(spot as u128)
            .ok_or_else(|| error!(ErrorCode::CurveOverflow))?;
        spot = step_up(curve_kind, spot, curve_delta)?;
    }
    Ok(Quote {
        total_price: narrow(total)?,
        next_spot_price: spot,
    })
}

/// Total the pool pays for `asset_amount` units entering it: unit `i` pays
/// the spot after `i - 1` downward steps.
pub fn quote_fulfill_buy(
    curve_kind: u8,
    spot_price: u64,
    curve_delta: u64,
    asset_amount: u64,
) -> Result<Quote> {
    let mut total: u128 = 0;
    let mut spot = spot_price;
    for _ in 0..asset_amount {
        total = total
            .checked_add(spot as u128)
            .ok_or_else(|| error!(ErrorCode::CurveOverflow))?;
        spot = step_down(curve_kind, spot, curve_delta)?;
    }
    Ok(Quote {
        total_price: narrow(total)?,
        next_spot_price: spot,
    })
}

fn step_up(curve_kind: u8, spot: u64, delta: u64) -> Result<u64> {
    match curve_kind {
        CURVE_KIND_LINEAR => spot
            .checked_add(delta)
            .ok_or_else(|| error!(ErrorCode::CurveOverflow)),
        CURVE_KIND_EXPONENTIAL => {
            let scaled = (spot as u128)
                .checked_mul((BPS_DENOM as u128) + (delta as u128))
                .ok_or_else(|| error!(ErrorCode::CurveOverflow))?
                .checked_div(BPS_DENOM as u128)
                .ok_or_else(|| error!(ErrorCode::CurveOverflow))?;
            narrow(scaled)
        }
        _ => Err(ErrorCode::UnsupportedCurveKind.into()),
    }
}

fn step_down(curve_kind: u8, spot: u64, delta: u64) -> Result<u64> {
    match curve_kind {
        CURVE_KIND_LINEAR => spot
            .checked_sub(delta)
            .ok_or_else(|| error!(ErrorCode::CurveOverflow)),
        CURVE_KIND_EXPONENTIAL => {
            let scaled = (spot as u128)
                .checked_mul(BPS_DENOM as u128)
                .ok_or_else(|| error!(ErrorCode::CurveOverflow))?
                .checked_div((BPS_DENOM as u128) + (delta as u128))
                .ok_or_else(|| error!(ErrorCode::CurveOverflow))?;
            narrow(scaled)
        }
        _ => Err(ErrorCode::UnsupportedCurveKind.into()),
    }
}

fn narrow(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(ErrorCode::CurveOverflow))
}

/// Lp fee only applies while the pool is two-sided: a pool whose buyside
/// escrow cannot cover one unit at spot earns no spread.
pub fn get_lp_fee(
    lp_fee_bps: u16,
    buyside_escrow_lamports: u64,
    spot_price: u64,
    total_price: u64,
) -> Result<u64> {
    if buyside_escrow_lamports < spot_price {
        return Ok(0);
    }
    mul_bps(total_price, lp_fee_bps as u64)
}

pub fn mul_bps(value: u64, bps: u64) -> Result<u64> {
    ((value as u128)
        .checked_mul(bps as u128)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))?)
    .checked_div(BPS_DENOM as u128)
    .ok_or_else(|| error!(ErrorCode::MathOverflow))
    .map(|v| v as u64)
}
