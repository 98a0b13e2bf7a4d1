use anchor_lang::prelude::*;

use crate::constants::ALLOWLIST_MAX_LEN;

#[account]
#[derive(InitSpace)]
pub struct Pool {
    pub owner: Pubkey,
    /// Secondary required signer; `Pubkey::default()` disables cosigning.
    pub cosigner: Pubkey,
    /// Client-chosen discriminator so one owner can run several pools.
    pub uuid: Pubkey,
    /// Current curve position, lamports per unit.
    pub spot_price: u64,
    pub curve_kind: u8,
    /// Lamports for the linear curve, bps for the exponential curve.
    pub curve_delta: u64,
    /// Route fulfill proceeds back into escrow instead of to the owner.
    pub reinvest: bool,
    pub lp_fee_bps: u16,
    pub allowlists: [Allowlist; ALLOWLIST_MAX_LEN],
    /// Units currently held in sell-side escrow token accounts.
    pub sellside_orders_count: u64,
    pub lp_fee_earned: u64,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace, PartialEq, Eq, Debug)]
pub struct Allowlist {
    pub kind: u8,
    pub value: Pubkey,
}

impl Allowlist {
    pub fn is_empty(&self) -> bool {
        self.kind == crate::constants::ALLOWLIST_KIND_NONE
    }
}
