pub const BPS_DENOM: u64 = 10_000;
pub const MAX_LP_FEE_BPS: u16 = 2_000;

pub const ALLOWLIST_MAX_LEN: usize = 6;

pub const CURVE_KIND_LINEAR: u8 = 0;
pub const CURVE_KIND_EXPONENTIAL: u8 = 1;

pub const ALLOWLIST_KIND_NONE: u8 = 0;
pub const ALLOWLIST_KIND_FVCA: u8 = 1;
pub const ALLOWLIST_KIND_MINT: u8 = 2;
pub const ALLOWLIST_KIND_MCC: u8 = 3;
pub const ALLOWLIST_KIND_ANY: u8 = 4;
