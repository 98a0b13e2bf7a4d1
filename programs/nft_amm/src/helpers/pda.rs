use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub fn buyside_sol_escrow_address(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"buyside-sol-escrow", pool.as_ref()], program_id)
}

/// Recomputes the buyside escrow PDA and compares it against the supplied
/// address. The derived address is never stored on the pool; every use site
/// runs this check. Returns the bump for escrow-signed transfers.
pub fn assert_buyside_sol_escrow(
    program_id: &Pubkey,
    pool: &Pubkey,
    escrow: &Pubkey,
) -> Result<u8> {
    let (expected, bump) = buyside_sol_escrow_address(program_id, pool);
    require_keys_eq!(expected, *escrow, ErrorCode::InvalidEscrowAddress);
    Ok(bump)
}
