use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid pool owner")]
    InvalidOwner,
    #[msg("Cosigner does not match pool cosigner")]
    InvalidCosigner,
    #[msg("Missing cosigner signature")]
    MissingCosignerSignature,
    #[msg("Escrow address does not match derived address")]
    InvalidEscrowAddress,
    #[msg("Asset not admitted by any allowlist rule")]
    AssetNotAllowlisted,
    #[msg("Matching first creator is not verified")]
    CreatorNotVerified,
    #[msg("Invalid metadata account")]
    InvalidMetadataAccount,
    #[msg("Invalid master edition account")]
    InvalidMasterEdition,
    #[msg("Malformed allowlist entry")]
    InvalidAllowlist,
    #[msg("Unsupported curve kind")]
    UnsupportedCurveKind,
    #[msg("Invalid curve parameters")]
    InvalidCurveParams,
    #[msg("Invalid bps")]
    InvalidBps,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Curve price computation overflowed")]
    CurveOverflow,
    #[msg("Computed price is outside the requested bound")]
    InvalidRequestedPrice,
    #[msg("Insufficient escrow balance")]
    InsufficientEscrowBalance,
    #[msg("Escrow must be empty to close the pool")]
    EscrowNotEmpty,
    #[msg("Invalid token account")]
    InvalidTokenAccount,
}
