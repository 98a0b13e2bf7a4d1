use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod helpers;
pub mod instructions;
pub mod state;

pub use constants::*;
pub use error::*;
pub use helpers::*;
pub use instructions::*;
pub use state::*;

declare_id!("3r5G5xWQCqgh4kpiLhHHHzpTa47QRPNAzo8UZhQhozAk");

#[program]
pub mod nft_amm {
    use super::*;

    pub fn create_pool(ctx: Context<CreatePool>, args: CreatePoolArgs) -> Result<()> {
        instructions::create_pool::handler(ctx, args)
    }

    pub fn update_pool<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdatePool<'info>>,
        args: UpdatePoolArgs,
    ) -> Result<()> {
        instructions::update_pool::handler(ctx, args)
    }

    pub fn sol_deposit_buy<'info>(
        ctx: Context<'_, '_, '_, 'info, SolDepositBuy<'info>>,
        payment_amount: u64,
    ) -> Result<()> {
        instructions::sol_deposit_buy::handler(ctx, payment_amount)
    }

    pub fn sol_withdraw_buy<'info>(
        ctx: Context<'_, '_, '_, 'info, SolWithdrawBuy<'info>>,
        payment_amount: u64,
    ) -> Result<()> {
        instructions::sol_withdraw_buy::handler(ctx, payment_amount)
    }

    pub fn deposit_sell<'info>(
        ctx: Context<'_, '_, '_, 'info, DepositSell<'info>>,
        asset_amount: u64,
    ) -> Result<()> {
        instructions::deposit_sell::handler(ctx, asset_amount)
    }

    pub fn withdraw_sell<'info>(
        ctx: Context<'_, '_, '_, 'info, WithdrawSell<'info>>,
        asset_amount: u64,
    ) -> Result<()> {
        instructions::withdraw_sell::handler(ctx, asset_amount)
    }

    pub fn fulfill_sell<'info>(
        ctx: Context<'_, '_, '_, 'info, FulfillSell<'info>>,
        args: FulfillSellArgs,
    ) -> Result<()> {
        instructions::fulfill_sell::handler(ctx, args)
    }

    pub fn fulfill_buy<'info>(
        ctx: Context<'_, '_, '_, 'info, FulfillBuy<'info>>,
        args: FulfillBuyArgs,
    ) -> Result<()> {
        instructions::fulfill_buy::handler(ctx, args)
    }

    pub fn close_pool<'info>(ctx: Context<'_, '_, '_, 'info, ClosePool<'info>>) -> Result<()> {
        instructions::close_pool::handler(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use anchor_lang::error::Error;

    fn code_of(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => {
                e.error_code_number - anchor_lang::error::ERROR_CODE_OFFSET
            }
            Error::ProgramError(e) => panic!("unexpected program error: {e:?}"),
        }
    }

    fn empty_allowlists() -> [Allowlist; ALLOWLIST_MAX_LEN] {
        [Allowlist {
            kind: ALLOWLIST_KIND_NONE,
            value: Pubkey::default(),
        }; ALLOWLIST_MAX_LEN]
    }

    fn facts(
        mint: Pubkey,
        first_creator: Option<(Pubkey, bool)>,
        collection: Option<(Pubkey, bool)>,
    ) -> AssetFacts {
        AssetFacts {
            mint,
            first_creator: first_creator.map(|(address, verified)| CreatorFact {
                address,
                verified,
            }),
            collection: collection.map(|(key, verified)| CollectionFact { key, verified }),
        }
    }

    fn test_pool(cosigner: Pubkey) -> Pool {
        Pool {
            owner: Pubkey::new_unique(),
            cosigner,
            uuid: Pubkey::new_unique(),
            spot_price: 1_000_000,
            curve_kind: CURVE_KIND_LINEAR,
            curve_delta: 0,
            reinvest: true,
            lp_fee_bps: 0,
            allowlists: empty_allowlists(),
            sellside_orders_count: 0,
            lp_fee_earned: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_mul_bps() {
        assert_eq!(mul_bps(1_000_000, 500).unwrap(), 50_000);
        assert_eq!(mul_bps(2_500_000, 10_000).unwrap(), 2_500_000);
    }

    #[test]
    fn test_linear_quote_up() {
        let quote = quote_fulfill_sell(CURVE_KIND_LINEAR, 100, 10, 3).unwrap();
        assert_eq!(quote.total_price, 100 + 110 + 120);
        assert_eq!(quote.next_spot_price, 130);
    }

    #[test]
    fn test_linear_quote_down() {
        let quote = quote_fulfill_buy(CURVE_KIND_LINEAR, 100, 10, 3).unwrap();
        assert_eq!(quote.total_price, 100 + 90 + 80);
        assert_eq!(quote.next_spot_price, 70);
    }

    #[test]
    fn test_linear_quote_underflow() {
        let err = quote_fulfill_buy(CURVE_KIND_LINEAR, 10, 10, 2).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::CurveOverflow as u32);
    }

    #[test]
    fn test_linear_quote_overflow() {
        let err = quote_fulfill_sell(CURVE_KIND_LINEAR, u64::MAX, u64::MAX, 2).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::CurveOverflow as u32);
    }

    #[test]
    fn test_exponential_quote_up() {
        let quote = quote_fulfill_sell(CURVE_KIND_EXPONENTIAL, 10_000, 1_000, 2).unwrap();
        assert_eq!(quote.total_price, 10_000 + 11_000);
        assert_eq!(quote.next_spot_price, 12_100);
    }

    #[test]
    fn test_exponential_quote_down() {
        let quote = quote_fulfill_buy(CURVE_KIND_EXPONENTIAL, 10_000, 1_000, 2).unwrap();
        assert_eq!(quote.total_price, 10_000 + 9_090);
        assert_eq!(quote.next_spot_price, 8_263);
    }

    #[test]
    fn test_quote_composes_step_by_step() {
        // Quoting n units equals quoting them one at a time from the carried
        // position, so the price quoted pre-trade is the price settled.
        let one = quote_fulfill_sell(CURVE_KIND_EXPONENTIAL, 50_000, 250, 1).unwrap();
        let two = quote_fulfill_sell(CURVE_KIND_EXPONENTIAL, one.next_spot_price, 250, 1).unwrap();
        let combined = quote_fulfill_sell(CURVE_KIND_EXPONENTIAL, 50_000, 250, 2).unwrap();
        assert_eq!(combined.total_price, one.total_price + two.total_price);
        assert_eq!(combined.next_spot_price, two.next_spot_price);
    }

    #[test]
    fn test_unsupported_curve_kind() {
        let err = assert_valid_curve(7, 0, 1).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::UnsupportedCurveKind as u32);
        let err = quote_fulfill_sell(7, 100, 10, 1).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::UnsupportedCurveKind as u32);
    }

    #[test]
    fn test_curve_param_validation() {
        assert!(assert_valid_curve(CURVE_KIND_LINEAR, 0, 1).is_ok());
        assert!(assert_valid_curve(CURVE_KIND_EXPONENTIAL, 9_999, 1).is_ok());
        let err = assert_valid_curve(CURVE_KIND_EXPONENTIAL, 10_000, 1).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidCurveParams as u32);
        let err = assert_valid_curve(CURVE_KIND_LINEAR, 10, 0).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidCurveParams as u32);
    }

    #[test]
    fn test_lp_fee_requires_two_sided_pool() {
        assert_eq!(get_lp_fee(200, 500_000, 1_000_000, 1_000_000).unwrap(), 0);
        assert_eq!(
            get_lp_fee(200, 2_000_000, 1_000_000, 1_000_000).unwrap(),
            20_000
        );
    }

    #[test]
    fn test_allowlist_fvca_verified() {
        let creator = Pubkey::new_unique();
        let mut allowlists = empty_allowlists();
        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_FVCA,
            value: creator,
        };
        let mint = Pubkey::new_unique();
        assert!(check_allowlists(&allowlists, &facts(mint, Some((creator, true)), None)).is_ok());
    }

    #[test]
    fn test_allowlist_fvca_unverified_rejected() {
        let creator = Pubkey::new_unique();
        let mut allowlists = empty_allowlists();
        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_FVCA,
            value: creator,
        };
        let mint = Pubkey::new_unique();
        let err =
            check_allowlists(&allowlists, &facts(mint, Some((creator, false)), None)).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::CreatorNotVerified as u32);
    }

    #[test]
    fn test_allowlist_no_match_rejected() {
        let mut allowlists = empty_allowlists();
        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_FVCA,
            value: Pubkey::new_unique(),
        };
        let mint = Pubkey::new_unique();
        let other_creator = Pubkey::new_unique();
        let err = check_allowlists(&allowlists, &facts(mint, Some((other_creator, true)), None))
            .unwrap_err();
        assert_eq!(code_of(err), ErrorCode::AssetNotAllowlisted as u32);
    }

    #[test]
    fn test_allowlist_empty_list_rejects() {
        let allowlists = empty_allowlists();
        let err =
            check_allowlists(&allowlists, &facts(Pubkey::new_unique(), None, None)).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::AssetNotAllowlisted as u32);
    }

    #[test]
    fn test_allowlist_any_admits() {
        let mut allowlists = empty_allowlists();
        allowlists[5] = Allowlist {
            kind: ALLOWLIST_KIND_ANY,
            value: Pubkey::default(),
        };
        assert!(check_allowlists(&allowlists, &facts(Pubkey::new_unique(), None, None)).is_ok());
    }

    #[test]
    fn test_allowlist_mint_kind() {
        let mint = Pubkey::new_unique();
        let mut allowlists = empty_allowlists();
        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_MINT,
            value: mint,
        };
        assert!(check_allowlists(&allowlists, &facts(mint, None, None)).is_ok());
        let err =
            check_allowlists(&allowlists, &facts(Pubkey::new_unique(), None, None)).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::AssetNotAllowlisted as u32);
    }

    #[test]
    fn test_allowlist_collection_kind() {
        let collection = Pubkey::new_unique();
        let mut allowlists = empty_allowlists();
        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_MCC,
            value: collection,
        };
        let mint = Pubkey::new_unique();
        assert!(check_allowlists(&allowlists, &facts(mint, None, Some((collection, true)))).is_ok());
        // Unverified collection linkage never admits.
        let err = check_allowlists(&allowlists, &facts(mint, None, Some((collection, false))))
            .unwrap_err();
        assert_eq!(code_of(err), ErrorCode::AssetNotAllowlisted as u32);
    }

    #[test]
    fn test_allowlist_or_semantics_later_rule_matches() {
        let mint = Pubkey::new_unique();
        let mut allowlists = empty_allowlists();
        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_FVCA,
            value: Pubkey::new_unique(),
        };
        allowlists[3] = Allowlist {
            kind: ALLOWLIST_KIND_MINT,
            value: mint,
        };
        assert!(check_allowlists(&allowlists, &facts(mint, None, None)).is_ok());
    }

    #[test]
    fn test_allowlist_config_validation() {
        let mut allowlists = empty_allowlists();
        assert!(assert_valid_allowlists(&allowlists).is_ok());

        allowlists[0] = Allowlist {
            kind: 9,
            value: Pubkey::default(),
        };
        let err = assert_valid_allowlists(&allowlists).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidAllowlist as u32);

        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_NONE,
            value: Pubkey::new_unique(),
        };
        let err = assert_valid_allowlists(&allowlists).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidAllowlist as u32);

        allowlists[0] = Allowlist {
            kind: ALLOWLIST_KIND_FVCA,
            value: Pubkey::default(),
        };
        let err = assert_valid_allowlists(&allowlists).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidAllowlist as u32);
    }

    #[test]
    fn test_buyside_escrow_derivation_is_deterministic() {
        let program_id = crate::ID;
        let pool = Pubkey::new_unique();
        let (derived, bump) = buyside_sol_escrow_address(&program_id, &pool);
        assert_eq!(
            assert_buyside_sol_escrow(&program_id, &pool, &derived).unwrap(),
            bump
        );
        let err =
            assert_buyside_sol_escrow(&program_id, &pool, &Pubkey::new_unique()).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidEscrowAddress as u32);
    }

    #[test]
    fn test_cosigner_disabled() {
        let pool = test_pool(Pubkey::default());
        let key = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let system = Pubkey::default();
        let cosigner = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);
        assert!(assert_cosigner(&pool, &cosigner, &[]).is_ok());
    }

    #[test]
    fn test_cosigner_direct_signer() {
        let key = Pubkey::new_unique();
        let pool = test_pool(key);
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let system = Pubkey::default();
        let cosigner = AccountInfo::new(&key, true, false, &mut lamports, &mut data, &system, false, 0);
        assert!(assert_cosigner(&pool, &cosigner, &[]).is_ok());
    }

    #[test]
    fn test_cosigner_missing_signature() {
        let key = Pubkey::new_unique();
        let pool = test_pool(key);
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let system = Pubkey::default();
        let cosigner = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);
        let err = assert_cosigner(&pool, &cosigner, &[]).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::MissingCosignerSignature as u32);
    }

    #[test]
    fn test_cosigner_delegated_signer() {
        let key = Pubkey::new_unique();
        let pool = test_pool(key);
        let system = Pubkey::default();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let cosigner = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);
        let mut delegate_lamports = 0u64;
        let mut delegate_data: Vec<u8> = vec![];
        let delegate = AccountInfo::new(
            &key,
            true,
            false,
            &mut delegate_lamports,
            &mut delegate_data,
            &system,
            false,
            0,
        );
        assert!(assert_cosigner(&pool, &cosigner, &[delegate]).is_ok());
    }

    #[test]
    fn test_cosigner_delegated_not_signer() {
        let key = Pubkey::new_unique();
        let pool = test_pool(key);
        let system = Pubkey::default();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let cosigner = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);
        let mut delegate_lamports = 0u64;
        let mut delegate_data: Vec<u8> = vec![];
        let delegate = AccountInfo::new(
            &key,
            false,
            false,
            &mut delegate_lamports,
            &mut delegate_data,
            &system,
            false,
            0,
        );
        let err = assert_cosigner(&pool, &cosigner, &[delegate]).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::MissingCosignerSignature as u32);
    }

    #[test]
    fn test_cosigner_delegated_wrong_key() {
        let key = Pubkey::new_unique();
        let pool = test_pool(key);
        let system = Pubkey::default();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let cosigner = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);
        let other = Pubkey::new_unique();
        let mut delegate_lamports = 0u64;
        let mut delegate_data: Vec<u8> = vec![];
        let delegate = AccountInfo::new(
            &other,
            true,
            false,
            &mut delegate_lamports,
            &mut delegate_data,
            &system,
            false,
            0,
        );
        let err = assert_cosigner(&pool, &cosigner, &[delegate]).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidCosigner as u32);
    }

    #[test]
    fn test_cosigner_wrong_key() {
        let pool = test_pool(Pubkey::new_unique());
        let other = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let system = Pubkey::default();
        let cosigner = AccountInfo::new(&other, true, false, &mut lamports, &mut data, &system, false, 0);
        let err = assert_cosigner(&pool, &cosigner, &[]).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::InvalidCosigner as u32);
    }
}
