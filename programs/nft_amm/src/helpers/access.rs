use anchor_lang::prelude::*;

use crate::{error::ErrorCode, state::Pool};

/// How the cosigner signature arrives: either the fixed cosigner account
/// signed directly, or a delegate supplies it as the first remaining account.
pub enum CosignerSource<'a, 'info> {
    Direct(&'a AccountInfo<'info>),
    Delegated(&'a [AccountInfo<'info>]),
}

pub fn resolve_cosigner_source<'a, 'info>(
    cosigner: &'a AccountInfo<'info>,
    remaining: &'a [AccountInfo<'info>],
) -> CosignerSource<'a, 'info> {
    if cosigner.is_signer {
        CosignerSource::Direct(cosigner)
    } else {
        CosignerSource::Delegated(remaining)
    }
}

pub fn assert_cosigner<'info>(
    pool: &Pool,
    cosigner: &AccountInfo<'info>,
    remaining: &[AccountInfo<'info>],
) -> Result<()> {
    if pool.cosigner == Pubkey::default() {
        return Ok(());
    }
    require_keys_eq!(*cosigner.key, pool.cosigner, ErrorCode::InvalidCosigner);

    match resolve_cosigner_source(cosigner, remaining) {
        CosignerSource::Direct(_) => Ok(()),
        CosignerSource::Delegated(accounts) => {
            let delegate = accounts
                .first()
                .ok_or_else(|| error!(ErrorCode::MissingCosignerSignature))?;
            require_keys_eq!(*delegate.key, pool.cosigner, ErrorCode::InvalidCosigner);
            require!(delegate.is_signer, ErrorCode::MissingCosignerSignature);
            Ok(())
        }
    }
}
