use anchor_lang::prelude::*;
use mpl_token_metadata::accounts::{MasterEdition, Metadata};

use crate::{
    constants::{
        ALLOWLIST_KIND_ANY, ALLOWLIST_KIND_FVCA, ALLOWLIST_KIND_MCC, ALLOWLIST_KIND_MINT,
        ALLOWLIST_KIND_NONE,
    },
    error::ErrorCode,
    state::Allowlist,
};

pub struct CreatorFact {
    pub address: Pubkey,
    pub verified: bool,
}

pub struct CollectionFact {
    pub key: Pubkey,
    pub verified: bool,
}

/// The slice of an asset's metadata the admission decision depends on.
pub struct AssetFacts {
    pub mint: Pubkey,
    pub first_creator: Option<CreatorFact>,
    pub collection: Option<CollectionFact>,
}

/// Pure admission decision: the asset is admitted if any non-empty rule
/// matches. An fvca rule whose creator address matches but is unverified
/// rejects the asset outright, since unverified creator entries can be set
/// by anyone.
pub fn check_allowlists(allowlists: &[Allowlist], facts: &AssetFacts) -> Result<()> {
    for entry in allowlists {
        match entry.kind {
            ALLOWLIST_KIND_NONE => continue,
            ALLOWLIST_KIND_ANY => return Ok(()),
            ALLOWLIST_KIND_FVCA => {
                if let Some(creator) = &facts.first_creator {
                    if creator.address == entry.value {
                        require!(creator.verified, ErrorCode::CreatorNotVerified);
                        return Ok(());
                    }
                }
            }
            ALLOWLIST_KIND_MINT => {
                if facts.mint == entry.value {
                    return Ok(());
                }
            }
            ALLOWLIST_KIND_MCC => {
                if let Some(collection) = &facts.collection {
                    if collection.key == entry.value && collection.verified {
                        return Ok(());
                    }
                }
            }
            _ => return Err(ErrorCode::InvalidAllowlist.into()),
        }
    }
    Err(ErrorCode::AssetNotAllowlisted.into())
}

pub fn check_allowlists_for_mint(
    allowlists: &[Allowlist],
    asset_mint: &Pubkey,
    asset_metadata: &AccountInfo,
) -> Result<()> {
    let facts = read_asset_facts(asset_mint, asset_metadata)?;
    check_allowlists(allowlists, &facts)
}

fn read_asset_facts(asset_mint: &Pubkey, asset_metadata: &AccountInfo) -> Result<AssetFacts> {
    let (expected, _) = Metadata::find_pda(asset_mint);
    require_keys_eq!(
        expected,
        *asset_metadata.key,
        ErrorCode::InvalidMetadataAccount
    );
    require_keys_eq!(
        *asset_metadata.owner,
        mpl_token_metadata::ID,
        ErrorCode::InvalidMetadataAccount
    );

    let data = asset_metadata.try_borrow_data()?;
    let metadata = Metadata::safe_deserialize(&data)
        .map_err(|_| error!(ErrorCode::InvalidMetadataAccount))?;
    require_keys_eq!(metadata.mint, *asset_mint, ErrorCode::InvalidMetadataAccount);

    let first_creator = metadata
        .creators
        .as_ref()
        .and_then(|creators| creators.first())
        .map(|creator| CreatorFact {
            address: creator.address,
            verified: creator.verified,
        });
    let collection = metadata.collection.as_ref().map(|collection| CollectionFact {
        key: collection.key,
        verified: collection.verified,
    });

    Ok(AssetFacts {
        mint: *asset_mint,
        first_creator,
        collection,
    })
}

/// Address-only check; SFTs have no master edition account, so existence is
/// not required here.
pub fn assert_master_edition(asset_mint: &Pubkey, master_edition: &AccountInfo) -> Result<()> {
    let (expected, _) = MasterEdition::find_pda(asset_mint);
    require_keys_eq!(
        expected,
        *master_edition.key,
        ErrorCode::InvalidMasterEdition
    );
    Ok(())
}

pub fn assert_valid_allowlists(allowlists: &[Allowlist]) -> Result<()> {
    for entry in allowlists {
        match entry.kind {
            ALLOWLIST_KIND_NONE => {
                require!(entry.value == Pubkey::default(), ErrorCode::InvalidAllowlist)
            }
            ALLOWLIST_KIND_FVCA | ALLOWLIST_KIND_MINT | ALLOWLIST_KIND_MCC => {
                require!(entry.value != Pubkey::default(), ErrorCode::InvalidAllowlist)
            }
            ALLOWLIST_KIND_ANY => {}
            _ => return Err(ErrorCode::InvalidAllowlist.into()),
        }
    }
    Ok(())
}
