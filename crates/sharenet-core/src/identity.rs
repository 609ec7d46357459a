// Rust guideline compliant 2026-02-06

//! Hash-based identifier generation.
//!
//! Identifiers take the form `<prefix>-<8 hex chars>` where the hex part is the
//! head of a SHA-256 digest over the seed parts, a timestamp and a nonce.

use crate::{Error, Result};
use sha2::{Digest, Sha256};

const HASH_LEN: usize = 8;

/// Item identifier prefix.
pub const ITEM_PREFIX: &str = "itm";
/// Instant-claim entry prefix.
pub const CLAIM_ENTRY_PREFIX: &str = "clq";
/// Request identifier prefix.
pub const REQUEST_PREFIX: &str = "req";
/// Transaction identifier prefix.
pub const TRANSACTION_PREFIX: &str = "txn";
/// Lost&found post identifier prefix.
pub const POST_PREFIX: &str = "lfp";
/// Verification question identifier prefix.
pub const QUESTION_PREFIX: &str = "vq";
/// Lost&found claim identifier prefix.
pub const CLAIM_PREFIX: &str = "clm";
/// Wanted item identifier prefix.
pub const WANTED_PREFIX: &str = "wnt";
/// Offer identifier prefix.
pub const OFFER_PREFIX: &str = "ofr";

/// Generates a deterministic identifier.
///
/// # Arguments
///
/// * `prefix` - Identifier prefix, e.g. `req`
/// * `seed` - Content that distinguishes the record
/// * `timestamp` - Creation time
/// * `nonce` - Collision counter
pub fn generate_id(prefix: &str, seed: &[&str], timestamp: i64, nonce: u32) -> String {
    let mut hasher = Sha256::new();
    for part in seed {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(timestamp.to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let hex = format!("{:x}", hasher.finalize());
    format!("{}-{}", prefix, &hex[..HASH_LEN])
}

/// Generates an identifier that `taken` reports as unused.
pub fn unique_id<F>(prefix: &str, seed: &[&str], timestamp: i64, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut nonce = 0u32;
    loop {
        let id = generate_id(prefix, seed, timestamp, nonce);
        if !taken(&id) {
            return id;
        }
        nonce = nonce.saturating_add(1);
    }
}

/// Validates the `<prefix>-<hex>` format.
///
/// # Errors
///
/// Returns an error if the prefix does not match or the hash part is not
/// lowercase hex of the expected length.
pub fn validate_id_format(prefix: &str, id: &str) -> Result<()> {
    let hash = id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(|| {
            Error::InvalidRecord(format!("ID '{}' must start with '{}-'", id, prefix))
        })?;

    let well_formed = hash.len() == HASH_LEN
        && hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
    if !well_formed {
        return Err(Error::InvalidRecord(format!(
            "ID '{}' must end with {} lowercase hex characters",
            id, HASH_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_well_formed() {
        let id = generate_id(REQUEST_PREFIX, &["itm-1", "bob"], 1_700_000_000, 0);
        assert!(validate_id_format(REQUEST_PREFIX, &id).is_ok());
        assert!(validate_id_format(ITEM_PREFIX, &id).is_err());
    }

    #[test]
    fn test_unique_id_skips_taken() {
        let first = generate_id(OFFER_PREFIX, &["x"], 1, 0);
        let next = unique_id(OFFER_PREFIX, &["x"], 1, |candidate| candidate == first);
        assert_ne!(first, next);
        assert_eq!(next, generate_id(OFFER_PREFIX, &["x"], 1, 1));
    }
}
