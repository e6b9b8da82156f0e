//! Reversible credential obfuscation.
//!
//! Turns a plaintext credential into a base64 text token that is safe to keep
//! in a plain file, and back. The key is embedded in the client
//! ([`OBFUSCATION_KEY`](crate::config::OBFUSCATION_KEY)), so anyone holding a
//! token and this crate can recover the plaintext. This hides the credential
//! from casual inspection of the store directory and nothing more.
//!
//! Token layout (before base64): `salt[8] | tag[4] | ciphertext`.
//! The ciphertext is the plaintext XORed with a SHA-256 counter-mode
//! keystream over `(key, salt, block)`. The tag lets [`reveal`] reject
//! tokens that were not produced by [`obfuscate`].

use base64::prelude::*;
use sha2::{Digest, Sha256};

use crate::config::OBFUSCATION_KEY;
use crate::error::{DashboardError, Result};

const SALT_LEN: usize = 8;
const TAG_LEN: usize = 4;

/// Obfuscate a plaintext credential into a storable token.
///
/// A fresh random salt is drawn per call, so the same plaintext yields a
/// different token each time. Every token reveals to the same plaintext.
pub fn obfuscate(plaintext: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    encode_with_salt(plaintext, &salt)
}

/// Recover the plaintext from a token produced by [`obfuscate`].
///
/// Never fails: any malformed, truncated, tampered or non-UTF-8 token yields
/// an empty string, which callers treat as "no credential available".
pub fn reveal(token: &str) -> String {
    match try_reveal(token) {
        Ok(plaintext) => plaintext,
        Err(e) => {
            tracing::warn!(error = %e, "credential token could not be revealed");
            String::new()
        }
    }
}

fn encode_with_salt(plaintext: &str, salt: &[u8; SALT_LEN]) -> String {
    let mut out = Vec::with_capacity(SALT_LEN + TAG_LEN + plaintext.len());
    out.extend_from_slice(salt);
    out.extend_from_slice(&tag(salt, plaintext.as_bytes()));
    out.extend(xor_keystream(salt, plaintext.as_bytes()));
    BASE64_STANDARD.encode(out)
}

fn try_reveal(token: &str) -> Result<String> {
    let raw = BASE64_STANDARD
        .decode(token.trim())
        .map_err(|e| DashboardError::Decode(format!("invalid base64: {e}")))?;
    if raw.len() < SALT_LEN + TAG_LEN {
        return Err(DashboardError::Decode(format!(
            "token too short ({} bytes)",
            raw.len()
        )));
    }

    let (salt, rest) = raw.split_at(SALT_LEN);
    let (expected_tag, ciphertext) = rest.split_at(TAG_LEN);
    let plain = xor_keystream(salt, ciphertext);

    if tag(salt, &plain) != expected_tag {
        return Err(DashboardError::Decode("check tag mismatch".into()));
    }

    String::from_utf8(plain).map_err(|e| DashboardError::Decode(format!("not UTF-8: {e}")))
}

fn xor_keystream(salt: &[u8], data: &[u8]) -> Vec<u8> {
    data.chunks(32)
        .enumerate()
        .flat_map(|(block, chunk)| {
            let pad = Sha256::new()
                .chain_update(b"ks")
                .chain_update(OBFUSCATION_KEY.as_bytes())
                .chain_update(salt)
                .chain_update((block as u32).to_be_bytes())
                .finalize();
            chunk
                .iter()
                .zip(pad)
                .map(|(b, k)| b ^ k)
                .collect::<Vec<u8>>()
        })
        .collect()
}

fn tag(salt: &[u8], plaintext: &[u8]) -> [u8; TAG_LEN] {
    let digest = Sha256::new()
        .chain_update(b"tag")
        .chain_update(OBFUSCATION_KEY.as_bytes())
        .chain_update(salt)
        .chain_update(plaintext)
        .finalize();
    let mut out = [0u8; TAG_LEN];
    out.copy_from_slice(&digest[..TAG_LEN]);
    out
}
