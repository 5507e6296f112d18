//! Legacy "type 7" secret obfuscation.
//!
//! This is a reversible XOR against a published key table. It exists so
//! rendered configurations match what the routers display; it provides no
//! confidentiality and must not be used to protect anything.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{IsisError, Result};

const KEY: &[u8; 53] = b"dsfd;kfoA,.iyewrkldJKDHSUBsgvca69834ncxv9873254k;fg87";

/// Two-digit decimal salt selecting the starting offset into the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt(u8);

impl Salt {
    pub const MAX: u8 = 99;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// How a fresh salt is picked when a secret has to be re-encoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaltPolicy {
    /// Always the same salt; keeps rendered output reproducible
    Fixed(Salt),
    /// Uniform in 0..=15, the range routers themselves produce
    #[default]
    Random,
}

impl SaltPolicy {
    pub fn salt(&self) -> Salt {
        match self {
            Self::Fixed(salt) => *salt,
            Self::Random => Salt(rand::thread_rng().gen_range(0..16)),
        }
    }
}

impl FromStr for SaltPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        s.parse::<u8>()
            .ok()
            .and_then(Salt::new)
            .map(Self::Fixed)
            .ok_or_else(|| format!("invalid salt policy {:?}: expected \"random\" or 0-99", s))
    }
}

pub struct SecretCipher;

impl SecretCipher {
    /// XOR `data` against the key table; the operation is its own inverse.
    fn cipher(data: &[u8], salt: Salt) -> Vec<u8> {
        data.iter()
            .enumerate()
            .map(|(idx, b)| b ^ KEY[(salt.value() as usize + idx) % KEY.len()])
            .collect()
    }

    pub fn encode(plaintext: &str, salt: Salt) -> String {
        let data = Self::cipher(plaintext.as_bytes(), salt);
        format!("{}{}", salt, hex::encode_upper(data))
    }

    pub fn decode(hash: &str) -> Result<String> {
        let (salt, checksum) = match (hash.get(..2), hash.get(2..)) {
            (Some(salt), Some(checksum)) => (salt, checksum),
            _ => return Err(IsisError::malformed("hash shorter than its salt")),
        };
        if !salt.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IsisError::malformed(format!("salt {:?} is not decimal", salt)));
        }
        let salt = salt
            .parse::<u8>()
            .ok()
            .and_then(Salt::new)
            .ok_or_else(|| IsisError::malformed(format!("salt {:?} out of range", salt)))?;

        let data = hex::decode(checksum)
            .map_err(|e| IsisError::malformed(format!("payload is not hex: {}", e)))?;
        String::from_utf8(Self::cipher(&data, salt))
            .map_err(|_| IsisError::malformed("payload does not decode to text"))
    }

    pub fn verify(secret: &str, hash: &str) -> Result<bool> {
        Ok(secret == Self::decode(hash)?)
    }

    /// Reuse `prior` when it still encodes `secret`, otherwise encode afresh.
    ///
    /// A missing, stale or undecodable prior hash all lead to a fresh encode.
    pub fn merge(secret: &str, prior: Option<&str>, policy: SaltPolicy) -> String {
        if let Some(prior) = prior {
            match Self::verify(secret, prior) {
                Ok(true) => {
                    tracing::debug!("stored secret hash still valid, keeping it");
                    return prior.to_string();
                }
                Ok(false) => tracing::debug!("stored secret hash is stale, re-encoding"),
                Err(e) => tracing::debug!("stored secret hash unusable ({}), re-encoding", e),
            }
        }
        Self::encode(secret, policy.salt())
    }
}
