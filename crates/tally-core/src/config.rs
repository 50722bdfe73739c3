//! Configuration for ledger generation
//!
//! The only tunable today is how the account holder is recognised on the
//! "Shipping Address Name" column. Orders shipped to the account holder get
//! a shorter memo without the recipient's name.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path (`--config`), or the override in the data dir
//!    (~/.local/share/tally/config.toml) when present
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

/// Number of trailing ship-to characters covered by a suffix digest
pub const SUFFIX_LEN: usize = 4;

/// Hex SHA-256 of the last four characters of a ship-to name
///
/// Names shorter than four characters are hashed whole.
pub fn suffix_digest(ship_to: &str) -> String {
    let char_count = ship_to.chars().count();
    let suffix: String = ship_to
        .chars()
        .skip(char_count.saturating_sub(SUFFIX_LEN))
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(suffix.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recognises shipping names that belong to the account holder
///
/// A name matches when it is listed verbatim, or when the digest of its
/// last four characters is listed. The digest form keeps the name itself
/// out of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfRecipients {
    names: HashSet<String>,
    suffix_digests: HashSet<String>,
}

impl SelfRecipients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.add_name(name);
        self
    }

    pub fn add_name(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Add a hex SHA-256 suffix digest (case-insensitive)
    pub fn add_suffix_digest(&mut self, digest: &str) -> Result<()> {
        let digest = digest.trim().to_lowercase();
        let bytes = hex::decode(&digest)
            .map_err(|e| Error::Config(format!("Invalid suffix digest '{}': {}", digest, e)))?;
        if bytes.len() != 32 {
            return Err(Error::Config(format!(
                "Suffix digest '{}' is not a SHA-256 digest",
                digest
            )));
        }
        self.suffix_digests.insert(digest);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.suffix_digests.is_empty()
    }

    pub fn matches(&self, ship_to: &str) -> bool {
        if self.names.contains(ship_to) {
            return true;
        }
        !self.suffix_digests.is_empty() && self.suffix_digests.contains(&suffix_digest(ship_to))
    }
}

/// Ledger generation settings
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub self_recipients: SelfRecipients,
}

impl Config {
    /// Load config from an explicit path, the data dir override, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    debug!("Using config override {}", default_path.display());
                    fs::read_to_string(&default_path).map_err(|e| {
                        Error::Config(format!("Failed to read {}: {}", default_path.display(), e))
                    })?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("tally").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    self_recipients: Option<RawSelfRecipients>,
}

#[derive(Debug, Deserialize)]
struct RawSelfRecipients {
    names: Option<Vec<String>>,
    suffix_digests: Option<Vec<String>>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut config = Config::default();

    if let Some(recipients) = raw.self_recipients {
        for name in recipients.names.unwrap_or_default() {
            config.self_recipients.add_name(name);
        }
        for digest in recipients.suffix_digests.unwrap_or_default() {
            config.self_recipients.add_suffix_digest(&digest)?;
        }
    }

    Ok(config)
}
