//! Suffix digest helper

use anyhow::Result;
use tally_core::config::{suffix_digest, SUFFIX_LEN};

pub fn cmd_digest(name: &str) -> Result<()> {
    if name.chars().count() < SUFFIX_LEN {
        tracing::warn!(
            "Name is shorter than {} characters; the whole name is hashed",
            SUFFIX_LEN
        );
    }
    println!("{}", suffix_digest(name));
    Ok(())
}
