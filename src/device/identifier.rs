use crate::error::{Result, XrError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Interface kind managed by this tool
pub const KIND: &str = "Loopback";

/// `loopback` prefix (any case) followed by digits, or bare digits
static LOOPBACK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:loopback)?([0-9]+)$").unwrap()
});

/// Canonical Loopback interface name, always `LoopbackN` with no leading zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopbackId(u32);

impl LoopbackId {
    /// Normalize a loopback name or numeric ID.
    ///
    /// `"100"`, `"Loopback100"`, `"loopback0100"` and `" LOOPBACK100 "` all
    /// collapse to `Loopback100`.
    pub fn normalize(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let caps = LOOPBACK_REGEX
            .captures(trimmed)
            .ok_or_else(|| XrError::InvalidIdentifier(raw.to_string()))?;

        // the digit body is re-parsed so "007" and "7" are the same interface
        let number = caps[1]
            .parse::<u32>()
            .map_err(|_| XrError::InvalidIdentifier(raw.to_string()))?;

        Ok(Self(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LoopbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", KIND, self.0)
    }
}
