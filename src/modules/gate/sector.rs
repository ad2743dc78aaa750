use std::fmt;
use thiserror::Error;

use crate::utils::text::title_case;

pub const MIN_SECTOR_CHARS: usize = 2;
pub const MAX_SECTOR_CHARS: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid sector name ({min}–{max} characters).", min = MIN_SECTOR_CHARS, max = MAX_SECTOR_CHARS)]
pub struct SectorError {
    pub length: usize,
}

/// A sector name that passed length validation. Kept exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorQuery(String);

impl SectorQuery {
    pub fn parse(raw: &str) -> Result<Self, SectorError> {
        let length = raw.chars().count();
        if !(MIN_SECTOR_CHARS..=MAX_SECTOR_CHARS).contains(&length) {
            return Err(SectorError { length });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form used in report titles and the response envelope.
    pub fn title(&self) -> String {
        title_case(&self.0)
    }
}

impl fmt::Display for SectorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SectorQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
