/*
 * Responsibility
 * - The set of tans accepted by /tan/verify
 * - Built once at startup, read-only afterwards (shared behind Arc)
 * - Membership is exact string equality (case-sensitive)
 */
use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidTansError {
    #[error("no valid tans configured")]
    Empty,
}

#[derive(Clone, Debug)]
pub struct ValidTans {
    tans: Arc<HashSet<String>>,
}

impl ValidTans {
    /// Builds the set from raw entries. Entries are trimmed and blank ones
    /// dropped, so the empty string is never a valid tan.
    pub fn new<I, S>(entries: I) -> Result<Self, ValidTansError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tans: HashSet<String> = entries
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if tans.is_empty() {
            return Err(ValidTansError::Empty);
        }

        Ok(Self {
            tans: Arc::new(tans),
        })
    }

    /// Splits a comma and/or newline separated list. Lines starting with `#`
    /// are comments.
    pub fn parse(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .flat_map(|line| line.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn contains(&self, tan: &str) -> bool {
        self.tans.contains(tan)
    }

    pub fn len(&self) -> usize {
        self.tans.len()
    }
}
