use std::collections::HashMap;
use std::time::Duration;

/// Feed URL to validity flag, one entry per unique URL of a batch.
pub type ValidationResult = HashMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    pub valid: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl ValidationSummary {
    /// Counts every input URL, duplicates included, against its checked outcome.
    #[must_use]
    pub fn from_urls<'a, I>(urls: I, results: &ValidationResult, elapsed: Duration) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (valid, total) = urls.into_iter().fold((0, 0), |(valid, total), url| {
            let ok = results.get(url).copied().unwrap_or(false);
            (valid + usize::from(ok), total + 1)
        });

        Self {
            valid,
            total,
            elapsed,
        }
    }
}
