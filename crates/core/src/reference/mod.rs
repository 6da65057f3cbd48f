pub mod sequence;

pub use sequence::{CountingSequence, DailyCounts, DailySequence, InMemorySequence, ParcelCounter};

use crate::clock::Clock;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Widest sequence field a u64 can fill
const MAX_SEQUENCE_WIDTH: usize = 20;

/// Reference format settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Leading segment of generated references
    pub prefix: String,

    /// Minimum number of digits in the sequence field
    pub sequence_width: usize,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            prefix: "EXP-PARCEL".to_string(),
            sequence_width: 4,
        }
    }
}

impl ReferenceConfig {
    /// Validates reference settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.prefix.is_empty() {
            return Err(crate::Error::Config("Reference prefix must not be empty".to_string()));
        }

        if self.prefix.chars().any(char::is_whitespace) {
            return Err(crate::Error::Config(format!(
                "Reference prefix must not contain whitespace: {:?}",
                self.prefix
            )));
        }

        if self.sequence_width == 0 || self.sequence_width > MAX_SEQUENCE_WIDTH {
            return Err(crate::Error::Config(format!(
                "Sequence width must be between 1 and {}",
                MAX_SEQUENCE_WIDTH
            )));
        }

        Ok(())
    }
}

/// A generated reference: `<prefix>-<YYYYMMDD>-<sequence>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParcelReference {
    pub date: NaiveDate,
    pub sequence: u64,
}

impl ParcelReference {
    pub fn new(date: NaiveDate, sequence: u64) -> Self {
        Self { date, sequence }
    }

    /// Renders the reference, zero-padding the sequence to the configured width.
    /// Sequences wider than the width are printed in full.
    pub fn format(&self, config: &ReferenceConfig) -> String {
        format!(
            "{}-{}-{:0width$}",
            config.prefix,
            self.date.format("%Y%m%d"),
            self.sequence,
            width = config.sequence_width
        )
    }

    /// Parses a generated reference. Returns `None` for anything that does
    /// not follow the configured format, including custom references.
    pub fn parse(reference: &str, config: &ReferenceConfig) -> Option<Self> {
        let rest = reference.strip_prefix(config.prefix.as_str())?.strip_prefix('-')?;
        let (date, sequence) = rest.split_once('-')?;

        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if sequence.len() < config.sequence_width || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year = date[0..4].parse().ok()?;
        let month = date[4..6].parse().ok()?;
        let day = date[6..8].parse().ok()?;

        Some(Self {
            date: NaiveDate::from_ymd_opt(year, month, day)?,
            sequence: sequence.parse().ok()?,
        })
    }
}

/// Issues parcel references.
///
/// Custom references pass through untouched. Otherwise the current business
/// day comes from the clock and the sequence number from the daily sequence;
/// whether two concurrent calls can collide depends entirely on the
/// [`DailySequence`] implementation supplied.
pub struct ReferenceGenerator<S, K> {
    config: ReferenceConfig,
    sequence: S,
    clock: K,
}

impl<S: DailySequence, K: Clock> ReferenceGenerator<S, K> {
    /// Creates a generator, rejecting invalid reference settings
    pub fn new(config: ReferenceConfig, sequence: S, clock: K) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sequence,
            clock,
        })
    }

    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    /// Returns `custom_reference` if present and non-empty, otherwise the
    /// next generated reference for today
    pub async fn generate_parcel_reference(&self, custom_reference: Option<&str>) -> crate::Result<String> {
        if let Some(custom) = custom_reference.filter(|r| !r.is_empty()) {
            debug!("Using caller-supplied parcel reference {}", custom);
            return Ok(custom.to_string());
        }

        let today = self.clock.today();
        let sequence = self.sequence.next_for(today).await?;
        let reference = ParcelReference::new(today, sequence).format(&self.config);

        info!("Issued parcel reference {} (sequence {} for {})", reference, sequence, today);

        Ok(reference)
    }
}
