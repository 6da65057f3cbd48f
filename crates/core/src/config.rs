use crate::clock::BusinessClock;
use crate::profit::{ProfitCalculator, RoundingPolicy};
use crate::reference::ReferenceConfig;
use serde::{Deserialize, Serialize};

/// Highest scale rust_decimal can represent
const MAX_DECIMAL_PLACES: u32 = 28;

/// Top-level configuration for the wave core
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WaveConfig {
    /// Parcel reference format
    pub reference: ReferenceConfig,
    
    /// Business time zone
    pub clock: ClockConfig,
    
    /// Report precision
    pub rounding: RoundingPolicy,
}

/// Business time zone settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClockConfig {
    /// Offset east of UTC in minutes (e.g. 480 for UTC+08:00)
    pub utc_offset_minutes: i32,
}

impl WaveConfig {
    /// Validates configuration values
    pub fn validate(&self) -> crate::Result<()> {
        self.reference.validate()?;
        BusinessClock::from_offset_minutes(self.clock.utc_offset_minutes)?;
        
        if self.rounding.money_dp > MAX_DECIMAL_PLACES || self.rounding.weight_dp > MAX_DECIMAL_PLACES {
            return Err(crate::Error::Config(format!(
                "Rounding precision must be at most {} decimal places",
                MAX_DECIMAL_PLACES
            )));
        }
        
        Ok(())
    }
    
    /// Builds the business clock
    pub fn business_clock(&self) -> crate::Result<BusinessClock> {
        BusinessClock::from_offset_minutes(self.clock.utc_offset_minutes)
    }
    
    /// Builds a profit calculator with the configured precision
    pub fn profit_calculator(&self) -> ProfitCalculator {
        ProfitCalculator::new(self.rounding)
    }
}
