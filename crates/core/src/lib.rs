pub mod clock;
pub mod config;
pub mod domain;
pub mod profit;
pub mod reference;

pub use clock::{BusinessClock, Clock, FixedClock};
pub use config::{ClockConfig, WaveConfig};
pub use domain::{Cost, Money, Parcel, Trip, Wave, Weight};
pub use profit::{compute_wave_profit, ProfitCalculator, ProfitReport, RoundingPolicy, TripSummary};
pub use reference::{
    CountingSequence, DailyCounts, DailySequence, InMemorySequence, ParcelCounter,
    ParcelReference, ReferenceConfig, ReferenceGenerator,
};

/// Core result type for wave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Sequence error: {0}")]
    Sequence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
