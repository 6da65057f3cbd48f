use serde::{Deserialize, Serialize};
use super::money::Money;
use super::parcel::Parcel;

/// A batch of delivery trips processed together
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wave {
    /// Wave identifier assigned by the host application
    pub id: u64,
    
    /// Trips in dispatch order
    #[serde(default)]
    pub trips: Vec<Trip>,
    
    /// Costs recorded against the wave
    #[serde(default)]
    pub costs: Vec<Cost>,
}

/// A single delivery run belonging to one wave
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trip {
    /// Trip identifier
    pub id: u64,
    
    /// Parcels carried on this trip
    #[serde(default)]
    pub parcels: Vec<Parcel>,
}

/// An expense attributed to a wave
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cost {
    /// Free-form label (fuel, driver, tolls, ...)
    #[serde(default)]
    pub label: String,
    
    /// Amount, normally non-negative; refunds may be negative
    pub amount: Money,
}

impl Wave {
    /// Creates an empty wave
    pub fn new(id: u64) -> Self {
        Self {
            id,
            trips: Vec::new(),
            costs: Vec::new(),
        }
    }
    
    /// Adds a trip to the wave
    pub fn add_trip(&mut self, trip: Trip) {
        self.trips.push(trip);
    }
    
    /// Adds a cost to the wave
    pub fn add_cost(&mut self, cost: Cost) {
        self.costs.push(cost);
    }
    
    /// Iterates over every parcel across all trips
    pub fn parcels(&self) -> impl Iterator<Item = &Parcel> {
        self.trips.iter().flat_map(|trip| trip.parcels.iter())
    }
    
    /// Total number of parcels across all trips
    pub fn parcel_count(&self) -> usize {
        self.trips.iter().map(|trip| trip.parcels.len()).sum()
    }
    
    /// Parses a wave snapshot from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Trip {
    /// Creates a trip carrying the given parcels
    pub fn new(id: u64, parcels: Vec<Parcel>) -> Self {
        Self { id, parcels }
    }
}

impl Cost {
    /// Creates a new cost record
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}
