use serde::{Deserialize, Serialize};
use super::money::{Money, Weight};

/// Represents a single priced and weighed parcel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parcel {
    /// Parcel reference (custom or generated)
    pub reference: String,
    
    /// Price charged to the customer
    pub price: Money,
    
    /// Weight in kilograms
    pub weight: Weight,
}

impl Parcel {
    /// Creates a new parcel
    pub fn new(reference: impl Into<String>, price: Money, weight: Weight) -> Self {
        Self {
            reference: reference.into(),
            price,
            weight,
        }
    }
}
