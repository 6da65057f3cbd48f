pub mod money;
pub mod parcel;
pub mod wave;

pub use money::{Money, Weight};
pub use parcel::Parcel;
pub use wave::{Cost, Trip, Wave};
