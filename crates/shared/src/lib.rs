//! Types shared between the prediction client and its front ends: the vehicle
//! catalog, the form domain model, and the prediction service wire protocol.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod protocol;

pub use catalog::{Catalog, CATALOG};
pub use domain::{BodyType, Color, FuelType, QueryField, Transmission, VehicleQuery};
