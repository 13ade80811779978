//! Extensions to [`uom`].
//!
//! Typed state in this crate (fluid properties, geometry, duties, zone results)
//! uses [`uom`] quantities. Correlation bodies work in SI `f64` internally and
//! wrap their results back into quantities at the boundary.
//!
//! ## Temperature differences
//!
//! [`TemperatureDifference::minus`] subtracts one absolute temperature from
//! another to get a temperature interval:
//!
//! ```
//! use dx_sizing::support::units::{TemperatureDifference, celsius};
//! use uom::si::temperature_interval::kelvin;
//!
//! let approach = celsius(45.0).minus(celsius(30.0));
//! assert!((approach.get::<kelvin>() - 15.0).abs() < 1e-12);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{MassFlux, celsius, kelvin_interval};
pub use temperature_difference::TemperatureDifference;
