//! Effectiveness-NTU toolkit for zone-by-zone exchanger analysis.
//!
//! A DX exchanger is split into thermally distinct zones (desuperheat,
//! condense, subcool or evaporate, superheat). Each zone is a small two-stream
//! exchanger between the refrigerant and the secondary fluid, analysed with the
//! effectiveness-NTU method (NTU = UA / `C_min`).
//!
//! This toolkit provides:
//!
//! - **Core types**: [`CapacitanceRate`], [`CapacityRatio`], [`Effectiveness`], [`Ntu`]
//! - **Stream modeling**: [`StreamInlet`], [`Stream`]
//! - **Flow arrangements**: [`CounterFlow`]
//! - **Analysis functions**: [`functional::known_conductance_and_inlets`],
//!   [`log_mean_temperature_difference`]
//!
//! A phase-changing stream is modeled with [`CapacitanceRate::phase_change`],
//! an infinite capacitance rate, which drives the capacity ratio to zero.
//!
//! # Example
//!
//! ```
//! use dx_sizing::support::constraint::ConstraintResult;
//! use dx_sizing::support::hx::{
//!     CapacitanceRate, CounterFlow, StreamInlet, functional::known_conductance_and_inlets,
//! };
//! use dx_sizing::support::units::celsius;
//! use uom::si::{f64::ThermalConductance, thermal_conductance::kilowatt_per_kelvin};
//!
//! fn main() -> ConstraintResult<()> {
//!     // Water warming against condensing refrigerant at 45 °C.
//!     let result = known_conductance_and_inlets(
//!         &CounterFlow,
//!         ThermalConductance::new::<kilowatt_per_kelvin>(4.0),
//!         [
//!             StreamInlet::new(CapacitanceRate::new::<kilowatt_per_kelvin>(8.0)?, celsius(30.0)),
//!             StreamInlet::new(CapacitanceRate::phase_change(), celsius(45.0)),
//!         ],
//!     )?;
//!
//!     let [water, refrigerant] = result.streams;
//!     assert!(water.outlet_temperature > water.inlet_temperature);
//!     assert_eq!(refrigerant.outlet_temperature, refrigerant.inlet_temperature);
//!     Ok(())
//! }
//! ```

pub mod arrangement;
mod capacitance_rate;
mod capacity_ratio;
mod effectiveness_ntu;
pub mod functional;
mod lmtd;
mod stream;

pub use arrangement::CounterFlow;
pub use capacitance_rate::CapacitanceRate;
pub use capacity_ratio::CapacityRatio;
pub use effectiveness_ntu::{Effectiveness, EffectivenessRelation, Ntu};
pub use lmtd::log_mean_temperature_difference;
pub use stream::{Stream, StreamInlet};
