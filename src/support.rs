//! Building blocks shared by the exchanger models.
//!
//! - [`constraint`]: typed numeric invariants and named floors
//! - [`units`]: `uom` extensions
//! - [`fluids`]: refrigerant and water/glycol property models
//! - [`correlations`]: heat-transfer and friction correlations
//! - [`geometry`]: tube, bundle and shell geometry
//! - [`hx`]: effectiveness-NTU primitives for zone analysis

pub mod constraint;
pub mod correlations;
pub mod fluids;
pub mod geometry;
pub mod hx;
pub mod units;
