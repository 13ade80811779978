//! # DX Sizing
//!
//! Thermal-hydraulic sizing of direct-expansion shell-and-tube evaporators and
//! condensers, built as [Twine](https://github.com/isentropic-dev/twine) models.
//!
//! Refrigerant flows in the tubes and water or glycol on the shell side. Given
//! a refrigerant, flow rates, saturation conditions and a candidate bundle, a
//! design call returns the achieved duty per zone, heat transfer coefficients,
//! required versus installed area, pressure drops, and a verdict with warnings.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] implementations, see
//!   [`models::thermal::dx`].
//! - [`support`]: Property tables, correlations, bundle geometry and ε-NTU
//!   building blocks used by the models.
//!
//! ## Support code
//!
//! Modules in [`support`] are part of the public API because they're useful
//! on their own, but their APIs are not stable. Breaking changes may occur as
//! needed.
//!
//! Code that only one model needs stays in that model's internal `core`
//! module and moves to [`support`] once a second consumer appears.

pub mod models;
pub mod support;
