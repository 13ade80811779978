//! Property models for the refrigerant and the secondary fluid.
//!
//! Both models start from tabulated reference properties and correct them to
//! the operating temperature with simple fits. Each call builds a fresh,
//! immutable state; no property bag is shared between design calls.
//!
//! - [`refrigerant_properties`] corrects saturation properties of a named
//!   refrigerant to a saturation temperature.
//! - [`secondary_fluid_properties`] looks up a water/glycol mixture at the
//!   nearest tabulated concentration and corrects it to a temperature.
//! - [`freeze_point`] is a pure table lookup.

mod refrigerant;
mod secondary;

use thiserror::Error;
use uom::si::f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity};

pub use refrigerant::{Refrigerant, RefrigerantState, refrigerant_properties};
pub use secondary::{GlycolType, SecondaryFluidState, freeze_point, secondary_fluid_properties};

/// Transport and caloric properties of a single phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProperties {
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    pub conductivity: ThermalConductivity,
    pub specific_heat: SpecificHeatCapacity,
    /// Prandtl number, always recomputed from the other three properties.
    pub prandtl: f64,
}

impl PhaseProperties {
    /// Bundle corrected properties, computing the Prandtl number `cp·μ/k`.
    #[must_use]
    pub fn new(
        density: MassDensity,
        viscosity: DynamicViscosity,
        conductivity: ThermalConductivity,
        specific_heat: SpecificHeatCapacity,
    ) -> Self {
        Self {
            density,
            viscosity,
            conductivity,
            specific_heat,
            prandtl: specific_heat.value * viscosity.value / conductivity.value,
        }
    }
}

/// Errors raised for names that are not in a property table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FluidError {
    #[error("unknown refrigerant: {name}")]
    UnknownRefrigerant { name: String },
}
