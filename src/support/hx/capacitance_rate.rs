use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};
use uom::si::{
    f64::{MassRate, SpecificHeatCapacity, ThermalConductance},
    thermal_conductance::watt_per_kelvin,
};

/// Capacitance rate (`m_dot` * `c_p`) of a stream in an exchanger zone.
///
/// The value must be strictly positive. A stream that changes phase at
/// constant temperature is represented by an infinite rate, see
/// [`CapacitanceRate::phase_change`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CapacitanceRate(Constrained<ThermalConductance, StrictlyPositive>);

impl CapacitanceRate {
    /// Create a [`CapacitanceRate`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new<U>(value: f64) -> ConstraintResult<Self>
    where
        U: uom::si::thermal_conductance::Unit + uom::Conversion<f64, T = f64>,
    {
        Self::from_quantity(ThermalConductance::new::<U>(value))
    }

    /// Create a [`CapacitanceRate`] from a quantity with thermal-conductance units.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: ThermalConductance) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Create a [`CapacitanceRate`] from a mass rate and specific heat capacity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the product is not strictly positive, for example when
    /// the mass rate is zero.
    pub fn from_mass_rate_and_specific_heat(
        mass_rate: MassRate,
        specific_heat: SpecificHeatCapacity,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(mass_rate * specific_heat)
    }

    /// Capacitance rate of a stream condensing or evaporating at constant temperature.
    #[must_use]
    pub fn phase_change() -> Self {
        Self::from_quantity(ThermalConductance::new::<watt_per_kelvin>(f64::INFINITY))
            .expect("infinity should always be strictly positive")
    }

    /// Returns `true` for a phase-change (infinite) capacitance rate.
    #[must_use]
    pub fn is_phase_change(&self) -> bool {
        self.get::<watt_per_kelvin>().is_infinite()
    }
}

impl Deref for CapacitanceRate {
    type Target = ThermalConductance;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
