use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};
use uom::si::{
    f64::{Ratio, ThermalConductance},
    ratio::ratio,
};

use super::{CapacitanceRate, CapacityRatio};

/// Trait for computing exchanger effectiveness from NTU.
pub trait EffectivenessRelation {
    /// Calculate the effectiveness for an arrangement given the [NTU](Ntu) and
    /// the [capacitance rates](CapacitanceRate) of both streams.
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness;
}

/// The effectiveness of an exchanger zone.
///
/// The ratio of the heat actually transferred to the maximum possible,
/// always in the interval [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Create an [`Effectiveness`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(Ratio::new::<ratio>(value))?))
    }

    /// Create an [`Effectiveness`], clamping the value into [0, 1].
    ///
    /// Closed-form relations can stray slightly outside the interval through
    /// round-off at extreme NTU; `NaN` maps to zero.
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        Self(UnitInterval::saturating(Ratio::new::<ratio>(value)))
    }

    /// Zero effectiveness, used for zones that transfer no heat.
    #[must_use]
    pub fn zero() -> Self {
        Self::saturating(0.0)
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// The number of transfer units of an exchanger zone.
///
/// Must be >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, NonNegative>);

impl Ntu {
    /// Create an [`Ntu`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(Ratio::new::<ratio>(value))?))
    }

    /// Zero transfer units.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0).expect("zero should always be a valid ntu")
    }

    /// Create an [`Ntu`] from a zone conductance and the
    /// [capacitance rates](CapacitanceRate) of both streams.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the resulting NTU would be negative (for example, when
    /// `ua` is negative).
    pub fn from_conductance_and_capacitance_rates(
        ua: ThermalConductance,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Self> {
        let ntu: Ratio = ua / capacitance_rates[0].min(*capacitance_rates[1]);
        Ok(Self(NonNegative::new(ntu)?))
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Evaluates a closed-form relation `fn_raw(ntu, cr)`, substituting the
/// phase-change limit `1 - exp(-NTU)` when the capacity ratio is negligible.
#[inline]
pub(crate) fn effectiveness_via(
    ntu: Ntu,
    capacitance_rates: [CapacitanceRate; 2],
    fn_raw: impl Fn(f64, f64) -> f64,
) -> Effectiveness {
    let capacity_ratio = CapacityRatio::from_capacitance_rates(capacitance_rates);
    let ntu = ntu.get::<ratio>();

    if capacity_ratio.is_negligible() {
        return Effectiveness::saturating(1. - (-ntu).exp());
    }
    Effectiveness::saturating(fn_raw(ntu, capacity_ratio.get::<ratio>()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    use super::*;

    #[test]
    fn ntu_uses_minimum_capacitance_rate() -> ConstraintResult<()> {
        let ua = ThermalConductance::new::<watt_per_kelvin>(900.);
        let capacitance_rates = [
            CapacitanceRate::new::<watt_per_kelvin>(300.)?,
            CapacitanceRate::phase_change(),
        ];

        let ntu = Ntu::from_conductance_and_capacitance_rates(ua, capacitance_rates)?;

        assert_relative_eq!(ntu.get::<ratio>(), 3.);
        Ok(())
    }

    #[test]
    fn negative_conductance_is_rejected() -> ConstraintResult<()> {
        let ua = ThermalConductance::new::<watt_per_kelvin>(-1.);
        let capacitance_rates = [
            CapacitanceRate::new::<watt_per_kelvin>(1.)?,
            CapacitanceRate::new::<watt_per_kelvin>(1.)?,
        ];

        assert!(Ntu::from_conductance_and_capacitance_rates(ua, capacitance_rates).is_err());
        Ok(())
    }

    #[test]
    fn saturating_effectiveness() {
        assert_relative_eq!(Effectiveness::saturating(1.0 + 1e-12).get::<ratio>(), 1.0);
        assert_relative_eq!(Effectiveness::saturating(f64::NAN).get::<ratio>(), 0.0);
        assert_relative_eq!(Effectiveness::zero().get::<ratio>(), 0.0);
    }
}
