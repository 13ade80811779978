use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, UnitInterval};
use uom::si::{f64::Ratio, ratio::ratio};

use super::CapacitanceRate;

/// Capacity ratios closer than this to 0 or 1 use the limiting ε-NTU forms.
pub(crate) const LIMIT_TOLERANCE: f64 = 1e-6;

/// Capacity ratio (`C_min` / `C_max`) for an exchanger zone.
///
/// Must fall in the closed interval [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct CapacityRatio(Constrained<Ratio, UnitInterval>);

impl CapacityRatio {
    /// Create a [`CapacityRatio`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(Ratio::new::<ratio>(value))?))
    }

    /// Create a [`CapacityRatio`] from the [capacitance rates](CapacitanceRate)
    /// of the two streams.
    ///
    /// Two phase-change streams have no defined ratio and yield zero.
    #[must_use]
    pub fn from_capacitance_rates(capacitance_rates: [CapacitanceRate; 2]) -> Self {
        let [first, second] = capacitance_rates;
        Self(UnitInterval::saturating(
            first.min(*second) / first.max(*second),
        ))
    }

    /// Returns `true` when the ratio is close enough to zero for the
    /// phase-change limit.
    #[must_use]
    pub fn is_negligible(&self) -> bool {
        self.get::<ratio>() < LIMIT_TOLERANCE
    }
}

impl Deref for CapacityRatio {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
