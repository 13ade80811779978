//! Division of the installed area between zones.
//!
//! The condenser split minimizes how far each zone falls short of its
//! required duty, using the saturating estimate `min(1, NTU/2)` of the duty
//! fraction a zone achieves. The search is nested: an outer golden-section
//! search over the desuperheat fraction, where every evaluation runs an inner
//! search over the condensing fraction. The subcool zone takes the rest.
//!
//! Any failure of the search yields [`FALLBACK_SPLIT`], tagged as such. When
//! the nominal split scores as well as the optimum, as it does when every zone
//! is saturated or idle, the nominal split is returned so flat objectives
//! give the same answer every time.

use std::convert::Infallible;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use twine_core::{Model, OptimizationProblem};
use twine_solvers::optimization::golden_section::{self, Status, minimize_unobserved};
use uom::si::{area::square_meter, f64::Area};

use crate::models::thermal::dx::core::AllocationConfig;

/// Nominal condenser split: desuperheat, condense, subcool.
///
/// Used when the search fails or cannot improve on it.
pub const FALLBACK_SPLIT: [f64; 3] = [0.15, 0.70, 0.15];

/// Bounds on the desuperheat area fraction.
pub const DESUPERHEAT_FRACTION_BOUNDS: [f64; 2] = [0.05, 0.3];

/// Bounds on the condensing area fraction.
pub const CONDENSE_FRACTION_BOUNDS: [f64; 2] = [0.5, 0.85];

/// Smallest subcool fraction the search will accept.
pub const MIN_SUBCOOL_FRACTION: f64 = 0.05;

/// Objective assigned to splits that leave too little subcool area.
const INFEASIBLE_PENALTY: f64 = 1e10;

/// NTU at which the estimated duty fraction saturates at one.
const SATURATION_NTU: f64 = 2.0;

/// Slack allowed when checking the optimum against its bounds.
const BOUND_SLACK: f64 = 1e-9;

/// Objective improvement below which the nominal split is kept.
const FLAT_OBJECTIVE_TOLERANCE: f64 = 1e-9;

/// How a split was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationSource {
    /// Converged condenser search.
    Optimized,
    /// Fixed condenser split after a failed search.
    Fallback,
    /// Evaporator split proportional to duty times resistance.
    ResistanceWeighted,
}

impl AllocationSource {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AllocationSource::Optimized => "optimized",
            AllocationSource::Fallback => "fallback",
            AllocationSource::ResistanceWeighted => "resistance-weighted",
        }
    }
}

/// Area fractions per zone, in refrigerant-path order, with their provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSplit {
    pub fractions: Vec<f64>,
    pub source: AllocationSource,
}

impl AreaSplit {
    /// Zone areas for a total area.
    ///
    /// The last zone takes the remainder so the areas sum to `total`.
    #[must_use]
    pub fn areas(&self, total: Area) -> Vec<Area> {
        let total_m2 = total.get::<square_meter>();
        let mut remaining = total_m2;
        let mut areas: Vec<Area> = Vec::with_capacity(self.fractions.len());

        for (index, fraction) in self.fractions.iter().enumerate() {
            let area = if index + 1 == self.fractions.len() {
                remaining
            } else {
                fraction * total_m2
            };
            remaining -= area;
            areas.push(Area::new::<square_meter>(area));
        }

        areas
    }
}

/// What one zone needs from the allocation, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ZoneDemand {
    /// Required duty, W.
    pub required: f64,
    /// Overall coefficient, W/m²·K.
    pub overall_u: f64,
    /// Smaller of the two capacitance rates, W/K.
    pub min_capacity: f64,
}

impl ZoneDemand {
    /// Squared shortfall of the estimated duty fraction for an area, m².
    ///
    /// Zones with nothing to do, or with a zero capacitance rate, contribute nothing.
    fn shortfall(&self, area: f64) -> f64 {
        if self.required.is_nan()
            || self.required <= 0.0
            || self.min_capacity.is_nan()
            || self.min_capacity <= 0.0
        {
            return 0.0;
        }

        let ntu = self.overall_u * area / self.min_capacity;
        ((ntu / SATURATION_NTU).min(1.0) - 1.0).powi(2)
    }
}

/// Allocation objective for the three condenser zones.
fn condenser_penalty(
    demands: &[ZoneDemand; 3],
    total_area: f64,
    desuperheat: f64,
    condense: f64,
) -> f64 {
    let subcool = 1.0 - desuperheat - condense;
    if subcool < MIN_SUBCOOL_FRACTION {
        return INFEASIBLE_PENALTY;
    }

    [desuperheat, condense, subcool]
        .iter()
        .zip(demands)
        .map(|(fraction, demand)| demand.shortfall(fraction * total_area))
        .sum()
}

#[derive(Debug, Error)]
enum AllocationError {
    #[error("invalid search configuration")]
    Config(#[from] golden_section::ConfigError),

    #[error("golden-section search failed")]
    Search(#[from] golden_section::Error),

    #[error("search hit iteration limit after {iters} iterations")]
    MaxIters { iters: usize },

    #[error("optimum {fractions:?} lies outside the allowed bounds")]
    OutOfBounds { fractions: [f64; 3] },

    #[error("optimum {fractions:?} is infeasible")]
    Infeasible { fractions: [f64; 3] },
}

/// Splits the condenser area between desuperheat, condense and subcool.
///
/// Returns the optimized split or, if the search fails for any reason,
/// [`FALLBACK_SPLIT`] tagged with [`AllocationSource::Fallback`].
pub(crate) fn allocate_condenser_area(
    demands: &[ZoneDemand; 3],
    total_area: Area,
    config: &AllocationConfig,
) -> AreaSplit {
    match optimize_condenser_split(demands, total_area.get::<square_meter>(), config) {
        Ok(fractions) => {
            debug!(?fractions, "condenser area split optimized");
            AreaSplit {
                fractions: fractions.to_vec(),
                source: AllocationSource::Optimized,
            }
        }
        Err(error) => {
            warn!(%error, "condenser area search failed, using the fixed split");
            AreaSplit {
                fractions: FALLBACK_SPLIT.to_vec(),
                source: AllocationSource::Fallback,
            }
        }
    }
}

fn optimize_condenser_split(
    demands: &[ZoneDemand; 3],
    total_area: f64,
    config: &AllocationConfig,
) -> Result<[f64; 3], AllocationError> {
    let solver = config.golden_section()?;
    let model = DesuperheatSearch {
        demands,
        total_area,
        solver,
    };

    let solution = minimize_unobserved(
        &model,
        &InnerOptimumObjective,
        DESUPERHEAT_FRACTION_BOUNDS,
        &solver,
    )?;
    if solution.status != Status::Converged {
        return Err(AllocationError::MaxIters {
            iters: solution.iters,
        });
    }

    let desuperheat = solution.x;
    let condense = solution.snapshot.output.condense_fraction;
    let fractions = [desuperheat, condense, 1.0 - desuperheat - condense];

    let within =
        |value: f64, [lo, hi]: [f64; 2]| value >= lo - BOUND_SLACK && value <= hi + BOUND_SLACK;
    if !within(desuperheat, DESUPERHEAT_FRACTION_BOUNDS)
        || !within(condense, CONDENSE_FRACTION_BOUNDS)
    {
        return Err(AllocationError::OutOfBounds { fractions });
    }
    if fractions[2] < MIN_SUBCOOL_FRACTION || solution.objective >= INFEASIBLE_PENALTY {
        return Err(AllocationError::Infeasible { fractions });
    }

    let [nominal_desuperheat, nominal_condense, _] = FALLBACK_SPLIT;
    let nominal = condenser_penalty(demands, total_area, nominal_desuperheat, nominal_condense);
    if nominal - solution.objective <= FLAT_OBJECTIVE_TOLERANCE {
        return Ok(FALLBACK_SPLIT);
    }

    Ok(fractions)
}

/// Best condensing fraction for a fixed desuperheat fraction.
#[derive(Debug, Clone, Copy)]
struct InnerOptimum {
    condense_fraction: f64,
    penalty: f64,
}

/// Outer model: desuperheat fraction in, best inner split out.
struct DesuperheatSearch<'a> {
    demands: &'a [ZoneDemand; 3],
    total_area: f64,
    solver: golden_section::Config,
}

impl Model for DesuperheatSearch<'_> {
    type Input = f64;
    type Output = InnerOptimum;
    type Error = AllocationError;

    fn call(&self, desuperheat: &f64) -> Result<Self::Output, Self::Error> {
        let model = CondenseTradeoff {
            demands: self.demands,
            total_area: self.total_area,
            desuperheat: *desuperheat,
        };

        let solution =
            minimize_unobserved(&model, &PenaltyObjective, CONDENSE_FRACTION_BOUNDS, &self.solver)?;
        if solution.status != Status::Converged {
            return Err(AllocationError::MaxIters {
                iters: solution.iters,
            });
        }

        Ok(InnerOptimum {
            condense_fraction: solution.x,
            penalty: solution.objective,
        })
    }
}

/// Inner model: condensing fraction in, penalty out.
struct CondenseTradeoff<'a> {
    demands: &'a [ZoneDemand; 3],
    total_area: f64,
    desuperheat: f64,
}

impl Model for CondenseTradeoff<'_> {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, condense: &f64) -> Result<Self::Output, Self::Error> {
        Ok(condenser_penalty(
            self.demands,
            self.total_area,
            self.desuperheat,
            *condense,
        ))
    }
}

struct PenaltyObjective;

impl OptimizationProblem<1> for PenaltyObjective {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn objective(&self, _input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

struct InnerOptimumObjective;

impl OptimizationProblem<1> for InnerOptimumObjective {
    type Input = f64;
    type Output = InnerOptimum;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn objective(&self, _input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error> {
        Ok(output.penalty)
    }
}

/// Splits the evaporator area in proportion to `Q_i / U_i`.
///
/// When every weight vanishes the evaporating zone takes all the area.
pub(crate) fn allocate_by_resistance(required: [f64; 2], overall_u: [f64; 2]) -> AreaSplit {
    let weights = [
        resistance_weight(required[0], overall_u[0]),
        resistance_weight(required[1], overall_u[1]),
    ];
    let total: f64 = weights.iter().sum();

    let fractions = if total > 0.0 {
        weights.iter().map(|weight| weight / total).collect()
    } else {
        vec![1.0, 0.0]
    };

    debug!(?fractions, "evaporator area split by resistance");
    AreaSplit {
        fractions,
        source: AllocationSource::ResistanceWeighted,
    }
}

fn resistance_weight(duty: f64, overall_u: f64) -> f64 {
    if overall_u > 0.0 && duty.is_finite() {
        duty.max(0.0) / overall_u
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn demands() -> [ZoneDemand; 3] {
        [
            ZoneDemand {
                required: 11_000.0,
                overall_u: 600.0,
                min_capacity: 230.0,
            },
            ZoneDemand {
                required: 35_000.0,
                overall_u: 1500.0,
                min_capacity: 9200.0,
            },
            ZoneDemand {
                required: 1600.0,
                overall_u: 900.0,
                min_capacity: 320.0,
            },
        ]
    }

    #[test]
    fn saturated_zones_contribute_nothing() {
        let demand = ZoneDemand {
            required: 1000.0,
            overall_u: 1000.0,
            min_capacity: 100.0,
        };

        assert_relative_eq!(demand.shortfall(0.2), 0.0);
        assert_relative_eq!(demand.shortfall(0.1), 0.25);
        assert_relative_eq!(demand.shortfall(0.05), 0.5625);
        assert_relative_eq!(demand.shortfall(0.0), 1.0);
    }

    #[test]
    fn idle_zones_contribute_nothing() {
        let idle = ZoneDemand {
            required: 0.0,
            overall_u: 1000.0,
            min_capacity: 100.0,
        };
        let no_flow = ZoneDemand {
            required: 500.0,
            overall_u: 1000.0,
            min_capacity: 0.0,
        };

        assert_relative_eq!(idle.shortfall(0.0), 0.0);
        assert_relative_eq!(no_flow.shortfall(1.0), 0.0);
    }

    #[test]
    fn thin_subcool_zone_is_infeasible() {
        assert_relative_eq!(condenser_penalty(&demands(), 4.0, 0.3, 0.66), INFEASIBLE_PENALTY);
        assert!(condenser_penalty(&demands(), 4.0, 0.3, 0.64) < INFEASIBLE_PENALTY);
    }

    #[test]
    fn optimized_split_respects_bounds() {
        let split = allocate_condenser_area(
            &demands(),
            Area::new::<square_meter>(4.0),
            &AllocationConfig::default(),
        );

        assert_eq!(split.source, AllocationSource::Optimized);
        let [desuperheat, condense, subcool] =
            [split.fractions[0], split.fractions[1], split.fractions[2]];
        assert!((0.05 - BOUND_SLACK..=0.3 + BOUND_SLACK).contains(&desuperheat));
        assert!((0.5 - BOUND_SLACK..=0.85 + BOUND_SLACK).contains(&condense));
        assert!(subcool >= MIN_SUBCOOL_FRACTION);
        assert_relative_eq!(desuperheat + condense + subcool, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn optimized_split_beats_the_fixed_split() {
        let total = 4.0;
        let split = allocate_condenser_area(
            &demands(),
            Area::new::<square_meter>(total),
            &AllocationConfig::default(),
        );

        let optimized =
            condenser_penalty(&demands(), total, split.fractions[0], split.fractions[1]);
        let fixed = condenser_penalty(&demands(), total, FALLBACK_SPLIT[0], FALLBACK_SPLIT[1]);
        assert!(optimized <= fixed + 1e-9);
    }

    #[test]
    fn flat_objective_keeps_the_nominal_split() {
        let idle = ZoneDemand {
            required: 5000.0,
            overall_u: 1000.0,
            min_capacity: 0.0,
        };
        let saturated = ZoneDemand {
            required: 5000.0,
            overall_u: 1e6,
            min_capacity: 100.0,
        };

        for demands in [[idle; 3], [saturated; 3]] {
            let split = allocate_condenser_area(
                &demands,
                Area::new::<square_meter>(4.0),
                &AllocationConfig::default(),
            );

            assert_eq!(split.source, AllocationSource::Optimized);
            assert_eq!(split.fractions, FALLBACK_SPLIT.to_vec());
        }
    }

    #[test]
    fn invalid_configuration_falls_back() {
        let config = AllocationConfig {
            x_abs_tol: -1.0,
            ..AllocationConfig::default()
        };

        let split = allocate_condenser_area(&demands(), Area::new::<square_meter>(4.0), &config);

        assert_eq!(split.source, AllocationSource::Fallback);
        assert_eq!(split.fractions, FALLBACK_SPLIT.to_vec());
    }

    #[test]
    fn areas_sum_to_total() {
        let split = AreaSplit {
            fractions: vec![0.1234567, 0.7654321, 0.1111112],
            source: AllocationSource::Optimized,
        };
        let total = Area::new::<square_meter>(3.591_364);

        let areas = split.areas(total);
        let sum: f64 = areas.iter().map(|area| area.get::<square_meter>()).sum();

        assert_eq!(areas.len(), 3);
        assert_relative_eq!(sum, total.get::<square_meter>(), max_relative = 1e-12);
        assert_relative_eq!(areas[0].get::<square_meter>(), 0.1234567 * 3.591_364);
    }

    #[test]
    fn resistance_weighting() {
        let split = allocate_by_resistance([20_000.0, 1000.0], [2000.0, 500.0]);

        assert_eq!(split.source, AllocationSource::ResistanceWeighted);
        assert_relative_eq!(split.fractions[0], 10.0 / 12.0);
        assert_relative_eq!(split.fractions[1], 2.0 / 12.0);
    }

    #[test]
    fn vanishing_weights_favor_evaporation() {
        let split = allocate_by_resistance([0.0, -5.0], [2000.0, 500.0]);
        assert_eq!(split.fractions, vec![1.0, 0.0]);
    }
}
