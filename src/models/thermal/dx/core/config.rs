use twine_solvers::optimization::golden_section;
use uom::si::{f64::HeatFluxDensity, heat_flux_density::watt_per_square_meter};

use crate::support::{correlations::NOMINAL_HEAT_FLUX, geometry::DEFAULT_BAFFLE_CUT};

/// Default shell-side fouling resistance, m²·K/W.
pub const DEFAULT_FOULING_RESISTANCE: f64 = 0.00035;

/// Settings shared by every design call.
#[derive(Debug, Clone, Copy)]
pub struct DesignConfig {
    /// Fouling resistance on the outer-area basis, m²·K/W.
    pub fouling_resistance: f64,

    /// Baffle cut as a fraction of the shell diameter.
    pub baffle_cut: f64,

    /// Heat flux used by the flow-boiling correlation.
    pub nominal_heat_flux: HeatFluxDensity,

    /// Search settings for the condenser area split.
    pub allocation: AllocationConfig,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            fouling_resistance: DEFAULT_FOULING_RESISTANCE,
            baffle_cut: DEFAULT_BAFFLE_CUT,
            nominal_heat_flux: HeatFluxDensity::new::<watt_per_square_meter>(NOMINAL_HEAT_FLUX),
            allocation: AllocationConfig::default(),
        }
    }
}

/// Golden-section settings for the condenser area split.
///
/// The same settings drive both the outer search over the desuperheat
/// fraction and the inner search over the condensing fraction.
#[derive(Debug, Clone, Copy)]
pub struct AllocationConfig {
    /// Maximum iteration count for each search.
    pub max_iters: usize,

    /// Absolute tolerance on the area fraction.
    pub x_abs_tol: f64,

    /// Relative tolerance on the area fraction.
    pub x_rel_tol: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-6,
            x_rel_tol: 0.0,
        }
    }
}

impl AllocationConfig {
    /// Converts this configuration into a golden-section solver configuration.
    pub(super) fn golden_section(
        &self,
    ) -> Result<golden_section::Config, golden_section::ConfigError> {
        golden_section::Config::new(self.max_iters, self.x_abs_tol, self.x_rel_tol)
    }
}
