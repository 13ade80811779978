//! Zone solvers for the condenser and evaporator.
//!
//! Zones are solved in refrigerant-path order. The installed area is split
//! between them first, then the secondary fluid is marched through the zones
//! in that same order.

mod allocation;
mod condenser;
mod evaporator;
mod march;

pub use allocation::{AllocationSource, AreaSplit, FALLBACK_SPLIT};

pub(super) use condenser::{CondenserConditions, MEAN_CONDENSING_QUALITY, solve_condenser};
pub(super) use evaporator::{EvaporatorConditions, solve_evaporator};

use uom::si::{
    f64::{HeatTransfer, MassRate, TemperatureInterval, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
};

use crate::support::{
    correlations::CondensationRegime,
    fluids::{PhaseProperties, RefrigerantState, SecondaryFluidState},
    geometry::BundleGeometry,
    hx::CapacitanceRate,
    units::kelvin_interval,
};

use super::{DesignConfig, Zone};

use march::Direction;

/// Inputs shared by both zone solvers.
pub(super) struct ZoneContext<'a> {
    pub refrigerant: &'a RefrigerantState,
    pub secondary: &'a SecondaryFluidState,
    pub geometry: &'a BundleGeometry,
    pub refrigerant_mass_rate: MassRate,
    pub secondary_mass_rate: MassRate,
    pub secondary_inlet: ThermodynamicTemperature,
    pub shell_htc: HeatTransfer,
    pub config: &'a DesignConfig,
}

impl ZoneContext<'_> {
    fn mass_rate_per_tube(&self) -> MassRate {
        self.refrigerant_mass_rate / f64::from(self.geometry.tube_count)
    }

    /// Overall coefficient on the outer-area basis for a tube-side coefficient.
    ///
    /// `1/U = 1/h_o + R_f + R_wall + (d_o/d_i)/h_i`
    fn overall_u(&self, tube_htc: HeatTransfer) -> HeatTransfer {
        let resistance = 1.0 / self.shell_htc.get::<watt_per_square_meter_kelvin>()
            + self.config.fouling_resistance
            + self.geometry.wall_resistance()
            + self.geometry.diameter_ratio() / tube_htc.get::<watt_per_square_meter_kelvin>();
        HeatTransfer::new::<watt_per_square_meter_kelvin>(1.0 / resistance)
    }

    fn secondary_capacity(&self) -> Option<CapacitanceRate> {
        CapacitanceRate::from_mass_rate_and_specific_heat(
            self.secondary_mass_rate,
            self.secondary.properties.specific_heat,
        )
        .ok()
    }

    fn refrigerant_capacity(&self, phase: &PhaseProperties) -> Option<CapacitanceRate> {
        CapacitanceRate::from_mass_rate_and_specific_heat(
            self.refrigerant_mass_rate,
            phase.specific_heat,
        )
        .ok()
    }

    /// Latent zones have an infinite refrigerant capacity while flow is present.
    fn latent_capacity(&self) -> Option<CapacitanceRate> {
        (self.refrigerant_mass_rate.value > 0.0).then(CapacitanceRate::phase_change)
    }
}

/// Solved zones with the terminal quantities derived from them.
#[derive(Debug, Clone)]
pub(super) struct RegionSolution {
    pub zones: Vec<Zone>,
    pub split: AreaSplit,
    pub condensation_regime: Option<CondensationRegime>,
    pub refrigerant_inlet: ThermodynamicTemperature,
    pub refrigerant_outlet: ThermodynamicTemperature,
    pub secondary_outlet: ThermodynamicTemperature,
    pub lmtd: TemperatureInterval,
    pub pinch: TemperatureInterval,
}

/// Smallest hot-to-cold difference at the ends of every counter-flow zone.
fn pinch(zones: &[Zone], direction: Direction) -> TemperatureInterval {
    let smallest = zones
        .iter()
        .flat_map(|zone| {
            [
                direction.approach(zone.refrigerant_inlet, zone.secondary_outlet),
                direction.approach(zone.refrigerant_outlet, zone.secondary_inlet),
            ]
        })
        .fold(f64::INFINITY, f64::min);
    kelvin_interval(smallest)
}
