//! Desuperheat, condense and subcool zones.

use uom::si::{
    f64::{Power, TemperatureInterval, ThermodynamicTemperature},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
};

use crate::{
    models::thermal::dx::core::ZoneKind,
    support::{
        correlations::{condensation_htc, single_phase_htc},
        hx::{CapacitanceRate, log_mean_temperature_difference},
        units::{TemperatureDifference, kelvin_interval},
    },
};

use super::{
    RegionSolution, ZoneContext,
    allocation::{ZoneDemand, allocate_condenser_area},
    march::{Direction, OutletLimit, SecondaryMarch, ZoneStep},
    pinch,
};

/// Margin below the condensing temperature for the secondary fluid leaving
/// the desuperheat zone, K.
pub(crate) const DESUPERHEAT_OUTLET_MARGIN: f64 = 1.0;

/// Margin below the condensing temperature for the secondary fluid leaving
/// the condensing zone, K.
pub(crate) const CONDENSE_OUTLET_MARGIN: f64 = 0.5;

/// Quality at which the condensing coefficient is evaluated.
pub(crate) const MEAN_CONDENSING_QUALITY: f64 = 0.5;

/// Refrigerant conditions specific to a condenser.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CondenserConditions {
    /// Superheated vapor temperature at the inlet.
    pub inlet_temperature: ThermodynamicTemperature,
    pub subcooling: TemperatureInterval,
}

pub(crate) fn solve_condenser(
    context: &ZoneContext<'_>,
    conditions: &CondenserConditions,
) -> RegionSolution {
    let state = context.refrigerant;
    let geometry = context.geometry;
    let t_cond = state.saturation_temperature;
    let mass_rate = context.refrigerant_mass_rate;

    let superheat = kelvin_interval(
        conditions
            .inlet_temperature
            .minus(t_cond)
            .get::<delta_kelvin>()
            .max(0.0),
    );
    let subcooling = kelvin_interval(conditions.subcooling.get::<delta_kelvin>().max(0.0));
    let refrigerant_outlet = t_cond - subcooling;

    let required: [Power; 3] = [
        mass_rate * state.vapor.specific_heat * superheat,
        mass_rate * state.latent_heat,
        mass_rate * state.liquid.specific_heat * subcooling,
    ];

    let per_tube = context.mass_rate_per_tube();
    let d_i = geometry.inner_diameter;
    let condensing =
        condensation_htc(per_tube, MEAN_CONDENSING_QUALITY, d_i, state, geometry.passes);
    let tube_htc = [
        single_phase_htc(per_tube, d_i, &state.vapor, geometry.passes),
        condensing.htc,
        single_phase_htc(per_tube, d_i, &state.liquid, geometry.passes),
    ];
    let overall_u = tube_htc.map(|htc| context.overall_u(htc));

    let secondary_capacity = context.secondary_capacity();
    let refrigerant_capacity: [Option<CapacitanceRate>; 3] = [
        context.refrigerant_capacity(&state.vapor),
        context.latent_capacity(),
        context.refrigerant_capacity(&state.liquid),
    ];

    let demands: [ZoneDemand; 3] = std::array::from_fn(|i| ZoneDemand {
        required: required[i].get::<watt>(),
        overall_u: overall_u[i].value,
        min_capacity: min_capacity(refrigerant_capacity[i], secondary_capacity),
    });
    let split = allocate_condenser_area(&demands, geometry.outer_area, &context.config.allocation);
    let areas = split.areas(geometry.outer_area);

    let kinds = [ZoneKind::Desuperheat, ZoneKind::Condense, ZoneKind::Subcool];
    let refrigerant_inlets = [conditions.inlet_temperature, t_cond, t_cond];
    let refrigerant_outlets = [t_cond, t_cond, refrigerant_outlet];
    let limits = [
        OutletLimit::AtMost(t_cond - kelvin_interval(DESUPERHEAT_OUTLET_MARGIN)),
        OutletLimit::AtMost(t_cond - kelvin_interval(CONDENSE_OUTLET_MARGIN)),
        OutletLimit::Free,
    ];

    let mut march =
        SecondaryMarch::new(secondary_capacity, context.secondary_inlet, Direction::Heating);
    let zones: Vec<_> = (0..3)
        .map(|i| {
            march.advance(&ZoneStep {
                kind: kinds[i],
                required_duty: required[i],
                tube_htc: tube_htc[i],
                overall_u: overall_u[i],
                area: areas[i],
                area_fraction: split.fractions[i],
                refrigerant_capacity: refrigerant_capacity[i],
                refrigerant_inlet: refrigerant_inlets[i],
                refrigerant_outlet: refrigerant_outlets[i],
                limit: limits[i],
            })
        })
        .collect();

    let secondary_outlet = march.temperature();
    let lmtd = log_mean_temperature_difference(
        conditions.inlet_temperature.minus(secondary_outlet),
        refrigerant_outlet.minus(context.secondary_inlet),
    );
    let pinch = pinch(&zones, Direction::Heating);

    RegionSolution {
        zones,
        split,
        condensation_regime: Some(condensing.regime),
        refrigerant_inlet: conditions.inlet_temperature,
        refrigerant_outlet,
        secondary_outlet,
        lmtd,
        pinch,
    }
}

/// Smaller capacitance rate of a zone in W/K, zero when either stream is absent.
fn min_capacity(
    refrigerant: Option<CapacitanceRate>,
    secondary: Option<CapacitanceRate>,
) -> f64 {
    match (refrigerant, secondary) {
        (Some(refrigerant), Some(secondary)) => refrigerant
            .get::<watt_per_kelvin>()
            .min(secondary.get::<watt_per_kelvin>()),
        _ => 0.0,
    }
}
