//! Evaporate and superheat zones.

use uom::si::{
    f64::{HeatFluxDensity, Power, TemperatureInterval},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
};

use crate::{
    models::thermal::dx::core::ZoneKind,
    support::{
        correlations::{flow_boiling_htc, single_phase_htc},
        hx::log_mean_temperature_difference,
        units::{TemperatureDifference, kelvin_interval},
    },
};

use super::{
    RegionSolution, ZoneContext,
    allocation::allocate_by_resistance,
    march::{Direction, OutletLimit, SecondaryMarch, ZoneStep},
    pinch,
};

/// Margin above the evaporating temperature for the secondary fluid leaving
/// the evaporating zone, K.
pub(crate) const EVAPORATE_OUTLET_MARGIN: f64 = 1.0;

/// Margin above the evaporating temperature for the secondary fluid leaving
/// the superheat zone, K.
pub(crate) const SUPERHEAT_OUTLET_MARGIN: f64 = 0.5;

/// Refrigerant conditions specific to an evaporator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EvaporatorConditions {
    /// Vapor quality at the inlet, in [0, 1].
    pub inlet_quality: f64,
    pub superheat: TemperatureInterval,
    pub heat_flux: HeatFluxDensity,
}

pub(crate) fn solve_evaporator(
    context: &ZoneContext<'_>,
    conditions: &EvaporatorConditions,
) -> RegionSolution {
    let state = context.refrigerant;
    let geometry = context.geometry;
    let t_evap = state.saturation_temperature;
    let mass_rate = context.refrigerant_mass_rate;
    let inlet_quality = conditions.inlet_quality;

    let superheat = kelvin_interval(conditions.superheat.get::<delta_kelvin>().max(0.0));
    let refrigerant_outlet = t_evap + superheat;

    let required: [Power; 2] = [
        mass_rate * state.latent_heat * (1.0 - inlet_quality),
        mass_rate * state.vapor.specific_heat * superheat,
    ];

    let per_tube = context.mass_rate_per_tube();
    let d_i = geometry.inner_diameter;
    let mean_quality = 0.5 * (inlet_quality + 1.0);
    let tube_htc = [
        flow_boiling_htc(
            per_tube,
            mean_quality,
            d_i,
            state,
            geometry.passes,
            conditions.heat_flux,
        ),
        single_phase_htc(per_tube, d_i, &state.vapor, geometry.passes),
    ];
    let overall_u = tube_htc.map(|htc| context.overall_u(htc));

    let split = allocate_by_resistance(
        required.map(|duty| duty.get::<watt>()),
        overall_u.map(|u| u.value),
    );
    let areas = split.areas(geometry.outer_area);

    let steps = [
        ZoneStep {
            kind: ZoneKind::Evaporate,
            required_duty: required[0],
            tube_htc: tube_htc[0],
            overall_u: overall_u[0],
            area: areas[0],
            area_fraction: split.fractions[0],
            refrigerant_capacity: context.latent_capacity(),
            refrigerant_inlet: t_evap,
            refrigerant_outlet: t_evap,
            limit: OutletLimit::AtLeast(t_evap + kelvin_interval(EVAPORATE_OUTLET_MARGIN)),
        },
        ZoneStep {
            kind: ZoneKind::Superheat,
            required_duty: required[1],
            tube_htc: tube_htc[1],
            overall_u: overall_u[1],
            area: areas[1],
            area_fraction: split.fractions[1],
            refrigerant_capacity: context.refrigerant_capacity(&state.vapor),
            refrigerant_inlet: t_evap,
            refrigerant_outlet,
            limit: OutletLimit::AtLeast(t_evap + kelvin_interval(SUPERHEAT_OUTLET_MARGIN)),
        },
    ];

    let mut march = SecondaryMarch::new(
        context.secondary_capacity(),
        context.secondary_inlet,
        Direction::Cooling,
    );
    let zones: Vec<_> = steps.iter().map(|step| march.advance(step)).collect();

    let secondary_outlet = march.temperature();
    let lmtd = log_mean_temperature_difference(
        secondary_outlet.minus(t_evap),
        context.secondary_inlet.minus(refrigerant_outlet),
    );
    let pinch = pinch(&zones, Direction::Cooling);

    RegionSolution {
        zones,
        split,
        condensation_regime: None,
        refrigerant_inlet: t_evap,
        refrigerant_outlet,
        secondary_outlet,
        lmtd,
        pinch,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Length, MassRate},
        heat_flux_density::watt_per_square_meter,
        length::{meter, millimeter},
        mass_rate::kilogram_per_second,
        thermodynamic_temperature::degree_celsius,
    };

    use super::*;
    use crate::{
        models::thermal::dx::core::{AllocationSource, DesignConfig},
        support::{
            correlations::shell_side_htc,
            fluids::{GlycolType, Refrigerant, secondary_fluid_properties},
            geometry::{BundleGeometry, BundleLayout, TubeLayout, TubeMaterial, TubeSize},
            units::celsius,
        },
    };

    fn solve(inlet_quality: f64, superheat_k: f64) -> (BundleGeometry, RegionSolution) {
        let geometry = BundleGeometry::new(&BundleLayout {
            tube_size: TubeSize::ThreeEighths,
            material: TubeMaterial::Copper,
            wall_thickness: Length::new::<millimeter>(0.7),
            pitch: Length::new::<millimeter>(12.7),
            layout: TubeLayout::Triangular,
            tube_count: 60,
            tube_length: Length::new::<meter>(2.0),
            passes: 2,
            baffles: 4,
            baffle_cut: 0.25,
        });
        let refrigerant = Refrigerant::R410A.state_at(celsius(5.0));
        let secondary = secondary_fluid_properties(celsius(12.0), 0.0, GlycolType::Ethylene);
        let config = DesignConfig::default();
        let context = ZoneContext {
            refrigerant: &refrigerant,
            secondary: &secondary,
            geometry: &geometry,
            refrigerant_mass_rate: MassRate::new::<kilogram_per_second>(0.15),
            secondary_mass_rate: MassRate::new::<kilogram_per_second>(1.27),
            secondary_inlet: celsius(12.0),
            shell_htc: shell_side_htc(
                6000.0,
                secondary.properties.prandtl,
                geometry.equivalent_diameter,
                secondary.properties.conductivity,
                geometry.layout,
            ),
            config: &config,
        };

        let solution = solve_evaporator(
            &context,
            &EvaporatorConditions {
                inlet_quality,
                superheat: kelvin_interval(superheat_k),
                heat_flux: HeatFluxDensity::new::<watt_per_square_meter>(10_000.0),
            },
        );
        (geometry, solution)
    }

    #[test]
    fn latent_requirement_excludes_inlet_vapor() {
        let (_, solution) = solve(0.2, 5.0);
        let state = Refrigerant::R410A.state_at(celsius(5.0));

        assert_relative_eq!(
            solution.zones[0].required_duty.get::<watt>(),
            0.15 * 0.8 * state.latent_heat.value,
            max_relative = 1e-12
        );
        assert_eq!(solution.split.source, AllocationSource::ResistanceWeighted);
    }

    #[test]
    fn areas_partition_the_bundle() {
        let (geometry, solution) = solve(0.2, 5.0);

        let total: f64 = solution
            .zones
            .iter()
            .map(|zone| zone.area.get::<square_meter>())
            .sum();
        assert_relative_eq!(total, geometry.outer_area.get::<square_meter>(), max_relative = 1e-12);
    }

    #[test]
    fn no_superheat_puts_all_area_in_evaporation() {
        let (_, solution) = solve(0.2, 0.0);

        assert_relative_eq!(solution.split.fractions[0], 1.0);
        assert_relative_eq!(solution.zones[1].achieved_duty.get::<watt>(), 0.0);
    }

    #[test]
    fn secondary_is_cooled_but_stays_above_evaporating_temperature() {
        let (_, solution) = solve(0.2, 5.0);

        let outlet = solution.secondary_outlet.get::<degree_celsius>();
        assert!(outlet < 12.0);
        assert!(outlet >= 5.0 + SUPERHEAT_OUTLET_MARGIN - 1e-9);
        assert!(solution.lmtd.get::<delta_kelvin>() > 0.0);
    }
}
