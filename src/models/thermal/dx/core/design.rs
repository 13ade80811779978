//! End-to-end sizing of a condenser or an evaporator.

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{Area, HeatTransfer, MassRate, Power, ThermalConductance, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
    power::{kilowatt, watt},
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
};

use crate::support::{
    correlations::shell_side_htc,
    fluids::{
        RefrigerantState, SecondaryFluidState, refrigerant_properties, secondary_fluid_properties,
    },
    geometry::BundleGeometry,
    hx::{Effectiveness, Ntu},
    units::{TemperatureDifference, kelvin_interval},
};

use super::{
    CondenserInput, DesignConfig, DesignError, DesignResult, DesignVerdict, EvaporatorInput,
    ExchangerKind, FlowType, FreezeRisk, Hydraulics, SecondaryInlet, ShellSide, TubeSide,
    hydraulics::{self, TubeQualities},
    regions::{
        CondenserConditions, EvaporatorConditions, MEAN_CONDENSING_QUALITY, RegionSolution,
        ZoneContext, solve_condenser, solve_evaporator,
    },
    warnings,
};

/// Floor on the LMTD when sizing the required area, K.
pub const MIN_SIZING_LMTD: f64 = 0.1;

/// Sizes a condenser for a design point and candidate bundle.
///
/// # Errors
///
/// Returns [`DesignError`] if the refrigerant, tube size or tube material is
/// unknown. Every other condition produces a result, with warnings.
pub fn design_condenser(
    input: &CondenserInput,
    config: &DesignConfig,
) -> Result<DesignResult, DesignError> {
    let refrigerant = refrigerant_properties(&input.refrigerant, input.condensing_temperature())?;
    let geometry = BundleGeometry::new(&input.bundle.resolve(config.baffle_cut)?);
    let secondary = SecondarySide::resolve(&input.secondary, &geometry);
    let mass_rate = input.mass_rate();

    let solution = solve_condenser(
        &secondary.context(&refrigerant, &geometry, mass_rate, config),
        &CondenserConditions {
            inlet_temperature: input.inlet_temperature(),
            subcooling: kelvin_interval(input.subcooling_k),
        },
    );

    let tube = hydraulics::tube_side(
        mass_rate,
        &geometry,
        &refrigerant,
        TubeQualities {
            inlet: 1.0,
            mean: MEAN_CONDENSING_QUALITY,
        },
        FlowType::RefrigerantVapor,
    );

    Ok(assemble(Parts {
        kind: ExchangerKind::Condenser,
        refrigerant,
        geometry,
        secondary,
        solution,
        tube,
        mass_rate,
        inlet_quality: None,
    }))
}

/// Sizes an evaporator for a design point and candidate bundle.
///
/// # Errors
///
/// Returns [`DesignError`] if the refrigerant, tube size or tube material is
/// unknown. Every other condition produces a result, with warnings.
pub fn design_evaporator(
    input: &EvaporatorInput,
    config: &DesignConfig,
) -> Result<DesignResult, DesignError> {
    let refrigerant = refrigerant_properties(&input.refrigerant, input.evaporating_temperature())?;
    let geometry = BundleGeometry::new(&input.bundle.resolve(config.baffle_cut)?);
    let secondary = SecondarySide::resolve(&input.secondary, &geometry);
    let mass_rate = input.mass_rate();
    let inlet_quality = input.inlet_quality();

    let solution = solve_evaporator(
        &secondary.context(&refrigerant, &geometry, mass_rate, config),
        &EvaporatorConditions {
            inlet_quality,
            superheat: kelvin_interval(input.superheat_k),
            heat_flux: config.nominal_heat_flux,
        },
    );

    let tube = hydraulics::tube_side(
        mass_rate,
        &geometry,
        &refrigerant,
        TubeQualities {
            inlet: inlet_quality,
            mean: 0.5 * (inlet_quality + 1.0),
        },
        FlowType::RefrigerantTwoPhase,
    );

    Ok(assemble(Parts {
        kind: ExchangerKind::Evaporator,
        refrigerant,
        geometry,
        secondary,
        solution,
        tube,
        mass_rate,
        inlet_quality: Some(inlet_quality),
    }))
}

/// Secondary stream resolved at its inlet temperature.
struct SecondarySide {
    state: SecondaryFluidState,
    mass_rate: MassRate,
    inlet: ThermodynamicTemperature,
    shell: ShellSide,
    htc: HeatTransfer,
}

impl SecondarySide {
    fn resolve(inlet: &SecondaryInlet, geometry: &BundleGeometry) -> Self {
        let temperature = inlet.inlet_temperature();
        let state =
            secondary_fluid_properties(temperature, inlet.glycol_percent, inlet.glycol_type);
        let mass_rate: MassRate = inlet.volume_rate() * state.properties.density;
        let shell = hydraulics::shell_side(mass_rate, geometry, &state.properties);
        let htc = shell_side_htc(
            shell.reynolds,
            state.properties.prandtl,
            geometry.equivalent_diameter,
            state.properties.conductivity,
            geometry.layout,
        );

        Self {
            state,
            mass_rate,
            inlet: temperature,
            shell,
            htc,
        }
    }

    fn context<'a>(
        &'a self,
        refrigerant: &'a RefrigerantState,
        geometry: &'a BundleGeometry,
        refrigerant_mass_rate: MassRate,
        config: &'a DesignConfig,
    ) -> ZoneContext<'a> {
        ZoneContext {
            refrigerant,
            secondary: &self.state,
            geometry,
            refrigerant_mass_rate,
            secondary_mass_rate: self.mass_rate,
            secondary_inlet: self.inlet,
            shell_htc: self.htc,
            config,
        }
    }
}

/// Everything [`assemble`] turns into a result.
struct Parts {
    kind: ExchangerKind,
    refrigerant: RefrigerantState,
    geometry: BundleGeometry,
    secondary: SecondarySide,
    solution: RegionSolution,
    tube: TubeSide,
    mass_rate: MassRate,
    inlet_quality: Option<f64>,
}

fn assemble(parts: Parts) -> DesignResult {
    let Parts {
        kind,
        refrigerant,
        geometry,
        secondary,
        solution,
        tube,
        mass_rate,
        inlet_quality,
    } = parts;
    let RegionSolution {
        zones,
        split,
        condensation_regime,
        refrigerant_inlet,
        refrigerant_outlet,
        secondary_outlet,
        lmtd,
        pinch,
    } = solution;

    let required_w: f64 = zones.iter().map(|zone| zone.required_duty.get::<watt>()).sum();
    let achieved_w: f64 = zones.iter().map(|zone| zone.achieved_duty.get::<watt>()).sum();
    let duty_ratio = if required_w > 0.0 {
        achieved_w / required_w
    } else {
        0.0
    };

    let ua: f64 = zones.iter().map(|zone| zone.ua().get::<watt_per_kelvin>()).sum();
    let installed_area = geometry.outer_area.get::<square_meter>();
    let overall_u = if installed_area > 0.0 {
        ua / installed_area
    } else {
        0.0
    };

    // Both overall figures are taken against the secondary capacitance rate,
    // the smaller one whenever the refrigerant changes phase.
    let t_sat = refrigerant.saturation_temperature;
    let secondary_capacity =
        (secondary.mass_rate * secondary.state.properties.specific_heat).get::<watt_per_kelvin>();
    let driving = match kind {
        ExchangerKind::Condenser => t_sat.minus(secondary.inlet),
        ExchangerKind::Evaporator => secondary.inlet.minus(t_sat),
    }
    .get::<delta_kelvin>();
    let max_duty = secondary_capacity * driving;
    let effectiveness = if max_duty > 0.0 {
        Effectiveness::saturating(achieved_w / max_duty)
    } else {
        Effectiveness::zero()
    };
    let ntu = if secondary_capacity > 0.0 {
        Ntu::new(ua / secondary_capacity).unwrap_or_else(|_| Ntu::zero())
    } else {
        Ntu::zero()
    };

    let sizing_lmtd = lmtd.get::<delta_kelvin>().max(MIN_SIZING_LMTD);
    let required_area = if overall_u > 0.0 {
        required_w / (overall_u * sizing_lmtd)
    } else {
        f64::INFINITY
    };
    let area_ratio = if required_area > 0.0 && required_area.is_finite() {
        installed_area / required_area
    } else {
        0.0
    };

    let freeze_risk = FreezeRisk::from_margin(
        secondary_outlet
            .minus(secondary.state.freeze_point)
            .get::<delta_kelvin>(),
    );
    let verdict = DesignVerdict::classify(duty_ratio, area_ratio, effectiveness.value);

    let mut result = DesignResult {
        kind,
        refrigerant,
        secondary: secondary.state,
        geometry,
        zones,
        area_split: split,
        condensation_regime,
        refrigerant_mass_rate: mass_rate,
        inlet_quality,
        secondary_mass_rate: secondary.mass_rate,
        shell_htc: secondary.htc,
        required_duty: Power::new::<watt>(required_w),
        achieved_duty: Power::new::<watt>(achieved_w),
        duty_ratio,
        effectiveness,
        ntu,
        lmtd,
        pinch,
        overall_u: HeatTransfer::new::<watt_per_square_meter_kelvin>(overall_u),
        ua: ThermalConductance::new::<watt_per_kelvin>(ua),
        refrigerant_inlet,
        refrigerant_outlet,
        secondary_inlet: secondary.inlet,
        secondary_outlet,
        installed_area: geometry.outer_area,
        required_area: Area::new::<square_meter>(required_area),
        area_ratio,
        hydraulics: Hydraulics {
            tube,
            shell: secondary.shell,
        },
        freeze_risk,
        verdict,
        warnings: Vec::new(),
    };
    result.warnings = warnings::collect(&result);

    debug!(
        kind = kind.name(),
        required_kw = result.required_duty.get::<kilowatt>(),
        achieved_kw = result.achieved_duty.get::<kilowatt>(),
        area_ratio,
        %verdict,
        warnings = result.warnings.len(),
        "design complete",
    );

    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::models::thermal::dx::core::{AllocationSource, BundleSpec, ZoneKind};

    #[test]
    fn condenser_totals_are_zone_sums() {
        let result = design_condenser(&CondenserInput::default(), &DesignConfig::default())
            .expect("default condenser should size");

        let required: f64 = result.zones.iter().map(|z| z.required_duty.get::<watt>()).sum();
        assert_eq!(result.required_duty.get::<watt>(), required);
        assert!(result.achieved_duty <= result.required_duty);
        assert_relative_eq!(
            result.duty_ratio,
            result.achieved_duty.get::<watt>() / required,
            max_relative = 1e-12
        );
        assert!(result.condensation_regime.is_some());
    }

    #[test]
    fn evaporator_uses_resistance_weighting() {
        let result = design_evaporator(&EvaporatorInput::default(), &DesignConfig::default())
            .expect("default evaporator should size");

        assert_eq!(result.area_split.source, AllocationSource::ResistanceWeighted);
        assert_eq!(
            result.zones.iter().map(|z| z.kind).collect::<Vec<_>>(),
            [ZoneKind::Evaporate, ZoneKind::Superheat]
        );
        assert_eq!(result.hydraulics.tube.flow_type, FlowType::RefrigerantTwoPhase);
        assert!(result.condensation_regime.is_none());
    }

    #[test]
    fn required_area_uses_area_weighted_u() {
        let result = design_condenser(&CondenserInput::default(), &DesignConfig::default())
            .expect("default condenser should size");

        let ua: f64 = result
            .zones
            .iter()
            .map(|zone| zone.ua().get::<watt_per_kelvin>())
            .sum();
        let u = ua / result.installed_area.get::<square_meter>();
        let lmtd = result.lmtd.get::<delta_kelvin>().max(MIN_SIZING_LMTD);

        assert_relative_eq!(
            result.required_area.get::<square_meter>(),
            result.required_duty.get::<watt>() / (u * lmtd),
            max_relative = 1e-9
        );
    }

    #[test]
    fn unknown_material_is_a_geometry_error() {
        let input = EvaporatorInput {
            bundle: BundleSpec {
                tube_material: "unobtainium".into(),
                ..BundleSpec::default()
            },
            ..EvaporatorInput::default()
        };

        let error = design_evaporator(&input, &DesignConfig::default()).unwrap_err();
        assert!(matches!(error, DesignError::Geometry(_)));
    }
}
