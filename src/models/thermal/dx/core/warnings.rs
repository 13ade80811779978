//! Diagnostic messages for a finished design.
//!
//! Messages are produced in a fixed order so reports stay stable between
//! runs.

use uom::si::{
    pressure::kilopascal, temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius, velocity::meter_per_second,
};

use crate::support::units::TemperatureDifference;

use super::{DesignResult, ExchangerKind, FlowType, FreezeRisk, ZoneKind};

/// Secondary inlet approach to saturation below which a warning is raised, K.
pub const MIN_INLET_APPROACH: f64 = 2.0;

/// Pinch below which a warning is raised, K.
pub const MIN_PINCH: f64 = 2.0;

/// Evaporator inlet quality above which a warning is raised.
pub const MAX_INLET_QUALITY: f64 = 0.4;

/// Tube-side pressure drop above which a warning is raised, kPa.
pub const MAX_TUBE_PRESSURE_DROP: f64 = 50.0;

/// Shell-side pressure drop above which a warning is raised, kPa.
pub const MAX_SHELL_PRESSURE_DROP: f64 = 100.0;

/// Pitch-to-diameter ratio below which a warning is raised.
pub const MIN_PITCH_RATIO: f64 = 1.25;

pub(super) fn collect(result: &DesignResult) -> Vec<String> {
    let mut warnings = Vec::new();
    let refrigerant = &result.refrigerant;
    let t_sat = refrigerant.saturation_temperature.get::<degree_celsius>();
    let (saturation, process) = match result.kind {
        ExchangerKind::Condenser => ("condensing", "condensation"),
        ExchangerKind::Evaporator => ("evaporating", "evaporation"),
    };

    if refrigerant.is_supercritical() {
        warnings.push(format!(
            "Saturation temperature {t_sat:.1} °C is at or above the critical temperature of {} ({:.1} °C); latent heat is zero.",
            refrigerant.refrigerant,
            refrigerant.critical_temperature.get::<degree_celsius>(),
        ));
    }

    let t_in = result.secondary_inlet.get::<degree_celsius>();
    let approach = match result.kind {
        ExchangerKind::Condenser => refrigerant
            .saturation_temperature
            .minus(result.secondary_inlet),
        ExchangerKind::Evaporator => result
            .secondary_inlet
            .minus(refrigerant.saturation_temperature),
    }
    .get::<delta_kelvin>();
    if approach <= 0.0 {
        warnings.push(format!(
            "Secondary inlet at {t_in:.1} °C leaves no driving force against the {saturation} temperature of {t_sat:.1} °C; no {process} is possible."
        ));
    } else if approach < MIN_INLET_APPROACH {
        warnings.push(format!(
            "Secondary inlet at {t_in:.1} °C is within {MIN_INLET_APPROACH} K of the {saturation} temperature of {t_sat:.1} °C."
        ));
    }

    if result.kind == ExchangerKind::Condenser
        && result
            .zone(ZoneKind::Desuperheat)
            .is_some_and(|zone| zone.required_duty.value <= 0.0)
    {
        warnings.push(format!(
            "Refrigerant inlet at {:.1} °C is not superheated above {t_sat:.1} °C; the desuperheat zone carries no duty.",
            result.refrigerant_inlet.get::<degree_celsius>(),
        ));
    }

    for zone in result.zones.iter().filter(|zone| zone.clamped) {
        warnings.push(format!(
            "Secondary outlet of the {} zone was clamped at {:.1} °C to avoid a temperature cross.",
            zone.kind,
            zone.secondary_outlet.get::<degree_celsius>(),
        ));
    }

    let pinch = result.pinch.get::<delta_kelvin>();
    if pinch < MIN_PINCH {
        warnings.push(format!("Pinch of {pinch:.2} K is below {MIN_PINCH} K."));
    }

    if let Some(quality) = result.inlet_quality.filter(|&quality| quality > MAX_INLET_QUALITY) {
        warnings.push(format!(
            "Inlet quality of {:.0} % exceeds {:.0} %; flash gas reduces the evaporating capacity.",
            quality * 100.0,
            MAX_INLET_QUALITY * 100.0,
        ));
    }

    let tube = &result.hydraulics.tube;
    if tube.velocity_status.is_extreme() {
        let range = tube.flow_type.range();
        warnings.push(format!(
            "Tube-side velocity of {:.2} m/s is {} (recommended {:.1} to {:.1} m/s).",
            tube.velocity.get::<meter_per_second>(),
            tube.velocity_status.label().to_lowercase(),
            range.min.get::<meter_per_second>(),
            range.max.get::<meter_per_second>(),
        ));
    }
    let shell = &result.hydraulics.shell;
    if shell.velocity_status.is_extreme() {
        let range = FlowType::SecondaryShellSide.range();
        warnings.push(format!(
            "Shell-side velocity of {:.2} m/s is {} (recommended {:.1} to {:.1} m/s).",
            shell.velocity.get::<meter_per_second>(),
            shell.velocity_status.label().to_lowercase(),
            range.min.get::<meter_per_second>(),
            range.max.get::<meter_per_second>(),
        ));
    }

    let tube_dp = tube.pressure_drop.get::<kilopascal>();
    if tube_dp > MAX_TUBE_PRESSURE_DROP {
        warnings.push(format!(
            "Tube-side pressure drop of {tube_dp:.1} kPa exceeds {MAX_TUBE_PRESSURE_DROP} kPa."
        ));
    }
    let shell_dp = shell.pressure_drop.get::<kilopascal>();
    if shell_dp > MAX_SHELL_PRESSURE_DROP {
        warnings.push(format!(
            "Shell-side pressure drop of {shell_dp:.1} kPa exceeds {MAX_SHELL_PRESSURE_DROP} kPa."
        ));
    }

    if result.freeze_risk == FreezeRisk::High {
        warnings.push(format!(
            "Secondary outlet at {:.1} °C is close to the freeze point of {:.1} °C.",
            result.secondary_outlet.get::<degree_celsius>(),
            result.secondary.freeze_point.get::<degree_celsius>(),
        ));
    }

    let secondary = &result.secondary;
    if secondary.is_rounded() {
        warnings.push(format!(
            "Glycol concentration of {:.1} % was rounded to the tabulated {:.0} % {} glycol.",
            secondary.requested_percent,
            secondary.tabulated_percent,
            secondary.glycol_type.name(),
        ));
    }

    let pitch_ratio = result.geometry.pitch_ratio();
    if pitch_ratio < MIN_PITCH_RATIO {
        warnings.push(format!(
            "Tube pitch ratio of {pitch_ratio:.2} is below {MIN_PITCH_RATIO}; the bundle is hard to clean."
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use uom::si::f64::{Pressure, Velocity};

    use super::*;
    use crate::{
        models::thermal::dx::core::{
            CondenserInput, DesignConfig, EvaporatorInput, design_condenser, design_evaporator,
        },
        support::units::{celsius, kelvin_interval},
    };

    fn condenser() -> DesignResult {
        design_condenser(&CondenserInput::default(), &DesignConfig::default())
            .expect("default condenser should size")
    }

    fn evaporator() -> DesignResult {
        design_evaporator(&EvaporatorInput::default(), &DesignConfig::default())
            .expect("default evaporator should size")
    }

    fn mentions(result: &DesignResult, needle: &str) -> bool {
        collect(result).iter().any(|warning| warning.contains(needle))
    }

    #[test]
    fn pinch_threshold() {
        let mut result = condenser();

        result.pinch = kelvin_interval(MIN_PINCH - 0.01);
        assert!(mentions(&result, "Pinch of"));

        result.pinch = kelvin_interval(MIN_PINCH + 0.01);
        assert!(!mentions(&result, "Pinch of"));
    }

    #[test]
    fn secondary_inlet_past_saturation_has_no_driving_force() {
        let mut result = condenser();
        result.secondary_inlet = celsius(45.5);
        assert!(mentions(&result, "no driving force"));
        assert!(!mentions(&result, "within 2 K"));

        let mut result = evaporator();
        result.secondary_inlet = celsius(4.0);
        assert!(mentions(&result, "no driving force"));

        result.secondary_inlet = celsius(5.0 + MIN_INLET_APPROACH + 0.5);
        assert!(!mentions(&result, "no driving force"));
        assert!(!mentions(&result, "within 2 K"));
    }

    #[test]
    fn velocities_outside_the_band() {
        let mut result = condenser();

        let tube = &mut result.hydraulics.tube;
        let range = tube.flow_type.range();
        tube.velocity = range.max + Velocity::new::<meter_per_second>(0.1);
        tube.velocity_status = tube.flow_type.classify(tube.velocity);
        assert!(mentions(&result, "Tube-side velocity"));
        assert!(mentions(&result, "too high"));

        let shell = &mut result.hydraulics.shell;
        let range = FlowType::SecondaryShellSide.range();
        shell.velocity = range.min - Velocity::new::<meter_per_second>(0.01);
        shell.velocity_status = FlowType::SecondaryShellSide.classify(shell.velocity);
        assert!(mentions(&result, "Shell-side velocity"));
        assert!(mentions(&result, "too low"));

        let tube = &mut result.hydraulics.tube;
        tube.velocity = tube.flow_type.range().optimum;
        tube.velocity_status = tube.flow_type.classify(tube.velocity);
        assert!(!mentions(&result, "Tube-side velocity"));
    }

    #[test]
    fn high_inlet_quality() {
        let mut result = evaporator();

        result.inlet_quality = Some(MAX_INLET_QUALITY + 0.01);
        assert!(mentions(&result, "Inlet quality"));

        result.inlet_quality = Some(MAX_INLET_QUALITY);
        assert!(!mentions(&result, "Inlet quality"));
    }

    #[test]
    fn pressure_drop_limits() {
        let mut result = condenser();
        result.hydraulics.tube.pressure_drop =
            Pressure::new::<kilopascal>(MAX_TUBE_PRESSURE_DROP + 0.1);
        result.hydraulics.shell.pressure_drop =
            Pressure::new::<kilopascal>(MAX_SHELL_PRESSURE_DROP + 0.1);
        assert!(mentions(&result, "Tube-side pressure drop"));
        assert!(mentions(&result, "Shell-side pressure drop"));

        result.hydraulics.tube.pressure_drop = Pressure::new::<kilopascal>(MAX_TUBE_PRESSURE_DROP);
        result.hydraulics.shell.pressure_drop =
            Pressure::new::<kilopascal>(MAX_SHELL_PRESSURE_DROP);
        assert!(!mentions(&result, "pressure drop"));
    }

    #[test]
    fn tight_pitch() {
        let mut result = condenser();

        result.geometry.pitch = result.geometry.outer_diameter * (MIN_PITCH_RATIO - 0.01);
        assert!(mentions(&result, "pitch ratio"));

        result.geometry.pitch = result.geometry.outer_diameter * (MIN_PITCH_RATIO + 0.01);
        assert!(!mentions(&result, "pitch ratio"));
    }

    #[test]
    fn messages_follow_a_fixed_order() {
        let mut result = evaporator();
        result.secondary_inlet = celsius(4.0);
        result.pinch = kelvin_interval(0.5);
        result.inlet_quality = Some(0.6);

        let tube = &mut result.hydraulics.tube;
        tube.velocity = tube.flow_type.range().max * 2.0;
        tube.velocity_status = tube.flow_type.classify(tube.velocity);
        tube.pressure_drop = Pressure::new::<kilopascal>(2.0 * MAX_TUBE_PRESSURE_DROP);
        result.hydraulics.shell.pressure_drop =
            Pressure::new::<kilopascal>(2.0 * MAX_SHELL_PRESSURE_DROP);
        result.freeze_risk = FreezeRisk::High;
        result.geometry.pitch = result.geometry.outer_diameter * 1.1;

        let warnings = collect(&result);
        let position = |needle: &str| {
            warnings
                .iter()
                .position(|warning| warning.contains(needle))
                .unwrap_or_else(|| panic!("missing warning containing {needle:?}"))
        };
        let positions: Vec<usize> = [
            "no driving force",
            "Pinch of",
            "Inlet quality",
            "Tube-side velocity",
            "Tube-side pressure drop",
            "Shell-side pressure drop",
            "freeze point",
            "pitch ratio",
        ]
        .into_iter()
        .map(position)
        .collect();

        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "out of order: {warnings:#?}"
        );
    }
}
