use serde::{Deserialize, Serialize};
use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use super::PhaseProperties;

/// Temperature at which the glycol tables are evaluated, in °C.
const REFERENCE_TEMPERATURE_C: f64 = 20.0;
/// Spacing of the tabulated concentrations, in percent.
const BUCKET_STEP_PERCENT: f64 = 10.0;

const CP_SLOPE: f64 = 0.0005;
const DENSITY_SLOPE: f64 = 0.0003;
const VISCOSITY_DECAY_ABOVE: f64 = 0.025;
const VISCOSITY_DECAY_BELOW: f64 = 0.035;
const CONDUCTIVITY_SLOPE: f64 = 0.0015;

/// Glycol used as antifreeze in the secondary fluid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlycolType {
    #[default]
    Ethylene,
    Propylene,
}

impl GlycolType {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GlycolType::Ethylene => "ethylene",
            GlycolType::Propylene => "propylene",
        }
    }

    fn table(self) -> &'static [MixtureData; 7] {
        match self {
            GlycolType::Ethylene => &ETHYLENE_GLYCOL,
            GlycolType::Propylene => &PROPYLENE_GLYCOL,
        }
    }
}

/// Water/glycol mixture state at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondaryFluidState {
    pub temperature: ThermodynamicTemperature,
    pub glycol_type: GlycolType,
    /// Concentration asked for, in percent by mass.
    pub requested_percent: f64,
    /// Tabulated concentration actually used, in percent by mass.
    pub tabulated_percent: f64,
    pub properties: PhaseProperties,
    /// Freeze point of the tabulated mixture, independent of temperature.
    pub freeze_point: ThermodynamicTemperature,
}

impl SecondaryFluidState {
    /// Returns `true` when the requested concentration was not itself tabulated.
    #[must_use]
    pub fn is_rounded(&self) -> bool {
        (self.requested_percent - self.tabulated_percent).abs() > 1e-9
    }
}

/// Mixture properties at `temperature` for the nearest tabulated concentration.
///
/// Concentrations are not interpolated: `glycol_percent` snaps to the nearest
/// 10 % bucket (halves round up) within 0 to 60 %.
#[must_use]
pub fn secondary_fluid_properties(
    temperature: ThermodynamicTemperature,
    glycol_percent: f64,
    glycol_type: GlycolType,
) -> SecondaryFluidState {
    let index = bucket_index(glycol_percent);
    let data = &glycol_type.table()[index];
    let delta_t = temperature.get::<degree_celsius>() - REFERENCE_TEMPERATURE_C;

    let viscosity_decay = if delta_t >= 0.0 {
        VISCOSITY_DECAY_ABOVE
    } else {
        VISCOSITY_DECAY_BELOW
    };

    let properties = PhaseProperties::new(
        MassDensity::new::<kilogram_per_cubic_meter>(
            data.density * (1.0 - DENSITY_SLOPE * delta_t),
        ),
        DynamicViscosity::new::<pascal_second>(data.viscosity * (-viscosity_decay * delta_t).exp()),
        ThermalConductivity::new::<watt_per_meter_kelvin>(
            data.conductivity * (1.0 + CONDUCTIVITY_SLOPE * delta_t),
        ),
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            data.cp * (1.0 + CP_SLOPE * delta_t),
        ),
    );

    SecondaryFluidState {
        temperature,
        glycol_type,
        requested_percent: glycol_percent,
        tabulated_percent: bucket_percent(index),
        properties,
        freeze_point: ThermodynamicTemperature::new::<degree_celsius>(data.freeze_point_c),
    }
}

/// Freeze point of the nearest tabulated mixture.
#[must_use]
pub fn freeze_point(glycol_percent: f64, glycol_type: GlycolType) -> ThermodynamicTemperature {
    let data = &glycol_type.table()[bucket_index(glycol_percent)];
    ThermodynamicTemperature::new::<degree_celsius>(data.freeze_point_c)
}

fn bucket_index(glycol_percent: f64) -> usize {
    let bucket = (glycol_percent / BUCKET_STEP_PERCENT).round();
    if bucket.is_nan() || bucket <= 0.0 {
        0
    } else {
        // Whole number in 1..=6, so the cast is exact.
        bucket.min(6.0) as usize
    }
}

fn bucket_percent(index: usize) -> f64 {
    BUCKET_STEP_PERCENT * index as f64
}

/// Mixture properties at 20 °C.
///
/// Specific heat in J/kg·K, viscosity in Pa·s.
struct MixtureData {
    cp: f64,
    density: f64,
    viscosity: f64,
    conductivity: f64,
    freeze_point_c: f64,
}

const fn row(
    cp: f64,
    density: f64,
    viscosity: f64,
    conductivity: f64,
    freeze_point_c: f64,
) -> MixtureData {
    MixtureData {
        cp,
        density,
        viscosity,
        conductivity,
        freeze_point_c,
    }
}

// Rows at 0, 10, ..., 60 % glycol by mass.
static ETHYLENE_GLYCOL: [MixtureData; 7] = [
    row(4182.0, 998.2, 1.002e-3, 0.598, 0.0),
    row(4000.0, 1013.0, 1.30e-3, 0.560, -3.4),
    row(3840.0, 1027.0, 1.70e-3, 0.520, -7.9),
    row(3660.0, 1041.0, 2.30e-3, 0.480, -14.0),
    row(3470.0, 1055.0, 3.20e-3, 0.440, -23.8),
    row(3260.0, 1068.0, 4.60e-3, 0.400, -36.8),
    row(3040.0, 1080.0, 6.90e-3, 0.360, -52.8),
];

static PROPYLENE_GLYCOL: [MixtureData; 7] = [
    row(4182.0, 998.2, 1.002e-3, 0.598, 0.0),
    row(4110.0, 1008.0, 1.50e-3, 0.550, -3.3),
    row(3980.0, 1017.0, 2.10e-3, 0.500, -7.1),
    row(3850.0, 1026.0, 3.10e-3, 0.460, -13.0),
    row(3680.0, 1034.0, 4.90e-3, 0.420, -21.1),
    row(3480.0, 1041.0, 7.60e-3, 0.380, -33.5),
    row(3260.0, 1046.0, 12.0e-3, 0.340, -51.1),
];

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::support::units::celsius;

    #[test]
    fn freeze_points_at_thirty_percent() {
        assert_relative_eq!(
            freeze_point(30.0, GlycolType::Ethylene).get::<degree_celsius>(),
            -14.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            freeze_point(30.0, GlycolType::Propylene).get::<degree_celsius>(),
            -13.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn concentration_snaps_to_nearest_bucket() {
        assert_eq!(bucket_index(0.0), 0);
        assert_eq!(bucket_index(14.9), 1);
        assert_eq!(bucket_index(15.0), 2);
        assert_eq!(bucket_index(33.0), 3);
        assert_eq!(bucket_index(95.0), 6);
        assert_eq!(bucket_index(-5.0), 0);

        let state = secondary_fluid_properties(celsius(20.0), 33.0, GlycolType::Ethylene);
        assert_relative_eq!(state.tabulated_percent, 30.0);
        assert!(state.is_rounded());
        assert!(
            !secondary_fluid_properties(celsius(20.0), 30.0, GlycolType::Ethylene).is_rounded()
        );
    }

    #[test]
    fn reference_temperature_returns_table_values() {
        let state = secondary_fluid_properties(celsius(20.0), 0.0, GlycolType::Ethylene);
        let water = state.properties;

        assert_relative_eq!(water.specific_heat.value, 4182.0, max_relative = 1e-9);
        assert_relative_eq!(water.density.value, 998.2, max_relative = 1e-9);
        assert_relative_eq!(water.viscosity.value, 1.002e-3, max_relative = 1e-9);
        assert_relative_eq!(water.conductivity.value, 0.598, max_relative = 1e-9);
        assert_relative_eq!(
            water.prandtl,
            water.specific_heat.value * water.viscosity.value / water.conductivity.value
        );
    }

    #[test]
    fn viscosity_correction_is_asymmetric() {
        let reference = secondary_fluid_properties(celsius(20.0), 30.0, GlycolType::Propylene);
        let warmer = secondary_fluid_properties(celsius(30.0), 30.0, GlycolType::Propylene);
        let colder = secondary_fluid_properties(celsius(10.0), 30.0, GlycolType::Propylene);

        let mu_ref = reference.properties.viscosity.value;
        assert_relative_eq!(
            warmer.properties.viscosity.value / mu_ref,
            (-0.25_f64).exp(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            colder.properties.viscosity.value / mu_ref,
            0.35_f64.exp(),
            max_relative = 1e-9
        );
        assert!(warmer.properties.density < reference.properties.density);
        assert!(warmer.properties.specific_heat > reference.properties.specific_heat);
    }
}
