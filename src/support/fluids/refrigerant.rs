use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uom::si::{
    available_energy::kilojoule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{
        AvailableEnergy, DynamicViscosity, MassDensity, Pressure, SpecificHeatCapacity,
        ThermalConductivity, ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::megapascal,
    specific_heat_capacity::kilojoule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::constraint::floor_at;

use super::{FluidError, PhaseProperties};

/// Temperature at which the reference table is evaluated, in °C.
pub const REFERENCE_TEMPERATURE_C: f64 = 25.0;

const WATSON_EXPONENT: f64 = 0.38;
const LIQUID_DENSITY_SLOPE: f64 = 0.0008;
const VAPOR_VISCOSITY_EXPONENT: f64 = 0.7;
const VAPOR_CONDUCTIVITY_EXPONENT: f64 = 0.8;
/// Arrhenius activation temperature for liquid viscosity, K.
const LIQUID_VISCOSITY_ACTIVATION_K: f64 = 1200.0;
const LIQUID_CONDUCTIVITY_SLOPE: f64 = 0.0035;

/// Smallest vapor density a corrected state may report, kg/m³.
pub const MIN_VAPOR_DENSITY: f64 = 0.05;
/// Smallest liquid density a corrected state may report, kg/m³.
pub const MIN_LIQUID_DENSITY: f64 = 50.0;
/// Smallest dynamic viscosity a corrected state may report, Pa·s.
pub const MIN_VISCOSITY: f64 = 1e-6;
/// Smallest vapor conductivity a corrected state may report, W/m·K.
pub const MIN_VAPOR_CONDUCTIVITY: f64 = 0.001;
/// Smallest liquid conductivity a corrected state may report, W/m·K.
pub const MIN_LIQUID_CONDUCTIVITY: f64 = 0.01;

/// Refrigerants with tabulated saturation properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Refrigerant {
    R22,
    R32,
    R134a,
    R404A,
    R407C,
    R410A,
    R507A,
    R1234yf,
    #[serde(rename = "R1234ze(E)")]
    R1234zeE,
    R290,
    R717,
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 11] = [
        Refrigerant::R22,
        Refrigerant::R32,
        Refrigerant::R134a,
        Refrigerant::R404A,
        Refrigerant::R407C,
        Refrigerant::R410A,
        Refrigerant::R507A,
        Refrigerant::R1234yf,
        Refrigerant::R1234zeE,
        Refrigerant::R290,
        Refrigerant::R717,
    ];

    /// Canonical ASHRAE designation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Refrigerant::R22 => "R22",
            Refrigerant::R32 => "R32",
            Refrigerant::R134a => "R134a",
            Refrigerant::R404A => "R404A",
            Refrigerant::R407C => "R407C",
            Refrigerant::R410A => "R410A",
            Refrigerant::R507A => "R507A",
            Refrigerant::R1234yf => "R1234yf",
            Refrigerant::R1234zeE => "R1234ze(E)",
            Refrigerant::R290 => "R290",
            Refrigerant::R717 => "R717",
        }
    }

    /// Saturation properties corrected to `saturation_temperature`.
    #[must_use]
    pub fn state_at(self, saturation_temperature: ThermodynamicTemperature) -> RefrigerantState {
        let data = self.reference();
        let critical_temperature =
            ThermodynamicTemperature::new::<degree_celsius>(data.critical_temperature_c);
        let t_k = saturation_temperature.get::<kelvin>();
        let t_ref_k = reference_temperature().get::<kelvin>();
        let t_crit_k = critical_temperature.get::<kelvin>();
        let temperature_ratio = t_k / t_ref_k;
        let delta_t = t_k - t_ref_k;

        let latent_heat = if saturation_temperature < critical_temperature {
            data.latent_heat * ((t_crit_k - t_k) / (t_crit_k - t_ref_k)).powf(WATSON_EXPONENT)
        } else {
            0.0
        };

        let vapor = PhaseProperties::new(
            MassDensity::new::<kilogram_per_cubic_meter>(floor_at(
                data.vapor_density / temperature_ratio,
                MIN_VAPOR_DENSITY,
            )),
            DynamicViscosity::new::<pascal_second>(floor_at(
                data.vapor_viscosity * temperature_ratio.powf(VAPOR_VISCOSITY_EXPONENT),
                MIN_VISCOSITY,
            )),
            ThermalConductivity::new::<watt_per_meter_kelvin>(floor_at(
                data.vapor_conductivity * temperature_ratio.powf(VAPOR_CONDUCTIVITY_EXPONENT),
                MIN_VAPOR_CONDUCTIVITY,
            )),
            SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(data.vapor_cp),
        );

        let liquid = PhaseProperties::new(
            MassDensity::new::<kilogram_per_cubic_meter>(floor_at(
                data.liquid_density * (1.0 - LIQUID_DENSITY_SLOPE * delta_t),
                MIN_LIQUID_DENSITY,
            )),
            DynamicViscosity::new::<pascal_second>(floor_at(
                data.liquid_viscosity
                    * (LIQUID_VISCOSITY_ACTIVATION_K * (1.0 / t_k - 1.0 / t_ref_k)).exp(),
                MIN_VISCOSITY,
            )),
            ThermalConductivity::new::<watt_per_meter_kelvin>(floor_at(
                data.liquid_conductivity * (1.0 - LIQUID_CONDUCTIVITY_SLOPE * delta_t),
                MIN_LIQUID_CONDUCTIVITY,
            )),
            SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(data.liquid_cp),
        );

        RefrigerantState {
            refrigerant: self,
            saturation_temperature,
            vapor,
            liquid,
            latent_heat: AvailableEnergy::new::<kilojoule_per_kilogram>(latent_heat),
            critical_temperature,
            critical_pressure: Pressure::new::<megapascal>(data.critical_pressure_mpa),
        }
    }

    fn reference(self) -> &'static ReferenceData {
        &REFERENCE_TABLE[self as usize]
    }
}

/// The reference temperature as a quantity.
#[must_use]
pub fn reference_temperature() -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(REFERENCE_TEMPERATURE_C)
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Refrigerant {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let query = s.trim();
        Refrigerant::ALL
            .into_iter()
            .find(|refrigerant| refrigerant.name().eq_ignore_ascii_case(query))
            .ok_or_else(|| FluidError::UnknownRefrigerant {
                name: s.to_owned(),
            })
    }
}

/// Saturation state of a refrigerant at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefrigerantState {
    pub refrigerant: Refrigerant,
    pub saturation_temperature: ThermodynamicTemperature,
    pub vapor: PhaseProperties,
    pub liquid: PhaseProperties,
    /// Latent heat of vaporization; zero at or above the critical temperature.
    pub latent_heat: AvailableEnergy,
    pub critical_temperature: ThermodynamicTemperature,
    pub critical_pressure: Pressure,
}

impl RefrigerantState {
    /// Returns `true` when the saturation temperature is at or above critical.
    #[must_use]
    pub fn is_supercritical(&self) -> bool {
        self.saturation_temperature >= self.critical_temperature
    }
}

/// Saturation properties of the refrigerant `name` at `saturation_temperature`.
///
/// # Errors
///
/// Returns [`FluidError::UnknownRefrigerant`] if `name` is not tabulated.
pub fn refrigerant_properties(
    name: &str,
    saturation_temperature: ThermodynamicTemperature,
) -> Result<RefrigerantState, FluidError> {
    Ok(name.parse::<Refrigerant>()?.state_at(saturation_temperature))
}

/// Saturation properties at [`REFERENCE_TEMPERATURE_C`].
///
/// Viscosities in Pa·s, conductivities in W/m·K, specific heats in kJ/kg·K.
struct ReferenceData {
    critical_temperature_c: f64,
    critical_pressure_mpa: f64,
    latent_heat: f64,
    vapor_density: f64,
    liquid_density: f64,
    vapor_viscosity: f64,
    liquid_viscosity: f64,
    vapor_conductivity: f64,
    liquid_conductivity: f64,
    vapor_cp: f64,
    liquid_cp: f64,
}

// Rows follow the declaration order of `Refrigerant`.
static REFERENCE_TABLE: [ReferenceData; 11] = [
    // R22
    ReferenceData {
        critical_temperature_c: 96.15,
        critical_pressure_mpa: 4.99,
        latent_heat: 182.7,
        vapor_density: 44.8,
        liquid_density: 1191.0,
        vapor_viscosity: 12.6e-6,
        liquid_viscosity: 164.0e-6,
        vapor_conductivity: 0.0110,
        liquid_conductivity: 0.0843,
        vapor_cp: 0.864,
        liquid_cp: 1.26,
    },
    // R32
    ReferenceData {
        critical_temperature_c: 78.1,
        critical_pressure_mpa: 5.78,
        latent_heat: 270.9,
        vapor_density: 47.3,
        liquid_density: 961.0,
        vapor_viscosity: 12.6e-6,
        liquid_viscosity: 115.0e-6,
        vapor_conductivity: 0.0147,
        liquid_conductivity: 0.1275,
        vapor_cp: 1.66,
        liquid_cp: 1.94,
    },
    // R134a
    ReferenceData {
        critical_temperature_c: 101.06,
        critical_pressure_mpa: 4.059,
        latent_heat: 177.8,
        vapor_density: 32.35,
        liquid_density: 1206.7,
        vapor_viscosity: 11.7e-6,
        liquid_viscosity: 195.0e-6,
        vapor_conductivity: 0.0138,
        liquid_conductivity: 0.0811,
        vapor_cp: 1.031,
        liquid_cp: 1.425,
    },
    // R404A
    ReferenceData {
        critical_temperature_c: 72.1,
        critical_pressure_mpa: 3.73,
        latent_heat: 140.6,
        vapor_density: 65.7,
        liquid_density: 1044.0,
        vapor_viscosity: 12.3e-6,
        liquid_viscosity: 130.0e-6,
        vapor_conductivity: 0.0153,
        liquid_conductivity: 0.0655,
        vapor_cp: 1.21,
        liquid_cp: 1.55,
    },
    // R407C
    ReferenceData {
        critical_temperature_c: 86.0,
        critical_pressure_mpa: 4.63,
        latent_heat: 196.6,
        vapor_density: 42.7,
        liquid_density: 1134.0,
        vapor_viscosity: 12.4e-6,
        liquid_viscosity: 155.0e-6,
        vapor_conductivity: 0.0135,
        liquid_conductivity: 0.0863,
        vapor_cp: 1.08,
        liquid_cp: 1.53,
    },
    // R410A
    ReferenceData {
        critical_temperature_c: 71.3,
        critical_pressure_mpa: 4.90,
        latent_heat: 187.5,
        vapor_density: 64.9,
        liquid_density: 1062.0,
        vapor_viscosity: 13.4e-6,
        liquid_viscosity: 122.0e-6,
        vapor_conductivity: 0.0149,
        liquid_conductivity: 0.0888,
        vapor_cp: 1.37,
        liquid_cp: 1.72,
    },
    // R507A
    ReferenceData {
        critical_temperature_c: 70.6,
        critical_pressure_mpa: 3.70,
        latent_heat: 136.0,
        vapor_density: 68.3,
        liquid_density: 1048.0,
        vapor_viscosity: 12.3e-6,
        liquid_viscosity: 129.0e-6,
        vapor_conductivity: 0.0153,
        liquid_conductivity: 0.0645,
        vapor_cp: 1.21,
        liquid_cp: 1.56,
    },
    // R1234yf
    ReferenceData {
        critical_temperature_c: 94.7,
        critical_pressure_mpa: 3.38,
        latent_heat: 145.4,
        vapor_density: 37.9,
        liquid_density: 1092.0,
        vapor_viscosity: 11.5e-6,
        liquid_viscosity: 155.0e-6,
        vapor_conductivity: 0.0138,
        liquid_conductivity: 0.0632,
        vapor_cp: 1.03,
        liquid_cp: 1.39,
    },
    // R1234ze(E)
    ReferenceData {
        critical_temperature_c: 109.4,
        critical_pressure_mpa: 3.64,
        latent_heat: 163.0,
        vapor_density: 26.3,
        liquid_density: 1163.0,
        vapor_viscosity: 12.1e-6,
        liquid_viscosity: 196.0e-6,
        vapor_conductivity: 0.0133,
        liquid_conductivity: 0.0746,
        vapor_cp: 0.99,
        liquid_cp: 1.38,
    },
    // R290
    ReferenceData {
        critical_temperature_c: 96.7,
        critical_pressure_mpa: 4.25,
        latent_heat: 335.9,
        vapor_density: 20.6,
        liquid_density: 492.0,
        vapor_viscosity: 8.2e-6,
        liquid_viscosity: 97.0e-6,
        vapor_conductivity: 0.0185,
        liquid_conductivity: 0.0942,
        vapor_cp: 1.96,
        liquid_cp: 2.72,
    },
    // R717
    ReferenceData {
        critical_temperature_c: 132.25,
        critical_pressure_mpa: 11.33,
        latent_heat: 1166.0,
        vapor_density: 7.8,
        liquid_density: 602.8,
        vapor_viscosity: 10.1e-6,
        liquid_viscosity: 130.0e-6,
        vapor_conductivity: 0.0270,
        liquid_conductivity: 0.479,
        vapor_cp: 3.03,
        liquid_cp: 4.80,
    },
];
