//! Input records for a design call.
//!
//! Records use flat engineering units (kg/s, °C, K, %, m³/h, mm, m) so they
//! deserialize directly from user-facing documents. Every field has a default.

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, MassRate, ThermodynamicTemperature, VolumeRate},
    length::{meter, millimeter},
    mass_rate::kilogram_per_second,
    volume_rate::cubic_meter_per_hour,
};

use crate::support::{
    fluids::GlycolType,
    geometry::{BundleLayout, GeometryError, TubeLayout},
    units::celsius,
};

/// Design point for a condenser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondenserInput {
    pub refrigerant: String,
    pub mass_flow_kg_s: f64,
    /// Superheated vapor temperature at the refrigerant inlet.
    pub inlet_temp_c: f64,
    pub condensing_temp_c: f64,
    pub subcooling_k: f64,
    pub secondary: SecondaryInlet,
    pub bundle: BundleSpec,
}

impl Default for CondenserInput {
    fn default() -> Self {
        Self {
            refrigerant: "R134a".into(),
            mass_flow_kg_s: 0.221,
            inlet_temp_c: 95.0,
            condensing_temp_c: 45.0,
            subcooling_k: 5.0,
            secondary: SecondaryInlet {
                flow_m3_h: 8.0,
                inlet_temp_c: 30.0,
                ..SecondaryInlet::default()
            },
            bundle: BundleSpec::default(),
        }
    }
}

impl CondenserInput {
    pub(super) fn mass_rate(&self) -> MassRate {
        MassRate::new::<kilogram_per_second>(self.mass_flow_kg_s)
    }

    pub(super) fn inlet_temperature(&self) -> ThermodynamicTemperature {
        celsius(self.inlet_temp_c)
    }

    pub(super) fn condensing_temperature(&self) -> ThermodynamicTemperature {
        celsius(self.condensing_temp_c)
    }
}

/// Design point for an evaporator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaporatorInput {
    pub refrigerant: String,
    pub mass_flow_kg_s: f64,
    pub evaporating_temp_c: f64,
    pub superheat_k: f64,
    /// Vapor quality entering the tubes, typically after the expansion valve.
    pub inlet_quality_percent: f64,
    pub secondary: SecondaryInlet,
    pub bundle: BundleSpec,
}

impl Default for EvaporatorInput {
    fn default() -> Self {
        Self {
            refrigerant: "R410A".into(),
            mass_flow_kg_s: 0.15,
            evaporating_temp_c: 5.0,
            superheat_k: 5.0,
            inlet_quality_percent: 20.0,
            secondary: SecondaryInlet {
                flow_m3_h: 4.6,
                inlet_temp_c: 12.0,
                ..SecondaryInlet::default()
            },
            bundle: BundleSpec::default(),
        }
    }
}

impl EvaporatorInput {
    pub(super) fn mass_rate(&self) -> MassRate {
        MassRate::new::<kilogram_per_second>(self.mass_flow_kg_s)
    }

    pub(super) fn evaporating_temperature(&self) -> ThermodynamicTemperature {
        celsius(self.evaporating_temp_c)
    }

    /// Inlet quality as a fraction in [0, 1].
    pub(super) fn inlet_quality(&self) -> f64 {
        let quality = self.inlet_quality_percent / 100.0;
        if quality.is_nan() { 0.0 } else { quality.clamp(0.0, 1.0) }
    }
}

/// Shell-side water or glycol stream entering the exchanger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryInlet {
    pub flow_m3_h: f64,
    pub inlet_temp_c: f64,
    pub glycol_type: GlycolType,
    pub glycol_percent: f64,
}

impl Default for SecondaryInlet {
    fn default() -> Self {
        Self {
            flow_m3_h: 8.0,
            inlet_temp_c: 25.0,
            glycol_type: GlycolType::Ethylene,
            glycol_percent: 0.0,
        }
    }
}

impl SecondaryInlet {
    pub(super) fn volume_rate(&self) -> VolumeRate {
        VolumeRate::new::<cubic_meter_per_hour>(self.flow_m3_h)
    }

    pub(super) fn inlet_temperature(&self) -> ThermodynamicTemperature {
        celsius(self.inlet_temp_c)
    }
}

/// Candidate tube bundle, with table names for the tube size and material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleSpec {
    /// Nominal outer diameter, for example `3/8"`.
    pub tube_size: String,
    pub tube_material: String,
    pub wall_thickness_mm: f64,
    pub tube_pitch_mm: f64,
    pub passes: u32,
    pub baffles: u32,
    pub tube_count: u32,
    pub tube_length_m: f64,
    pub layout: TubeLayout,
}

impl Default for BundleSpec {
    fn default() -> Self {
        Self {
            tube_size: "3/8\"".into(),
            tube_material: "Copper".into(),
            wall_thickness_mm: 0.7,
            tube_pitch_mm: 12.7,
            passes: 2,
            baffles: 4,
            tube_count: 60,
            tube_length_m: 2.0,
            layout: TubeLayout::Triangular,
        }
    }
}

impl BundleSpec {
    /// Looks up the tube size and material and converts to typed quantities.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the tube size or material is unknown.
    pub fn resolve(&self, baffle_cut: f64) -> Result<BundleLayout, GeometryError> {
        Ok(BundleLayout {
            tube_size: self.tube_size.parse()?,
            material: self.tube_material.parse()?,
            wall_thickness: Length::new::<millimeter>(self.wall_thickness_mm),
            pitch: Length::new::<millimeter>(self.tube_pitch_mm),
            layout: self.layout,
            tube_count: self.tube_count,
            tube_length: Length::new::<meter>(self.tube_length_m),
            passes: self.passes,
            baffles: self.baffles,
            baffle_cut,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::geometry::{TubeMaterial, TubeSize};

    #[test]
    fn bundle_resolves_table_names() {
        let spec = BundleSpec {
            tube_size: "5/8".into(),
            tube_material: "ss316".into(),
            ..BundleSpec::default()
        };

        let layout = spec.resolve(0.25).expect("known names should resolve");
        assert_eq!(layout.tube_size, TubeSize::FiveEighths);
        assert_eq!(layout.material, TubeMaterial::Stainless316);
        assert_eq!(layout.tube_count, 60);
    }

    #[test]
    fn unknown_tube_size_is_rejected() {
        let spec = BundleSpec {
            tube_size: "7/16\"".into(),
            ..BundleSpec::default()
        };

        assert!(matches!(
            spec.resolve(0.25),
            Err(GeometryError::UnknownTubeSize { .. })
        ));
    }

    #[test]
    fn inlet_quality_is_clamped() {
        let input = EvaporatorInput {
            inlet_quality_percent: 140.0,
            ..EvaporatorInput::default()
        };
        assert!((input.inlet_quality() - 1.0).abs() < f64::EPSILON);
    }
}
