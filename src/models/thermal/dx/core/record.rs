//! Flat, serializable view of a [`DesignResult`].
//!
//! Keys carry their unit as a suffix (`_kw`, `_c`, `_m2`, ...). Per-zone
//! fields are prefixed with the zone name, for example `condense_q_kw`.

use std::collections::BTreeMap;

use serde::Serialize;
use uom::si::{
    area::square_meter,
    available_energy::kilojoule_per_kilogram,
    heat_transfer::watt_per_square_meter_kelvin,
    length::{meter, millimeter},
    mass::kilogram,
    mass_rate::kilogram_per_second,
    power::kilowatt,
    pressure::kilopascal,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use super::DesignResult;

/// A single field of a [`DesignRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Ordered map from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DesignRecord {
    fields: BTreeMap<String, ReportValue>,
}

impl DesignRecord {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ReportValue> {
        self.fields.get(key)
    }

    /// Numeric field by name, `None` if missing or not a number.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            ReportValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Text field by name, `None` if missing or not text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key)? {
            ReportValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn number_field(&mut self, key: impl Into<String>, value: f64) {
        self.fields.insert(key.into(), ReportValue::Number(value));
    }

    fn text_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), ReportValue::Text(value.into()));
    }
}

impl From<&DesignResult> for DesignRecord {
    fn from(result: &DesignResult) -> Self {
        let mut record = DesignRecord::default();

        record.text_field("hex_type", result.kind.name());
        record.text_field("refrigerant", result.refrigerant.refrigerant.name());
        record.text_field("verdict", result.verdict.label());
        record.text_field("freeze_risk", result.freeze_risk.label());
        record.text_field("allocation_source", result.area_split.source.name());
        record.fields.insert(
            "warnings".into(),
            ReportValue::List(result.warnings.clone()),
        );

        record.number_field("q_required_kw", result.required_duty.get::<kilowatt>());
        record.number_field("q_achieved_kw", result.achieved_duty.get::<kilowatt>());
        record.number_field("duty_ratio", result.duty_ratio);
        record.number_field("effectiveness", result.effectiveness.value);
        record.number_field("ntu", result.ntu.value);
        record.number_field("lmtd_k", result.lmtd.get::<delta_kelvin>());
        record.number_field("pinch_k", result.pinch.get::<delta_kelvin>());
        record.number_field(
            "u_overall_w_m2k",
            result.overall_u.get::<watt_per_square_meter_kelvin>(),
        );
        record.number_field("ua_w_k", result.ua.get::<watt_per_kelvin>());
        record.number_field(
            "shell_htc_w_m2k",
            result.shell_htc.get::<watt_per_square_meter_kelvin>(),
        );

        let refrigerant = &result.refrigerant;
        record.number_field(
            "t_sat_c",
            refrigerant.saturation_temperature.get::<degree_celsius>(),
        );
        record.number_field(
            "latent_heat_kj_kg",
            refrigerant.latent_heat.get::<kilojoule_per_kilogram>(),
        );
        record.number_field("t_ref_in_c", result.refrigerant_inlet.get::<degree_celsius>());
        record.number_field("t_ref_out_c", result.refrigerant_outlet.get::<degree_celsius>());
        record.number_field("t_sec_in_c", result.secondary_inlet.get::<degree_celsius>());
        record.number_field("t_sec_out_c", result.secondary_outlet.get::<degree_celsius>());
        record.number_field(
            "m_dot_ref_kg_s",
            result.refrigerant_mass_rate.get::<kilogram_per_second>(),
        );
        record.number_field(
            "m_dot_sec_kg_s",
            result.secondary_mass_rate.get::<kilogram_per_second>(),
        );
        if let Some(quality) = result.inlet_quality {
            record.number_field("inlet_quality_percent", quality * 100.0);
        }
        if let Some(regime) = result.condensation_regime {
            record.text_field("condensation_regime", regime.to_string());
        }

        let secondary = &result.secondary;
        record.text_field("glycol_type", secondary.glycol_type.name());
        record.number_field("glycol_percent", secondary.tabulated_percent);
        record.number_field("freeze_point_c", secondary.freeze_point.get::<degree_celsius>());

        record.number_field("area_installed_m2", result.installed_area.get::<square_meter>());
        record.number_field("area_required_m2", result.required_area.get::<square_meter>());
        record.number_field("area_ratio", result.area_ratio);

        for zone in &result.zones {
            let key = |field: &str| format!("{}_{field}", zone.kind);
            record.number_field(key("q_req_kw"), zone.required_duty.get::<kilowatt>());
            record.number_field(key("q_kw"), zone.achieved_duty.get::<kilowatt>());
            record.number_field(
                key("htc_w_m2k"),
                zone.tube_htc.get::<watt_per_square_meter_kelvin>(),
            );
            record.number_field(
                key("u_w_m2k"),
                zone.overall_u.get::<watt_per_square_meter_kelvin>(),
            );
            record.number_field(key("area_m2"), zone.area.get::<square_meter>());
            record.number_field(key("area_fraction"), zone.area_fraction);
            record.number_field(key("ntu"), zone.ntu.value);
            record.number_field(key("effectiveness"), zone.effectiveness.value);
            record.number_field(key("t_sec_out_c"), zone.secondary_outlet.get::<degree_celsius>());
        }

        let geometry = &result.geometry;
        record.text_field("tube_size", geometry.tube_size.name());
        record.text_field("tube_material", geometry.material.name());
        record.text_field("tube_layout", geometry.layout.name());
        record.number_field("tube_od_mm", geometry.outer_diameter.get::<millimeter>());
        record.number_field("tube_id_mm", geometry.inner_diameter.get::<millimeter>());
        record.number_field("tube_count", f64::from(geometry.tube_count));
        record.number_field("tube_length_m", geometry.tube_length.get::<meter>());
        record.number_field("passes", f64::from(geometry.passes));
        record.number_field("baffles", f64::from(geometry.baffle_count));
        record.number_field("baffle_spacing_mm", geometry.baffle_spacing.get::<millimeter>());
        record.number_field("shell_diameter_mm", geometry.shell_diameter.get::<millimeter>());
        record.number_field("bundle_diameter_mm", geometry.bundle_diameter.get::<millimeter>());
        record.number_field("pitch_ratio", geometry.pitch_ratio());
        record.number_field("tube_mass_kg", geometry.tube_mass.get::<kilogram>());
        record.number_field("tube_cost", geometry.tube_cost);

        let tube = &result.hydraulics.tube;
        record.number_field("velocity_tube_m_s", tube.velocity.get::<meter_per_second>());
        record.text_field("velocity_tube_status", tube.velocity_status.label());
        record.number_field("re_tube", tube.reynolds);
        record.number_field("g_tube_kg_m2s", tube.mass_flux.value);
        record.number_field("two_phase_multiplier", tube.two_phase_multiplier);
        record.number_field("dp_tube_kpa", tube.pressure_drop.get::<kilopascal>());

        let shell = &result.hydraulics.shell;
        record.number_field("velocity_shell_m_s", shell.velocity.get::<meter_per_second>());
        record.text_field("velocity_shell_status", shell.velocity_status.label());
        record.number_field("re_shell", shell.reynolds);
        record.number_field("g_shell_kg_m2s", shell.mass_flux.value);
        record.number_field("dp_shell_kpa", shell.pressure_drop.get::<kilopascal>());

        record
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::models::thermal::dx::core::{
        CondenserInput, DesignConfig, EvaporatorInput, design_condenser, design_evaporator,
    };

    #[test]
    fn every_zone_is_flattened() {
        let result = design_condenser(&CondenserInput::default(), &DesignConfig::default())
            .expect("default condenser should size");
        let record = DesignRecord::from(&result);

        for zone in ["desuperheat", "condense", "subcool"] {
            for field in ["q_req_kw", "q_kw", "u_w_m2k", "area_m2", "ntu", "effectiveness"] {
                let key = format!("{zone}_{field}");
                assert!(record.number(&key).is_some(), "missing {key}");
            }
        }
        assert_eq!(record.text("hex_type"), Some("condenser"));
        assert!(record.text("condensation_regime").is_some());
    }

    #[test]
    fn evaporator_record_has_quality() {
        let result = design_evaporator(&EvaporatorInput::default(), &DesignConfig::default())
            .expect("default evaporator should size");
        let record = DesignRecord::from(&result);

        let quality = record.number("inlet_quality_percent").expect("quality should be recorded");
        assert_relative_eq!(quality, 20.0, max_relative = 1e-12);
        assert!(record.number("evaporate_q_kw").is_some());
        assert!(record.number("subcool_q_kw").is_none());
    }

    #[test]
    fn serializes_as_flat_object() {
        let result = design_condenser(&CondenserInput::default(), &DesignConfig::default())
            .expect("default condenser should size");
        let record = DesignRecord::from(&result);

        let json = serde_json::to_value(&record).expect("record should serialize");
        let object = json.as_object().expect("record should be a JSON object");

        assert_eq!(object.len(), record.len());
        assert_eq!(object["hex_type"], "condenser");
        assert!(object["warnings"].is_array());
        assert!(object["q_required_kw"].is_number());
    }
}
