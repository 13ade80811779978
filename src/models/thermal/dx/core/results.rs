//! Result types for a sizing call.

use std::fmt;

use serde::Serialize;
use uom::si::f64::{
    Area, HeatTransfer, MassRate, Power, TemperatureInterval, ThermalConductance,
    ThermodynamicTemperature,
};

use crate::support::{
    correlations::CondensationRegime,
    fluids::{RefrigerantState, SecondaryFluidState},
    geometry::BundleGeometry,
    hx::{Effectiveness, Ntu},
};

use super::{AreaSplit, DesignVerdict, FreezeRisk, Hydraulics};

/// Which exchanger was sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangerKind {
    Condenser,
    Evaporator,
}

impl ExchangerKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ExchangerKind::Condenser => "condenser",
            ExchangerKind::Evaporator => "evaporator",
        }
    }
}

/// Thermal region along the refrigerant path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Desuperheat,
    Condense,
    Subcool,
    Evaporate,
    Superheat,
}

impl ZoneKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ZoneKind::Desuperheat => "desuperheat",
            ZoneKind::Condense => "condense",
            ZoneKind::Subcool => "subcool",
            ZoneKind::Evaporate => "evaporate",
            ZoneKind::Superheat => "superheat",
        }
    }

    /// Returns `true` for zones where the refrigerant changes phase.
    #[must_use]
    pub fn is_latent(self) -> bool {
        matches!(self, ZoneKind::Condense | ZoneKind::Evaporate)
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Solved state of one zone.
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    pub kind: ZoneKind,

    /// Duty needed to bring the refrigerant through this zone.
    pub required_duty: Power,

    /// Duty the allocated area delivers, never above `required_duty`.
    pub achieved_duty: Power,

    /// Tube-side heat transfer coefficient.
    pub tube_htc: HeatTransfer,

    /// Overall coefficient on the outer-area basis.
    pub overall_u: HeatTransfer,

    pub area: Area,
    pub area_fraction: f64,

    /// Refrigerant capacitance rate; infinite in latent zones.
    pub refrigerant_capacity: ThermalConductance,

    pub secondary_capacity: ThermalConductance,
    pub ntu: Ntu,
    pub effectiveness: Effectiveness,
    pub refrigerant_inlet: ThermodynamicTemperature,
    pub refrigerant_outlet: ThermodynamicTemperature,
    pub secondary_inlet: ThermodynamicTemperature,
    pub secondary_outlet: ThermodynamicTemperature,

    /// Whether the secondary outlet was clamped to avoid a temperature cross.
    pub clamped: bool,
}

impl Zone {
    /// Zone conductance `U·A`.
    #[must_use]
    pub fn ua(&self) -> ThermalConductance {
        self.overall_u * self.area
    }
}

/// Complete outcome of a condenser or evaporator design call.
///
/// Zones are ordered along the refrigerant path and their areas sum to
/// `installed_area`.
#[derive(Debug, Clone)]
pub struct DesignResult {
    pub kind: ExchangerKind,
    pub refrigerant: RefrigerantState,
    pub secondary: SecondaryFluidState,
    pub geometry: BundleGeometry,

    pub zones: Vec<Zone>,
    pub area_split: AreaSplit,

    /// Flow pattern in the condensing zone; `None` for evaporators.
    pub condensation_regime: Option<CondensationRegime>,

    pub refrigerant_mass_rate: MassRate,

    /// Refrigerant quality entering an evaporator; `None` for condensers.
    pub inlet_quality: Option<f64>,

    pub secondary_mass_rate: MassRate,
    pub shell_htc: HeatTransfer,

    pub required_duty: Power,
    pub achieved_duty: Power,

    /// `achieved_duty / required_duty`, zero when nothing is required.
    pub duty_ratio: f64,

    pub effectiveness: Effectiveness,
    pub ntu: Ntu,
    pub lmtd: TemperatureInterval,

    /// Smallest hot-to-cold difference at any zone boundary; negative on a cross.
    pub pinch: TemperatureInterval,

    /// Area-weighted overall coefficient.
    pub overall_u: HeatTransfer,
    pub ua: ThermalConductance,

    pub refrigerant_inlet: ThermodynamicTemperature,
    pub refrigerant_outlet: ThermodynamicTemperature,
    pub secondary_inlet: ThermodynamicTemperature,
    pub secondary_outlet: ThermodynamicTemperature,

    pub installed_area: Area,
    pub required_area: Area,

    /// `installed_area / required_area`.
    pub area_ratio: f64,

    pub hydraulics: Hydraulics,
    pub freeze_risk: FreezeRisk,
    pub verdict: DesignVerdict,

    /// Diagnostics in a fixed order; empty for a clean design.
    pub warnings: Vec<String>,
}

impl DesignResult {
    /// Looks up a zone by kind.
    #[must_use]
    pub fn zone(&self, kind: ZoneKind) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.kind == kind)
    }
}
