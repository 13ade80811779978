//! Ordered march of the secondary fluid through the refrigerant zones.
//!
//! Each step resolves one counter-flow zone from its inlets, caps the duty
//! at what the refrigerant needs, and clamps the secondary outlet against a
//! temperature cross. The clamped outlet becomes the next zone's inlet.

use tracing::debug;
use uom::{
    ConstZero,
    si::{
        f64::{Area, HeatTransfer, Power, ThermalConductance, ThermodynamicTemperature},
        power::watt,
        thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::kelvin,
    },
};

use crate::{
    models::thermal::dx::core::{Zone, ZoneKind},
    support::hx::{
        CapacitanceRate, CounterFlow, Effectiveness, Ntu, StreamInlet,
        functional::known_conductance_and_inlets,
    },
};

/// Whether the secondary fluid gains or loses heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Condenser: the secondary fluid is the cold stream.
    Heating,
    /// Evaporator: the secondary fluid is the hot stream.
    Cooling,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Heating => 1.0,
            Direction::Cooling => -1.0,
        }
    }

    /// Hot-to-cold difference between a refrigerant and a secondary temperature, K.
    pub(crate) fn approach(
        self,
        refrigerant: ThermodynamicTemperature,
        secondary: ThermodynamicTemperature,
    ) -> f64 {
        self.sign() * (refrigerant.get::<kelvin>() - secondary.get::<kelvin>())
    }
}

/// Bound on a zone's secondary outlet temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum OutletLimit {
    Free,
    AtMost(ThermodynamicTemperature),
    AtLeast(ThermodynamicTemperature),
}

impl OutletLimit {
    /// Clamps an outlet temperature, never past the zone inlet.
    ///
    /// Returns the outlet in kelvin and whether the clamp engaged.
    fn apply(self, inlet: f64, outlet: f64) -> (f64, bool) {
        match self {
            OutletLimit::Free => (outlet, false),
            OutletLimit::AtMost(limit) => {
                let limit = limit.get::<kelvin>().max(inlet);
                if outlet > limit { (limit, true) } else { (outlet, false) }
            }
            OutletLimit::AtLeast(limit) => {
                let limit = limit.get::<kelvin>().min(inlet);
                if outlet < limit { (limit, true) } else { (outlet, false) }
            }
        }
    }
}

/// Everything known about a zone before the secondary fluid reaches it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ZoneStep {
    pub kind: ZoneKind,
    pub required_duty: Power,
    pub tube_htc: HeatTransfer,
    pub overall_u: HeatTransfer,
    pub area: Area,
    pub area_fraction: f64,
    /// `None` when the refrigerant carries no flow through the zone.
    pub refrigerant_capacity: Option<CapacitanceRate>,
    pub refrigerant_inlet: ThermodynamicTemperature,
    pub refrigerant_outlet: ThermodynamicTemperature,
    pub limit: OutletLimit,
}

/// Secondary stream state between zones.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SecondaryMarch {
    capacity: Option<CapacitanceRate>,
    temperature: ThermodynamicTemperature,
    direction: Direction,
}

/// Heat exchange resolved for one step.
struct Exchange {
    achieved_duty: f64,
    outlet: f64,
    ntu: Ntu,
    effectiveness: Effectiveness,
    clamped: bool,
}

impl SecondaryMarch {
    pub(crate) fn new(
        capacity: Option<CapacitanceRate>,
        inlet: ThermodynamicTemperature,
        direction: Direction,
    ) -> Self {
        Self {
            capacity,
            temperature: inlet,
            direction,
        }
    }

    /// Current secondary temperature.
    pub(crate) fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    /// Passes the secondary fluid through one zone.
    pub(crate) fn advance(&mut self, step: &ZoneStep) -> Zone {
        let inlet = self.temperature;
        let exchange = self.exchange(step).unwrap_or(Exchange {
            achieved_duty: 0.0,
            outlet: inlet.get::<kelvin>(),
            ntu: Ntu::zero(),
            effectiveness: Effectiveness::zero(),
            clamped: false,
        });

        let outlet = ThermodynamicTemperature::new::<kelvin>(exchange.outlet);
        self.temperature = outlet;

        debug!(
            zone = %step.kind,
            required_w = step.required_duty.get::<watt>(),
            achieved_w = exchange.achieved_duty,
            ntu = exchange.ntu.value,
            effectiveness = exchange.effectiveness.value,
            clamped = exchange.clamped,
            "zone resolved",
        );

        Zone {
            kind: step.kind,
            required_duty: step.required_duty,
            achieved_duty: Power::new::<watt>(exchange.achieved_duty),
            tube_htc: step.tube_htc,
            overall_u: step.overall_u,
            area: step.area,
            area_fraction: step.area_fraction,
            refrigerant_capacity: step
                .refrigerant_capacity
                .map_or(ThermalConductance::ZERO, |rate| *rate),
            secondary_capacity: self.capacity.map_or(ThermalConductance::ZERO, |rate| *rate),
            ntu: exchange.ntu,
            effectiveness: exchange.effectiveness,
            refrigerant_inlet: step.refrigerant_inlet,
            refrigerant_outlet: step.refrigerant_outlet,
            secondary_inlet: inlet,
            secondary_outlet: outlet,
            clamped: exchange.clamped,
        }
    }

    /// Resolves the zone, or `None` when a stream carries no capacity.
    fn exchange(&self, step: &ZoneStep) -> Option<Exchange> {
        let secondary = self.capacity?;
        let refrigerant = step.refrigerant_capacity?;
        let ua = step.overall_u * step.area;

        let zone = known_conductance_and_inlets(
            &CounterFlow,
            ua,
            [
                StreamInlet::new(secondary, self.temperature),
                StreamInlet::new(refrigerant, step.refrigerant_inlet),
            ],
        )
        .ok()?;

        let sign = self.direction.sign();
        let required = step.required_duty.get::<watt>().max(0.0);
        let achieved = (sign * zone.streams[0].heat_rate.get::<watt>())
            .max(0.0)
            .min(required);

        let capacity = secondary.get::<watt_per_kelvin>();
        let inlet = self.temperature.get::<kelvin>();
        let (outlet, clamped) = step.limit.apply(inlet, inlet + sign * achieved / capacity);
        let achieved = if clamped {
            (outlet - inlet).abs() * capacity
        } else {
            achieved
        };

        Some(Exchange {
            achieved_duty: achieved,
            outlet,
            ntu: zone.ntu,
            effectiveness: zone.effectiveness,
            clamped,
        })
    }
}
