//! Functional helpers for zone calculations.

use crate::support::{constraint::ConstraintResult, units::TemperatureDifference};
use uom::si::f64::ThermalConductance;

use super::{Effectiveness, EffectivenessRelation, Ntu, StreamInlet, stream::Stream};

/// Analyze an exchanger zone when its conductance and inlet conditions are
/// known.
///
/// Given the zone conductance and the inlets as [`StreamInlet`], returns the
/// fully resolved [streams](Stream), the [effectiveness](Effectiveness) and
/// the [NTU](Ntu).
///
/// # Errors
///
/// Returns `Err` if the conductance is negative.
pub fn known_conductance_and_inlets(
    arrangement: &impl EffectivenessRelation,
    ua: ThermalConductance,
    inlets: [StreamInlet; 2],
) -> ConstraintResult<KnownConductanceResult> {
    let capacitance_rates = [inlets[0].capacitance_rate, inlets[1].capacitance_rate];
    let ntu = Ntu::from_conductance_and_capacitance_rates(ua, capacitance_rates)?;
    let effectiveness = arrangement.effectiveness(ntu, capacitance_rates);

    // Heat into the first stream at the thermodynamic limit.
    let min_capacitance_rate = capacitance_rates[0].min(*capacitance_rates[1]);
    let max_heat_rate = min_capacitance_rate * inlets[1].temperature.minus(inlets[0].temperature);
    let heat_rate = *effectiveness * max_heat_rate;

    Ok(KnownConductanceResult {
        streams: [
            inlets[0].with_heat_rate(heat_rate),
            inlets[1].with_heat_rate(-heat_rate),
        ],
        effectiveness,
        ntu,
    })
}

/// Resolved zone state returned from [`known_conductance_and_inlets`].
#[derive(Debug, Clone, Copy)]
pub struct KnownConductanceResult {
    /// Final state for each stream (same order as the inputs).
    pub streams: [Stream; 2],
    /// Effectiveness of the zone.
    pub effectiveness: Effectiveness,
    /// Number of transfer units of the zone.
    pub ntu: Ntu,
}
