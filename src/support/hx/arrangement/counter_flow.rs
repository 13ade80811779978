//! Counter-flow effectiveness-NTU relationship.

use crate::support::hx::{
    CapacitanceRate, Effectiveness, Ntu,
    capacity_ratio::LIMIT_TOLERANCE,
    effectiveness_ntu::{EffectivenessRelation, effectiveness_via},
};

/// Counter-flow arrangement.
///
/// Uses the balanced limit `NTU / (1 + NTU)` when the capacity ratio is
/// within tolerance of one, the phase-change limit `1 - exp(-NTU)` when it is
/// within tolerance of zero, and the closed form otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterFlow;

impl EffectivenessRelation for CounterFlow {
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness {
        effectiveness_via(ntu, capacitance_rates, |ntu, cr| {
            if (1. - cr).abs() < LIMIT_TOLERANCE {
                ntu / (1. + ntu)
            } else {
                (1. - (-ntu * (1. - cr)).exp()) / (1. - cr * (-ntu * (1. - cr)).exp())
            }
        })
    }
}
