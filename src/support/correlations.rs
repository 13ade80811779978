//! Heat-transfer and friction correlations.
//!
//! Correlations take typed quantities at their boundary and work in SI `f64`
//! internally. None of them fail: degenerate inputs (zero flow, zero
//! viscosity, an empty flow area) produce a named fallback value instead of
//! an error, and two-phase results are clamped to a plausible band.

mod boiling;
mod condensation;
mod friction;
mod shell_side;
mod single_phase;

pub use boiling::{MAX_BOILING_HTC, MIN_BOILING_HTC, NOMINAL_HEAT_FLUX, flow_boiling_htc};
pub use condensation::{
    CondensationHtc, CondensationRegime, MAX_CONDENSATION_HTC, MIN_CONDENSATION_HTC,
    condensation_htc,
};
pub use friction::{darcy_friction, homogeneous_multiplier, kern_shell_friction};
pub use shell_side::shell_side_htc;
pub use single_phase::{DEGENERATE_HTC, LAMINAR_NUSSELT, gnielinski_nusselt, single_phase_htc};

/// Standard gravity, m/s².
const GRAVITY: f64 = 9.80665;
