use uom::si::{
    f64::{HeatFluxDensity, HeatTransfer, Length, MassRate},
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
};

use crate::support::fluids::RefrigerantState;

use super::{
    GRAVITY,
    single_phase::{gnielinski_nusselt, single_phase_htc, tube_mass_flux},
};

/// Heat flux assumed when evaluating the boiling number, W/m².
pub const NOMINAL_HEAT_FLUX: f64 = 10_000.0;

/// Lower bound of the flow-boiling coefficient, W/m²·K.
pub const MIN_BOILING_HTC: f64 = 500.0;
/// Upper bound of the flow-boiling coefficient, W/m²·K.
pub const MAX_BOILING_HTC: f64 = 15_000.0;

const STRATIFIED_FROUDE: f64 = 0.04;
const BOILING_NUMBER_THRESHOLD: f64 = 0.0011;
const DRY_VAPOR_FACTOR: f64 = 0.6;
const MAX_DENSITY_ENHANCEMENT: f64 = 3.0;

/// Flow-boiling coefficient from the Shah chart correlation.
///
/// Qualities at or below zero fall back to single-phase liquid, at or above
/// one to 0.6 times single-phase vapor. In between, the liquid-only
/// coefficient is multiplied by the Shah factor `ψ` and a density-ratio
/// enhancement capped at 3, and the result is clamped to
/// [`MIN_BOILING_HTC`]..=[`MAX_BOILING_HTC`].
#[must_use]
pub fn flow_boiling_htc(
    mass_rate_per_tube: MassRate,
    quality: f64,
    diameter: Length,
    state: &RefrigerantState,
    passes: u32,
    heat_flux: HeatFluxDensity,
) -> HeatTransfer {
    if quality <= 0.0 {
        return single_phase_htc(mass_rate_per_tube, diameter, &state.liquid, passes);
    }
    if quality >= 1.0 {
        return single_phase_htc(mass_rate_per_tube, diameter, &state.vapor, passes)
            * DRY_VAPOR_FACTOR;
    }

    let x = quality;
    let d = diameter.value;
    let g = tube_mass_flux(mass_rate_per_tube, diameter, passes);
    let rho_l = state.liquid.density.value;
    let rho_v = state.vapor.density.value;
    let h_fg = state.latent_heat.value;

    let froude = g.powi(2) / (rho_l.powi(2) * GRAVITY * d);
    let convection = ((1.0 - x) / x).powf(0.8) * (rho_v / rho_l).sqrt();
    let boiling = if g > 0.0 && h_fg > 0.0 {
        heat_flux.get::<watt_per_square_meter>() / (g * h_fg)
    } else {
        0.0
    };

    let reynolds_l = g * (1.0 - x) * d / state.liquid.viscosity.value;
    let h_l =
        gnielinski_nusselt(reynolds_l, state.liquid.prandtl) * state.liquid.conductivity.value / d;

    let psi = shah_factor(froude, convection, boiling);
    let enhancement = (1.0 + x * (rho_l / rho_v - 1.0))
        .powf(0.2)
        .min(MAX_DENSITY_ENHANCEMENT);

    let htc = h_l * psi * enhancement;
    let htc = if htc.is_finite() {
        htc.clamp(MIN_BOILING_HTC, MAX_BOILING_HTC)
    } else {
        MIN_BOILING_HTC
    };
    HeatTransfer::new::<watt_per_square_meter_kelvin>(htc)
}

/// Shah two-phase factor `ψ`.
fn shah_factor(froude: f64, convection: f64, boiling: f64) -> f64 {
    // Stratified flow in horizontal tubes uses a modified convection number.
    let n = if froude >= STRATIFIED_FROUDE {
        convection
    } else {
        0.38 * froude.powf(-0.3) * convection
    };
    let f = if boiling >= BOILING_NUMBER_THRESHOLD {
        14.7
    } else {
        15.43
    };

    let convective = 1.8 / n.powf(0.8);
    if n <= 1.0 {
        // Bubble suppression.
        let suppressed = if n > 0.1 {
            f * boiling.sqrt() * (2.74 * n.powf(-0.1)).exp()
        } else {
            f * boiling.sqrt() * (2.47 * n.powf(-0.15)).exp()
        };
        suppressed.max(convective)
    } else {
        let nucleate = if boiling > 0.3e-4 {
            230.0 * boiling.sqrt()
        } else {
            1.0 + 46.0 * boiling.sqrt()
        };
        nucleate.max(convective)
    }
}

#[cfg(test)]
mod tests {
    use uom::si::{length::millimeter, mass_rate::kilogram_per_second};

    use super::*;
    use crate::support::{fluids::Refrigerant, units::celsius};

    fn nominal_flux() -> HeatFluxDensity {
        HeatFluxDensity::new::<watt_per_square_meter>(NOMINAL_HEAT_FLUX)
    }

    fn htc(quality: f64) -> f64 {
        let state = Refrigerant::R134a.state_at(celsius(5.0));
        flow_boiling_htc(
            MassRate::new::<kilogram_per_second>(0.004),
            quality,
            Length::new::<millimeter>(8.0),
            &state,
            2,
            nominal_flux(),
        )
        .get::<watt_per_square_meter_kelvin>()
    }

    #[test]
    fn two_phase_result_is_clamped() {
        for quality in [0.05, 0.2, 0.5, 0.8, 0.95] {
            let value = htc(quality);
            assert!((MIN_BOILING_HTC..=MAX_BOILING_HTC).contains(&value), "{quality}: {value}");
        }
    }

    #[test]
    fn single_phase_limits() {
        let state = Refrigerant::R134a.state_at(celsius(5.0));
        let mass_rate = MassRate::new::<kilogram_per_second>(0.004);
        let diameter = Length::new::<millimeter>(8.0);

        let liquid = single_phase_htc(mass_rate, diameter, &state.liquid, 2);
        let vapor = single_phase_htc(mass_rate, diameter, &state.vapor, 2);

        assert_eq!(htc(0.0), liquid.get::<watt_per_square_meter_kelvin>());
        assert_eq!(htc(-0.1), liquid.get::<watt_per_square_meter_kelvin>());
        assert_eq!(htc(1.0), vapor.get::<watt_per_square_meter_kelvin>() * 0.6);
    }

    #[test]
    fn shah_branches() {
        // Convective boiling dominates at high quality.
        assert!(shah_factor(0.5, 0.05, 1e-4) > 1.0);
        // Nucleate boiling with a large boiling number.
        let nucleate = shah_factor(0.5, 5.0, 4e-4);
        assert!((nucleate - 230.0 * 4e-4_f64.sqrt()).abs() < 1e-12);
        // Stratified flow modifies the convection number.
        assert!(shah_factor(0.01, 0.5, 1e-4) < shah_factor(0.5, 0.5, 1e-4));
    }
}
