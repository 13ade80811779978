use std::fmt;

use serde::Serialize;
use uom::si::{
    f64::{HeatTransfer, Length, MassRate},
    heat_transfer::watt_per_square_meter_kelvin,
};

use crate::support::{constraint::floor_at, fluids::RefrigerantState};

use super::{
    GRAVITY,
    single_phase::{gnielinski_nusselt, single_phase_htc, tube_mass_flux},
};

/// Lower bound of the condensation coefficient, W/m²·K.
pub const MIN_CONDENSATION_HTC: f64 = 800.0;
/// Upper bound of the condensation coefficient, W/m²·K.
pub const MAX_CONDENSATION_HTC: f64 = 8000.0;

/// Wall-to-saturation temperature difference assumed in the Jakob number, K.
const NOMINAL_WALL_SUPERCOOLING: f64 = 5.0;
const HIGH_QUALITY: f64 = 0.7;
const HIGH_QUALITY_REYNOLDS: f64 = 20_000.0;

/// Flow regime selected by the condensation correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CondensationRegime {
    Annular,
    StratifiedWavy,
    /// Quality outside (0, 1); a single-phase coefficient was used.
    SinglePhase,
}

impl fmt::Display for CondensationRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CondensationRegime::Annular => "annular",
            CondensationRegime::StratifiedWavy => "stratified-wavy",
            CondensationRegime::SinglePhase => "single-phase",
        })
    }
}

/// Condensation coefficient together with the regime that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondensationHtc {
    pub htc: HeatTransfer,
    pub regime: CondensationRegime,
}

/// In-tube condensation coefficient after Dobson and Chato.
///
/// The regime is annular when `x > 0.5` with `Fr_so > 1`, or whenever
/// `Fr_so > 7`; otherwise it is stratified-wavy. The result is clamped to
/// [`MIN_CONDENSATION_HTC`]..=[`MAX_CONDENSATION_HTC`].
#[must_use]
pub fn condensation_htc(
    mass_rate_per_tube: MassRate,
    quality: f64,
    diameter: Length,
    state: &RefrigerantState,
    passes: u32,
) -> CondensationHtc {
    if quality <= 0.0 || quality >= 1.0 {
        let phase = if quality <= 0.0 {
            &state.liquid
        } else {
            &state.vapor
        };
        let htc = single_phase_htc(mass_rate_per_tube, diameter, phase, passes);
        return CondensationHtc {
            htc: clamp(htc.get::<watt_per_square_meter_kelvin>()),
            regime: CondensationRegime::SinglePhase,
        };
    }

    let x = quality;
    let d = diameter.value;
    let g = tube_mass_flux(mass_rate_per_tube, diameter, passes);
    let liquid = &state.liquid;
    let vapor = &state.vapor;
    let rho_l = liquid.density.value;
    let rho_v = vapor.density.value;
    let mu_l = liquid.viscosity.value;
    let mu_v = vapor.viscosity.value;
    let k_l = liquid.conductivity.value;

    let x_tt = ((1.0 - x) / x).powf(0.9) * (rho_v / rho_l).sqrt() * (mu_l / mu_v).powf(0.1);
    let reynolds_l = g * (1.0 - x) * d / mu_l;
    let reynolds_v = g * x * d / mu_v;
    let reynolds_vo = g * d / mu_v;
    let galileo = GRAVITY * rho_l * (rho_l - rho_v) * d.powi(3) / mu_l.powi(2);
    let froude_so = soliman_froude(reynolds_l, x_tt, galileo);

    let annular = (x > 0.5 && froude_so > 1.0) || froude_so > 7.0;
    let (htc, regime) = if annular {
        let nu_l = gnielinski_nusselt(reynolds_l, liquid.prandtl);
        let mut htc = nu_l * k_l / d * (1.0 + 2.22 / x_tt.powf(0.89));
        if x > HIGH_QUALITY {
            htc *= 1.0 + (x - HIGH_QUALITY) * (reynolds_v / HIGH_QUALITY_REYNOLDS).min(1.0);
        }
        (htc, CondensationRegime::Annular)
    } else {
        let jakob = liquid.specific_heat.value * NOMINAL_WALL_SUPERCOOLING
            / floor_at(state.latent_heat.value, 1.0);
        let film = 0.23 * reynolds_vo.powf(0.12) / (1.0 + 1.11 * x_tt.powf(0.58))
            * (galileo * liquid.prandtl / jakob).powf(0.25);

        let forced = if froude_so > 0.1 {
            let froude_l = g.powi(2) / (rho_l.powi(2) * GRAVITY * d);
            let (c1, c2) = if froude_l <= 0.7 {
                (
                    4.172 + 5.48 * froude_l - 1.564 * froude_l.powi(2),
                    1.773 - 0.169 * froude_l,
                )
            } else {
                (7.242, 1.655)
            };
            (1.0 - x)
                * 0.0195
                * reynolds_l.powf(0.8)
                * liquid.prandtl.powf(0.4)
                * (1.376 + c1 / x_tt.powf(c2)).sqrt()
        } else {
            0.0
        };
        ((film + forced) * k_l / d, CondensationRegime::StratifiedWavy)
    };

    CondensationHtc {
        htc: clamp(htc),
        regime,
    }
}

/// Soliman's modified Froude number.
fn soliman_froude(reynolds_l: f64, x_tt: f64, galileo: f64) -> f64 {
    let factor = ((1.0 + 1.09 * x_tt.powf(0.039)) / x_tt).powf(1.5) / galileo.sqrt();
    if reynolds_l <= 1250.0 {
        0.025 * reynolds_l.powf(1.59) * factor
    } else {
        1.26 * reynolds_l.powf(1.04) * factor
    }
}

fn clamp(htc: f64) -> HeatTransfer {
    let htc = if htc.is_finite() {
        htc.clamp(MIN_CONDENSATION_HTC, MAX_CONDENSATION_HTC)
    } else {
        MIN_CONDENSATION_HTC
    };
    HeatTransfer::new::<watt_per_square_meter_kelvin>(htc)
}

#[cfg(test)]
mod tests {
    use uom::si::{length::millimeter, mass_rate::kilogram_per_second};

    use super::*;
    use crate::support::{fluids::Refrigerant, units::celsius};

    fn evaluate(mass_rate: f64, quality: f64) -> CondensationHtc {
        let state = Refrigerant::R134a.state_at(celsius(45.0));
        condensation_htc(
            MassRate::new::<kilogram_per_second>(mass_rate),
            quality,
            Length::new::<millimeter>(8.0),
            &state,
            2,
        )
    }

    #[test]
    fn results_stay_in_band() {
        for mass_rate in [0.0005, 0.002, 0.008, 0.02] {
            for quality in [0.1, 0.3, 0.5, 0.7, 0.9] {
                let value = evaluate(mass_rate, quality)
                    .htc
                    .get::<watt_per_square_meter_kelvin>();
                assert!((MIN_CONDENSATION_HTC..=MAX_CONDENSATION_HTC).contains(&value));
            }
        }
    }

    #[test]
    fn high_mass_flux_is_annular() {
        // G ≈ 800 kg/m²·s in an 8 mm tube.
        let result = evaluate(0.02, 0.7);
        assert_eq!(result.regime, CondensationRegime::Annular);
    }

    #[test]
    fn low_mass_flux_is_stratified() {
        // G ≈ 20 kg/m²·s.
        let result = evaluate(0.0005, 0.3);
        assert_eq!(result.regime, CondensationRegime::StratifiedWavy);
    }

    #[test]
    fn quality_outside_two_phase() {
        assert_eq!(evaluate(0.004, 0.0).regime, CondensationRegime::SinglePhase);
        assert_eq!(evaluate(0.004, 1.0).regime, CondensationRegime::SinglePhase);
    }
}
