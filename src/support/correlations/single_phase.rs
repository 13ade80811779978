use std::f64::consts::PI;

use uom::si::{
    f64::{HeatTransfer, Length, MassRate},
    heat_transfer::watt_per_square_meter_kelvin,
};

use crate::support::fluids::PhaseProperties;

/// Fully developed laminar Nusselt number for constant wall heat flux.
pub const LAMINAR_NUSSELT: f64 = 4.36;

/// Coefficient returned when the flow is degenerate, W/m²·K.
pub const DEGENERATE_HTC: f64 = 100.0;

const LAMINAR_LIMIT: f64 = 2300.0;
const TURBULENT_ONSET: f64 = 3000.0;

/// Gnielinski Nusselt number for flow inside a tube.
///
/// Laminar below `Re = 2300`, blended linearly up to the turbulent value at
/// `Re = 3000`, Gnielinski above. Never below [`LAMINAR_NUSSELT`].
#[must_use]
pub fn gnielinski_nusselt(reynolds: f64, prandtl: f64) -> f64 {
    if reynolds < LAMINAR_LIMIT {
        LAMINAR_NUSSELT
    } else if reynolds < TURBULENT_ONSET {
        let blend = (reynolds - LAMINAR_LIMIT) / (TURBULENT_ONSET - LAMINAR_LIMIT);
        LAMINAR_NUSSELT + blend * (turbulent_nusselt(TURBULENT_ONSET, prandtl) - LAMINAR_NUSSELT)
    } else {
        turbulent_nusselt(reynolds, prandtl)
    }
}

fn turbulent_nusselt(reynolds: f64, prandtl: f64) -> f64 {
    let f = (0.79 * reynolds.ln() - 1.64).powi(-2);
    let f8 = f / 8.0;
    let nu = f8 * (reynolds - 1000.0) * prandtl
        / (1.0 + 12.7 * f8.sqrt() * (prandtl.powf(2.0 / 3.0) - 1.0));
    nu.max(LAMINAR_NUSSELT)
}

/// Single-phase tube-side coefficient.
///
/// `mass_rate_per_tube` is the total flow divided by the tube count; the flow
/// through one tube of a pass is that times `passes`.
#[must_use]
pub fn single_phase_htc(
    mass_rate_per_tube: MassRate,
    diameter: Length,
    properties: &PhaseProperties,
    passes: u32,
) -> HeatTransfer {
    let d = diameter.value;
    let mass_flux = tube_mass_flux(mass_rate_per_tube, diameter, passes);
    let reynolds = mass_flux * d / properties.viscosity.value;
    let prandtl = properties.prandtl;

    let htc = if reynolds > 0.0 && prandtl > 0.0 && reynolds.is_finite() && prandtl.is_finite() {
        gnielinski_nusselt(reynolds, prandtl) * properties.conductivity.value / d
    } else {
        DEGENERATE_HTC
    };
    HeatTransfer::new::<watt_per_square_meter_kelvin>(htc)
}

/// Mass flux through one tube, kg/m²·s.
pub(super) fn tube_mass_flux(
    mass_rate_per_tube: MassRate,
    diameter: Length,
    passes: u32,
) -> f64 {
    let area = PI * diameter.value.powi(2) / 4.0;
    mass_rate_per_tube.value * f64::from(passes) / area
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        dynamic_viscosity::pascal_second,
        f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity},
        length::millimeter,
        mass_density::kilogram_per_cubic_meter,
        mass_rate::kilogram_per_second,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermal_conductivity::watt_per_meter_kelvin,
    };

    use super::*;

    fn water() -> PhaseProperties {
        PhaseProperties::new(
            MassDensity::new::<kilogram_per_cubic_meter>(998.2),
            DynamicViscosity::new::<pascal_second>(1.002e-3),
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.598),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4182.),
        )
    }

    #[test]
    fn laminar_floor_ignores_prandtl() {
        for re in [0.0, 10.0, 500.0, 2299.9] {
            for pr in [0.7, 3.0, 50.0] {
                assert_eq!(gnielinski_nusselt(re, pr), LAMINAR_NUSSELT);
            }
        }
    }

    #[test]
    fn blend_is_continuous_at_both_ends() {
        for pr in [0.8, 2.5, 7.0] {
            assert_relative_eq!(gnielinski_nusselt(2300.0, pr), LAMINAR_NUSSELT);
            assert_relative_eq!(gnielinski_nusselt(3000.0, pr), turbulent_nusselt(3000.0, pr));
            assert_relative_eq!(
                gnielinski_nusselt(3000.0 - 1e-9, pr),
                turbulent_nusselt(3000.0, pr),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn turbulent_water_in_tube() {
        let nu = gnielinski_nusselt(1e4, 7.0);
        assert_relative_eq!(nu, 79.5, max_relative = 0.01);
    }

    #[test]
    fn htc_from_flow() {
        let htc = single_phase_htc(
            MassRate::new::<kilogram_per_second>(0.05),
            Length::new::<millimeter>(10.0),
            &water(),
            1,
        );
        let mass_flux = 0.05 / (PI * 0.01_f64.powi(2) / 4.0);
        let re = mass_flux * 0.01 / 1.002e-3;
        let expected = gnielinski_nusselt(re, water().prandtl) * 0.598 / 0.01;

        assert_relative_eq!(
            htc.get::<watt_per_square_meter_kelvin>(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn mass_flux_scales_with_passes() {
        let mass_rate = MassRate::new::<kilogram_per_second>(0.05);
        let diameter = Length::new::<millimeter>(10.0);

        let single = tube_mass_flux(mass_rate, diameter, 1);
        assert_relative_eq!(single, 0.05 / (PI * 0.01_f64.powi(2) / 4.0), max_relative = 1e-12);
        assert_relative_eq!(tube_mass_flux(mass_rate, diameter, 4), 4.0 * single);
    }

    #[test]
    fn degenerate_flow_returns_fallback() {
        let htc = single_phase_htc(
            MassRate::new::<kilogram_per_second>(0.0),
            Length::new::<millimeter>(10.0),
            &water(),
            2,
        );
        assert_eq!(htc.get::<watt_per_square_meter_kelvin>(), DEGENERATE_HTC);
    }
}
