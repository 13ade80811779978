use uom::si::{
    f64::{HeatTransfer, Length, ThermalConductivity},
    heat_transfer::watt_per_square_meter_kelvin,
};

use crate::support::geometry::TubeLayout;

use super::single_phase::DEGENERATE_HTC;

const PRANDTL_EXPONENT: f64 = 0.36;

/// Shell-side coefficient from a banded `Nu = C·Re^m·Pr^0.36` fit.
///
/// `reynolds` is based on the equivalent diameter and the shell-side mass
/// flux. The coefficients depend on the Reynolds band (`< 100`, `100..1000`,
/// `>= 1000`) and on the tube layout.
#[must_use]
pub fn shell_side_htc(
    reynolds: f64,
    prandtl: f64,
    equivalent_diameter: Length,
    conductivity: ThermalConductivity,
    layout: TubeLayout,
) -> HeatTransfer {
    let d_e = equivalent_diameter.value;
    if !(reynolds > 0.0 && prandtl > 0.0 && d_e > 0.0 && reynolds.is_finite()) {
        return HeatTransfer::new::<watt_per_square_meter_kelvin>(DEGENERATE_HTC);
    }

    let (c, m) = coefficients(reynolds, layout);
    let nusselt = c * reynolds.powf(m) * prandtl.powf(PRANDTL_EXPONENT);
    HeatTransfer::new::<watt_per_square_meter_kelvin>(nusselt * conductivity.value / d_e)
}

fn coefficients(reynolds: f64, layout: TubeLayout) -> (f64, f64) {
    match (layout, reynolds) {
        (TubeLayout::Triangular, re) if re < 100.0 => (1.04, 0.4),
        (TubeLayout::Square, re) if re < 100.0 => (0.9, 0.4),
        (TubeLayout::Triangular, re) if re < 1000.0 => (0.71, 0.5),
        (TubeLayout::Square, re) if re < 1000.0 => (0.52, 0.5),
        (TubeLayout::Triangular, _) => (0.35, 0.6),
        (TubeLayout::Square, _) => (0.27, 0.63),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{length::millimeter, thermal_conductivity::watt_per_meter_kelvin};

    use super::*;

    fn htc(reynolds: f64, layout: TubeLayout) -> f64 {
        shell_side_htc(
            reynolds,
            7.0,
            Length::new::<millimeter>(10.0),
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.6),
            layout,
        )
        .get::<watt_per_square_meter_kelvin>()
    }

    #[test]
    fn banded_power_laws() {
        let pr = 7.0_f64.powf(0.36);
        assert_relative_eq!(
            htc(50.0, TubeLayout::Triangular),
            1.04 * 50.0_f64.powf(0.4) * pr * 60.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            htc(500.0, TubeLayout::Square),
            0.52 * 500.0_f64.powf(0.5) * pr * 60.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            htc(5000.0, TubeLayout::Square),
            0.27 * 5000.0_f64.powf(0.63) * pr * 60.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn triangular_beats_square_when_turbulent() {
        assert!(htc(20_000.0, TubeLayout::Triangular) > htc(20_000.0, TubeLayout::Square));
    }

    #[test]
    fn no_flow_falls_back() {
        assert_eq!(htc(0.0, TubeLayout::Square), DEGENERATE_HTC);
    }
}
