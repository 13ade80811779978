//! Log-mean temperature difference, with an arithmetic-mean fallback for
//! equal or non-positive terminal differences.

use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};

/// Log-mean of two terminal temperature differences.
///
/// Falls back to the arithmetic mean when the differences are equal or when
/// either is non-positive, where the logarithmic form is undefined.
#[must_use]
pub fn log_mean_temperature_difference(
    first: TemperatureInterval,
    second: TemperatureInterval,
) -> TemperatureInterval {
    let a = first.get::<kelvin>();
    let b = second.get::<kelvin>();

    let value = if a <= 0. || b <= 0. || (a - b).abs() < 1e-9 {
        0.5 * (a + b)
    } else {
        (a - b) / (a / b).ln()
    };
    TemperatureInterval::new::<kelvin>(value)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn lmtd(a: f64, b: f64) -> f64 {
        log_mean_temperature_difference(
            TemperatureInterval::new::<kelvin>(a),
            TemperatureInterval::new::<kelvin>(b),
        )
        .get::<kelvin>()
    }

    #[test]
    fn logarithmic_mean() {
        assert_relative_eq!(lmtd(20., 10.), 10. / 2.0_f64.ln());
        assert_relative_eq!(lmtd(10., 20.), 10. / 2.0_f64.ln());
    }

    #[test]
    fn arithmetic_fallback() {
        assert_relative_eq!(lmtd(8., 8.), 8.);
        assert_relative_eq!(lmtd(12., -2.), 5.);
        assert_relative_eq!(lmtd(0., 6.), 3.);
    }
}
