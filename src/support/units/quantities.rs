use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{TemperatureInterval, ThermodynamicTemperature},
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::degree_celsius,
    },
    typenum::{N1, N2, P1, Z0},
};

/// Mass flux, kg/m²·s in SI.
///
/// Produced by dividing a [`MassRate`](uom::si::f64::MassRate) by an
/// [`Area`](uom::si::f64::Area).
pub type MassFlux = Quantity<ISQ<N2, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Absolute temperature from a value in degrees Celsius.
#[must_use]
pub fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

/// Temperature interval from a value in kelvin.
#[must_use]
pub fn kelvin_interval(value: f64) -> TemperatureInterval {
    TemperatureInterval::new::<delta_kelvin>(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Area, MassRate},
        mass_rate::kilogram_per_second,
        thermodynamic_temperature::kelvin,
    };

    #[test]
    fn mass_flux_from_rate_and_area() {
        let flux: MassFlux =
            MassRate::new::<kilogram_per_second>(0.3) / Area::new::<square_meter>(0.002);
        assert_relative_eq!(flux.value, 150.0);
    }

    #[test]
    fn celsius_offsets_to_kelvin() {
        assert_relative_eq!(celsius(25.0).get::<kelvin>(), 298.15);
    }
}
