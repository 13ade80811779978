use uom::si::f64::{Power, ThermodynamicTemperature};

use super::CapacitanceRate;

/// Inlet state for a stream entering an exchanger zone.
///
/// Assumes the fluid's specific heat remains constant through the zone.
#[derive(Debug, Clone, Copy)]
pub struct StreamInlet {
    pub(crate) capacitance_rate: CapacitanceRate,
    pub(crate) temperature: ThermodynamicTemperature,
}

impl StreamInlet {
    /// Capture the inlet capacitance rate and temperature.
    #[must_use]
    pub fn new(capacitance_rate: CapacitanceRate, temperature: ThermodynamicTemperature) -> Self {
        Self {
            capacitance_rate,
            temperature,
        }
    }

    /// Resolve the stream for a known heat rate.
    ///
    /// A positive `heat_rate` flows into the stream and warms it.
    #[must_use]
    pub fn with_heat_rate(self, heat_rate: Power) -> Stream {
        Stream::new_from_heat_rate(self.capacitance_rate, self.temperature, heat_rate)
    }
}

/// A fully-resolved exchanger stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stream {
    /// Effective capacitance rate for the stream.
    pub capacitance_rate: CapacitanceRate,
    /// Temperature at the zone inlet.
    pub inlet_temperature: ThermodynamicTemperature,
    /// Temperature after the stream leaves the zone.
    ///
    /// For a phase-change stream this matches the inlet temperature.
    pub outlet_temperature: ThermodynamicTemperature,
    /// Heat rate into the stream; negative when the stream is cooled.
    pub heat_rate: Power,
}

impl Stream {
    /// Construct a stream from a known heat rate using `Q = C * (T_out - T_in)`.
    #[must_use]
    pub fn new_from_heat_rate(
        capacitance_rate: CapacitanceRate,
        inlet_temperature: ThermodynamicTemperature,
        heat_rate: Power,
    ) -> Self {
        Self {
            capacitance_rate,
            inlet_temperature,
            outlet_temperature: inlet_temperature + heat_rate / *capacitance_rate,
            heat_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::support::constraint::ConstraintResult;
    use approx::assert_relative_eq;
    use uom::si::{
        power::watt, thermal_conductance::watt_per_kelvin, thermodynamic_temperature::kelvin,
    };

    use super::*;

    #[test]
    fn heat_rate_sets_outlet_temperature() -> ConstraintResult<()> {
        let inlet = StreamInlet::new(
            CapacitanceRate::new::<watt_per_kelvin>(10.)?,
            ThermodynamicTemperature::new::<kelvin>(300.),
        );

        let warmed = inlet.with_heat_rate(Power::new::<watt>(20.));
        let cooled = inlet.with_heat_rate(Power::new::<watt>(-20.));

        assert_relative_eq!(warmed.outlet_temperature.get::<kelvin>(), 302.);
        assert_relative_eq!(cooled.outlet_temperature.get::<kelvin>(), 298.);
        Ok(())
    }

    #[test]
    fn phase_change_stream_keeps_its_temperature() {
        let inlet = StreamInlet::new(
            CapacitanceRate::phase_change(),
            ThermodynamicTemperature::new::<kelvin>(318.15),
        );

        let stream = inlet.with_heat_rate(Power::new::<watt>(-35_000.));

        assert_relative_eq!(stream.outlet_temperature.get::<kelvin>(), 318.15);
    }
}
