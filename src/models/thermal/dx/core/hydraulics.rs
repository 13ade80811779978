//! Tube-side and shell-side flow: velocities, Reynolds numbers, pressure drops.

use uom::si::{
    f64::{MassRate, Pressure, Velocity},
    pressure::pascal,
    velocity::meter_per_second,
};

use crate::support::{
    correlations::{darcy_friction, homogeneous_multiplier, kern_shell_friction},
    fluids::{PhaseProperties, RefrigerantState},
    geometry::BundleGeometry,
    units::MassFlux,
};

use super::{FlowType, VelocityStatus};

/// Velocity heads lost at each pass return.
const RETURN_LOSS_HEADS_PER_PASS: f64 = 4.0;

/// Flow conditions on both sides of the bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hydraulics {
    pub tube: TubeSide,
    pub shell: ShellSide,
}

/// Refrigerant flow inside the tubes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeSide {
    /// Regime the inlet velocity is rated against.
    pub flow_type: FlowType,
    pub mass_flux: MassFlux,
    /// Velocity at the inlet density.
    pub velocity: Velocity,
    pub velocity_status: VelocityStatus,
    /// Liquid-only Reynolds number.
    pub reynolds: f64,
    pub friction_factor: f64,
    /// Homogeneous two-phase multiplier at the mean quality of the latent zone.
    pub two_phase_multiplier: f64,
    pub pressure_drop: Pressure,
}

/// Secondary flow across the bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellSide {
    pub mass_flux: MassFlux,
    pub velocity: Velocity,
    pub velocity_status: VelocityStatus,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub pressure_drop: Pressure,
}

/// Shell-side flow from the secondary mass rate and its properties.
pub(super) fn shell_side(
    mass_rate: MassRate,
    geometry: &BundleGeometry,
    properties: &PhaseProperties,
) -> ShellSide {
    let flux: MassFlux = mass_rate / geometry.shell_flow_area;
    let mass_flux = flux.value;
    let density = properties.density.value;
    let d_e = geometry.equivalent_diameter.value;
    let velocity = Velocity::new::<meter_per_second>(mass_flux / density);

    let reynolds = mass_flux * d_e / properties.viscosity.value;
    let friction_factor = kern_shell_friction(reynolds);
    let pressure_drop = friction_factor
        * mass_flux.powi(2)
        * geometry.shell_diameter.value
        * f64::from(geometry.baffle_count + 1)
        / (2.0 * density * d_e);

    ShellSide {
        mass_flux: flux,
        velocity,
        velocity_status: FlowType::SecondaryShellSide.classify(velocity),
        reynolds,
        friction_factor,
        pressure_drop: Pressure::new::<pascal>(pressure_drop),
    }
}

/// Refrigerant quality at the tube inlet and across the latent zone.
#[derive(Debug, Clone, Copy)]
pub(super) struct TubeQualities {
    /// Sets the inlet density for the velocity; 1 for superheated vapor.
    pub inlet: f64,
    /// Sets the two-phase friction multiplier.
    pub mean: f64,
}

/// Tube-side flow from the refrigerant mass rate and saturation state.
pub(super) fn tube_side(
    mass_rate: MassRate,
    geometry: &BundleGeometry,
    state: &RefrigerantState,
    qualities: TubeQualities,
    flow_type: FlowType,
) -> TubeSide {
    let d_i = geometry.inner_diameter.value;
    let passes = f64::from(geometry.passes);
    let flux: MassFlux = mass_rate / geometry.tube_flow_area_per_pass;
    let mass_flux = flux.value;

    let rho_l = state.liquid.density.value;
    let rho_v = state.vapor.density.value;
    let inlet_density = homogeneous_density(qualities.inlet, rho_l, rho_v);
    let velocity = Velocity::new::<meter_per_second>(mass_flux / inlet_density);

    let reynolds = mass_flux * d_i / state.liquid.viscosity.value;
    let friction_factor = darcy_friction(reynolds, geometry.material.roughness() / d_i);
    let two_phase_multiplier = homogeneous_multiplier(qualities.mean, rho_l, rho_v);

    let velocity_head = mass_flux.powi(2) / (2.0 * rho_l);
    let length = geometry.tube_length.value;
    let pressure_drop =
        friction_factor * (length * passes / d_i) * velocity_head * two_phase_multiplier
            + RETURN_LOSS_HEADS_PER_PASS * passes * velocity_head;

    TubeSide {
        flow_type,
        mass_flux: flux,
        velocity,
        velocity_status: flow_type.classify(velocity),
        reynolds,
        friction_factor,
        two_phase_multiplier,
        pressure_drop: Pressure::new::<pascal>(pressure_drop),
    }
}

/// Homogeneous mixture density `1 / (x/ρ_v + (1 − x)/ρ_l)`.
fn homogeneous_density(quality: f64, liquid_density: f64, vapor_density: f64) -> f64 {
    let quality = quality.clamp(0.0, 1.0);
    1.0 / (quality / vapor_density + (1.0 - quality) / liquid_density)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        f64::Length,
        length::{meter, millimeter},
        mass_rate::kilogram_per_second,
        pressure::kilopascal,
    };

    use super::*;
    use crate::support::{
        fluids::{GlycolType, Refrigerant, secondary_fluid_properties},
        geometry::{BundleLayout, TubeLayout, TubeMaterial, TubeSize},
        units::celsius,
    };

    fn geometry() -> BundleGeometry {
        BundleGeometry::new(&BundleLayout {
            tube_size: TubeSize::ThreeEighths,
            material: TubeMaterial::Copper,
            wall_thickness: Length::new::<millimeter>(0.7),
            pitch: Length::new::<millimeter>(12.7),
            layout: TubeLayout::Triangular,
            tube_count: 60,
            tube_length: Length::new::<meter>(2.0),
            passes: 2,
            baffles: 4,
            baffle_cut: 0.25,
        })
    }

    #[test]
    fn homogeneous_density_limits() {
        assert_relative_eq!(homogeneous_density(1.0, 1100.0, 40.0), 40.0);
        assert_relative_eq!(homogeneous_density(0.0, 1100.0, 40.0), 1100.0);
        assert!(homogeneous_density(0.2, 1100.0, 40.0) < 1100.0);
    }

    #[test]
    fn tube_mass_flux_matches_pass_area() {
        let geometry = geometry();
        let state = Refrigerant::R134a.state_at(celsius(45.0));
        let tube = tube_side(
            MassRate::new::<kilogram_per_second>(0.221),
            &geometry,
            &state,
            TubeQualities { inlet: 1.0, mean: 0.5 },
            FlowType::RefrigerantVapor,
        );

        assert_relative_eq!(
            tube.mass_flux.value,
            0.221 / geometry.tube_flow_area_per_pass.value,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            tube.velocity.get::<meter_per_second>(),
            tube.mass_flux.value / state.vapor.density.value,
            max_relative = 1e-12
        );
        assert!(tube.two_phase_multiplier > 1.0);
        assert!(tube.pressure_drop.get::<kilopascal>() > 0.0);
    }

    #[test]
    fn shell_pressure_drop_grows_with_flow() {
        let geometry = geometry();
        let water = secondary_fluid_properties(celsius(25.0), 0.0, GlycolType::Ethylene);

        let low = shell_side(
            MassRate::new::<kilogram_per_second>(1.0),
            &geometry,
            &water.properties,
        );
        let high = shell_side(
            MassRate::new::<kilogram_per_second>(2.0),
            &geometry,
            &water.properties,
        );

        assert!(high.pressure_drop > low.pressure_drop);
        assert_relative_eq!(high.reynolds, 2.0 * low.reynolds, max_relative = 1e-12);
    }
}
