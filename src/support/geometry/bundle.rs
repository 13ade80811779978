use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use uom::si::{
    area::square_meter,
    f64::{Area, Length, Mass},
    length::meter,
    mass::kilogram,
};

use super::{TubeMaterial, TubeSize};

/// Fraction of the shell diameter cut away by each baffle.
pub const DEFAULT_BAFFLE_CUT: f64 = 0.25;

/// Smallest shell-side flow area the geometry may report, m².
pub const MIN_SHELL_FLOW_AREA: f64 = 0.001;

/// Smallest shell diameter, m.
const MIN_SHELL_DIAMETER: f64 = 0.1;
/// Fraction of the shell-to-bundle gap that carries cross flow.
const CROSS_FLOW_FRACTION: f64 = 0.8;

/// Tube pitch pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TubeLayout {
    #[default]
    Triangular,
    Square,
}

impl TubeLayout {
    /// Packing factor applied to the pitch cell area.
    fn packing_factor(self) -> f64 {
        match self {
            TubeLayout::Triangular => 0.866,
            TubeLayout::Square => 1.0,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TubeLayout::Triangular => "triangular",
            TubeLayout::Square => "square",
        }
    }
}

/// Resolved bundle description, the input to [`BundleGeometry::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundleLayout {
    pub tube_size: TubeSize,
    pub material: TubeMaterial,
    pub wall_thickness: Length,
    pub pitch: Length,
    pub layout: TubeLayout,
    pub tube_count: u32,
    pub tube_length: Length,
    pub passes: u32,
    pub baffles: u32,
    /// Baffle cut as a fraction of the shell diameter.
    pub baffle_cut: f64,
}

/// Derived geometry of a tube bundle and its shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundleGeometry {
    pub tube_size: TubeSize,
    pub material: TubeMaterial,
    pub layout: TubeLayout,
    pub outer_diameter: Length,
    pub inner_diameter: Length,
    pub pitch: Length,
    pub tube_count: u32,
    pub tube_length: Length,
    pub passes: u32,
    pub baffle_count: u32,
    pub baffle_spacing: Length,
    pub baffle_cut: f64,
    pub bundle_diameter: Length,
    pub shell_diameter: Length,
    pub equivalent_diameter: Length,
    pub cross_flow_area: Area,
    pub window_flow_area: Area,
    /// `min(cross, window)`, never below [`MIN_SHELL_FLOW_AREA`].
    pub shell_flow_area: Area,
    pub tube_flow_area_per_pass: Area,
    /// Installed area on the outer tube surface.
    pub outer_area: Area,
    pub tube_mass: Mass,
    pub tube_cost: f64,
}

impl BundleGeometry {
    #[must_use]
    pub fn new(spec: &BundleLayout) -> Self {
        let tube_count = spec.tube_count.max(1);
        let passes = spec.passes.max(1);
        let n = f64::from(tube_count);

        let d_o = spec.tube_size.outer_diameter().get::<meter>();
        let d_i = spec.tube_size.inner_diameter(spec.wall_thickness).get::<meter>();
        let pitch = spec.pitch.get::<meter>();
        let length = spec.tube_length.get::<meter>();

        let bundle_diameter =
            (4.0 * n * pitch.powi(2) / (PI * spec.layout.packing_factor())).sqrt();
        let shell_diameter = (bundle_diameter + clearance(bundle_diameter)).max(MIN_SHELL_DIAMETER);
        let equivalent_diameter = equivalent_diameter(spec.layout, pitch, d_o);
        let baffle_spacing = length / f64::from(spec.baffles + 1);

        let cross_flow_area =
            (shell_diameter - bundle_diameter) * baffle_spacing * CROSS_FLOW_FRACTION;
        let window_flow_area = window_segment_area(shell_diameter, spec.baffle_cut)
            - spec.baffle_cut * n * PI * d_o.powi(2) / 4.0;
        let shell_flow_area = cross_flow_area
            .min(window_flow_area)
            .max(MIN_SHELL_FLOW_AREA);

        let tube_mass =
            n * length * PI * (d_o.powi(2) - d_i.powi(2)) / 4.0 * spec.material.density();

        Self {
            tube_size: spec.tube_size,
            material: spec.material,
            layout: spec.layout,
            outer_diameter: Length::new::<meter>(d_o),
            inner_diameter: Length::new::<meter>(d_i),
            pitch: spec.pitch,
            tube_count,
            tube_length: spec.tube_length,
            passes,
            baffle_count: spec.baffles,
            baffle_spacing: Length::new::<meter>(baffle_spacing),
            baffle_cut: spec.baffle_cut,
            bundle_diameter: Length::new::<meter>(bundle_diameter),
            shell_diameter: Length::new::<meter>(shell_diameter),
            equivalent_diameter: Length::new::<meter>(equivalent_diameter),
            cross_flow_area: Area::new::<square_meter>(cross_flow_area),
            window_flow_area: Area::new::<square_meter>(window_flow_area),
            shell_flow_area: Area::new::<square_meter>(shell_flow_area),
            tube_flow_area_per_pass: Area::new::<square_meter>(
                n / f64::from(passes) * PI * d_i.powi(2) / 4.0,
            ),
            outer_area: Area::new::<square_meter>(n * PI * d_o * length),
            tube_mass: Mass::new::<kilogram>(tube_mass),
            tube_cost: tube_mass * spec.material.cost_per_kg(),
        }
    }

    /// Conduction resistance of the tube wall on the outer-area basis, m²·K/W.
    #[must_use]
    pub fn wall_resistance(&self) -> f64 {
        let d_o = self.outer_diameter.value;
        let d_i = self.inner_diameter.value;
        d_o * (d_o / d_i).ln() / (2.0 * self.material.conductivity())
    }

    /// Ratio of tube pitch to outer diameter.
    #[must_use]
    pub fn pitch_ratio(&self) -> f64 {
        self.pitch.value / self.outer_diameter.value
    }

    /// Ratio of outer to inner tube diameter.
    #[must_use]
    pub fn diameter_ratio(&self) -> f64 {
        self.outer_diameter.value / self.inner_diameter.value
    }
}

/// Shell-to-bundle clearance for a bundle diameter, both in m.
fn clearance(bundle_diameter: f64) -> f64 {
    if bundle_diameter < 0.3 {
        0.010
    } else if bundle_diameter < 0.6 {
        0.015
    } else {
        0.020
    }
}

/// Kern equivalent diameter, m.
fn equivalent_diameter(layout: TubeLayout, pitch: f64, d_o: f64) -> f64 {
    match layout {
        TubeLayout::Square => 4.0 * (pitch.powi(2) - PI * d_o.powi(2) / 4.0) / (PI * d_o),
        TubeLayout::Triangular => {
            4.0 * (0.433 * pitch.powi(2) - PI * d_o.powi(2) / 8.0) / (PI * d_o / 2.0)
        }
    }
}

/// Area of the circular segment below a baffle cut, m².
fn window_segment_area(shell_diameter: f64, cut: f64) -> f64 {
    let theta = 2.0 * (1.0 - 2.0 * cut.clamp(0.0, 1.0)).acos();
    shell_diameter.powi(2) / 8.0 * (theta - theta.sin())
}
