//! Tube and bundle geometry of a shell-and-tube exchanger.
//!
//! [`BundleGeometry::new`] derives everything the thermal and hydraulic
//! calculations need from a [`BundleLayout`]: tube diameters, shell and bundle
//! diameters, the Kern equivalent diameter, shell-side and tube-side flow
//! areas, and the installed heat-transfer area.

mod bundle;
mod tube;

use thiserror::Error;

pub use bundle::{BundleGeometry, BundleLayout, DEFAULT_BAFFLE_CUT, MIN_SHELL_FLOW_AREA, TubeLayout};
pub use tube::{MIN_INNER_DIAMETER_RATIO, TubeMaterial, TubeSize};

/// Errors raised for names that are not in a geometry table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("unknown tube size: {name}")]
    UnknownTubeSize { name: String },
    #[error("unknown tube material: {name}")]
    UnknownTubeMaterial { name: String },
}
