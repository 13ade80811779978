use thiserror::Error;

use crate::support::{fluids::FluidError, geometry::GeometryError};

/// Errors a design call can return.
///
/// Numerical trouble never surfaces here; it is absorbed by named fallbacks
/// and reported through the result's warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesignError {
    /// The refrigerant name is not in the property table.
    #[error("fluid configuration error")]
    Fluid(#[from] FluidError),

    /// The tube size or material is not in the geometry table.
    #[error("geometry configuration error")]
    Geometry(#[from] GeometryError),
}
