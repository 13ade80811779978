//! Zone-by-zone sizing of DX condensers and evaporators.
//!
//! The entry points are [`design_condenser`] and [`design_evaporator`]. Each
//! resolves fluid properties and bundle geometry, divides the installed area
//! between refrigerant zones, marches the secondary fluid through those zones
//! with the ε-NTU method, and then rates hydraulics and adequacy.

mod classify;
mod config;
mod design;
mod error;
mod hydraulics;
mod input;
mod record;
mod regions;
mod results;
mod warnings;

pub use classify::{DesignVerdict, FlowType, FreezeRisk, VelocityRange, VelocityStatus};
pub use config::{AllocationConfig, DesignConfig};
pub use design::{design_condenser, design_evaporator};
pub use error::DesignError;
pub use hydraulics::{Hydraulics, ShellSide, TubeSide};
pub use input::{BundleSpec, CondenserInput, EvaporatorInput, SecondaryInlet};
pub use record::{DesignRecord, ReportValue};
pub use regions::{AllocationSource, AreaSplit, FALLBACK_SPLIT};
pub use results::{DesignResult, ExchangerKind, Zone, ZoneKind};
