//! Sizing models for direct-expansion shell-and-tube exchangers.
//!
//! Refrigerant flows in the tubes and water or glycol on the shell side.
//! [`Condenser`] and [`Evaporator`] are thin [`Model`] adapters over the
//! internal `core` module, which does the zone-by-zone ε-NTU sizing.
//!
//! # Example
//!
//! ```
//! use dx_sizing::models::thermal::dx::{Condenser, CondenserInput};
//! use twine_core::Model;
//!
//! let result = Condenser::default().call(&CondenserInput::default()).unwrap();
//! assert_eq!(result.zones.len(), 3);
//! ```

pub(crate) mod core;

use twine_core::Model;

pub use self::core::{
    AllocationConfig, AllocationSource, AreaSplit, BundleSpec, CondenserInput, DesignConfig,
    DesignError, DesignRecord, DesignResult, DesignVerdict, EvaporatorInput, ExchangerKind,
    FALLBACK_SPLIT, FlowType, FreezeRisk, Hydraulics, ReportValue, SecondaryInlet, ShellSide,
    TubeSide, VelocityRange, VelocityStatus, Zone, ZoneKind, design_condenser, design_evaporator,
};

/// Sizes a DX condenser: desuperheat, condense and subcool zones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Condenser {
    config: DesignConfig,
}

impl Condenser {
    #[must_use]
    pub fn new(config: DesignConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DesignConfig {
        &self.config
    }
}

impl Model for Condenser {
    type Input = CondenserInput;
    type Output = DesignResult;
    type Error = DesignError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        design_condenser(input, &self.config)
    }
}

/// Sizes a DX evaporator: evaporate and superheat zones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaporator {
    config: DesignConfig,
}

impl Evaporator {
    #[must_use]
    pub fn new(config: DesignConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DesignConfig {
        &self.config
    }
}

impl Model for Evaporator {
    type Input = EvaporatorInput;
    type Output = DesignResult;
    type Error = DesignError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        design_evaporator(input, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapters_match_entry_points() {
        let config = DesignConfig::default();

        let condenser = Condenser::new(config)
            .call(&CondenserInput::default())
            .expect("default condenser should size");
        let direct = design_condenser(&CondenserInput::default(), &config)
            .expect("default condenser should size");
        assert_eq!(condenser.achieved_duty, direct.achieved_duty);
        assert_eq!(condenser.kind, ExchangerKind::Condenser);

        let evaporator = Evaporator::default()
            .call(&EvaporatorInput::default())
            .expect("default evaporator should size");
        assert_eq!(evaporator.kind, ExchangerKind::Evaporator);
        assert_eq!(evaporator.zones.len(), 2);
    }

    #[test]
    fn unknown_refrigerant_is_an_error() {
        let input = CondenserInput {
            refrigerant: "R999".into(),
            ..CondenserInput::default()
        };

        let error = Condenser::default().call(&input).unwrap_err();
        assert!(matches!(error, DesignError::Fluid(_)));
    }
}
