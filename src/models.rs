//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation and domain logic lives. The `core` module is an
//! implementation detail; only the types a caller needs are re-exported.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that delegates to
//! the model-specific core API. A single `core` may be exposed through multiple
//! adapters, as [`thermal::dx::Condenser`] and [`thermal::dx::Evaporator`] are.

pub mod thermal;
