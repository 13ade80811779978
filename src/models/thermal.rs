//! Thermal systems models.
//!
//! This module contains sizing models for refrigerant heat exchangers.

pub mod dx;
