//! Numeric invariants for quantities used in exchanger sizing.
//!
//! Typed quantities such as capacitance rates, NTU, and effectiveness carry
//! their invariants in the type: once constructed they are known to be
//! positive, non-negative, or inside the closed unit interval.
//!
//! # Provided constraints
//!
//! - [`StrictlyPositive`]: Greater than zero
//! - [`NonNegative`]: Zero or greater
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper.
//!
//! # Floors
//!
//! Correlations and property corrections never fail on off-nominal input.
//! Where a value must stay physical it is floored with [`floor_at`], which
//! keeps the policy named and individually testable.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use dx_sizing::support::constraint::{Constrained, StrictlyPositive};
///
/// let n = Constrained::<_, StrictlyPositive>::new(42.0).unwrap();
/// assert_eq!(n.into_inner(), 42.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Returns `value`, raised to `min` when it falls below it.
///
/// `NaN` is mapped to `min` so a degenerate input can never leak into a
/// downstream division.
#[must_use]
pub fn floor_at(value: f64, min: f64) -> f64 {
    if value.is_nan() { min } else { value.max(min) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_raises_small_values() {
        assert_eq!(floor_at(0.5, 1.0), 1.0);
        assert_eq!(floor_at(2.0, 1.0), 2.0);
        assert_eq!(floor_at(-3.0, 0.001), 0.001);
    }

    #[test]
    fn floor_replaces_nan() {
        assert_eq!(floor_at(f64::NAN, 0.1), 0.1);
    }
}
