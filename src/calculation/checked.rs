//! Overflow-checked `Decimal` arithmetic.
//!
//! Rates, quantities and dimensions come from callers, so any product or sum
//! can exceed `Decimal::MAX`. Each helper names the amount it produces so
//! the resulting `CalculationError` says which stage failed.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

pub(crate) fn mul(lhs: Decimal, rhs: Decimal, amount: &str) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| EngineError::overflow(amount))
}

pub(crate) fn add(lhs: Decimal, rhs: Decimal, amount: &str) -> EngineResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| EngineError::overflow(amount))
}

pub(crate) fn sub(lhs: Decimal, rhs: Decimal, amount: &str) -> EngineResult<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| EngineError::overflow(amount))
}

pub(crate) fn div(lhs: Decimal, rhs: Decimal, amount: &str) -> EngineResult<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| EngineError::overflow(amount))
}

/// `amount × (percentage / 100)`
pub(crate) fn percent_of(
    amount: Decimal,
    percentage: Decimal,
    what: &str,
) -> EngineResult<Decimal> {
    mul(amount, div(percentage, Decimal::ONE_HUNDRED, what)?, what)
}

/// `amount × (1 + percentage / 100)`
pub(crate) fn marked_up(
    amount: Decimal,
    percentage: Decimal,
    what: &str,
) -> EngineResult<Decimal> {
    let factor = add(Decimal::ONE, div(percentage, Decimal::ONE_HUNDRED, what)?, what)?;
    mul(amount, factor, what)
}
