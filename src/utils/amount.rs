//! Tip amount parsing and SOL → lamport conversion.
//!
//! Amounts arrive as decimal strings in the `amount` query parameter. They are
//! parsed as exact decimals (no binary float drift), scaled by
//! `LAMPORTS_PER_SOL` and rounded half away from zero.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Token left in custom-amount hrefs for the client to substitute.
pub const AMOUNT_PLACEHOLDER: &str = "{amount}";

/// How strictly the `amount` parameter is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AmountPolicy {
    /// Only amounts worth at least one lamport are accepted.
    #[default]
    Strict,
    /// Zero (and dust that rounds to zero lamports) is accepted.
    Lenient,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount parameter is required")]
    Missing,

    #[error("Amount parameter is required: the {{amount}} placeholder was not replaced")]
    Placeholder,

    #[error("Invalid amount: {0:?} is not a number")]
    NotANumber(String),

    #[error("Invalid amount: must not be negative")]
    Negative,

    #[error("Invalid amount: must be greater than zero")]
    NotPositive,

    #[error("Invalid amount: smaller than one lamport")]
    BelowOneLamport,

    #[error("Invalid amount: too large")]
    TooLarge,
}

/// A validated tip: the SOL amount as requested and its lamport value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TipAmount {
    sol: Decimal,
    lamports: u64,
}

impl TipAmount {
    pub fn sol(&self) -> Decimal {
        self.sol
    }

    pub fn lamports(&self) -> u64 {
        self.lamports
    }
}

impl fmt::Display for TipAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sol.normalize())
    }
}

/// Parse a decimal SOL string. Plain (`0.01`) and scientific (`1e-2`)
/// notations are accepted; surrounding whitespace is ignored.
pub fn parse_sol(raw: &str) -> Result<Decimal, AmountError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountError::NotANumber(raw.to_string()))
}

/// Convert SOL → lamports, rounding half away from zero.
///
/// Returns `None` for negative amounts or when the result does not fit `u64`.
pub fn sol_to_lamports(sol: Decimal) -> Option<u64> {
    sol.checked_mul(Decimal::from(LAMPORTS_PER_SOL))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

/// Validate the raw `amount` query value under `policy`.
pub fn parse_amount(raw: Option<&str>, policy: AmountPolicy) -> Result<TipAmount, AmountError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Err(AmountError::Missing),
        Some(AMOUNT_PLACEHOLDER) => return Err(AmountError::Placeholder),
        Some(raw) => raw,
    };

    let sol = parse_sol(raw)?;
    if sol.is_sign_negative() && !sol.is_zero() {
        return Err(AmountError::Negative);
    }
    if sol.is_zero() && policy == AmountPolicy::Strict {
        return Err(AmountError::NotPositive);
    }

    let lamports = sol_to_lamports(sol).ok_or(AmountError::TooLarge)?;
    if lamports == 0 && policy == AmountPolicy::Strict {
        return Err(AmountError::BelowOneLamport);
    }

    Ok(TipAmount {
        sol: sol.abs(),
        lamports,
    })
}
