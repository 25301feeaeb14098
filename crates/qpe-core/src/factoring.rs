//! Integer factoring demo.
//!
//! Stands in for the period-finding step of Shor's algorithm with plain trial
//! division up to `√N`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Outcome of factoring a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Factorization {
    /// The input has no divisor other than 1 and itself.
    Prime(u64),
    /// Smallest prime factor and its cofactor.
    Composite(u64, u64),
}

impl Factorization {
    /// Factors as a list: `[N]` for a prime, `[p, N / p]` otherwise.
    pub fn factors(&self) -> Vec<u64> {
        match *self {
            Factorization::Prime(n) => vec![n],
            Factorization::Composite(p, q) => vec![p, q],
        }
    }

    /// Whether the input was prime.
    pub fn is_prime(&self) -> bool {
        matches!(self, Factorization::Prime(_))
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factorization::Prime(n) => write!(f, "{n} (prime)"),
            Factorization::Composite(p, q) => write!(f, "{p} × {q}"),
        }
    }
}

/// Smallest divisor of `n` greater than one, or `n` itself when prime.
pub fn smallest_factor(n: u64) -> u64 {
    if n % 2 == 0 {
        return 2;
    }
    let mut i = 3u64;
    while i.checked_mul(i).is_some_and(|sq| sq <= n) {
        if n % i == 0 {
            return i;
        }
        i += 2;
    }
    n
}

/// Factor a positive integer greater than one.
pub fn factor_integer(n: u64) -> CoreResult<Factorization> {
    if n <= 1 {
        return Err(CoreError::InvalidFactorInput);
    }
    let p = smallest_factor(n);
    if p == n {
        Ok(Factorization::Prime(n))
    } else {
        Ok(Factorization::Composite(p, n / p))
    }
}

/// Largest float below which every integer is exactly representable, `2^53`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Factor a numeric input, rejecting non-integers and values ≤ 1.
///
/// Values above `2^53` are rejected: they cannot be told apart from their
/// neighbours, so the number factored might not be the number entered.
pub fn factor(input: f64) -> CoreResult<Factorization> {
    if !input.is_finite() || input.fract() != 0.0 || input <= 1.0 || input > MAX_EXACT_INTEGER {
        return Err(CoreError::InvalidFactorInput);
    }
    factor_integer(input as u64)
}

/// Factor user-entered text.
///
/// Integers (including a zero fraction such as `15.0`) are parsed exactly;
/// anything else goes through [`factor`].
pub fn factor_str(input: &str) -> CoreResult<Factorization> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return factor_integer(n);
    }
    if let Some((whole, fraction)) = trimmed.split_once('.') {
        if !whole.is_empty() && fraction.bytes().all(|b| b == b'0') {
            if let Ok(n) = whole.parse::<u64>() {
                return factor_integer(n);
            }
        }
    }
    let value: f64 = trimmed.parse().map_err(|_| CoreError::InvalidFactorInput)?;
    factor(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_composite() {
        assert_eq!(factor(15.0).unwrap().factors(), vec![3, 5]);
        assert_eq!(factor(21.0).unwrap().factors(), vec![3, 7]);
        assert_eq!(factor(4.0).unwrap(), Factorization::Composite(2, 2));
    }

    #[test]
    fn test_factor_prime() {
        let result = factor(17.0).unwrap();
        assert!(result.is_prime());
        assert_eq!(result.factors(), vec![17]);
        assert_eq!(factor(2.0).unwrap().factors(), vec![2]);
    }

    #[test]
    fn test_factor_square_of_prime() {
        assert_eq!(factor_integer(49).unwrap(), Factorization::Composite(7, 7));
    }

    #[test]
    fn test_factor_rejects_invalid() {
        assert_eq!(factor(1.0), Err(CoreError::InvalidFactorInput));
        assert_eq!(factor(2.5), Err(CoreError::InvalidFactorInput));
        assert_eq!(factor(-9.0), Err(CoreError::InvalidFactorInput));
        assert_eq!(factor(f64::NAN), Err(CoreError::InvalidFactorInput));
        assert_eq!(factor_integer(0), Err(CoreError::InvalidFactorInput));
    }

    #[test]
    fn test_factor_str() {
        assert_eq!(factor_str(" 15 ").unwrap().factors(), vec![3, 5]);
        assert_eq!(factor_str("2.5"), Err(CoreError::InvalidFactorInput));
        assert_eq!(factor_str("abc"), Err(CoreError::InvalidFactorInput));
        assert_eq!(factor_str("91").unwrap().factors(), vec![7, 13]);
    }

    #[test]
    fn test_large_inputs() {
        assert_eq!(smallest_factor(1_000_000_007), 1_000_000_007);
        assert_eq!(smallest_factor(u64::MAX), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Factorization::Composite(3, 5).to_string(), "3 × 5");
        assert_eq!(Factorization::Prime(17).to_string(), "17 (prime)");
    }

    #[test]
    fn test_factor_rejects_beyond_u64() {
        assert_eq!(
            factor_str("18446744073709551616"),
            Err(CoreError::InvalidFactorInput)
        );
        assert_eq!(factor(2f64.powi(64)), Err(CoreError::InvalidFactorInput));
        assert_eq!(
            factor_str("18446744073709551616.0"),
            Err(CoreError::InvalidFactorInput)
        );
    }

    #[test]
    fn test_factor_large_values_are_exact() {
        // 2^53 + 1 rounds to the even 2^53 as a float.
        assert_eq!(
            factor_str("9007199254740993.0").unwrap(),
            Factorization::Composite(3, 3_002_399_751_580_331)
        );
        assert_eq!(
            factor_str("9007199254740993").unwrap(),
            Factorization::Composite(3, 3_002_399_751_580_331)
        );
        assert_eq!(factor(2f64.powi(53)).unwrap().factors(), vec![2, 1 << 52]);
        assert_eq!(
            factor(2f64.powi(53) * 2.0),
            Err(CoreError::InvalidFactorInput)
        );
        assert_eq!(factor_str("1e300"), Err(CoreError::InvalidFactorInput));
    }

    #[test]
    fn test_factor_str_zero_fraction() {
        assert_eq!(factor_str("15.0").unwrap().factors(), vec![3, 5]);
        assert_eq!(factor_str("15.").unwrap().factors(), vec![3, 5]);
        assert_eq!(factor_str("1.0"), Err(CoreError::InvalidFactorInput));
        assert_eq!(factor_str(".0"), Err(CoreError::InvalidFactorInput));
    }
}
