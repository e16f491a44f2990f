//! STARK field arithmetic
//!
//! p = 2^251 + 17·2^192 + 1
//!
//! Properties:
//! - 252-bit prime, elements backed by arbitrary-precision integers
//! - Elements above (p-1)/2 read as negative integers when a signed view is needed
//! - Narrowing to i16/u32/u64 is checked, never truncating

use num_bigint::{BigInt, BigUint, ParseBigIntError, Sign};
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::LazyLock;

/// STARK prime in decimal
pub const STARK_PRIME_DEC: &str =
    "3618502788666131213697322783095070105623107215331596699973092056135872020481";

static PRIME: LazyLock<BigUint> = LazyLock::new(|| {
    (BigUint::one() << 251u32) + (BigUint::from(17u32) << 192u32) + BigUint::one()
});

/// (p - 1) / 2, the largest element with a positive signed reading
static HALF_PRIME: LazyLock<BigUint> =
    LazyLock::new(|| (PRIME.clone() - BigUint::one()) / BigUint::from(2u32));

/// STARK field element
///
/// Values are stored in canonical form: 0 ≤ value < p. Deserialization
/// reduces through [`Felt::from_biguint`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "BigUint")]
pub struct Felt(BigUint);

impl Felt {
    /// The field modulus
    pub fn prime() -> &'static BigUint {
        &PRIME
    }

    pub fn zero() -> Self {
        Felt(BigUint::zero())
    }

    pub fn one() -> Self {
        Felt(BigUint::one())
    }

    /// Create a field element from an unsigned integer (reduces modulo p)
    pub fn from_biguint(value: BigUint) -> Self {
        if value < *PRIME {
            Felt(value)
        } else {
            Felt(value % &*PRIME)
        }
    }

    /// Create a field element from a signed integer
    ///
    /// Negative values map to `p - |value|`.
    pub fn from_bigint(value: &BigInt) -> Self {
        let prime = BigInt::from_biguint(Sign::Plus, PRIME.clone());
        let reduced = ((value % &prime) + &prime) % &prime;
        Felt(reduced.to_biguint().unwrap_or_default())
    }

    /// Parse a (possibly negative) decimal literal
    pub fn from_dec_str(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Canonical value
    #[inline]
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn to_biguint(&self) -> BigUint {
        self.0.clone()
    }

    /// Signed reading: values above (p-1)/2 are `value - p`
    pub fn to_signed_bigint(&self) -> BigInt {
        let value = BigInt::from_biguint(Sign::Plus, self.0.clone());
        if self.0 > *HALF_PRIME {
            value - BigInt::from_biguint(Sign::Plus, PRIME.clone())
        } else {
            value
        }
    }

    /// Narrow the signed reading to an i16
    pub fn to_i16(&self) -> Option<i16> {
        self.to_signed_bigint().to_i16()
    }

    /// Narrow the signed reading to an i64
    pub fn to_i64(&self) -> Option<i64> {
        self.to_signed_bigint().to_i64()
    }

    /// Narrow the canonical value to a u32
    pub fn to_u32(&self) -> Option<u32> {
        self.0.to_u32()
    }

    /// Narrow the canonical value to a u64
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Narrow the canonical value to a usize
    pub fn to_usize(&self) -> Option<usize> {
        self.0.to_usize()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// True for elements whose signed reading is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && self.0 <= *HALF_PRIME
    }
}

// Arithmetic implementations

impl Add<&Felt> for &Felt {
    type Output = Felt;

    fn add(self, rhs: &Felt) -> Felt {
        let sum = &self.0 + &rhs.0;
        if sum >= *PRIME {
            Felt(sum - &*PRIME)
        } else {
            Felt(sum)
        }
    }
}

impl Sub<&Felt> for &Felt {
    type Output = Felt;

    fn sub(self, rhs: &Felt) -> Felt {
        if self.0 >= rhs.0 {
            Felt(&self.0 - &rhs.0)
        } else {
            Felt(&self.0 + &*PRIME - &rhs.0)
        }
    }
}

impl Mul<&Felt> for &Felt {
    type Output = Felt;

    fn mul(self, rhs: &Felt) -> Felt {
        Felt((&self.0 * &rhs.0) % &*PRIME)
    }
}

impl Neg for &Felt {
    type Output = Felt;

    fn neg(self) -> Felt {
        if self.0.is_zero() {
            Felt::zero()
        } else {
            Felt(&*PRIME - &self.0)
        }
    }
}

impl Add for Felt {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Sub for Felt {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl Mul for Felt {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Neg for Felt {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        -&self
    }
}

// Conversions

impl From<u32> for Felt {
    fn from(value: u32) -> Self {
        Felt(BigUint::from(value))
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Felt(BigUint::from(value))
    }
}

impl From<usize> for Felt {
    fn from(value: usize) -> Self {
        Felt(BigUint::from(value))
    }
}

impl From<i16> for Felt {
    fn from(value: i16) -> Self {
        Felt::from_bigint(&BigInt::from(value))
    }
}

impl From<i64> for Felt {
    fn from(value: i64) -> Self {
        Felt::from_bigint(&BigInt::from(value))
    }
}

impl From<BigUint> for Felt {
    fn from(value: BigUint) -> Self {
        Felt::from_biguint(value)
    }
}

impl FromStr for Felt {
    type Err = ParseBigIntError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value = BigInt::from_str(text.trim())?;
        Ok(Felt::from_bigint(&value))
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_value() {
        assert_eq!(Felt::prime().to_string(), STARK_PRIME_DEC);
    }

    #[test]
    fn test_deserialize_reduces() {
        let prime = serde_json::to_string(Felt::prime()).unwrap();
        let felt: Felt = serde_json::from_str(&prime).unwrap();
        assert!(felt.is_zero());
        assert_eq!(felt, Felt::zero());

        let above = serde_json::to_string(&(Felt::prime() + 5u32)).unwrap();
        let felt: Felt = serde_json::from_str(&above).unwrap();
        assert_eq!(felt, Felt::from(5u32));
        assert_eq!(felt.to_i16(), Some(5));

        let minus_one = Felt::from(-1i64);
        let text = serde_json::to_string(&minus_one).unwrap();
        assert_eq!(serde_json::from_str::<Felt>(&text).unwrap(), minus_one);
    }

    #[test]
    fn test_basic_arithmetic() {
        let a = Felt::from(100u64);
        let b = Felt::from(42u64);
        assert_eq!(&a + &b, Felt::from(142u64));
        assert_eq!(&a - &b, Felt::from(58u64));
        assert_eq!(&a * &b, Felt::from(4200u64));
    }

    #[test]
    fn test_sub_wraps_around_prime() {
        let result = Felt::zero() - Felt::one();
        let expected = Felt::from_biguint(Felt::prime() - BigUint::one());
        assert_eq!(result, expected);
        assert_eq!(result.to_signed_bigint(), BigInt::from(-1));
    }

    #[test]
    fn test_negation() {
        assert_eq!(-Felt::zero(), Felt::zero());
        let x = Felt::from(7u32);
        assert_eq!(&x + &(-&x), Felt::zero());
    }

    #[test]
    fn test_from_bigint_negative() {
        let x = Felt::from_bigint(&BigInt::from(-3));
        assert_eq!(x.to_i16(), Some(-3));
        assert_eq!(x.to_u64(), None);
    }

    #[test]
    fn test_to_i16_bounds() {
        assert_eq!(Felt::from(32767u32).to_i16(), Some(32767));
        assert_eq!(Felt::from(32768u32).to_i16(), None);
        assert_eq!(Felt::from(-32768i64).to_i16(), Some(-32768));
        assert_eq!(Felt::from(-32769i64).to_i16(), None);
        assert_eq!(Felt::from(40000u32).to_i16(), None);
        assert_eq!(Felt::from(-40000i64).to_i16(), None);
    }

    #[test]
    fn test_is_positive() {
        assert!(!Felt::zero().is_positive());
        assert!(Felt::one().is_positive());
        assert!(!Felt::from(-1i64).is_positive());
        let half = Felt::from_biguint(HALF_PRIME.clone());
        assert!(half.is_positive());
        assert!(!(half + Felt::one()).is_positive());
    }

    #[test]
    fn test_from_str() {
        let x: Felt = "3663108286".parse().unwrap();
        assert_eq!(x.to_u32(), Some(3663108286));
        let y: Felt = "-5".parse().unwrap();
        assert_eq!(y.to_i64(), Some(-5));
        assert!("abc".parse::<Felt>().is_err());
        let p: Felt = STARK_PRIME_DEC.parse().unwrap();
        assert!(p.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Felt::from(1779033703u32).to_string(), "1779033703");
        assert_eq!(Felt::from(-1i64).to_string(), (Felt::prime() - BigUint::one()).to_string());
    }
}
