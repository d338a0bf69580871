//! Exact decimal number representation.

use std::fmt;

/// Sign of a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

/// A JSON number as an exact decimal triple.
///
/// `units` is the unsigned digit string read as an integer and `places` is the
/// number of digits after the decimal point, so `-12.34` is
/// `(Minus, 1234, 2)` and `0.1` is `(Plus, 1, 1)`. Parsing never goes through
/// binary floating point, so large integers and exact decimals round-trip
/// without precision loss. Trailing fractional zeros are significant:
/// `1.0` is `(Plus, 10, 1)` and compares unequal to `1` = `(Plus, 1, 0)`.
///
/// # Example
///
/// ```
/// use json_grain::{Number, Sign};
///
/// let n = Number::new(Sign::Plus, 1, 1);
/// assert_eq!(n.to_string(), "0.1");
/// assert_eq!(n.as_u64(), None);
/// assert_eq!(Number::from(25u32).as_u64(), Some(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Number {
    pub sign: Sign,
    pub units: u64,
    pub places: u32,
}

impl Number {
    pub fn new(sign: Sign, units: u64, places: u32) -> Self {
        Self {
            sign,
            units,
            places,
        }
    }

    /// True if the value is exactly zero (any number of places).
    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// The unsigned integer magnitude, if the value is a whole number.
    ///
    /// Trailing fractional zeros rescale away (`25.00` yields `Some(2500 / 100)`
    /// = `Some(25)`); any nonzero fraction yields `None`, as does a negative
    /// value other than `-0`.
    pub fn as_u64(&self) -> Option<u64> {
        if self.sign == Sign::Minus && self.units != 0 {
            return None;
        }
        self.magnitude()
    }

    /// The signed integer value, if the number is a whole number in range.
    pub fn as_i64(&self) -> Option<i64> {
        let units = self.magnitude()?;
        match self.sign {
            Sign::Plus => i64::try_from(units).ok(),
            Sign::Minus => {
                if units <= i64::MAX as u64 + 1 {
                    Some((units as i128).wrapping_neg() as i64)
                } else {
                    None
                }
            }
        }
    }

    /// The nearest binary floating point value. Lossy by nature; only the
    /// explicit float conversions take this path.
    pub fn as_f64(&self) -> f64 {
        // Any u64 magnitude sinks below the smallest subnormal well before
        // 400 places, so clamping keeps the power of ten in f64 range. The
        // division is split so that places past 10^308 (where powi saturates
        // to infinity) still land on the subnormals instead of on zero.
        let places = self.places.min(400);
        let mut magnitude = self.units as f64 / 10f64.powi(places.min(300) as i32);
        if places > 300 {
            magnitude /= 10f64.powi((places - 300) as i32);
        }
        match self.sign {
            Sign::Plus => magnitude,
            Sign::Minus => -magnitude,
        }
    }

    fn magnitude(&self) -> Option<u64> {
        let mut units = self.units;
        for _ in 0..self.places {
            if units == 0 {
                return Some(0);
            }
            if units % 10 != 0 {
                return None;
            }
            units /= 10;
        }
        Some(units)
    }
}

impl fmt::Display for Number {
    /// Renders the canonical decimal literal, preserving trailing zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == Sign::Minus {
            write!(f, "-")?;
        }
        if self.places == 0 {
            return write!(f, "{}", self.units);
        }
        let digits = self.units.to_string();
        let places = self.places as usize;
        if digits.len() > places {
            let (whole, fraction) = digits.split_at(digits.len() - places);
            write!(f, "{whole}.{fraction}")
        } else {
            write!(f, "0.{0:0>1$}", digits, places)
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty)*) => {$(
        impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Number::new(Sign::Plus, value as u64, 0)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($t:ty)*) => {$(
        impl From<$t> for Number {
            fn from(value: $t) -> Self {
                let sign = if value < 0 { Sign::Minus } else { Sign::Plus };
                Number::new(sign, (value as i64).unsigned_abs(), 0)
            }
        }
    )*};
}

impl_from_unsigned!(u8 u16 u32 u64);
impl_from_signed!(i8 i16 i32 i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_whole() {
        assert_eq!(Number::new(Sign::Plus, 1234, 0).to_string(), "1234");
        assert_eq!(Number::new(Sign::Minus, 5, 0).to_string(), "-5");
    }

    #[test]
    fn display_fraction() {
        assert_eq!(Number::new(Sign::Plus, 1234, 2).to_string(), "12.34");
        assert_eq!(Number::new(Sign::Plus, 1, 1).to_string(), "0.1");
        assert_eq!(Number::new(Sign::Plus, 15, 4).to_string(), "0.0015");
        assert_eq!(Number::new(Sign::Minus, 10, 1).to_string(), "-1.0");
    }

    #[test]
    fn integer_conversion_rescales() {
        assert_eq!(Number::new(Sign::Plus, 2500, 2).as_u64(), Some(25));
        assert_eq!(Number::new(Sign::Plus, 2500, 2).as_i64(), Some(25));
        assert_eq!(Number::new(Sign::Plus, 25, 1).as_u64(), None);
        assert_eq!(Number::new(Sign::Minus, 25, 0).as_u64(), None);
        assert_eq!(Number::new(Sign::Minus, 25, 0).as_i64(), Some(-25));
    }

    #[test]
    fn i64_min_round_trips() {
        let n = Number::new(Sign::Minus, i64::MIN.unsigned_abs(), 0);
        assert_eq!(n.as_i64(), Some(i64::MIN));
        assert_eq!(Number::new(Sign::Minus, i64::MIN.unsigned_abs() + 1, 0).as_i64(), None);
    }

    #[test]
    fn float_conversion() {
        assert_eq!(Number::new(Sign::Plus, 1, 1).as_f64(), 0.1);
        assert_eq!(Number::new(Sign::Minus, 1234, 2).as_f64(), -12.34);
    }

    #[test]
    fn float_conversion_underflows_extreme_places() {
        // 5e-4000000000: far below f64 range, so it rounds to zero rather
        // than tripping a wrapped powi exponent.
        assert_eq!(Number::new(Sign::Plus, 5, 4_000_000_000).as_f64(), 0.0);
        assert_eq!(Number::new(Sign::Minus, 5, 4_000_000_000).as_f64(), 0.0);
        // Just past the powi saturation point the value is still a subnormal.
        let tiny = Number::new(Sign::Plus, 1, 320).as_f64();
        assert!(tiny > 0.0 && tiny < f64::MIN_POSITIVE);
    }

    #[test]
    fn negative_zero_is_whole() {
        assert_eq!(Number::new(Sign::Minus, 0, 0).as_u64(), Some(0));
    }

    #[test]
    fn zero_with_extreme_places_is_whole() {
        assert_eq!(Number::new(Sign::Plus, 0, u32::MAX).as_u64(), Some(0));
        assert_eq!(Number::new(Sign::Minus, 0, u32::MAX).as_i64(), Some(0));
    }
}
