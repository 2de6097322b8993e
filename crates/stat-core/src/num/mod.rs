//! Numeric conversion abstraction.
//!
//! Every scalar the engine touches is funneled through a single pathway:
//! convert to `f64`, operate, convert back through the left operand's type.
//! This keeps arithmetic auditable in one place and lets the modifier engine
//! stay generic over signed integers, unsigned integers, and floats without a
//! shared primitive type.
//!
//! The trait is implemented by the bare primitives and by the fixed-width
//! wrappers in [`wrappers`]. The wide blocks in [`blocks`] deliberately do
//! not implement it; they are opaque bit containers, not arithmetic values.

pub mod blocks;
pub mod wrappers;

use crate::error::StatError;

/// Classification of a numeric representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signedness {
    Signed,
    Unsigned,
    Float,
}

impl Signedness {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Signed => "signed",
            Self::Unsigned => "unsigned",
            Self::Float => "float",
        }
    }
}

/// A value that can round-trip through `f64` for generic arithmetic.
///
/// `from_f64` follows `as`-cast semantics for integers: fractional parts
/// truncate and out-of-range values saturate. Use [`try_from_f64`] when a
/// non-finite input must be rejected instead of saturated.
pub trait Numeric: Copy + PartialEq + core::fmt::Debug + 'static {
    const TYPE_NAME: &'static str;
    const SIGNEDNESS: Signedness;

    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;

    fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

/// Generic arithmetic over any [`Numeric`] type.
///
/// Each operation converts both operands to `f64`, performs the primitive
/// operation, and rebuilds the result through the left operand's `from_f64`.
pub trait NumericExt: Numeric {
    fn add(self, rhs: Self) -> Self {
        Self::from_f64(self.to_f64() + rhs.to_f64())
    }

    fn sub(self, rhs: Self) -> Self {
        Self::from_f64(self.to_f64() - rhs.to_f64())
    }

    fn mul(self, rhs: Self) -> Self {
        Self::from_f64(self.to_f64() * rhs.to_f64())
    }

    fn div(self, rhs: Self) -> Self {
        Self::from_f64(self.to_f64() / rhs.to_f64())
    }

    fn rem(self, rhs: Self) -> Self {
        Self::from_f64(self.to_f64() % rhs.to_f64())
    }

    /// Cross-type conversion through the shared `f64` pathway.
    fn convert<U: Numeric>(self) -> U {
        U::from_f64(self.to_f64())
    }
}

impl<T: Numeric> NumericExt for T {}

/// Checked conversion from `f64`.
///
/// Integer representations reject non-finite input with
/// [`StatError::UnsupportedConversion`]; float representations accept any
/// bit pattern.
pub fn try_from_f64<T: Numeric>(value: f64) -> Result<T, StatError> {
    if !value.is_finite() && T::SIGNEDNESS != Signedness::Float {
        return Err(StatError::UnsupportedConversion {
            type_name: T::TYPE_NAME,
            value,
        });
    }
    Ok(T::from_f64(value))
}

/// Epsilon-tolerant equality across numeric types.
///
/// Tolerance is machine epsilon for `f64`, consistent with the float
/// round-trip used by all generic arithmetic.
pub fn approx_eq<A: Numeric, B: Numeric>(a: A, b: B) -> bool {
    (a.to_f64() - b.to_f64()).abs() <= f64::EPSILON
}

macro_rules! impl_numeric_for_int {
    ($($prim:ty => $signedness:ident),* $(,)?) => {
        $(
            impl Numeric for $prim {
                const TYPE_NAME: &'static str = stringify!($prim);
                const SIGNEDNESS: Signedness = Signedness::$signedness;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $prim
                }
            }
        )*
    };
}

impl_numeric_for_int! {
    i8 => Signed,
    i16 => Signed,
    i32 => Signed,
    i64 => Signed,
    u8 => Unsigned,
    u16 => Unsigned,
    u32 => Unsigned,
    u64 => Unsigned,
}

impl Numeric for f32 {
    const TYPE_NAME: &'static str = "f32";
    const SIGNEDNESS: Signedness = Signedness::Float;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

impl Numeric for f64 {
    const TYPE_NAME: &'static str = "f64";
    const SIGNEDNESS: Signedness = Signedness::Float;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_goes_through_left_operand() {
        // Integer left operand truncates the fractional result.
        assert_eq!(7i32.div(2), 3);
        assert_eq!(7.0f64.div(2.0), 3.5);
        assert_eq!(7u32.rem(4), 3);
    }

    #[test]
    fn f32_path_round_trips() {
        assert_eq!(10i32.to_f32(), 10.0);
        assert_eq!(i32::from_f32(10.5), 10);
        assert_eq!(f32::from_f32(1.25), 1.25);
    }

    #[test]
    fn cross_type_conversion() {
        let value: u8 = 300i32.convert();
        // Saturating as-cast semantics.
        assert_eq!(value, 255);

        let value: f32 = 10i64.convert();
        assert_eq!(value, 10.0);
    }

    #[test]
    fn signedness_classification() {
        assert_eq!(i32::SIGNEDNESS, Signedness::Signed);
        assert_eq!(u64::SIGNEDNESS, Signedness::Unsigned);
        assert_eq!(f32::SIGNEDNESS, Signedness::Float);
        assert_eq!(Signedness::Unsigned.as_str(), "unsigned");
    }

    #[test]
    fn checked_conversion_rejects_non_finite_into_integers() {
        let err = try_from_f64::<i32>(f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            StatError::UnsupportedConversion {
                type_name: "i32",
                ..
            }
        ));

        assert!(try_from_f64::<u16>(f64::INFINITY).is_err());
        assert_eq!(try_from_f64::<i64>(42.9).unwrap(), 42);
        assert!(try_from_f64::<f64>(f64::INFINITY).is_ok());
    }

    #[test]
    fn approx_eq_across_types() {
        assert!(approx_eq(10i32, 10.0f64));
        assert!(approx_eq(10u8, 10i64));
        assert!(!approx_eq(10i32, 11i32));
    }
}
