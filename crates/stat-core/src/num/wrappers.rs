//! Fixed-width number wrappers.
//!
//! Each wrapper is a `#[repr(transparent)]` reinterpretation of exactly one
//! primitive: same size, same layout, no numeric conversion on the way in or
//! out. `from_bits`/`to_bits` move the raw representation through the
//! unsigned integer of the same width, and a static assertion pins the
//! size of every wrapper to its primitive.
//!
//! No arithmetic operators are defined here. All arithmetic goes through the
//! [`Numeric`](super::Numeric) pathway so there is a single auditable route
//! for every computation.
//!
//! Equality and hashing operate on the underlying bits. For the float
//! wrappers this differs from IEEE semantics on purpose: `F32(NaN)` equals
//! itself, and `F32(0.0)` does not equal `F32(-0.0)`.

use super::{Numeric, Signedness};

macro_rules! int_wrapper {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $bits:ty, $signedness:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name($prim);

        impl $name {
            pub const fn new(value: $prim) -> Self {
                Self(value)
            }

            pub const fn get(self) -> $prim {
                self.0
            }

            /// Reinterprets raw bits as this type. No numeric cast happens.
            pub const fn from_bits(bits: $bits) -> Self {
                Self(<$prim>::from_ne_bytes(bits.to_ne_bytes()))
            }

            /// Returns the raw bit representation.
            pub const fn to_bits(self) -> $bits {
                <$bits>::from_ne_bytes(self.0.to_ne_bytes())
            }
        }

        impl From<$prim> for $name {
            fn from(value: $prim) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $prim {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Numeric for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const SIGNEDNESS: Signedness = Signedness::$signedness;

            fn to_f64(self) -> f64 {
                self.0 as f64
            }

            fn from_f64(value: f64) -> Self {
                Self(value as $prim)
            }
        }

        const _: () = assert!(
            core::mem::size_of::<$name>() == core::mem::size_of::<$prim>()
        );
    };
}

int_wrapper!(
    /// 8-bit signed integer wrapper.
    I8, i8, u8, Signed
);
int_wrapper!(
    /// 16-bit signed integer wrapper.
    I16, i16, u16, Signed
);
int_wrapper!(
    /// 32-bit signed integer wrapper.
    I32, i32, u32, Signed
);
int_wrapper!(
    /// 64-bit signed integer wrapper.
    I64, i64, u64, Signed
);
int_wrapper!(
    /// 8-bit unsigned integer wrapper.
    U8, u8, u8, Unsigned
);
int_wrapper!(
    /// 16-bit unsigned integer wrapper.
    U16, u16, u16, Unsigned
);
int_wrapper!(
    /// 32-bit unsigned integer wrapper.
    U32, u32, u32, Unsigned
);
int_wrapper!(
    /// 64-bit unsigned integer wrapper.
    U64, u64, u64, Unsigned
);

macro_rules! float_wrapper {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $bits:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name($prim);

        impl $name {
            pub const fn new(value: $prim) -> Self {
                Self(value)
            }

            pub const fn get(self) -> $prim {
                self.0
            }

            /// Reinterprets raw bits as this type. No numeric cast happens.
            pub const fn from_bits(bits: $bits) -> Self {
                Self(<$prim>::from_bits(bits))
            }

            /// Returns the raw bit representation.
            pub const fn to_bits(self) -> $bits {
                self.0.to_bits()
            }
        }

        impl From<$prim> for $name {
            fn from(value: $prim) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $prim {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        // Bit equality, not IEEE equality: NaN == NaN, 0.0 != -0.0.
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.to_bits() == other.0.to_bits()
            }
        }

        impl Eq for $name {}

        impl core::hash::Hash for $name {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                self.0.to_bits().hash(state);
            }
        }

        impl Numeric for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const SIGNEDNESS: Signedness = Signedness::Float;

            fn to_f64(self) -> f64 {
                self.0 as f64
            }

            fn from_f64(value: f64) -> Self {
                Self(value as $prim)
            }
        }

        const _: () = assert!(
            core::mem::size_of::<$name>() == core::mem::size_of::<$prim>()
        );
    };
}

float_wrapper!(
    /// 32-bit floating point wrapper.
    F32, f32, u32
);
float_wrapper!(
    /// 64-bit floating point wrapper.
    F64, f64, u64
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::approx_eq;

    #[test]
    fn bit_round_trip_is_lossless() {
        let value = I32::new(-1);
        assert_eq!(value.to_bits(), u32::MAX);
        assert_eq!(I32::from_bits(u32::MAX), value);

        let value = F64::new(1.5);
        assert_eq!(F64::from_bits(value.to_bits()), value);

        let value = U16::new(0xBEEF);
        assert_eq!(U16::from_bits(0xBEEF).get(), value.get());
    }

    #[test]
    fn float_wrapper_equality_is_bitwise() {
        assert_eq!(F32::new(f32::NAN), F32::new(f32::NAN));
        assert_ne!(F32::new(0.0), F32::new(-0.0));
        assert_eq!(F64::new(2.5), F64::new(2.5));
    }

    #[test]
    fn wrapper_arithmetic_goes_through_f64() {
        use crate::num::NumericExt;

        let sum = I32::new(10).add(I32::new(5));
        assert_eq!(sum.get(), 15);

        let product = F64::new(1.5).mul(F64::new(2.0));
        assert_eq!(product.get(), 3.0);
    }

    #[test]
    fn foreign_comparison_is_epsilon_tolerant() {
        assert!(approx_eq(I32::new(7), 7i32));
        assert!(approx_eq(F64::new(7.0), 7u8));
        assert!(!approx_eq(F64::new(7.1), 7i32));
    }

    #[test]
    fn signedness_matches_representation() {
        use crate::num::{Numeric, Signedness};

        assert_eq!(I8::SIGNEDNESS, Signedness::Signed);
        assert_eq!(U64::SIGNEDNESS, Signedness::Unsigned);
        assert_eq!(F32::SIGNEDNESS, Signedness::Float);
    }
}
