//! Wide SIMD-style blocks built from 4-lane `u32` groups.
//!
//! Blocks are opaque bit containers: 128, 256, and 512 bits wide, addressed
//! as one, two, or four `[u32; 4]` lanes. They carry no arithmetic and do
//! not implement [`Numeric`](super::Numeric) — there is no meaningful `f64`
//! projection of a 4-lane vector, so feeding one into the generic arithmetic
//! pathway is rejected at compile time rather than at run time.
//!
//! Like the scalar wrappers, equality and hashing operate on the raw bits.

/// One 128-bit lane of four `u32` values.
pub type Lane = [u32; 4];

macro_rules! block {
    ($(#[$meta:meta])* $name:ident, $lanes:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name([u32; 4 * $lanes]);

        impl $name {
            pub const LANES: usize = $lanes;

            pub const fn new(words: [u32; 4 * $lanes]) -> Self {
                Self(words)
            }

            /// Reinterprets raw words as this block. No conversion happens.
            pub const fn from_bits(words: [u32; 4 * $lanes]) -> Self {
                Self(words)
            }

            /// Returns the raw word representation.
            pub const fn to_bits(self) -> [u32; 4 * $lanes] {
                self.0
            }

            /// Returns one 128-bit lane.
            ///
            /// # Panics
            /// Panics if `index >= Self::LANES`.
            pub fn lane(&self, index: usize) -> Lane {
                let start = index * 4;
                [
                    self.0[start],
                    self.0[start + 1],
                    self.0[start + 2],
                    self.0[start + 3],
                ]
            }
        }

        impl From<[u32; 4 * $lanes]> for $name {
            fn from(words: [u32; 4 * $lanes]) -> Self {
                Self(words)
            }
        }

        impl From<$name> for [u32; 4 * $lanes] {
            fn from(block: $name) -> Self {
                block.0
            }
        }

        const _: () = assert!(core::mem::size_of::<$name>() == 16 * $lanes);
    };
}

block!(
    /// 128-bit block: one lane of 4×`u32`.
    Block128, 1
);
block!(
    /// 256-bit block: two lanes of 4×`u32`.
    Block256, 2
);
block!(
    /// 512-bit block: four lanes of 4×`u32`.
    Block512, 4
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip() {
        let block = Block128::new([1, 2, 3, 4]);
        assert_eq!(Block128::from_bits(block.to_bits()), block);
    }

    #[test]
    fn lane_access() {
        let block = Block256::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(block.lane(0), [1, 2, 3, 4]);
        assert_eq!(block.lane(1), [5, 6, 7, 8]);

        let block = Block512::default();
        assert_eq!(Block512::LANES, 4);
        assert_eq!(block.lane(3), [0, 0, 0, 0]);
    }

    #[test]
    fn equality_is_bitwise() {
        let a = Block128::new([0, 0, 0, 1]);
        let b = Block128::new([0, 0, 0, 2]);
        assert_ne!(a, b);
        assert_eq!(a, Block128::new([0, 0, 0, 1]));
    }
}
