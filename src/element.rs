use std::fmt;

use crate::word::{self, Word, WORD_BITS};

pub const BUCKET_COUNT: usize = 128;

pub const BUCKET_INDEX_BITS: u32 = 7;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Implemented for `u8`, `u16` and `u32` only; a set of 64-bit values does
/// not compile.
///
/// ```compile_fail
/// let set = bucketset::BucketSet::<u64>::new();
/// ```
pub trait Element: Copy + Ord + fmt::Debug + sealed::Sealed {
    const BITS: u32;

    const BUCKET_SHIFT: u32;

    fn bucket_index(self) -> usize;

    fn storage_unit_index(self) -> usize;

    fn bit_mask(self) -> Word;

    fn from_parts(bucket: usize, word: usize, bit: u32) -> Self;
}

macro_rules! impl_element {
    ($t:ty) => {
        impl Element for $t {
            const BITS: u32 = (std::mem::size_of::<$t>() * 8) as u32;
            const BUCKET_SHIFT: u32 = Self::BITS - BUCKET_INDEX_BITS;

            #[inline(always)]
            fn bucket_index(self) -> usize {
                (self >> Self::BUCKET_SHIFT) as usize
            }

            #[inline(always)]
            fn storage_unit_index(self) -> usize {
                // Shifting out in the native width clears the selector bits.
                let offset = (self << BUCKET_INDEX_BITS) >> BUCKET_INDEX_BITS;
                offset as usize / WORD_BITS
            }

            #[inline(always)]
            fn bit_mask(self) -> Word {
                let offset = (self << BUCKET_INDEX_BITS) >> BUCKET_INDEX_BITS;
                word::mask((offset as usize % WORD_BITS) as u32)
            }

            #[inline(always)]
            fn from_parts(bucket: usize, word: usize, bit: u32) -> Self {
                debug_assert!(bucket < BUCKET_COUNT);
                let high = (bucket as u32) << Self::BUCKET_SHIFT;
                let low = (word * WORD_BITS) as u32 | bit;
                (high | low) as $t
            }
        }
    };
}

impl_element!(u8);
impl_element!(u16);
impl_element!(u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifts() {
        assert_eq!(u8::BUCKET_SHIFT, 1);
        assert_eq!(u16::BUCKET_SHIFT, 9);
        assert_eq!(u32::BUCKET_SHIFT, 25);
    }

    #[test]
    fn test_u32_addressing() {
        let max = u32::max_value();
        assert_eq!(max.bucket_index(), BUCKET_COUNT - 1);
        assert_eq!(max.storage_unit_index(), 524_287);
        assert_eq!(max.bit_mask(), 1 << 63);

        assert_eq!(0u32.bucket_index(), 0);
        assert_eq!(63u32.storage_unit_index(), 0);
        assert_eq!(64u32.storage_unit_index(), 1);
        assert_eq!(64u32.bit_mask(), 1);
        assert_eq!((1u32 << 25).bucket_index(), 1);
        assert_eq!((1u32 << 25).storage_unit_index(), 0);
    }

    #[test]
    fn test_u8_addressing() {
        // One bit of offset per bucket.
        for x in 0..=u8::max_value() {
            assert_eq!(x.bucket_index(), (x >> 1) as usize);
            assert_eq!(x.storage_unit_index(), 0);
            assert_eq!(x.bit_mask(), 1 << (x & 1));
        }
    }

    #[test]
    fn test_from_parts_inverts_split() {
        for &x in &[0u32, 1, 63, 64, 599, 1 << 25, 0xdead_beef, u32::max_value()] {
            let bit = x.bit_mask().trailing_zeros();
            assert_eq!(u32::from_parts(x.bucket_index(), x.storage_unit_index(), bit), x);
        }
        for x in 0..=u16::max_value() {
            let bit = x.bit_mask().trailing_zeros();
            assert_eq!(u16::from_parts(x.bucket_index(), x.storage_unit_index(), bit), x);
        }
    }
}
