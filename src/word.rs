use std::io;

pub type Word = u64;

pub const WORD_BITS: usize = 64;

pub fn mask(offset: u32) -> Word {
    debug_assert!((offset as usize) < WORD_BITS);
    1 << offset
}

pub fn ones(word: Word) -> Ones {
    Ones { rest: word }
}

pub struct Ones {
    rest: Word,
}

impl Iterator for Ones {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.rest == 0 {
            return None;
        }
        let offset = self.rest.trailing_zeros();
        // Strip the lowest set bit.
        self.rest &= self.rest - 1;
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Ones {}

// Eight 8-bit groups, most significant first, then ", ".
pub fn write_word(out: &mut impl io::Write, word: Word) -> io::Result<()> {
    for group in (0..8).rev() {
        let byte = (word >> (group * 8)) as u8;
        if group > 0 {
            write!(out, "{:08b} ", byte)?;
        } else {
            write!(out, "{:08b}", byte)?;
        }
    }
    write!(out, ", ")
}
