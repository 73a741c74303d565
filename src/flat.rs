use std::convert::TryFrom;
use std::fmt;
use std::io;
use std::marker::PhantomData;

use tracing::trace;

use crate::word::{self, Word, WORD_BITS};

/// Unsigned integer type usable in a [`FlatSet`].
pub trait FlatKey: Copy + Ord + fmt::Debug {
    fn word_index(self) -> u64;

    fn bit(self) -> u32;

    fn from_index(word: usize, bit: u32) -> Self;
}

macro_rules! impl_flat_key {
    ($($t:ty),*) => {
        $(
            impl FlatKey for $t {
                #[inline(always)]
                fn word_index(self) -> u64 {
                    self as u64 / WORD_BITS as u64
                }

                #[inline(always)]
                fn bit(self) -> u32 {
                    (self as u64 % WORD_BITS as u64) as u32
                }

                #[inline(always)]
                fn from_index(word: usize, bit: u32) -> Self {
                    (word * WORD_BITS + bit as usize) as $t
                }
            }
        )*
    };
}

impl_flat_key!(u8, u16, u32, u64, usize);

/// A single growable bitmap indexed directly by value.
#[derive(Clone, Eq, PartialEq)]
pub struct FlatSet<T> {
    words: Vec<Word>,
    marker: PhantomData<T>,
}

fn to_usize(index: u64) -> usize {
    usize::try_from(index).unwrap_or_else(|_| panic!("capacity overflow: word {}", index))
}

impl<T: FlatKey> FlatSet<T> {
    pub fn new() -> Self {
        Self {
            words: vec![0],
            marker: PhantomData,
        }
    }

    pub fn with_max(largest: T) -> Self {
        Self {
            words: vec![0; to_usize(largest.word_index()) + 1],
            marker: PhantomData,
        }
    }

    pub fn add(&mut self, x: T) {
        let index = to_usize(x.word_index());
        if index >= self.words.len() {
            let added = index + 1 - self.words.len();
            self.words.reserve_exact(added);
            self.words.resize(index + 1, 0);
            trace!(added, total = self.words.len(), "grew flat set");
        }
        self.words[index] |= word::mask(x.bit());
    }

    pub fn add_many(&mut self, values: impl IntoIterator<Item = T>) {
        for x in values {
            self.add(x);
        }
    }

    pub fn remove(&mut self, x: T) {
        let w = usize::try_from(x.word_index())
            .ok()
            .and_then(|i| self.words.get_mut(i));
        if let Some(w) = w {
            *w &= !word::mask(x.bit());
        }
    }

    pub fn contains(&self, x: T) -> bool {
        usize::try_from(x.word_index())
            .ok()
            .and_then(|i| self.words.get(i))
            .map_or(false, |w| w & word::mask(x.bit()) != 0)
    }

    pub fn contains_any(&self, values: impl IntoIterator<Item = T>) -> bool {
        values.into_iter().any(|x| self.contains(x))
    }

    pub fn contains_all(&self, values: impl IntoIterator<Item = T>) -> bool {
        values.into_iter().all(|x| self.contains(x))
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn element_capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = T> + 'a {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(i, &w)| word::ones(w).map(move |bit| T::from_index(i, bit)))
    }

    pub fn debug(&self, out: &mut impl io::Write) -> io::Result<()> {
        for &w in &self.words {
            word::write_word(out, w)?;
        }
        Ok(())
    }
}

impl<T: FlatKey> Default for FlatSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FlatKey> fmt::Debug for FlatSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
