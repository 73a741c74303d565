use std::fmt;
use std::io;
use std::iter::FromIterator;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use tracing::trace;

use crate::bucket::Bucket;
use crate::element::{Element, BUCKET_COUNT};
use crate::iter::Iter;
use crate::word::{self, Word};

/// A set of `u8`, `u16` or `u32` values stored as 128 independently grown
/// bitmaps.
#[derive(Clone)]
pub struct BucketSet<T: Element> {
    buckets: Box<[Bucket]>,
    total_word_count: usize,
    marker: std::marker::PhantomData<T>,
}

impl<T: Element> BucketSet<T> {
    pub fn new() -> Self {
        Self {
            buckets: (0..BUCKET_COUNT).map(|_| Bucket::new()).collect(),
            total_word_count: 0,
            marker: std::marker::PhantomData,
        }
    }

    pub fn bucket_index(x: T) -> usize {
        x.bucket_index()
    }

    pub fn storage_unit_index(x: T) -> usize {
        x.storage_unit_index()
    }

    pub fn bit_mask(x: T) -> Word {
        x.bit_mask()
    }

    fn grow_bucket(&mut self, bucket: usize, len: usize) {
        let added = self.buckets[bucket].grow_to(len);
        if added > 0 {
            self.total_word_count += added;
            trace!(bucket, added, total = self.total_word_count, "grew bucket");
        }
    }

    pub fn add(&mut self, x: T) {
        let bucket = x.bucket_index();
        let unit = x.storage_unit_index();
        self.grow_bucket(bucket, unit + 1);
        self.buckets[bucket].words_mut()[unit] |= x.bit_mask();
    }

    pub fn add_many(&mut self, values: impl IntoIterator<Item = T>) {
        for x in values {
            self.add(x);
        }
    }

    pub fn remove(&mut self, x: T) {
        let unit = x.storage_unit_index();
        if let Some(w) = self.buckets[x.bucket_index()].words_mut().get_mut(unit) {
            *w &= !x.bit_mask();
        }
    }

    pub fn contains(&self, x: T) -> bool {
        match self.buckets[x.bucket_index()].get(x.storage_unit_index()) {
            Some(w) => w & x.bit_mask() != 0,
            None => false,
        }
    }

    pub fn contains_any(&self, values: impl IntoIterator<Item = T>) -> bool {
        values.into_iter().any(|x| self.contains(x))
    }

    pub fn contains_all(&self, values: impl IntoIterator<Item = T>) -> bool {
        values.into_iter().all(|x| self.contains(x))
    }

    pub fn union(&mut self, other: &Self) {
        for (i, theirs) in other.buckets.iter().enumerate() {
            self.grow_bucket(i, theirs.word_count());
            let ours = self.buckets[i].words_mut();
            for (a, b) in ours.iter_mut().zip(theirs.words()) {
                *a |= *b;
            }
        }
    }

    pub fn union_of(a: &Self, b: &Self) -> Self {
        let mut out = Self::new();
        for (i, (x, y)) in a.buckets.iter().zip(b.buckets.iter()).enumerate() {
            let len = x.word_count().max(y.word_count());
            let mut bucket = Bucket::with_len(len);
            {
                let words = bucket.words_mut();
                for (w, v) in words.iter_mut().zip(x.words()) {
                    *w |= *v;
                }
                for (w, v) in words.iter_mut().zip(y.words()) {
                    *w |= *v;
                }
            }
            out.buckets[i] = bucket;
            out.total_word_count += len;
        }
        trace!(total = out.total_word_count, "built union");
        out
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Self::new();
        for (i, (x, y)) in self.buckets.iter().zip(other.buckets.iter()).enumerate() {
            for (j, (a, b)) in x.words().iter().zip(y.words()).enumerate() {
                let common = a & b;
                if common == 0 {
                    continue;
                }
                out.grow_bucket(i, j + 1);
                out.buckets[i].words_mut()[j] = common;
            }
        }
        trace!(total = out.total_word_count, "built intersection");
        out
    }

    pub fn has_intersection(&self, other: &Self) -> bool {
        self.buckets
            .iter()
            .zip(other.buckets.iter())
            .any(|(x, y)| x.words().iter().zip(y.words()).any(|(a, b)| a & b != 0))
    }

    /// Compares storage, not membership.
    ///
    /// Both sets must have the same number of words in every bucket and
    /// identical words. Because removals never shrink a bucket, two sets with
    /// the same members but different histories can compare unequal:
    ///
    /// ```
    /// # use bucketset::BucketSet;
    /// let mut a = BucketSet::<u32>::new();
    /// a.add(1);
    /// let mut b = a.clone();
    /// b.add(1000);
    /// b.remove(1000);
    /// assert!(a.iter().eq(b.iter()));
    /// assert!(!a.is_eq(&b));
    /// ```
    pub fn is_eq(&self, other: &Self) -> bool {
        if self.total_word_count != other.total_word_count {
            return false;
        }
        // Equal totals can still be distributed differently.
        let same_shape = self
            .buckets
            .iter()
            .zip(other.buckets.iter())
            .all(|(x, y)| x.word_count() == y.word_count());
        if !same_shape {
            return false;
        }
        self.buckets
            .iter()
            .zip(other.buckets.iter())
            .all(|(x, y)| x.words() == y.words())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buckets)
    }

    pub fn all_elements(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.buckets
            .iter()
            .flat_map(|b| b.words())
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.words().iter().all(|&w| w == 0))
    }

    pub fn total_word_count(&self) -> usize {
        self.total_word_count
    }

    pub fn bucket_word_count(&self, bucket: usize) -> usize {
        self.buckets[bucket].word_count()
    }

    pub fn bucket_words(&self, bucket: usize) -> &[Word] {
        self.buckets[bucket].words()
    }

    pub fn debug(&self, out: &mut impl io::Write) -> io::Result<()> {
        for bucket in self.buckets.iter() {
            for &w in bucket.words() {
                word::write_word(out, w)?;
            }
        }
        Ok(())
    }
}

impl<T: Element> Default for BucketSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> PartialEq for BucketSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_eq(other)
    }
}

impl<T: Element> Eq for BucketSet<T> {}

impl<T: Element> fmt::Debug for BucketSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Element> Extend<T> for BucketSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_many(iter);
    }
}

impl<T: Element> FromIterator<T> for BucketSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add_many(iter);
        set
    }
}

impl<'a, T: Element> BitOr<&'a BucketSet<T>> for &'a BucketSet<T> {
    type Output = BucketSet<T>;

    fn bitor(self, rhs: &'a BucketSet<T>) -> BucketSet<T> {
        BucketSet::union_of(self, rhs)
    }
}

impl<'a, T: Element> BitAnd<&'a BucketSet<T>> for &'a BucketSet<T> {
    type Output = BucketSet<T>;

    fn bitand(self, rhs: &'a BucketSet<T>) -> BucketSet<T> {
        self.intersection(rhs)
    }
}

impl<'a, T: Element> BitOrAssign<&'a BucketSet<T>> for BucketSet<T> {
    fn bitor_assign(&mut self, rhs: &'a BucketSet<T>) {
        self.union(rhs);
    }
}
