use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::bucket::Bucket;
use crate::element::Element;
use crate::set::BucketSet;
use crate::word::{self, Ones};

/// Ascending iterator over the members of a [`BucketSet`].
pub struct Iter<'a, T> {
    buckets: &'a [Bucket],
    bucket: usize,
    word: usize,
    next_word: usize,
    current: Ones,
    marker: PhantomData<T>,
}

impl<'a, T: Element> Iter<'a, T> {
    pub(crate) fn new(buckets: &'a [Bucket]) -> Self {
        Self {
            buckets,
            bucket: 0,
            word: 0,
            next_word: 0,
            current: word::ones(0),
            marker: PhantomData,
        }
    }
}

impl<'a, T: Element> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(bit) = self.current.next() {
                return Some(T::from_parts(self.bucket, self.word, bit));
            }
            let bucket = self.buckets.get(self.bucket)?;
            match bucket.get(self.next_word) {
                Some(w) => {
                    self.word = self.next_word;
                    self.next_word += 1;
                    self.current = word::ones(w);
                }
                None => {
                    self.bucket += 1;
                    self.next_word = 0;
                }
            }
        }
    }
}

impl<'a, T: Element> FusedIterator for Iter<'a, T> {}

impl<'a, T: Element> IntoIterator for &'a BucketSet<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::BucketSet;

    #[test]
    fn test_iter_empty() {
        let s = BucketSet::<u32>::new();
        assert_eq!(s.iter().next(), None);

        // Allocated but cleared words yield nothing.
        let mut s = BucketSet::<u32>::new();
        s.add(1000);
        s.add(u32::max_value());
        s.remove(1000);
        s.remove(u32::max_value());
        assert!(s.total_word_count() > 0);
        assert_eq!(s.iter().count(), 0);
    }

    #[test]
    fn test_iter_crosses_words_and_buckets() {
        let values = [0u32, 1, 63, 64, 65, 127, 128, 1 << 25, (1 << 25) + 64, u32::max_value()];
        let mut s = BucketSet::new();
        for &v in values.iter().rev() {
            s.add(v);
        }
        assert_eq!(s.iter().collect::<Vec<_>>(), values.to_vec());

        let mut it = s.iter();
        for _ in 0..values.len() {
            assert!(it.next().is_some());
        }
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_iter_for_loop() {
        let s: BucketSet<u16> = vec![9u16, 3, 512, 70].into_iter().collect();
        let mut seen = vec![];
        for x in &s {
            seen.push(x);
        }
        assert_eq!(seen, vec![3, 9, 70, 512]);
    }
}
