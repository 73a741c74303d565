// TODO:
// # Algorithm
// [ ] SIMD word loops for union/intersection (needs a stable portable SIMD crate)
// [ ] Skip all-zero words in `len` using a per-bucket popcount
//
// # API
// [ ] Difference and symmetric difference
// [ ] Range iteration
//

//! Bucketed bitsets over `u8`, `u16` and `u32`.
//!
//! ```
//! use bucketset::BucketSet;
//!
//! let mut s = BucketSet::<u32>::new();
//! s.add_many(vec![0, 1, 63, u32::max_value()]);
//! assert!(s.contains(63));
//! assert!(!s.contains(599));
//! assert_eq!(s.all_elements(), vec![0, 1, 63, u32::max_value()]);
//! ```

mod bucket;
mod element;
mod flat;
mod iter;
mod set;
mod word;


pub use element::{Element, BUCKET_COUNT, BUCKET_INDEX_BITS};
pub use flat::{FlatKey, FlatSet};
pub use iter::Iter;
pub use set::BucketSet;
pub use word::{Word, WORD_BITS};
