//! Hash functions for the probabilistic filter
//!
//! Uses MurmurHash3 (x64, 128-bit) with two seeds as the base hashes and
//! derives the k bit positions by double hashing: h(i) = h1 + i * h2.

use std::io::Cursor;

/// Seed of the first base hash
pub const H1_SEED: u32 = 0;
/// Seed of the second base hash
pub const H2_SEED: u32 = 1;

/// Hash an element with MurmurHash3 and keep the lower 64 bits
pub fn murmur_hash(element: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(element);
    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Iterator over the k bit positions of one element
#[derive(Clone, Debug)]
pub struct HashPositions {
    h1: u64,
    h2: u64,
    m: u64,
    i: u64,
    k: u64,
}

impl Iterator for HashPositions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.i >= self.k {
            return None;
        }
        let hash = self.h1.wrapping_add(self.i.wrapping_mul(self.h2));
        self.i += 1;
        Some((hash % self.m) as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.k - self.i) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HashPositions {}

/// Compute the k hash positions of an element in `[0, m)`
///
/// `m` must be non-zero; filters guarantee this at construction.
pub fn hash_positions(element: &[u8], k: usize, m: usize) -> HashPositions {
    HashPositions {
        h1: murmur_hash(element, H1_SEED),
        h2: murmur_hash(element, H2_SEED),
        m: m as u64,
        i: 0,
        k: k as u64,
    }
}
