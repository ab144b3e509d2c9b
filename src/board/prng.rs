/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Four random u64 values.
///
/// Fixed so that magic table construction is deterministic across runs.
const SEEDS: [u64; 4] = [
    0b1100101001011010111110010001110010100100011110101101000110100101,
    0b0011110111001001010110100011010111011110010100011010011100101110,
    0b1010010011101101001010111100100110110001110100101001011011010001,
    0b0101100110010110100011011010010111001010110110100101110010011010,
];

/// A pseudo-random number generator using the "xoshiro" algorithm.
///
/// Source code copied from <https://prng.di.unimi.it/xoshiro256starstar.c>
pub struct XoShiRo([u64; 4]);

impl XoShiRo {
    /// Construct a new pseudo-random number generator from the library's seeds.
    #[inline(always)]
    pub const fn new() -> Self {
        Self::from_seeds(SEEDS)
    }

    /// Construct a new pseudo-random number generator from your own seeds.
    #[inline(always)]
    pub const fn from_seeds(seeds: [u64; 4]) -> Self {
        Self(seeds)
    }

    /// Computes the next pseudo-random number in the sequence.
    #[inline(always)]
    pub fn get_next(&mut self) -> u64 {
        let (result, s) = Self::xoshiro(self.0);
        self.0 = s;
        result
    }

    /// Generates a sparse pseudo-random number, with roughly 1/8 of its bits set.
    ///
    /// Sparse candidates make good magic multipliers.
    #[inline(always)]
    pub fn get_next_sparse(&mut self) -> u64 {
        self.get_next() & self.get_next() & self.get_next()
    }

    /// Inner function for computing the next pseudo-random number in the sequence.
    const fn xoshiro(mut s: [u64; 4]) -> (u64, [u64; 4]) {
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);

        let t = s[1] << 17;

        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];

        s[2] ^= t;

        s[3] = s[3].rotate_left(45);
        (result, s)
    }
}

impl Default for XoShiRo {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
