/// Accessors for bit registers packed into `u64` words, least significant
/// bit first.
pub struct BitPack;

impl BitPack {
    /// Number of words needed to hold `bits` bits.
    #[inline(always)]
    pub const fn words_for(bits: usize) -> usize {
        bits.div_ceil(64)
    }

    /// Reads bit `index`.
    #[inline(always)]
    pub fn get(storage: &[u64], index: usize) -> bool {
        let word = storage[index / 64];
        let bit = index % 64;
        (word >> bit) & 1 == 1
    }

    /// Flips bit `index`.
    #[inline(always)]
    pub fn toggle(storage: &mut [u64], index: usize) {
        let word_idx = index / 64;
        let bit_idx = index % 64;
        storage[word_idx] ^= 1 << bit_idx;
    }

    /// Writes `val` to bit `index`.
    #[inline(always)]
    pub fn set(storage: &mut [u64], index: usize, val: bool) {
        let word_idx = index / 64;
        let mask = 1u64 << (index % 64);
        if val {
            storage[word_idx] |= mask;
        } else {
            storage[word_idx] &= !mask;
        }
    }

    /// Population count over the whole register.
    #[inline(always)]
    pub fn count_ones(storage: &[u64]) -> usize {
        storage.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Hamming weight of an unpacked 0/1 vector.
#[inline(always)]
pub fn weight(bits: &[u8]) -> usize {
    bits.iter().filter(|&&b| b & 1 == 1).count()
}
