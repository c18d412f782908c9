//! The geohash base-32 alphabet and bit masks.

/// Characters for each 5-bit value, in value order. Excludes `a`, `i`, `l`, `o`.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Masks for the five bits of a character, most significant first.
pub const BITS: [u8; 5] = [16, 8, 4, 2, 1];

/// Number of bits carried by each character.
pub const BITS_PER_CHAR: usize = 5;

const INVALID: u8 = 0xFF;

/// Reverse lookup from byte to 5-bit value, `INVALID` for non-members.
const DECODE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the 5-bit value of `byte`, or `None` if it is not in the alphabet.
#[inline]
pub fn index_of(byte: u8) -> Option<u8> {
    match DECODE[byte as usize] {
        INVALID => None,
        value => Some(value),
    }
}

/// Returns the alphabet character for a 5-bit value.
#[inline]
pub fn char_at(value: u8) -> u8 {
    ALPHABET[(value & 0x1F) as usize]
}
