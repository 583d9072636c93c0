use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can serve as edge labels in a DAWG.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: edges store labels by value
/// - `Eq + Ord`: comparing and ordering edge labels, and ordering words
/// - `Hash`: state fingerprints in the register
/// - `Debug`: debug printing of states and error messages
/// - `Default`: sentinel label for the root entry of the frontier
pub trait DawgChar: Copy + Eq + Ord + Hash + Debug + Default {}

impl<T: Copy + Eq + Ord + Hash + Debug + Default> DawgChar for T {}

/// Edge labels with a fixed-width binary encoding, needed by
/// [`Dawg::dump`](super::Dawg::dump) and [`Dawg::load`](super::Dawg::load).
///
/// The width is written into the dump header, so a byte DAWG cannot be loaded
/// as a `char` DAWG by accident.
pub trait DumpChar: DawgChar {
    /// Encoded width in bytes: 1, 2 or 4.
    const WIDTH: u8;

    /// Returns the numeric code stored in a dump.
    fn to_code(self) -> u32;

    /// Decodes a stored code, or `None` if it is not a valid label.
    fn from_code(code: u32) -> Option<Self>;
}

impl DumpChar for u8 {
    const WIDTH: u8 = 1;

    fn to_code(self) -> u32 {
        u32::from(self)
    }

    fn from_code(code: u32) -> Option<Self> {
        u8::try_from(code).ok()
    }
}

impl DumpChar for u16 {
    const WIDTH: u8 = 2;

    fn to_code(self) -> u32 {
        u32::from(self)
    }

    fn from_code(code: u32) -> Option<Self> {
        u16::try_from(code).ok()
    }
}

impl DumpChar for u32 {
    const WIDTH: u8 = 4;

    fn to_code(self) -> u32 {
        self
    }

    fn from_code(code: u32) -> Option<Self> {
        Some(code)
    }
}

impl DumpChar for char {
    const WIDTH: u8 = 4;

    fn to_code(self) -> u32 {
        u32::from(self)
    }

    fn from_code(code: u32) -> Option<Self> {
        char::from_u32(code)
    }
}
