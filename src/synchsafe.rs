// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For handling synchsafe integers
//!
//! A synchsafe integer stores 7 bits per byte, most significant
//! byte first, with the high bit of every byte left clear.
//! This keeps sizes in a tag from ever resembling an MPEG sync code.
//!
//! | Byte | Bits | Meaning |
//! |-----:|-----:|---------|
//! | 0    | `0xxxxxxx` | bits 27-21 |
//! | 1    | `0xxxxxxx` | bits 20-14 |
//! | 2    | `0xxxxxxx` | bits 13-7 |
//! | 3    | `0xxxxxxx` | bits 6-0 |
//!
//! ID3v2.2 and ID3v2.3 frame sizes are plain big-endian integers
//! and must not be read with this module.

use crate::Error;
use bitstream_io::{BitRead, BitWrite, FromBitStream, ToBitStream};

/// Decodes a synchsafe integer of `N` bytes
///
/// # Errors
///
/// Returns [`Error::InvalidSynchsafe`] if any byte has its high bit set
/// or [`Error::ExcessiveSynchsafe`] if the value doesn't fit in a `u32`.
///
/// # Example
///
/// ```
/// use id3_codec::synchsafe::decode;
///
/// assert_eq!(decode([0x00, 0x00, 0x02, 0x01]).unwrap(), 257);
/// assert_eq!(decode([0x7F, 0x7F, 0x7F, 0x7F]).unwrap(), (1 << 28) - 1);
/// assert!(decode([0x00, 0x00, 0x00, 0x80]).is_err());
/// ```
pub fn decode<const N: usize>(bytes: [u8; N]) -> Result<u32, Error> {
    bytes.into_iter().try_fold(0u32, |acc, byte| {
        if byte & 0x80 != 0 {
            Err(Error::InvalidSynchsafe)
        } else if acc.leading_zeros() < 7 {
            Err(Error::ExcessiveSynchsafe)
        } else {
            Ok((acc << 7) | u32::from(byte))
        }
    })
}

/// Encodes value as a synchsafe integer of `N` bytes
///
/// # Errors
///
/// Returns [`Error::ExcessiveSynchsafe`] if the value
/// needs more than `7 * N` bits.
///
/// # Example
///
/// ```
/// use id3_codec::synchsafe::encode;
///
/// assert_eq!(encode::<4>(257).unwrap(), [0x00, 0x00, 0x02, 0x01]);
/// assert!(encode::<4>(1 << 28).is_err());
/// ```
pub fn encode<const N: usize>(value: u32) -> Result<[u8; N], Error> {
    if N * 7 < 32 && (value >> (N * 7)) != 0 {
        return Err(Error::ExcessiveSynchsafe);
    }

    let mut bytes = [0; N];
    for (i, byte) in bytes.iter_mut().rev().enumerate() {
        let shift = i * 7;
        if shift < 32 {
            *byte = ((value >> shift) & 0x7F) as u8;
        }
    }
    Ok(bytes)
}

/// A 4 byte synchsafe integer, as found in tag headers
///
/// # Example
/// ```
/// use bitstream_io::{BitReader, BitRead, BigEndian};
/// use id3_codec::synchsafe::Synchsafe;
///
/// let data: &[u8] = &[0x00, 0x00, 0x02, 0x01];
/// let mut r = BitReader::endian(data, BigEndian);
/// assert_eq!(r.parse::<Synchsafe>().unwrap(), Synchsafe(257));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Synchsafe(pub u32);

impl Synchsafe {
    /// The largest value a 4 byte synchsafe integer can hold
    pub const MAX: u32 = (1 << 28) - 1;
}

impl From<Synchsafe> for u32 {
    fn from(Synchsafe(u): Synchsafe) -> u32 {
        u
    }
}

impl TryFrom<usize> for Synchsafe {
    type Error = Error;

    fn try_from(u: usize) -> Result<Self, Error> {
        u32::try_from(u)
            .ok()
            .filter(|u| *u <= Self::MAX)
            .map(Self)
            .ok_or(Error::ExcessiveSynchsafe)
    }
}

impl FromBitStream for Synchsafe {
    type Error = Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        decode(r.read_to::<[u8; 4]>()?).map(Self)
    }
}

impl ToBitStream for Synchsafe {
    type Error = Error;

    fn to_writer<W: BitWrite + ?Sized>(&self, w: &mut W) -> Result<(), Self::Error> {
        w.write_from(encode::<4>(self.0)?)?;
        Ok(())
    }
}

#[test]
fn test_synchsafe() {
    for value in [0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 1 << 21, Synchsafe::MAX] {
        let bytes = encode::<4>(value).unwrap();
        assert!(bytes.iter().all(|b| b & 0x80 == 0));
        assert_eq!(decode(bytes).unwrap(), value);
    }

    // a 5 byte field holds any u32
    assert_eq!(decode(encode::<5>(u32::MAX).unwrap()).unwrap(), u32::MAX);
    assert!(matches!(
        decode([0x7F, 0x7F, 0x7F, 0x7F, 0x7F]),
        Err(Error::ExcessiveSynchsafe)
    ));

    assert!(matches!(
        decode([0xFF, 0x00, 0x00, 0x00]),
        Err(Error::InvalidSynchsafe)
    ));
}

#[test]
fn test_synchsafe_bitstream() {
    use bitstream_io::{BigEndian, BitReader, BitWriter};

    let mut data = Vec::new();
    BitWriter::endian(&mut data, BigEndian)
        .build(&Synchsafe(0x0FAB_CDEF))
        .unwrap();
    assert_eq!(data, [0x7D, 0x2F, 0x1B, 0x6F]);

    let mut r = BitReader::endian(data.as_slice(), BigEndian);
    assert_eq!(r.parse::<Synchsafe>().unwrap(), Synchsafe(0x0FAB_CDEF));

    assert!(matches!(
        BitWriter::endian(std::io::sink(), BigEndian).build(&Synchsafe(1 << 28)),
        Err(Error::ExcessiveSynchsafe)
    ));
}
