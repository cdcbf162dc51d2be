// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For handling the unsynchronization scheme
//!
//! Unsynchronization inserts a `0x00` byte after any `0xFF`
//! which could otherwise be mistaken for the start of an MPEG
//! sync code by a player unaware of ID3v2 tags.
//!
//! | Original | Unsynchronized |
//! |---------:|---------------:|
//! | `FF Ex` / `FF Fx` | `FF 00 Ex` / `FF 00 Fx` |
//! | `FF 00` | `FF 00 00` |
//! | `FF` (final byte) | `FF 00` |
//!
//! ID3v2.2 and ID3v2.3 unsynchronize the tag as a whole,
//! while ID3v2.4 unsynchronizes individual frames.

/// Whether a 0x00 must be inserted between these bytes
#[inline]
fn stuff_after(byte: u8, next: Option<u8>) -> bool {
    byte == 0xFF && next.is_none_or(|n| n >= 0xE0 || n == 0x00)
}

/// Returns `true` if unsynchronizing the data would change it
///
/// # Example
///
/// ```
/// use id3_codec::unsynch::needed;
///
/// assert!(!needed(&[0x01, 0xFF, 0x7F]));
/// assert!(needed(&[0x01, 0xFF, 0xFB]));
/// ```
pub fn needed(data: &[u8]) -> bool {
    data.iter()
        .enumerate()
        .any(|(i, b)| stuff_after(*b, data.get(i + 1).copied()))
}

/// Unsynchronizes the given data
///
/// # Example
///
/// ```
/// use id3_codec::unsynch::apply;
///
/// assert_eq!(
///     apply(&[0xFF, 0xFB, 0x90, 0xFF, 0x00, 0xFF]),
///     vec![0xFF, 0x00, 0xFB, 0x90, 0xFF, 0x00, 0x00, 0xFF, 0x00],
/// );
/// ```
pub fn apply(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(data.len() + data.len() / 16);

    for (i, byte) in data.iter().copied().enumerate() {
        output.push(byte);
        if stuff_after(byte, data.get(i + 1).copied()) {
            output.push(0x00);
        }
    }

    output
}

/// Removes unsynchronization from the given data
///
/// # Example
///
/// ```
/// use id3_codec::unsynch::remove;
///
/// assert_eq!(
///     remove(&[0xFF, 0x00, 0xFB, 0x90, 0xFF, 0x00, 0x00, 0xFF, 0x00]),
///     vec![0xFF, 0xFB, 0x90, 0xFF, 0x00, 0xFF],
/// );
/// ```
pub fn remove(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(data.len());
    let mut previous = None;

    for byte in data.iter().copied() {
        match (previous, byte) {
            (Some(0xFF), 0x00) => {
                // the stuffed byte is dropped and can't pair with another
                previous = None;
            }
            _ => {
                output.push(byte);
                previous = Some(byte);
            }
        }
    }

    output
}

#[test]
fn test_unsynch_roundtrip() {
    assert_eq!(apply(&[]), Vec::<u8>::new());
    assert_eq!(remove(&[]), Vec::<u8>::new());
    assert_eq!(apply(&[0xFF]), vec![0xFF, 0x00]);
    assert_eq!(apply(&[0xFF, 0xFF]), vec![0xFF, 0x00, 0xFF, 0x00]);
    assert_eq!(apply(&[0xFF, 0x00, 0x00]), vec![0xFF, 0x00, 0x00, 0x00]);

    // bytes which are more likely to need stuffing
    const INTERESTING: &[u8] = &[0x00, 0x01, 0x7F, 0xDF, 0xE0, 0xFE, 0xFF];

    for len in 0..64 {
        let data = (0..len)
            .map(|_| match fastrand::bool() {
                true => INTERESTING[fastrand::usize(0..INTERESTING.len())],
                false => fastrand::u8(..),
            })
            .collect::<Vec<u8>>();

        let unsynchronized = apply(&data);
        assert_eq!(remove(&unsynchronized), data);
        assert_eq!(needed(&data), unsynchronized.len() != data.len());

        // no false sync codes survive
        assert!(
            unsynchronized
                .windows(2)
                .all(|w| !(w[0] == 0xFF && w[1] >= 0xE0))
        );
    }
}

#[test]
fn test_unsynch_then_padding() {
    // padding written after an unsynchronized body must survive
    let mut data = apply(&[0x10, 0xFF]);
    data.extend([0x00; 4]);
    assert_eq!(remove(&data), vec![0x10, 0xFF, 0x00, 0x00, 0x00, 0x00]);
}
