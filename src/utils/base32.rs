//! Decoding and encoding of base 32.
//!
//! The base 32 encoding is defined in [RFC 4648]. It is essentially a
//! case-insensitive version of base 64, which is necessary when encoding
//! binary data in domain names. The RFC defines two separate encodings,
//! called *base32* and *base32hex*. The DNS uses the latter version,
//! particularly in NSEC3, because it has the property that the encoding
//! maintains the order of the original data.
//!
//! This module currently only implements *base32hex* but uses the suffix
//! `_hex` wherever distinction would be necessary so the other flavor can
//! be added if it is ever needed. Padding is not used: the DNS always
//! knows the length of the encoded data from its wire format.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use core::fmt;
use std::vec::Vec;

//------------ Re-exports ----------------------------------------------------

pub use super::base16::DecodeError;

//------------ Convenience Functions -----------------------------------------

/// Decodes a string with *base32hex* encoded data.
///
/// The function attempts to decode the entire string and returns the
/// resulting octets. Upper and lower case letters are both accepted.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut res = Vec::with_capacity(s.len() * 5 / 8 + 1);
    let mut acc = 0u64;
    let mut pending = 0;
    for ch in s.chars() {
        acc = acc << 5 | u64::from(value_hex(ch)?);
        pending += 1;
        if pending == 8 {
            res.extend_from_slice(&acc.to_be_bytes()[3..]);
            acc = 0;
            pending = 0;
        }
    }
    match pending {
        0 => {}
        1 | 3 | 6 => return Err(DecodeError::ShortInput),
        _ => {
            // Left-align the remaining bits in the 40 bit group and take
            // the full octets.
            acc <<= 5 * (8 - pending);
            let octets = 5 * pending / 8;
            res.extend_from_slice(&acc.to_be_bytes()[3..3 + octets]);
        }
    }
    Ok(res)
}

/// Encodes binary data in *base32hex* and writes it into a format stream.
///
/// This function is intended to be used in implementations of formatting
/// traits:
///
/// ```
/// use core::fmt;
/// use dns_wire::utils::base32;
///
/// struct Foo<'a>(&'a [u8]);
///
/// impl<'a> fmt::Display for Foo<'a> {
///     fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
///         base32::display_hex(&self.0, f)
///     }
/// }
/// ```
pub fn display_hex<B, W>(bytes: &B, f: &mut W) -> fmt::Result
where
    B: AsRef<[u8]> + ?Sized,
    W: fmt::Write,
{
    for chunk in bytes.as_ref().chunks(5) {
        let mut buf = [0u8; 5];
        buf[..chunk.len()].copy_from_slice(chunk);
        let acc = u64::from_be_bytes([
            0, 0, 0, buf[0], buf[1], buf[2], buf[3], buf[4],
        ]);

        // A full five octet chunk produces eight characters, a partial
        // chunk only as many as needed to cover its bits.
        let symbols = [2, 4, 5, 7, 8][chunk.len() - 1];
        for i in 0..symbols {
            let value = (acc >> (35 - 5 * i)) & 0x1F;
            f.write_char(ENCODE_HEX_ALPHABET[value as usize])?;
        }
    }
    Ok(())
}

/// Encodes binary data in *base32hex* and returns it as a string.
pub fn encode_string_hex<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> String {
    let mut res = String::with_capacity((bytes.as_ref().len() / 5 + 1) * 8);
    display_hex(bytes, &mut res).expect("write to string");
    res
}

/// Returns the value of a single *base32hex* character.
fn value_hex(ch: char) -> Result<u8, DecodeError> {
    if ch > (127 as char) {
        return Err(DecodeError::IllegalChar(ch));
    }
    let res = DECODE_HEX_ALPHABET[ch as usize];
    if res == 0xFF {
        Err(DecodeError::IllegalChar(ch))
    } else {
        Ok(res)
    }
}

//------------ Constants -----------------------------------------------------

/// The alphabet used for decoding *base32hex.*
///
/// This maps encoding characters into their values. A value of 0xFF stands
/// in for illegal characters. We only provide the first 128 characters
/// since the alphabet will only use ASCII characters.
const DECODE_HEX_ALPHABET: [u8; 128] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x00 .. 0x07
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x08 .. 0x0F
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x10 .. 0x17
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x18 .. 0x1F
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x20 .. 0x27
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x28 .. 0x2F
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, // 0x30 .. 0x37
    0x08, 0x09, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x38 .. 0x3F
    0xFF, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, // 0x40 .. 0x47
    0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, // 0x48 .. 0x4F
    0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0xFF, // 0x50 .. 0x57
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x58 .. 0x5F
    0xFF, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, // 0x60 .. 0x67
    0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, // 0x68 .. 0x6F
    0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0xFF, // 0x70 .. 0x77
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // 0x78 .. 0x7F
];

/// The alphabet used for encoding *base32hex.*
const ENCODE_HEX_ALPHABET: [char; 32] = [
    '0', '1', '2', '3', '4', '5', '6', '7', // 0x00 .. 0x07
    '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', // 0x08 .. 0x0F
    'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', // 0x10 .. 0x17
    'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', // 0x18 .. 0x1F
];

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_str_hex() {
        assert_eq!(&decode_hex("").unwrap(), b"");
        assert_eq!(&decode_hex("CO").unwrap(), b"f");
        assert_eq!(&decode_hex("CPNG").unwrap(), b"fo");
        assert_eq!(&decode_hex("CPNMU").unwrap(), b"foo");
        assert_eq!(&decode_hex("CPNMUOG").unwrap(), b"foob");
        assert_eq!(&decode_hex("CPNMUOJ1").unwrap(), b"fooba");
        assert_eq!(&decode_hex("CPNMUOJ1E8").unwrap(), b"foobar");
        assert_eq!(&decode_hex("co").unwrap(), b"f");
        assert_eq!(&decode_hex("cpng").unwrap(), b"fo");
        assert_eq!(&decode_hex("cpnmu").unwrap(), b"foo");
        assert_eq!(&decode_hex("cpnmuog").unwrap(), b"foob");
        assert_eq!(&decode_hex("cpnmuoj1").unwrap(), b"fooba");
        assert_eq!(&decode_hex("cpnmuoj1e8").unwrap(), b"foobar");

        assert_eq!(decode_hex("C"), Err(DecodeError::ShortInput));
        assert_eq!(decode_hex("C!"), Err(DecodeError::IllegalChar('!')));
    }

    #[test]
    fn test_display_hex() {
        fn fmt(s: &[u8]) -> String {
            let mut out = String::new();
            display_hex(s, &mut out).unwrap();
            out
        }

        assert_eq!(fmt(b""), "");
        assert_eq!(fmt(b"f"), "CO");
        assert_eq!(fmt(b"fo"), "CPNG");
        assert_eq!(fmt(b"foo"), "CPNMU");
        assert_eq!(fmt(b"foob"), "CPNMUOG");
        assert_eq!(fmt(b"fooba"), "CPNMUOJ1");
        assert_eq!(fmt(b"foobar"), "CPNMUOJ1E8");
    }

    #[test]
    fn round_trip_hash() {
        let hash = decode_hex("K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H").unwrap();
        assert_eq!(hash.len(), 20);
        assert_eq!(
            encode_string_hex(&hash),
            "K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H"
        );
    }
}
