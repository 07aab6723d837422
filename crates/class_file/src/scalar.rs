use byteorder::{BigEndian, ByteOrder};

/// Interprets a 1, 2 or 4 byte field as an unsigned big-endian integer.
///
/// Panics on any other width; callers always pass a buffer filled by an exact read of a
/// fixed width.
pub fn decode_unsigned(bytes: &[u8]) -> u32 {
    match bytes.len() {
        1 => bytes[0] as u32,
        2 => BigEndian::read_u16(bytes) as u32,
        4 => BigEndian::read_u32(bytes),
        width => panic!("unsupported scalar width {}", width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_significant_byte_first() {
        assert_eq!(0x0102, decode_unsigned(&[0x01, 0x02]));
        assert_eq!(0xCAFEBABE, decode_unsigned(&[0xCA, 0xFE, 0xBA, 0xBE]));
        assert_eq!(0x34, decode_unsigned(&[0x00, 0x00, 0x00, 0x34]));
    }

    #[test]
    fn test_no_sign_interpretation() {
        assert_eq!(0xFF, decode_unsigned(&[0xFF]));
        assert_eq!(0xFFFF, decode_unsigned(&[0xFF, 0xFF]));
        assert_eq!(0xFFFF_FFFF, decode_unsigned(&[0xFF; 4]));
    }

    #[test]
    #[should_panic]
    fn test_rejects_three_byte_width() {
        decode_unsigned(&[0, 0, 0]);
    }
}
