//! Functions for computing the Internet checksum (RFC 1071).

/// Sum the buffer as big-endian 16-bit words and fold the carries back in.
///
/// An odd trailing byte is treated as the high byte of a word whose low byte is zero.
/// The result is the one's-complement sum, before complementing.
pub fn ones_complement_sum(buffer: &[u8]) -> u16 {
    let mut chunks = buffer.chunks_exact(2);
    let mut sum: u64 = chunks
        .by_ref()
        .map(|word| u16::from_be_bytes([word[0], word[1]]) as u64)
        .sum();
    if let [last] = chunks.remainder() {
        sum += (*last as u64) << 8;
    }
    while sum > 0xFFFF {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }
    sum as u16
}

/// Compute the Internet checksum of the buffer.
///
/// From RFC 768: an all zero transmitted checksum means that no checksum was
/// generated, so a computed zero is transmitted as all ones instead.
pub fn internet_checksum(buffer: &[u8]) -> u16 {
    match !ones_complement_sum(buffer) {
        0 => 0xFFFF,
        checksum => checksum,
    }
}

/// Check a buffer that already carries its checksum.
///
/// The folded sum of a valid buffer is all ones, i.e. its complement is zero.
pub fn is_valid_checksum(buffer: &[u8]) -> bool {
    !ones_complement_sum(buffer) == 0
}

#[cfg(test)]
mod tests {
    use crate::checksum::{internet_checksum, is_valid_checksum, ones_complement_sum};

    #[test]
    fn test_empty_buffer() {
        assert_eq!(ones_complement_sum(&[]), 0);
        assert_eq!(internet_checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_odd_length_pads_low_byte() {
        assert_eq!(internet_checksum(&[0xAB]), !0xAB00);
        assert_eq!(internet_checksum(&[0xAB]), internet_checksum(&[0xAB, 0x00]));
        assert_ne!(internet_checksum(&[0xAB]), internet_checksum(&[0x00, 0xAB]));
    }

    #[test]
    fn test_rfc1071_example() {
        // RFC 1071 section 3: the folded sum of these words is 0xddf2.
        let buffer = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(ones_complement_sum(&buffer), 0xddf2);
        assert_eq!(internet_checksum(&buffer), 0x220d);
    }

    #[test]
    fn test_ipv4_header_example() {
        // Checksum field zeroed.
        let header = [
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xc0, 0xa8,
            0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
        ];
        assert_eq!(internet_checksum(&header), 0xb861);
    }

    #[test]
    fn test_multiple_carries() {
        let buffer = [0xFF; 1024];
        assert_eq!(ones_complement_sum(&buffer), 0xFFFF);
        // The complement is zero, which is transmitted as all ones.
        assert_eq!(internet_checksum(&buffer), 0xFFFF);
    }

    #[test]
    fn test_zero_is_never_returned() {
        let cases: [&[u8]; 5] = [&[], &[0x00], &[0xFF, 0xFF], &[0xFF; 7], &[0x12, 0x34, 0xED, 0xCB]];
        for buffer in cases {
            assert_ne!(internet_checksum(buffer), 0);
        }
    }

    #[test]
    fn test_verification() {
        let mut buffer = vec![0x45, 0x00, 0x00, 0x3c, 0x1c, 0x46, 0x40, 0x00, 0x40, 0x06];
        buffer.extend_from_slice(&[0x00, 0x00]);
        buffer.extend_from_slice(&[0xac, 0x10, 0x0a, 0x63, 0xac, 0x10, 0x0a, 0x0c]);
        let checksum = internet_checksum(&buffer);
        buffer[10..12].copy_from_slice(&checksum.to_be_bytes());
        assert!(is_valid_checksum(&buffer));
        buffer[8] = 0x3f;
        assert!(!is_valid_checksum(&buffer));
    }
}
