//! The pseudo-header prepended to a transport segment when computing its checksum.
use std::net::Ipv4Addr;

use crate::models::L4;

/// Encode only the low byte of the segment length.
///
/// RFC 768 and RFC 793 define a two-byte length field; probes are always
/// shorter than 256 bytes so only the low byte is written, the high byte is
/// always zero. Set to `false` to encode the full length.
pub const TRUNCATE_SEGMENT_LENGTH: bool = true;

/// Size of the pseudo-header in bytes.
pub const PSEUDO_HEADER_SIZE: usize = 12;

/// The IPv4 pseudo-header: `src(4) | dst(4) | 0 | protocol | length(2)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PseudoHeader {
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    pub protocol: L4,
    /// Transport header plus payload size, in bytes.
    pub length: u16,
}

impl PseudoHeader {
    pub fn new(src_addr: Ipv4Addr, dst_addr: Ipv4Addr, protocol: L4, length: u16) -> Self {
        PseudoHeader {
            src_addr,
            dst_addr,
            protocol,
            length,
        }
    }

    pub fn to_bytes(&self) -> [u8; PSEUDO_HEADER_SIZE] {
        let mut bytes = [0u8; PSEUDO_HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.src_addr.octets());
        bytes[4..8].copy_from_slice(&self.dst_addr.octets());
        bytes[8] = 0;
        bytes[9] = self.protocol.into();
        bytes[10..12].copy_from_slice(&encode_length(self.length));
        bytes
    }
}

fn encode_length(length: u16) -> [u8; 2] {
    if TRUNCATE_SEGMENT_LENGTH {
        [0, length as u8]
    } else {
        length.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::models::L4;
    use crate::pseudo_header::PseudoHeader;

    #[test]
    fn test_layout() {
        let src_addr = Ipv4Addr::new(192, 0, 2, 1);
        let dst_addr = Ipv4Addr::new(198, 51, 100, 7);
        let udp = PseudoHeader::new(src_addr, dst_addr, L4::UDP, 40).to_bytes();
        assert_eq!(udp, [192, 0, 2, 1, 198, 51, 100, 7, 0, 17, 0, 40]);
        let tcp = PseudoHeader::new(src_addr, dst_addr, L4::TCP, 52).to_bytes();
        assert_eq!(tcp[8..], [0, 6, 0, 52]);
    }

    #[test]
    fn test_length_truncation() {
        let header = PseudoHeader::new(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST, L4::UDP, 8 + 300);
        let bytes = header.to_bytes();
        assert_eq!(bytes[10], 0);
        assert_eq!(bytes[11], (308 % 256) as u8);
    }
}
