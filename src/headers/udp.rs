use crate::headers::TransportHeader;
use crate::models::L4;

/// Size of the UDP header in bytes.
pub const UDP_HEADER_SIZE: usize = 8;

/// RFC 768 UDP header.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    /// Header and payload length, in bytes.
    pub length: u16,
    pub checksum: u16,
}

impl UdpHeader {
    /// Build a header for a payload of the given size, with a zero checksum.
    pub fn new(src_port: u16, dst_port: u16, payload_size: usize) -> Self {
        UdpHeader {
            src_port,
            dst_port,
            length: Self::segment_length(payload_size),
            checksum: 0,
        }
    }

    /// Decode the first eight bytes of the buffer.
    pub fn from_bytes(buffer: &[u8]) -> Option<Self> {
        let buffer = buffer.get(..UDP_HEADER_SIZE)?;
        let word = |i: usize| u16::from_be_bytes([buffer[i], buffer[i + 1]]);
        Some(UdpHeader {
            src_port: word(0),
            dst_port: word(2),
            length: word(4),
            checksum: word(6),
        })
    }
}

impl TransportHeader for UdpHeader {
    const PROTOCOL: L4 = L4::UDP;
    const SIZE: usize = UDP_HEADER_SIZE;

    fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.src_port.to_be_bytes());
        buffer.extend_from_slice(&self.dst_port.to_be_bytes());
        buffer.extend_from_slice(&self.length.to_be_bytes());
        buffer.extend_from_slice(&self.checksum.to_be_bytes());
    }

    fn checksum(&self) -> u16 {
        self.checksum
    }

    fn set_checksum(&mut self, checksum: u16) {
        self.checksum = checksum;
    }
}
