//! Fixed-layout IPv4, UDP and TCP headers.
//!
//! Transport headers are serialized in network byte order with no padding.
//! The IPv4 header only carries the semantic field values; its byte layout is
//! delegated to pnet (see [`Ipv4Header::marshal`]).
mod ipv4;
mod tcp;
mod udp;

pub use ipv4::*;
pub use tcp::*;
pub use udp::*;

use crate::checksum::internet_checksum;
use crate::models::L4;
use crate::pseudo_header::{PseudoHeader, PSEUDO_HEADER_SIZE};

/// A transport header whose checksum covers the IPv4 pseudo-header.
pub trait TransportHeader {
    /// The protocol number written in the IP header and the pseudo-header.
    const PROTOCOL: L4;
    /// Size of the serialized header, in bytes.
    const SIZE: usize;

    /// Append the serialized header to the buffer.
    fn write_to(&self, buffer: &mut Vec<u8>);

    fn checksum(&self) -> u16;

    fn set_checksum(&mut self, checksum: u16);

    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(Self::SIZE);
        self.write_to(&mut buffer);
        buffer
    }

    /// Length of the segment (this header and the payload).
    fn segment_length(payload_size: usize) -> u16 {
        (Self::SIZE + payload_size) as u16
    }

    /// Compute the checksum over `pseudo-header | header | payload` and store it.
    ///
    /// The checksum field is zeroed before serializing the header.
    fn compute_checksum(&mut self, ip: &Ipv4Header, payload: &[u8]) -> u16 {
        self.set_checksum(0);
        let pseudo_header = PseudoHeader::new(
            ip.src_addr,
            ip.dst_addr,
            Self::PROTOCOL,
            Self::segment_length(payload.len()),
        );
        let mut buffer = Vec::with_capacity(PSEUDO_HEADER_SIZE + Self::SIZE + payload.len());
        buffer.extend_from_slice(&pseudo_header.to_bytes());
        self.write_to(&mut buffer);
        buffer.extend_from_slice(payload);
        let checksum = internet_checksum(&buffer);
        self.set_checksum(checksum);
        checksum
    }
}
