use std::net::Ipv4Addr;

use pnet::packet::ip::IpNextHeaderProtocol;
use pnet::packet::ipv4::{Ipv4Packet, MutableIpv4Packet};

use crate::checksum::internet_checksum;
use crate::error::ConfigurationError;

/// Size of the IPv4 header without options, in bytes.
pub const IPV4_HEADER_SIZE: usize = 20;

/// IPv4 header field values.
///
/// The byte layout is not handled here: [`Ipv4Header::marshal`] hands the
/// fields over to pnet, which writes the RFC 791 header.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ipv4Header {
    pub version: u8,
    /// Header length in 32-bit words.
    pub header_length: u8,
    pub tos: u8,
    pub total_length: u16,
    pub identification: u16,
    /// 3 bits.
    pub flags: u8,
    /// 13 bits.
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
}

impl Default for Ipv4Header {
    fn default() -> Self {
        Ipv4Header {
            version: 4,
            header_length: (IPV4_HEADER_SIZE / 4) as u8,
            tos: 0,
            total_length: IPV4_HEADER_SIZE as u16,
            identification: 0,
            flags: 0,
            fragment_offset: 0,
            ttl: 0,
            protocol: 0,
            checksum: 0,
            src_addr: Ipv4Addr::UNSPECIFIED,
            dst_addr: Ipv4Addr::UNSPECIFIED,
        }
    }
}

impl Ipv4Header {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.version != 4 {
            return Err(ConfigurationError::InvalidVersion(self.version));
        }
        if self.header_length as usize * 4 != IPV4_HEADER_SIZE {
            return Err(ConfigurationError::InvalidHeaderLength(self.header_length));
        }
        if (self.total_length as usize) < IPV4_HEADER_SIZE {
            return Err(ConfigurationError::TotalLengthTooSmall {
                total_length: self.total_length,
                header_length: IPV4_HEADER_SIZE as u16,
            });
        }
        if self.flags > 0b111 {
            return Err(ConfigurationError::InvalidFlags(self.flags));
        }
        if self.fragment_offset > 0x1FFF {
            return Err(ConfigurationError::InvalidFragmentOffset(
                self.fragment_offset,
            ));
        }
        Ok(())
    }

    /// Serialize the header, checksum field included as-is.
    pub fn marshal(&self) -> Result<[u8; IPV4_HEADER_SIZE], ConfigurationError> {
        self.validate()?;
        let mut buffer = [0u8; IPV4_HEADER_SIZE];
        {
            let mut ip = MutableIpv4Packet::new(&mut buffer).ok_or_else(|| {
                ConfigurationError::BufferTooSmall {
                    expected: Ipv4Packet::minimum_packet_size(),
                    actual: IPV4_HEADER_SIZE,
                }
            })?;
            ip.set_version(self.version);
            ip.set_header_length(self.header_length);
            ip.set_dscp(self.tos >> 2);
            ip.set_ecn(self.tos & 0b11);
            ip.set_total_length(self.total_length);
            ip.set_identification(self.identification);
            ip.set_flags(self.flags);
            ip.set_fragment_offset(self.fragment_offset);
            ip.set_ttl(self.ttl);
            ip.set_next_level_protocol(IpNextHeaderProtocol::new(self.protocol));
            ip.set_checksum(self.checksum);
            ip.set_source(self.src_addr);
            ip.set_destination(self.dst_addr);
        }
        Ok(buffer)
    }

    /// Zero the checksum field, serialize the header and store its checksum.
    pub fn compute_checksum(&mut self) -> Result<u16, ConfigurationError> {
        self.checksum = 0;
        let bytes = self.marshal()?;
        self.checksum = internet_checksum(&bytes);
        Ok(self.checksum)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::checksum::is_valid_checksum;
    use crate::error::ConfigurationError;
    use crate::headers::Ipv4Header;

    fn header() -> Ipv4Header {
        Ipv4Header {
            tos: 0xB8,
            total_length: 0x73,
            flags: 0b010,
            ttl: 64,
            protocol: 17,
            src_addr: Ipv4Addr::new(192, 168, 0, 1),
            dst_addr: Ipv4Addr::new(192, 168, 0, 199),
            ..Ipv4Header::default()
        }
    }

    #[test]
    fn test_marshal_layout() {
        let mut ip = header();
        ip.tos = 0;
        let bytes = ip.marshal().unwrap();
        assert_eq!(
            bytes,
            [
                0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xc0,
                0xa8, 0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7
            ]
        );
        assert_eq!(ip.compute_checksum().unwrap(), 0xb861);
        assert_eq!(ip.marshal().unwrap()[10..12], [0xb8, 0x61]);
    }

    #[test]
    fn test_tos_is_split_into_dscp_and_ecn() {
        assert_eq!(header().marshal().unwrap()[1], 0xB8);
    }

    #[test]
    fn test_checksum_is_not_accumulated() {
        let mut ip = header();
        let first = ip.compute_checksum().unwrap();
        let second = ip.compute_checksum().unwrap();
        assert_eq!(first, second);
        assert!(is_valid_checksum(&ip.marshal().unwrap()));
    }

    #[test]
    fn test_marshal_rejects_invalid_fields() {
        let cases = [
            (
                Ipv4Header { version: 6, ..header() },
                ConfigurationError::InvalidVersion(6),
            ),
            (
                Ipv4Header { header_length: 6, ..header() },
                ConfigurationError::InvalidHeaderLength(6),
            ),
            (
                Ipv4Header { total_length: 19, ..header() },
                ConfigurationError::TotalLengthTooSmall {
                    total_length: 19,
                    header_length: 20,
                },
            ),
            (
                Ipv4Header { flags: 0b1000, ..header() },
                ConfigurationError::InvalidFlags(0b1000),
            ),
            (
                Ipv4Header { fragment_offset: 0x2000, ..header() },
                ConfigurationError::InvalidFragmentOffset(0x2000),
            ),
        ];
        for (mut ip, error) in cases {
            assert_eq!(ip.marshal(), Err(error));
            assert_eq!(ip.compute_checksum(), Err(error));
        }
    }
}
