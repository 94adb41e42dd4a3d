use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use log::{debug, trace};

use crate::builder::{probe_payload, PAYLOAD_SIZE};
use crate::error::ConfigurationError;
use crate::headers::{
    Ipv4Header, TcpFlags, TcpHeader, TransportHeader, UdpHeader, IPV4_HEADER_SIZE,
};
use crate::models::{Probe, L4};

/// Crafts IPv4 probes between a fixed pair of addresses.
///
/// Building is stateless: every call creates its own headers and buffer,
/// so a builder can be shared between threads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeBuilder {
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
}

impl ProbeBuilder {
    pub fn new(src_addr: Ipv4Addr, dst_addr: Ipv4Addr) -> Self {
        ProbeBuilder { src_addr, dst_addr }
    }

    pub fn src_addr(&self) -> Ipv4Addr {
        self.src_addr
    }

    pub fn dst_addr(&self) -> Ipv4Addr {
        self.dst_addr
    }

    /// Build the probe described by `probe`.
    ///
    /// TCP probes are sent with a zero sequence number.
    pub fn build(&self, probe: &Probe) -> Result<(Ipv4Header, Vec<u8>), ConfigurationError> {
        match probe.l4_protocol() {
            L4::UDP => self.build_ipv4_udp(
                probe.src_port,
                probe.dst_port,
                probe.ttl,
                probe.id,
                probe.tos,
            ),
            L4::TCP => self.build_ipv4_tcp(
                probe.src_port,
                probe.dst_port,
                probe.ttl,
                probe.id,
                probe.tos,
                0,
            ),
        }
    }

    /// Build a UDP probe.
    ///
    /// Returns the IPv4 header, with its checksum set, and the UDP header
    /// followed by the payload. The IP header is not part of the buffer:
    /// use [`crate::builder::assemble`] to merge them.
    pub fn build_ipv4_udp(
        &self,
        src_port: u16,
        dst_port: u16,
        ttl: u8,
        id: u16,
        tos: u8,
    ) -> Result<(Ipv4Header, Vec<u8>), ConfigurationError> {
        let ip = self.build_ipv4::<UdpHeader>(ttl, id, tos)?;
        let udp = UdpHeader::new(src_port, dst_port, PAYLOAD_SIZE);
        let buffer = build_transport(&ip, udp);
        Ok((ip, buffer))
    }

    /// Build a TCP SYN probe.
    ///
    /// Same layout as [`ProbeBuilder::build_ipv4_udp`] with a 20-byte TCP header.
    pub fn build_ipv4_tcp(
        &self,
        src_port: u16,
        dst_port: u16,
        ttl: u8,
        id: u16,
        tos: u8,
        sequence: u32,
    ) -> Result<(Ipv4Header, Vec<u8>), ConfigurationError> {
        let ip = self.build_ipv4::<TcpHeader>(ttl, id, tos)?;
        let tcp = TcpHeader::new(src_port, dst_port, sequence, TcpFlags::SYN);
        let buffer = build_transport(&ip, tcp);
        Ok((ip, buffer))
    }

    fn build_ipv4<T: TransportHeader>(
        &self,
        ttl: u8,
        id: u16,
        tos: u8,
    ) -> Result<Ipv4Header, ConfigurationError> {
        let mut ip = Ipv4Header {
            tos,
            total_length: (IPV4_HEADER_SIZE + T::SIZE + PAYLOAD_SIZE) as u16,
            identification: id,
            ttl,
            protocol: T::PROTOCOL.into(),
            src_addr: self.src_addr,
            dst_addr: self.dst_addr,
            ..Ipv4Header::default()
        };
        if let Err(error) = ip.compute_checksum() {
            debug!("rejected IPv4 header {:?}: {}", ip, error);
            return Err(error);
        }
        Ok(ip)
    }
}

/// Compute the transport checksum and serialize `header | payload`.
fn build_transport<T: TransportHeader>(ip: &Ipv4Header, mut header: T) -> Vec<u8> {
    let payload = probe_payload();
    header.compute_checksum(ip, &payload);
    trace!(
        "protocol={} ttl={} id={} ip_checksum={:#06x} l4_checksum={:#06x}",
        T::PROTOCOL,
        ip.ttl,
        ip.identification,
        ip.checksum,
        header.checksum()
    );
    let mut buffer = Vec::with_capacity(T::SIZE + payload.len());
    header.write_to(&mut buffer);
    buffer.extend_from_slice(&payload);
    buffer
}

impl Display for ProbeBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "src_addr={}", self.src_addr)?;
        write!(f, " dst_addr={}", self.dst_addr)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::builder::ProbeBuilder;
    use crate::headers::{TcpHeader, UdpHeader};
    use crate::models::{Probe, L4};

    fn builder() -> ProbeBuilder {
        ProbeBuilder::new(Ipv4Addr::new(192, 0, 2, 0), Ipv4Addr::new(1, 1, 1, 1))
    }

    #[test]
    fn test_build_dispatches_on_protocol() {
        let mut probe = Probe {
            src_port: 24000,
            dst_port: 33434,
            ttl: 4,
            id: 7,
            tos: 0,
            protocol: L4::UDP,
        };
        let (ip, buffer) = builder().build(&probe).unwrap();
        assert_eq!(ip.protocol, 17);
        assert_eq!(buffer.len(), 40);
        assert_eq!(UdpHeader::from_bytes(&buffer).unwrap().src_port, 24000);

        probe.protocol = L4::TCP;
        let (ip, buffer) = builder().build(&probe).unwrap();
        assert_eq!(ip.protocol, 6);
        assert_eq!(ip.total_length, 72);
        assert_eq!(buffer.len(), 52);
        assert_eq!(TcpHeader::from_bytes(&buffer).unwrap().sequence, 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(builder().to_string(), "src_addr=192.0.2.0 dst_addr=1.1.1.1");
    }
}
