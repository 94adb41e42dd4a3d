use crate::error::ConfigurationError;
use crate::headers::Ipv4Header;

/// Size of the probe payload in bytes.
pub const PAYLOAD_SIZE: usize = 32;

/// First byte of the probe payload; byte `i` is `PAYLOAD_START + i`.
pub const PAYLOAD_START: u8 = 64;

/// The fixed probe payload: `[64, 65, ..., 95]`.
///
/// Replies quote the start of the probe, so the payload is kept deterministic.
pub fn probe_payload() -> [u8; PAYLOAD_SIZE] {
    let mut payload = [0u8; PAYLOAD_SIZE];
    for (i, byte) in payload.iter_mut().enumerate() {
        *byte = PAYLOAD_START + i as u8;
    }
    payload
}

/// Merge the checksum-bearing IPv4 header with the transport buffer.
///
/// This is what a raw socket transmitter sends on the wire.
pub fn assemble(ip: &Ipv4Header, transport: &[u8]) -> Result<Vec<u8>, ConfigurationError> {
    let header = ip.marshal()?;
    let mut packet = Vec::with_capacity(header.len() + transport.len());
    packet.extend_from_slice(&header);
    packet.extend_from_slice(transport);
    Ok(packet)
}
