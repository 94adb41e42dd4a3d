use serde::{Deserialize, Serialize};

use crate::models::protocols::L4;

/// The parameters of a single probe packet.
///
/// The destination and source addresses are not part of the probe,
/// they are held by the [`crate::builder::ProbeBuilder`] that crafts it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub src_port: u16,
    pub dst_port: u16,
    pub ttl: u8,
    /// IP identification, used by reply matching to correlate ICMP errors.
    pub id: u16,
    pub tos: u8,
    pub protocol: L4,
}

impl Probe {
    pub fn l4_protocol(&self) -> L4 {
        self.protocol
    }
}
