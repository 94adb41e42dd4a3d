use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Transport protocol carried by a probe.
#[derive(
    Copy, Clone, Debug, Display, EnumString, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum L4 {
    /// 8-byte UDP header (protocol 17).
    UDP,
    /// 20-byte TCP header without options (protocol 6).
    TCP,
}

impl From<L4> for u8 {
    fn from(value: L4) -> Self {
        let val: IpNextHeaderProtocol = value.into();
        val.0
    }
}

impl From<L4> for IpNextHeaderProtocol {
    fn from(value: L4) -> Self {
        match value {
            L4::UDP => IpNextHeaderProtocols::Udp,
            L4::TCP => IpNextHeaderProtocols::Tcp,
        }
    }
}
