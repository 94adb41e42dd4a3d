//! Functions for building probe packets.
//!
//! A probe is returned in two parts: the IPv4 header, with its checksum set,
//! and the transport header followed by the payload.
//!
//! # Examples
//!
//! ```
//! use std::net::Ipv4Addr;
//! use probecraft::builder::{assemble, ProbeBuilder};
//!
//! let builder = ProbeBuilder::new(Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(198, 51, 100, 7));
//! let (ip, udp) = builder.build_ipv4_udp(33434, 33535, 1, 1, 0).unwrap();
//! assert_eq!(ip.total_length, 60);
//!
//! let packet = assemble(&ip, &udp).unwrap();
//! assert_eq!(packet.len(), 60);
//! ```
mod builders;
mod packet;

pub use builders::*;
pub use packet::*;
