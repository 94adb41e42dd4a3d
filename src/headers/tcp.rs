use std::ops::BitOr;

use crate::headers::TransportHeader;
use crate::models::L4;

/// Size of the TCP header without options, in bytes.
pub const TCP_HEADER_SIZE: usize = 20;

/// Data offset of a header without options, in 32-bit words.
pub const TCP_DATA_OFFSET: u8 = (TCP_HEADER_SIZE / 4) as u8;

/// The six RFC 793 control bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TcpFlags(u8);

impl TcpFlags {
    pub const FIN: TcpFlags = TcpFlags(1 << 0);
    pub const SYN: TcpFlags = TcpFlags(1 << 1);
    pub const RST: TcpFlags = TcpFlags(1 << 2);
    pub const PSH: TcpFlags = TcpFlags(1 << 3);
    pub const ACK: TcpFlags = TcpFlags(1 << 4);
    pub const URG: TcpFlags = TcpFlags(1 << 5);

    const MASK: u8 = 0b0011_1111;

    pub const fn empty() -> Self {
        TcpFlags(0)
    }

    /// Keep only the six control bits of `bits`.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        TcpFlags(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: TcpFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TcpFlags {
    type Output = TcpFlags;

    fn bitor(self, rhs: TcpFlags) -> TcpFlags {
        TcpFlags(self.0 | rhs.0)
    }
}

/// Pack the data offset in the high nibble of the first byte and the flags
/// in the low six bits of the second byte.
pub fn pack_offset_flags(data_offset: u8, flags: TcpFlags) -> [u8; 2] {
    [(data_offset & 0x0F) << 4, flags.bits() & TcpFlags::MASK]
}

/// Inverse of [`pack_offset_flags`]; reserved bits are ignored.
pub fn unpack_offset_flags(bytes: [u8; 2]) -> (u8, TcpFlags) {
    (bytes[0] >> 4, TcpFlags::from_bits_truncate(bytes[1]))
}

/// RFC 793 TCP header, without options.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub sequence: u32,
    pub acknowledgement: u32,
    /// Header length in 32-bit words (4 bits).
    pub data_offset: u8,
    pub flags: TcpFlags,
    pub window: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
}

impl TcpHeader {
    /// Build an option-less header with a full window and a zero checksum.
    pub fn new(src_port: u16, dst_port: u16, sequence: u32, flags: TcpFlags) -> Self {
        TcpHeader {
            src_port,
            dst_port,
            sequence,
            acknowledgement: 0,
            data_offset: TCP_DATA_OFFSET,
            flags,
            window: u16::MAX,
            checksum: 0,
            urgent_pointer: 0,
        }
    }

    /// Decode the first twenty bytes of the buffer.
    pub fn from_bytes(buffer: &[u8]) -> Option<Self> {
        let buffer = buffer.get(..TCP_HEADER_SIZE)?;
        let word = |i: usize| u16::from_be_bytes([buffer[i], buffer[i + 1]]);
        let dword = |i: usize| {
            u32::from_be_bytes([buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]])
        };
        let (data_offset, flags) = unpack_offset_flags([buffer[12], buffer[13]]);
        Some(TcpHeader {
            src_port: word(0),
            dst_port: word(2),
            sequence: dword(4),
            acknowledgement: dword(8),
            data_offset,
            flags,
            window: word(14),
            checksum: word(16),
            urgent_pointer: word(18),
        })
    }
}

impl TransportHeader for TcpHeader {
    const PROTOCOL: L4 = L4::TCP;
    const SIZE: usize = TCP_HEADER_SIZE;

    fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.src_port.to_be_bytes());
        buffer.extend_from_slice(&self.dst_port.to_be_bytes());
        buffer.extend_from_slice(&self.sequence.to_be_bytes());
        buffer.extend_from_slice(&self.acknowledgement.to_be_bytes());
        buffer.extend_from_slice(&pack_offset_flags(self.data_offset, self.flags));
        buffer.extend_from_slice(&self.window.to_be_bytes());
        buffer.extend_from_slice(&self.checksum.to_be_bytes());
        buffer.extend_from_slice(&self.urgent_pointer.to_be_bytes());
    }

    fn checksum(&self) -> u16 {
        self.checksum
    }

    fn set_checksum(&mut self, checksum: u16) {
        self.checksum = checksum;
    }
}
