//! Broadcast frame assembly.
//!
//! Wire format:
//!
//! ```text
//! [eth dst:6][eth src:6][ethertype:2]            Ethernet header, 14 bytes
//! [htype:2][ptype:2][hlen:1][plen:1][op:2]       ARP header, 28 bytes
//! [sha:6][spa:4][tha:6][tpa:4]
//! [channel:1][seq:1][payload:N]                  relay bytes
//! ```
//!
//! All multi-byte fields are big-endian.
//!
//! The ARP header is a disguise, not a resolution request: its fixed fields
//! are filled with constant placeholder values (operation = request, both
//! protocol addresses 0.0.0.0, target hardware address all-zero) purely so
//! the frame traverses ordinary broadcast-handling paths and looks like LAN
//! background noise.  Receivers read the bytes after the header and ignore
//! the header's ARP semantics.  Do not "correct" the header into a
//! conformant ARP message — deployed receivers key on this exact shape.

use std::fmt;

/// Length of the Ethernet header in bytes.
pub const ETH_HDR_SIZE: usize = 14;
/// Length of the ARP header in bytes.
pub const ARP_HDR_SIZE: usize = 28;
/// EtherType identifying an ARP payload.
pub const ETHERTYPE_ARP: u16 = 0x0806;
/// The all-ones broadcast hardware address.
pub const BROADCAST_MAC: MacAddr = MacAddr([0xFF; 6]);

const HTYPE_ETHERNET: u16 = 0x0001;
const PTYPE_IPV4: u16 = 0x0800;
const HLEN_ETHERNET: u8 = 6;
const PLEN_IPV4: u8 = 4;
const OP_REQUEST: u16 = 0x0001;
const NULL_MAC: [u8; 6] = [0; 6];
const NULL_IPV4: [u8; 4] = [0; 4];

/// A 48-bit hardware (MAC) address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Returns the six address octets.
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

/// Assembles one complete broadcast frame ready for transmission.
///
/// `src` is the hardware address of the interface the frame will leave on;
/// it appears both as the Ethernet source and as the ARP sender hardware
/// address.  Construction never fails; the payload is carried opaquely and
/// nothing in the frame depends on its content.
pub fn build_frame(channel: u8, seq: u8, payload: &[u8], src: MacAddr) -> Vec<u8> {
    let mut buf = Vec::with_capacity(ETH_HDR_SIZE + ARP_HDR_SIZE + 2 + payload.len());

    // Ethernet header: broadcast destination so every device on the
    // segment, including the passive receiver, picks the frame up.
    buf.extend_from_slice(&BROADCAST_MAC.0);
    buf.extend_from_slice(&src.0);
    buf.extend_from_slice(&ETHERTYPE_ARP.to_be_bytes());

    // Disguised ARP request with constant placeholder addressing.
    buf.extend_from_slice(&HTYPE_ETHERNET.to_be_bytes());
    buf.extend_from_slice(&PTYPE_IPV4.to_be_bytes());
    buf.push(HLEN_ETHERNET);
    buf.push(PLEN_IPV4);
    buf.extend_from_slice(&OP_REQUEST.to_be_bytes());
    buf.extend_from_slice(&src.0); // sender hardware address
    buf.extend_from_slice(&NULL_IPV4); // sender protocol address 0.0.0.0
    buf.extend_from_slice(&NULL_MAC); // target hardware address
    buf.extend_from_slice(&NULL_IPV4); // target protocol address 0.0.0.0

    // Relay bytes: channel, sequence id, then the encoded event.
    buf.push(channel);
    buf.push(seq);
    buf.extend_from_slice(payload);
    buf
}

// ── Tests ─────────────────────────────────────────────────────────────────────
