//! Linux `AF_PACKET` raw socket transmitter.
//!
//! A packet socket injects frames below the IP layer, which is what lets
//! the relay broadcast without any IP addressing or open port.  The socket
//! is created once per selected interface and reused for every frame:
//!
//! 1. `if_nametoindex` resolves the interface name to its kernel index.
//! 2. `socket(AF_PACKET, SOCK_RAW, htons(ETH_P_ALL))` opens the raw handle
//!    (requires `CAP_NET_RAW`).
//! 3. `SIOCGIFHWADDR` reads the interface's own hardware address, which the
//!    frame builder stamps into every outgoing frame.
//! 4. Each send is a single `sendto` toward a broadcast `sockaddr_ll` on
//!    the resolved index.

use std::ffi::CString;
use std::io;
use std::os::unix::io::RawFd;

use arpcast_core::protocol::frame::BROADCAST_MAC;
use arpcast_core::MacAddr;
use tracing::debug;

use super::{FrameTransmitter, TransmitError};

/// A raw packet socket bound to one named interface.
///
/// The handle is owned exclusively; selecting another interface replaces
/// the whole object rather than rebinding this one.
#[derive(Debug)]
pub struct PacketSocket {
    fd: RawFd,
    if_index: u32,
    mac: MacAddr,
}

impl PacketSocket {
    /// Opens a raw socket on the named interface.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError::InterfaceUnavailable`] when the name does
    /// not resolve to an interface or the socket cannot be opened on it
    /// (for example, missing `CAP_NET_RAW`).
    pub fn open(name: &str) -> Result<Self, TransmitError> {
        let unavailable = |source: Option<io::Error>| TransmitError::InterfaceUnavailable {
            name: name.to_string(),
            source,
        };

        let c_name = CString::new(name).map_err(|_| unavailable(None))?;
        let if_index = unsafe { libc::if_nametoindex(c_name.as_ptr()) };
        if if_index == 0 {
            return Err(unavailable(Some(io::Error::last_os_error())));
        }

        let fd = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_RAW,
                i32::from((libc::ETH_P_ALL as u16).to_be()),
            )
        };
        if fd < 0 {
            return Err(unavailable(Some(io::Error::last_os_error())));
        }

        let mac = match read_hardware_address(fd, &c_name) {
            Ok(mac) => mac,
            Err(e) => {
                unsafe { libc::close(fd) };
                return Err(unavailable(Some(e)));
            }
        };

        debug!("opened packet socket on {name} ({mac})");
        Ok(Self { fd, if_index, mac })
    }
}

impl FrameTransmitter for PacketSocket {
    fn hardware_address(&self) -> MacAddr {
        self.mac
    }

    fn send(&self, frame: &[u8]) -> Result<(), TransmitError> {
        let mut addr: libc::sockaddr_ll = unsafe { std::mem::zeroed() };
        addr.sll_family = libc::AF_PACKET as u16;
        addr.sll_protocol = (libc::ETH_P_ALL as u16).to_be();
        addr.sll_ifindex = self.if_index as i32;
        addr.sll_halen = 6;
        addr.sll_addr[..6].copy_from_slice(&BROADCAST_MAC.octets());

        let sent = unsafe {
            libc::sendto(
                self.fd,
                frame.as_ptr().cast::<libc::c_void>(),
                frame.len(),
                0,
                std::ptr::addr_of!(addr).cast::<libc::sockaddr>(),
                std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        if sent < 0 {
            return Err(TransmitError::Io(io::Error::last_os_error()));
        }
        Ok(())
    }
}

impl Drop for PacketSocket {
    fn drop(&mut self) {
        unsafe { libc::close(self.fd) };
    }
}

/// Reads the interface's hardware address via the `SIOCGIFHWADDR` ioctl.
fn read_hardware_address(fd: RawFd, name: &CString) -> io::Result<MacAddr> {
    let mut req: libc::ifreq = unsafe { std::mem::zeroed() };
    let bytes = name.as_bytes_with_nul();
    if bytes.len() > req.ifr_name.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "interface name too long",
        ));
    }
    for (dst, src) in req.ifr_name.iter_mut().zip(bytes) {
        *dst = *src as libc::c_char;
    }

    let ret = unsafe { libc::ioctl(fd, libc::SIOCGIFHWADDR, &mut req) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }

    let hw = unsafe { req.ifr_ifru.ifru_hwaddr };
    let mut mac = [0u8; 6];
    for (dst, src) in mac.iter_mut().zip(hw.sa_data.iter()) {
        *dst = *src as u8;
    }
    Ok(MacAddr(mac))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
