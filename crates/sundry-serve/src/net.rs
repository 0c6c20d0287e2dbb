//! Network address helpers.

use std::net::{IpAddr, UdpSocket};

/// This machine's LAN address, as other devices on the network see it.
///
/// Connecting a UDP socket sends nothing; it only asks the OS which local
/// interface would route to a public address.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_unspecified() && !ip.is_loopback()).then_some(ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ip_is_routable_when_present() {
        // Sandboxes without a network return None; both outcomes are fine.
        if let Some(ip) = local_ip() {
            assert!(!ip.is_loopback());
            assert!(!ip.is_unspecified());
        }
    }
}
