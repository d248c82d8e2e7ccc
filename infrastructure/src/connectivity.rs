use domain::backend::Connectivity;
use std::net::{SocketAddr, UdpSocket};

const DEFAULT_PROBE: ([u8; 4], u16) = ([1, 1, 1, 1], 53);

/// Reports online when the OS has a route to a public address. Connecting a
/// UDP socket only consults the routing table; nothing is sent.
#[derive(Debug, Clone)]
pub struct SystemConnectivity {
    probe: SocketAddr,
    assume_online: bool,
}

impl SystemConnectivity {
    pub fn new(assume_online: bool) -> Self {
        Self {
            probe: SocketAddr::from(DEFAULT_PROBE),
            assume_online,
        }
    }

    pub fn with_probe(probe: SocketAddr) -> Self {
        Self {
            probe,
            assume_online: false,
        }
    }
}

impl Connectivity for SystemConnectivity {
    fn is_online(&self) -> bool {
        if self.assume_online {
            return true;
        }
        let bind_addr: SocketAddr = if self.probe.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        UdpSocket::bind(bind_addr)
            .and_then(|socket| socket.connect(self.probe))
            .is_ok()
    }
}
