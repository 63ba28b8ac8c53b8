use bytes::Bytes;
use canary_dns_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

const RECV_BUFFER_SIZE: usize = 4096;

/// Runs the UDP loop on an already bound socket. Datagrams are handled one at
/// a time, in arrival order.
pub async fn start_dns_server(
    socket: UdpSocket,
    handler: HandleDnsQueryUseCase,
) -> anyhow::Result<()> {
    info!(bind_address = %socket.local_addr()?, "DNS listener ready");

    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let packet = Bytes::copy_from_slice(&recv_buf[..n]);

        match handler.execute(&packet, from) {
            QueryOutcome::Reply(response) => {
                if let Err(e) = socket.send_to(&response, from).await {
                    warn!(remote = %from, error = %e, "Failed to send reply");
                }
            }
            outcome => debug!(remote = %from, outcome = ?outcome, "No reply sent"),
        }
    }
}

/// Binds with `SO_REUSEADDR`. Must be called from inside the runtime.
pub fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
