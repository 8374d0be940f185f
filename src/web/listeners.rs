use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::TcpListener;

/// Bind the HTTP listener. `"*"` binds every interface, preferring an IPv6 dual-stack socket.
pub async fn create_listener(host: &str, port: u16) -> std::io::Result<(String, TcpListener)> {
    if host == "*" {
        return create_wildcard_listener(port);
    }

    let addr = format!("{}:{}", host, port);
    tracing::info!("Attempting to bind server to {}...", addr);

    let listener = TcpListener::bind(&addr).await?;

    Ok((addr, listener))
}

fn create_wildcard_listener(port: u16) -> std::io::Result<(String, TcpListener)> {
    match bind_socket(SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)), true) {
        Ok(listener) => return Ok((format!("[::]:{}", port), listener)),
        Err(e) => {
            tracing::warn!("Failed to bind IPv6 listener: {}. Attempting IPv4 only.", e);
        }
    }

    let listener = bind_socket(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)), false)?;
    Ok((format!("0.0.0.0:{}", port), listener))
}

fn bind_socket(addr: SocketAddr, dual_stack: bool) -> std::io::Result<TcpListener> {
    tracing::info!(
        "Attempting to bind server to {}...{}",
        addr,
        if dual_stack { " (IPv6 + IPv4 dual-stack)" } else { "" }
    );

    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    if dual_stack {
        // Some systems refuse dual-stack; an IPv6-only socket still works there.
        if let Err(e) = socket.set_only_v6(false) {
            tracing::warn!("Failed to set dual-stack mode for IPv6 socket: {}", e);
        }
    }

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;

    TcpListener::from_std(socket.into())
}
