use anyhow::Context;
use arc_swap::ArcSwap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::server::protocol::Protocol;
use crate::site::Site;

/// The server: listening sockets, accept loops, and the deployed site.
///
/// Lifecycle is `stopped -> started -> stopped`; [`deploy`](Server::deploy)
/// goes `started -> started` by stopping the accept loops, atomically
/// swapping the site, and starting again, so no two site generations are
/// served by the same accept-loop generation. Stopping abandons
/// outstanding connections to run out on their own; they are not
/// gracefully drained.
pub struct Server {
    site: Arc<ArcSwap<Site>>,
    protocols: Vec<Arc<dyn Protocol>>,
    bind_addr: IpAddr,
    accept_tasks: Vec<JoinHandle<()>>,
    local_addrs: Vec<SocketAddr>,
}

impl Server {
    pub fn new(site: Site, protocols: Vec<Arc<dyn Protocol>>, bind_addr: IpAddr) -> Self {
        Self {
            site: Arc::new(ArcSwap::from_pointee(site)),
            protocols,
            bind_addr,
            accept_tasks: Vec::new(),
            local_addrs: Vec::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        !self.accept_tasks.is_empty()
    }

    /// The addresses actually bound, in protocol order. Useful when a
    /// protocol was configured with port 0.
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// Binds one listener per protocol and launches the accept loops.
    /// Bind failures surface immediately; nothing is left half-started.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.is_started(), "server already started");

        let mut listeners = Vec::with_capacity(self.protocols.len());
        self.local_addrs.clear();
        for protocol in &self.protocols {
            let listener = TcpListener::bind((self.bind_addr, protocol.port()))
                .await
                .with_context(|| {
                    format!("binding {} on port {}", protocol.name(), protocol.port())
                })?;
            let addr = listener.local_addr()?;
            info!(protocol = protocol.name(), %addr, "Listening");
            self.local_addrs.push(addr);
            listeners.push(listener);
        }

        for (listener, protocol) in listeners.into_iter().zip(self.protocols.iter()) {
            let site = Arc::clone(&self.site);
            let protocol = Arc::clone(protocol);
            self.accept_tasks
                .push(tokio::spawn(accept_loop(listener, protocol, site)));
        }

        info!("Server started");
        Ok(())
    }

    /// Stops accepting. Outstanding connections are abandoned, not
    /// drained.
    pub async fn stop(&mut self) {
        for task in self.accept_tasks.drain(..) {
            task.abort();
            let _ = task.await;
        }
        info!("Server stopped");
    }

    /// Replaces the active site. If the server was running it is stopped
    /// first and restarted after the swap, so an accept-loop generation
    /// only ever serves one site generation; connections already accepted
    /// keep the site reference they were created with.
    pub async fn deploy(&mut self, site: Site) -> anyhow::Result<()> {
        let was_started = self.is_started();
        if was_started {
            self.stop().await;
        }
        self.site.store(Arc::new(site));
        if was_started {
            self.start().await?;
        }
        info!("Deployed new site");
        Ok(())
    }

    /// Waits until the accept loops exit (i.e. until [`stop`](Server::stop)
    /// is called or the tasks are aborted).
    pub async fn join(&mut self) {
        for task in self.accept_tasks.drain(..) {
            let _ = task.await;
        }
    }
}

/// Accepts connections forever, spawning one task per connection. Accept
/// errors and per-connection failures are logged and never break the loop.
async fn accept_loop(listener: TcpListener, protocol: Arc<dyn Protocol>, site: Arc<ArcSwap<Site>>) {
    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                debug!(%peer, protocol = protocol.name(), "Accepted connection");
                let connection = protocol.new_connection(socket, site.load_full());
                tokio::spawn(async move {
                    if let Err(e) = connection.run().await {
                        warn!(%peer, error = %e, "Connection error");
                    }
                });
            }
            Err(e) => {
                warn!(error = %e, "Accept failed");
            }
        }
    }
}
