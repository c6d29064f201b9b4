//! TCP Server
//!
//! Accepts connections and dispatches to worker threads.

use std::collections::HashMap;
use std::io;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, TrySendError};
use parking_lot::Mutex;

use super::Connection;
use crate::config::Config;
use crate::directory::Directory;
use crate::error::{DirectoryError, Result};
use crate::service::UserService;

/// How long the acceptor sleeps when no connection is waiting
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long the acceptor backs off after a failed accept (e.g. EMFILE)
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP server for the user directory
pub struct Server {
    config: Config,
    service: UserService,
    listener: Option<TcpListener>,
    shutdown: Arc<AtomicBool>,
}

/// Signals a running server to stop accepting connections
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Release);
    }
}

/// Sockets currently owned by workers
///
/// Kept so shutdown can close idle connections that would otherwise hold a
/// worker until the peer leaves.
#[derive(Default)]
struct OpenConnections {
    next_id: AtomicU64,
    streams: Mutex<HashMap<u64, TcpStream>>,
}

impl OpenConnections {
    fn register(&self, stream: &TcpStream) -> io::Result<u64> {
        let handle = stream.try_clone()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.streams.lock().insert(id, handle);
        Ok(id)
    }

    fn remove(&self, id: u64) {
        self.streams.lock().remove(&id);
    }

    /// Shut down every registered socket, returning how many were open
    fn close_all(&self) -> usize {
        let streams: Vec<TcpStream> = self.streams.lock().drain().map(|(_, s)| s).collect();
        for stream in &streams {
            // Already-closed sockets report NotConnected here
            let _ = stream.shutdown(Shutdown::Both);
        }
        streams.len()
    }
}

impl Server {
    /// Create a new server with the given config and directory
    pub fn new(config: Config, directory: Arc<Directory>) -> Self {
        Self {
            config,
            service: UserService::new(directory),
            listener: None,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Bind the listen address
    ///
    /// Returns the bound address, useful when listening on port 0.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        self.config.validate()?;

        let listener = TcpListener::bind(&self.config.listen_addr).map_err(|e| {
            DirectoryError::Network(format!(
                "failed to listen on {}: {}",
                self.config.listen_addr, e
            ))
        })?;
        // Non-blocking accept so the loop can observe shutdown
        listener.set_nonblocking(true)?;

        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Handle that stops the server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Start the server (blocking)
    ///
    /// Binds first if needed. Returns once shutdown is signalled; open
    /// connections are closed and every worker is joined.
    pub fn run(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self
            .listener
            .take()
            .ok_or_else(|| DirectoryError::Network("listener not bound".to_string()))?;

        tracing::info!("server listening at {}", listener.local_addr()?);

        let (tx, rx) = bounded::<TcpStream>(self.config.max_pending_connections);

        let open = Arc::new(OpenConnections::default());

        let mut workers = Vec::with_capacity(self.config.worker_threads);
        for i in 0..self.config.worker_threads {
            let worker = Worker {
                rx: rx.clone(),
                service: self.service.clone(),
                timeouts: (self.config.read_timeout_ms, self.config.write_timeout_ms),
                open: Arc::clone(&open),
                shutdown: Arc::clone(&self.shutdown),
            };
            let handle = thread::Builder::new()
                .name(format!("userdir-worker-{}", i))
                .spawn(move || worker.run())?;
            workers.push(handle);
        }
        drop(rx);

        while !self.shutdown.load(Ordering::Acquire) {
            match listener.accept() {
                Ok((stream, addr)) => {
                    // Workers use blocking reads with timeouts
                    if let Err(e) = stream.set_nonblocking(false) {
                        tracing::warn!("Failed to configure connection from {}: {}", addr, e);
                        continue;
                    }
                    match tx.try_send(stream) {
                        Ok(()) => tracing::trace!("Queued connection from {}", addr),
                        Err(TrySendError::Full(_)) => {
                            tracing::warn!("Too many pending connections, dropping {}", addr);
                        }
                        Err(TrySendError::Disconnected(_)) => {
                            tracing::error!("All workers exited, stopping acceptor");
                            break;
                        }
                    }
                }
                Err(e) => {
                    if e.kind() != io::ErrorKind::WouldBlock {
                        tracing::warn!("Accept failed: {}", e);
                    }
                    thread::sleep(accept_backoff(&e));
                }
            }
        }

        tracing::info!("Shutting down, waiting for {} workers", workers.len());
        drop(tx);
        let closed = open.close_all();
        if closed > 0 {
            tracing::debug!("Closed {} open connections", closed);
        }
        for worker in workers {
            if worker.join().is_err() {
                tracing::error!("Worker thread panicked");
            }
        }

        Ok(())
    }
}

/// Pause before the next accept attempt
fn accept_backoff(err: &io::Error) -> Duration {
    if err.kind() == io::ErrorKind::WouldBlock {
        ACCEPT_POLL_INTERVAL
    } else {
        ACCEPT_ERROR_BACKOFF
    }
}

/// State owned by one worker thread
struct Worker {
    rx: Receiver<TcpStream>,
    service: UserService,
    timeouts: (u64, u64),
    open: Arc<OpenConnections>,
    shutdown: Arc<AtomicBool>,
}

impl Worker {
    fn run(self) {
        for stream in self.rx.iter() {
            let id = match self.open.register(&stream) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Failed to track connection: {}", e);
                    continue;
                }
            };

            // Registered before this check, so a concurrent sweep cannot miss it
            if !self.shutdown.load(Ordering::Acquire) {
                self.serve(stream);
            }

            self.open.remove(id);
        }
    }

    fn serve(&self, stream: TcpStream) {
        let (read_ms, write_ms) = self.timeouts;

        let mut connection = match Connection::new(stream, self.service.clone()) {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!("Failed to set up connection: {}", e);
                return;
            }
        };

        if let Err(e) = connection.set_timeouts(read_ms, write_ms) {
            tracing::warn!("Failed to set timeouts for {}: {}", connection.peer_addr(), e);
            return;
        }

        if let Err(e) = connection.handle() {
            tracing::debug!("Connection {} closed with error: {}", connection.peer_addr(), e);
        }
    }
}
