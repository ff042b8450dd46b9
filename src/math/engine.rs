use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::SurfaceConfig;
use crate::error::{MeshError, Result};
use crate::math::generator::generate;
use crate::math::mesh::SurfaceMesh;

/// Finished meshes held for the consumer before the worker waits.
pub const RESULT_QUEUE: usize = 2;

pub enum MeshCommand {
    Generate { id: u64, config: SurfaceConfig },
    Stop,
}

#[derive(Debug)]
pub enum MeshResult {
    Surface { id: u64, mesh: SurfaceMesh },
    Error { id: u64, error: MeshError },
}

impl MeshResult {
    pub fn id(&self) -> u64 {
        match self {
            Self::Surface { id, .. } | Self::Error { id, .. } => *id,
        }
    }
}

/// Regenerates meshes on a worker thread.
///
/// Requests that pile up while a pass is running are coalesced: only the
/// newest one is generated. At most [`RESULT_QUEUE`] results wait to be read;
/// a finished mesh that cannot be queued is dropped as soon as a newer
/// request arrives. Results carry the id returned by
/// [`MeshEngine::request`] so stale ones can be told apart.
pub struct MeshEngine {
    tx_cmd: Sender<MeshCommand>,
    rx_result: Receiver<MeshResult>,
    last_error: Arc<Mutex<Option<MeshError>>>,
    next_id: AtomicU64,
    thread_handle: Option<JoinHandle<()>>,
}

impl MeshEngine {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<MeshCommand>();
        let (tx_result, rx_result) = channel::bounded::<MeshResult>(RESULT_QUEUE);
        let last_error = Arc::new(Mutex::new(None));
        let last_error_clone = Arc::clone(&last_error);

        let thread_handle = thread::spawn(move || {
            mesh_thread(rx_cmd, tx_result, last_error_clone);
        });

        Self {
            tx_cmd,
            rx_result,
            last_error,
            next_id: AtomicU64::new(0),
            thread_handle: Some(thread_handle),
        }
    }

    /// Queues a regeneration and returns its id. Ids increase monotonically.
    pub fn request(&self, config: SurfaceConfig) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx_cmd
            .send(MeshCommand::Generate { id, config })
            .map_err(|_| MeshError::EngineStopped)?;
        Ok(id)
    }

    /// Id of the most recent request, 0 if none was made.
    pub fn latest_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, result: &MeshResult) -> bool {
        result.id() == self.latest_id()
    }

    pub fn try_recv_result(&self) -> Option<MeshResult> {
        self.rx_result.try_recv().ok()
    }

    /// Blocks until a result arrives. `None` once the worker has exited and
    /// every pending result was drained.
    pub fn recv_result(&self) -> Option<MeshResult> {
        self.rx_result.recv().ok()
    }

    pub fn recv_result_timeout(&self, timeout: Duration) -> Result<Option<MeshResult>> {
        match self.rx_result.recv_timeout(timeout) {
            Ok(result) => Ok(Some(result)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(MeshError::EngineStopped),
        }
    }

    /// Results ready to be received.
    pub fn pending_results(&self) -> usize {
        self.rx_result.len()
    }

    pub fn last_error(&self) -> Option<MeshError> {
        self.last_error.lock().clone()
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(MeshCommand::Stop);
    }
}

impl Default for MeshEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MeshEngine {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(MeshCommand::Stop);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

/// Takes `first` (or waits for a command), then drains the queue so only the
/// newest `Generate` survives. `None` means stop.
fn next_request(
    rx_cmd: &Receiver<MeshCommand>,
    first: Option<MeshCommand>,
) -> Option<(u64, SurfaceConfig)> {
    let first = match first {
        Some(cmd) => cmd,
        None => rx_cmd.recv().ok()?,
    };
    let mut pending = match first {
        MeshCommand::Generate { id, config } => (id, config),
        MeshCommand::Stop => return None,
    };

    while let Ok(cmd) = rx_cmd.try_recv() {
        match cmd {
            MeshCommand::Generate { id, config } => {
                log::debug!("dropping superseded request {}", pending.0);
                pending = (id, config);
            }
            MeshCommand::Stop => return None,
        }
    }

    Some(pending)
}

enum Delivery {
    Sent,
    Superseded(MeshCommand),
    Closed,
}

/// Sends `result`, unless a command arrives first while the queue is full.
fn deliver(
    tx_result: &Sender<MeshResult>,
    rx_cmd: &Receiver<MeshCommand>,
    result: MeshResult,
) -> Delivery {
    let result = match tx_result.try_send(result) {
        Ok(()) => return Delivery::Sent,
        Err(TrySendError::Disconnected(_)) => return Delivery::Closed,
        Err(TrySendError::Full(result)) => result,
    };

    let id = result.id();
    crossbeam::select! {
        send(tx_result, result) -> sent => match sent {
            Ok(()) => Delivery::Sent,
            Err(_) => Delivery::Closed,
        },
        recv(rx_cmd) -> cmd => match cmd {
            Ok(cmd) => {
                log::debug!("result {} superseded before it was read", id);
                Delivery::Superseded(cmd)
            }
            Err(_) => Delivery::Closed,
        },
    }
}

fn mesh_thread(
    rx_cmd: Receiver<MeshCommand>,
    tx_result: Sender<MeshResult>,
    last_error: Arc<Mutex<Option<MeshError>>>,
) {
    let mut carried = None;

    while let Some((id, config)) = next_request(&rx_cmd, carried.take()) {
        *last_error.lock() = None;

        let result = match generate(config) {
            Ok(mesh) => {
                log::debug!(
                    "request {} produced {} triangles",
                    id,
                    mesh.mesh.triangle_count()
                );
                MeshResult::Surface { id, mesh }
            }
            Err(error) => {
                log::error!("request {} failed: {}", id, error);
                *last_error.lock() = Some(error.clone());
                MeshResult::Error { id, error }
            }
        };

        match deliver(&tx_result, &rx_cmd, result) {
            Delivery::Sent => {}
            Delivery::Superseded(cmd) => carried = Some(cmd),
            Delivery::Closed => return,
        }
    }
}
