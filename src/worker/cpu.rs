//! CPU worker deriving addresses from freshly generated keys.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{SendTimeoutError, Sender};
use tracing::{trace, warn};

use crate::deriver::AddressDeriver;
use crate::error::Result;
use crate::provider::KeyMaterial;

use super::GeneratedAddress;

/// How long a blocked send waits before re-checking the stop flag.
const SEND_POLL: Duration = Duration::from_millis(50);

/// Statistics shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Next key index to hand out
    pub next_index: AtomicU64,
    /// Addresses derived and delivered to the pool's receiver
    pub addresses_derived: AtomicU64,
    /// Key generation or derivation failures
    pub failures: AtomicU64,
}

impl WorkerStats {
    /// Returns the total addresses derived.
    pub fn total_derived(&self) -> u64 {
        self.addresses_derived.load(Ordering::Relaxed)
    }

    /// Returns the total failures.
    pub fn total_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// A CPU worker that generates keys and derives their addresses.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    deriver: AddressDeriver,
    keys: Arc<dyn KeyMaterial>,
    /// Number of addresses the whole pool should produce (0 = unbounded)
    target: u64,
    /// Channel to send results
    result_tx: Sender<Result<GeneratedAddress>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        deriver: AddressDeriver,
        keys: Arc<dyn KeyMaterial>,
        target: u64,
        result_tx: Sender<Result<GeneratedAddress>>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            deriver,
            keys,
            target,
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the worker loop.
    ///
    /// Derives addresses until:
    /// - The pool's target count has been handed out
    /// - A derivation fails (the error is sent and the pool is stopped)
    /// - Stop flag is set
    /// - Channel is closed
    pub fn run(&self) {
        loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }

            let index = self.stats.next_index.fetch_add(1, Ordering::Relaxed);
            if self.target > 0 && index >= self.target {
                break;
            }

            match self.deriver.derive(self.keys.as_ref()) {
                Ok(address) => {
                    trace!(worker = self.id, index, %address, "derived");

                    let result = GeneratedAddress {
                        index,
                        address: address.into_string(),
                        worker_id: self.id,
                    };
                    if !self.deliver(Ok(result)) {
                        break;
                    }
                    self.stats.addresses_derived.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    self.stats.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(worker = self.id, index, error = %e, "derivation failed, stopping pool");

                    self.stop_flag.store(true, Ordering::Relaxed);
                    let _ = self.deliver(Err(e));
                    break;
                }
            }
        }
    }

    /// Sends a result, giving up once the pool stops or the receiver is gone.
    fn deliver(&self, mut message: Result<GeneratedAddress>) -> bool {
        loop {
            match self.result_tx.send_timeout(message, SEND_POLL) {
                Ok(()) => return true,
                Err(SendTimeoutError::Timeout(m)) => {
                    if self.stop_flag.load(Ordering::Relaxed) {
                        return false;
                    }
                    message = m;
                }
                Err(SendTimeoutError::Disconnected(_)) => return false,
            }
        }
    }
}
