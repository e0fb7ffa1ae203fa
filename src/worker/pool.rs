//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{info, warn};

use crate::config::Config;
use crate::deriver::AddressDeriver;
use crate::error::{Error, Result};
use crate::provider::KeyMaterial;

use super::cpu::{CpuWorker, WorkerStats};

/// Capacity of the result channel.
const RESULT_CHANNEL_CAPACITY: usize = 100;

/// An address produced by a pool worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAddress {
    /// Position in the pool's generation sequence
    pub index: u64,
    /// The Base58 address
    pub address: String,
    /// The ID of the worker that derived this address
    pub worker_id: usize,
}

/// Manages a pool of workers deriving addresses for fresh keys in parallel.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Addresses requested (0 = until stopped)
    target: u64,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Channel receiver for results
    result_rx: Receiver<Result<GeneratedAddress>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Starts `config.worker_count()` workers producing `target` addresses
    /// (0 = run until stopped) from keys supplied by `keys`.
    pub fn new(config: Config, keys: Arc<dyn KeyMaterial>, target: u64) -> Result<Self> {
        let num_workers = config.worker_count();
        let deriver = AddressDeriver::new(config)?;

        let (result_tx, result_rx) = bounded(RESULT_CHANNEL_CAPACITY);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::default());

        info!(
            workers = num_workers,
            target,
            curve = %deriver.config().curve,
            version = deriver.config().version,
            "starting address workers"
        );

        let handles = Self::spawn_workers(
            num_workers,
            deriver,
            keys,
            target,
            result_tx,
            stop_flag.clone(),
            stats.clone(),
        )?;

        Ok(Self {
            num_workers,
            target,
            handles: Some(handles),
            result_rx,
            stop_flag,
            stats,
            start_time: Instant::now(),
        })
    }

    /// Spawns worker threads.
    fn spawn_workers(
        num_workers: usize,
        deriver: AddressDeriver,
        keys: Arc<dyn KeyMaterial>,
        target: u64,
        result_tx: Sender<Result<GeneratedAddress>>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Result<Vec<JoinHandle<()>>> {
        let mut handles = Vec::with_capacity(num_workers);

        for id in 0..num_workers {
            let worker = CpuWorker::new(
                id,
                deriver.clone(),
                keys.clone(),
                target,
                result_tx.clone(),
                stop_flag.clone(),
                stats.clone(),
            );

            let spawned = thread::Builder::new()
                .name(format!("address-worker-{}", id))
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    stop_flag.store(true, Ordering::Relaxed);
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(Error::Spawn(e));
                }
            }
        }

        Ok(handles)
    }

    /// Waits for a result with optional timeout.
    ///
    /// Returns `None` if the timeout expires or every worker has finished.
    pub fn wait_for_result(&self, timeout: Duration) -> Option<Result<GeneratedAddress>> {
        self.result_rx.recv_timeout(timeout).ok()
    }

    /// Attempts to receive a result without blocking.
    pub fn try_recv(&self) -> Option<Result<GeneratedAddress>> {
        self.result_rx.try_recv().ok()
    }

    /// Returns an iterator over results (blocking).
    ///
    /// Ends once all workers have exited.
    pub fn results(&self) -> impl Iterator<Item = Result<GeneratedAddress>> + '_ {
        self.result_rx.iter()
    }

    /// Blocks until the target is reached, returning the addresses in
    /// generation order. The first failure is returned instead.
    pub fn collect(self) -> Result<Vec<GeneratedAddress>> {
        let mut addresses = self.results().collect::<Result<Vec<_>>>()?;
        addresses.sort_by_key(|a| a.index);
        self.join();
        Ok(addresses)
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Waits for all workers to complete.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                if handle.join().is_err() {
                    warn!("address worker panicked");
                }
            }
            info!(
                derived = self.total_derived(),
                failures = self.total_failures(),
                elapsed_ms = self.elapsed().as_millis() as u64,
                "address workers stopped"
            );
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the number of addresses requested (0 = unbounded).
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Returns the total addresses derived across all workers.
    pub fn total_derived(&self) -> u64 {
        self.stats.total_derived()
    }

    /// Returns the total failures across all workers.
    pub fn total_failures(&self) -> u64 {
        self.stats.total_failures()
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current derivation rate (addresses per second).
    pub fn addresses_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_derived() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::crypto::{Curve, PublicPoint};
    use crate::provider::OsKeyMaterial;

    #[test]
    fn test_pool_reaches_target() {
        let config = Config::default().with_workers(4);
        let pool = WorkerPool::new(config, Arc::new(OsKeyMaterial), 20).unwrap();
        assert_eq!(pool.num_workers(), 4);

        let mut addresses = pool.results().collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(addresses.len(), 20);
        assert_eq!(pool.total_derived(), 20);
        assert!(pool.addresses_per_second() > 0.0);
        pool.join();

        addresses.sort_by_key(|a| a.index);
        let indices: Vec<u64> = addresses.iter().map(|a| a.index).collect();
        assert_eq!(indices, (0..20).collect::<Vec<_>>());

        let unique: HashSet<&str> = addresses.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(unique.len(), 20);
        assert!(addresses.iter().all(|a| a.address.starts_with('1')));
    }

    #[test]
    fn test_pool_stops_on_failure() {
        let failing = |_: Curve| -> Result<PublicPoint> {
            Err(Error::KeyGeneration("entropy unavailable".into()))
        };
        let config = Config::default().with_workers(2);
        let pool = WorkerPool::new(config, Arc::new(failing), 0).unwrap();

        let first = pool.wait_for_result(Duration::from_secs(5));
        assert!(matches!(first, Some(Err(Error::KeyGeneration(_)))));
        assert!(pool.is_stopped());
        assert_eq!(pool.total_derived(), 0);
        pool.join();
    }

    #[test]
    fn test_unbounded_pool_stops_on_request() {
        let config = Config::default().with_workers(2);
        let pool = WorkerPool::new(config, Arc::new(OsKeyMaterial), 0).unwrap();

        let first = pool.wait_for_result(Duration::from_secs(5));
        assert!(matches!(first, Some(Ok(_))));

        pool.stop();
        assert!(pool.is_stopped());
        pool.join();
    }

    #[test]
    fn test_undelivered_addresses_not_counted() {
        let config = Config::default().with_workers(4);
        let mut pool = WorkerPool::new(config, Arc::new(OsKeyMaterial), 0).unwrap();

        // Let the channel fill up so workers block on delivery.
        while pool.result_rx.len() < RESULT_CHANNEL_CAPACITY {
            thread::sleep(Duration::from_millis(5));
        }
        pool.stop();
        pool.shutdown();

        assert_eq!(pool.total_derived(), pool.result_rx.len() as u64);
        let delivered = pool.result_rx.try_iter().filter(|r| r.is_ok()).count();
        assert_eq!(delivered, RESULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config::default().with_marker(0x03).with_workers(1);
        assert!(matches!(
            WorkerPool::new(config, Arc::new(OsKeyMaterial), 1),
            Err(Error::InvalidKey(_))
        ));

        let config = Config::default().with_workers(0);
        assert!(matches!(
            WorkerPool::new(config, Arc::new(OsKeyMaterial), 1),
            Err(Error::Config(_))
        ));
    }
}
