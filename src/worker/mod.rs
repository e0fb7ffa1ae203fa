//! Worker pool for bulk address generation.
//!
//! This module provides:
//! - Multi-threaded CPU workers pulling keys from a shared provider
//! - A bounded result channel with cooperative shutdown
//! - Progress tracking

mod cpu;
mod pool;

pub use cpu::{CpuWorker, WorkerStats};
pub use pool::{GeneratedAddress, WorkerPool};
