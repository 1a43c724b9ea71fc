//! procsnap - memory, CPU and process snapshots from `/proc` and `/sys`.
//!
//! - `collector`: filesystem abstraction, parsers and collectors
//! - `model`: snapshot types returned to callers
//!
//! The `fetch_*` functions read the live system with the default
//! configuration. Use [`collector::Collector`] to inject a filesystem or
//! change source paths and failure policies.

pub mod collector;
pub mod model;

use collector::{CollectError, Collector, RealFs};
use model::{CpuSnapshot, MemorySnapshot, ProcessSnapshot};

/// Reads `/proc/meminfo`.
pub fn fetch_memory_snapshot() -> Result<MemorySnapshot, CollectError> {
    Collector::new(RealFs::new()).memory_snapshot()
}

/// Reads `/proc/cpuinfo` and `/sys/devices/system/cpu`.
pub fn fetch_cpu_snapshot() -> Result<CpuSnapshot, CollectError> {
    Collector::new(RealFs::new()).cpu_snapshot()
}

/// Lists every process in `/proc`.
pub fn fetch_process_snapshot() -> Result<ProcessSnapshot, CollectError> {
    Collector::new(RealFs::new()).process_snapshot()
}
