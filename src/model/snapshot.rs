//! Combined snapshot of memory, CPU and processes.

use serde::{Deserialize, Serialize};

use super::process::ProcessSnapshot;
use super::system::{CpuSnapshot, MemorySnapshot};

/// Memory, CPU and process snapshots taken back-to-back.
///
/// The three parts are read one after another, not atomically; the
/// system may change between them.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct SystemSnapshot {
    pub memory: MemorySnapshot,
    pub cpu: CpuSnapshot,
    pub processes: ProcessSnapshot,
}
