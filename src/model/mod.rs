//! Snapshot data models.
//!
//! - [`system`]: memory and CPU snapshots from `/proc/meminfo`,
//!   `/proc/cpuinfo` and `/sys/devices/system/cpu`
//! - [`process`]: per-process records from `/proc/[pid]/status`
//! - [`snapshot`]: all three taken together
//!
//! Every snapshot is an owned value built fresh by one collector call.

mod process;
mod snapshot;
mod system;

pub use process::{ProcessRecord, ProcessSnapshot};
pub use snapshot::SystemSnapshot;
pub use system::{CoreFrequency, CpuSnapshot, MemorySnapshot, aggregate_cache_size};
