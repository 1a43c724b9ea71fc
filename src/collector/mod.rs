//! System snapshot collectors for Linux.
//!
//! This module provides infrastructure for reading memory, CPU and process
//! information from the Linux `/proc` and `/sys` filesystems, with support
//! for mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                          Collector                             │
//! │  ┌─────────────────┐ ┌──────────────────┐ ┌─────────────────┐  │
//! │  │ MemoryCollector │ │   CpuCollector   │ │ProcessCollector │  │
//! │  │ /proc/meminfo   │ │ /proc/cpuinfo    │ │ /proc/[pid]/    │  │
//! │  │                 │ │ /sys/.../cpuN/*  │ │   status        │  │
//! │  └────────┬────────┘ └────────┬─────────┘ └────────┬────────┘  │
//! │           └───────────────────┼────────────────────┘           │
//! │                     ┌─────────▼─────────┐                      │
//! │                     │ read_records +    │                      │
//! │                     │ TextRecords::field│                      │
//! │                     └─────────┬─────────┘                      │
//! │                        ┌──────▼──────┐                         │
//! │                        │  FileSystem │ (trait)                 │
//! │                        └──────┬──────┘                         │
//! └───────────────────────────────┼────────────────────────────────┘
//!                                 │
//!                 ┌───────────────┼───────────────┐
//!          ┌──────▼──────┐ ┌──────▼──────┐ ┌──────▼──────┐
//!          │   RealFs    │ │   MockFs    │ │  Scenarios  │
//!          │ (Linux)     │ │ (Testing)   │ │ (Fixtures)  │
//!          └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use procsnap::collector::{Collector, RealFs};
//!
//! let collector = Collector::new(RealFs::new());
//! let memory = collector.memory_snapshot()?;
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use procsnap::collector::{Collector, MockFs};
//!
//! let collector = Collector::new(MockFs::typical_system());
//! let snapshot = collector.system_snapshot().unwrap();
//! assert_eq!(snapshot.cpu.num_cores, 4);
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod config;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use collector::Collector;
pub use config::{CollectorConfig, FrequencyPolicy};
pub use mock::MockFs;
pub use procfs::{CollectError, CpuCollector, MemoryCollector, ParseError, ProcessCollector};
pub use traits::{FileSystem, RealFs};
