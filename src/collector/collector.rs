//! Main collector that combines the memory, CPU and process collectors.

use std::time::Instant;

use tracing::debug;

use crate::collector::config::CollectorConfig;
use crate::collector::procfs::{CollectError, CpuCollector, MemoryCollector, ProcessCollector};
use crate::collector::traits::FileSystem;
use crate::model::{CpuSnapshot, MemorySnapshot, ProcessSnapshot, SystemSnapshot};

/// Main collector that gathers system snapshots.
///
/// Holds no state between calls besides the filesystem handle and the
/// configuration: every call reads its source files again.
pub struct Collector<F: FileSystem + Clone> {
    config: CollectorConfig,
    memory_collector: MemoryCollector<F>,
    cpu_collector: CpuCollector<F>,
    process_collector: ProcessCollector<F>,
}

impl<F: FileSystem + Clone> Collector<F> {
    /// Creates a collector with the default configuration.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, CollectorConfig::default())
    }

    /// Creates a collector with custom source paths and policies.
    pub fn with_config(fs: F, config: CollectorConfig) -> Self {
        Self {
            memory_collector: MemoryCollector::new(fs.clone(), config.clone()),
            cpu_collector: CpuCollector::new(fs.clone(), config.clone()),
            process_collector: ProcessCollector::new(fs, config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Reads `/proc/meminfo`.
    pub fn memory_snapshot(&self) -> Result<MemorySnapshot, CollectError> {
        self.memory_collector.collect()
    }

    /// Reads `/proc/cpuinfo` and the per-core sysfs attributes.
    pub fn cpu_snapshot(&self) -> Result<CpuSnapshot, CollectError> {
        self.cpu_collector.collect()
    }

    /// Lists `/proc` and reads every process status file.
    pub fn process_snapshot(&self) -> Result<ProcessSnapshot, CollectError> {
        self.process_collector.collect_all_processes()
    }

    /// Takes all three snapshots one after another.
    ///
    /// Fails on the first snapshot that fails.
    pub fn system_snapshot(&self) -> Result<SystemSnapshot, CollectError> {
        let start = Instant::now();

        let memory = self.memory_snapshot()?;
        let memory_elapsed = start.elapsed();

        let cpu = self.cpu_snapshot()?;
        let cpu_elapsed = start.elapsed() - memory_elapsed;

        let processes = self.process_snapshot()?;
        let total = start.elapsed();

        debug!(
            ?total,
            ?memory_elapsed,
            ?cpu_elapsed,
            processes = processes.len(),
            "collected system snapshot"
        );

        Ok(SystemSnapshot {
            memory,
            cpu,
            processes,
        })
    }
}
