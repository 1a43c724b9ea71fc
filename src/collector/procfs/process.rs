//! Process collector for listing `/proc/[pid]/status`.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::collector::config::CollectorConfig;
use crate::collector::procfs::error::CollectError;
use crate::collector::procfs::reader::read_records;
use crate::collector::traits::FileSystem;
use crate::model::{ProcessRecord, ProcessSnapshot};

/// Collects name and state of every process.
pub struct ProcessCollector<F: FileSystem> {
    fs: F,
    config: CollectorConfig,
}

impl<F: FileSystem> ProcessCollector<F> {
    /// Creates a new process collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `config` - `proc_path` and the vanished-process policy
    pub fn new(fs: F, config: CollectorConfig) -> Self {
        Self { fs, config }
    }

    /// Collects information about a single process.
    pub fn collect_process(&self, pid: u32) -> Result<ProcessRecord, CollectError> {
        let records = read_records(&self.fs, &self.config.process_status_path(pid))?;
        Ok(ProcessRecord {
            pid,
            name: records.field("Name").to_string(),
            state: records.field("State").to_string(),
        })
    }

    /// Collects information about all processes.
    ///
    /// Only directories named by a non-zero decimal PID are considered.
    /// A process whose status file is gone by the time it is read is
    /// skipped when `skip_vanished_processes` is set; any other failure
    /// aborts the listing.
    pub fn collect_all_processes(&self) -> Result<ProcessSnapshot, CollectError> {
        let proc_path = self.config.proc_path.as_path();
        let entries = self
            .fs
            .read_dir(proc_path)
            .map_err(|e| CollectError::read(proc_path, e))?;

        let mut processes = Vec::new();
        for entry in entries {
            let Some(pid) = pid_from_entry(&entry) else {
                continue;
            };
            if !self.fs.is_dir(&entry) {
                continue;
            }

            match self.collect_process(pid) {
                Ok(record) => processes.push(record),
                Err(e) if self.config.skip_vanished_processes && is_vanished(&e) => {
                    debug!(pid, "process disappeared during collection");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(count = processes.len(), "collected processes");
        Ok(ProcessSnapshot::new(processes))
    }
}

/// Parses a `/proc` entry name as a PID.
///
/// Only plain ASCII digits are accepted, so `+12` or ` 12` are not PIDs.
fn pid_from_entry(entry: &Path) -> Option<u32> {
    let name = entry.file_name()?.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok().filter(|&pid| pid != 0)
}

/// `errno` a read of `/proc/<pid>/...` can return once the process exited.
const ESRCH: i32 = 3;

fn is_vanished(e: &CollectError) -> bool {
    e.io_kind() == Some(io::ErrorKind::NotFound) || e.raw_os_error() == Some(ESRCH)
}
