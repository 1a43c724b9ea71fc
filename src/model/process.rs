//! Per-process records from `/proc/[pid]/status`.

use serde::{Deserialize, Serialize};

/// Basic information about one process.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct ProcessRecord {
    /// Process ID, always > 0.
    /// Source: directory name under `/proc`
    pub pid: u32,

    /// Command name.
    /// Source: `/proc/[pid]/status` `Name:`
    pub name: String,

    /// Raw state, e.g. `S (sleeping)`.
    /// Source: `/proc/[pid]/status` `State:`
    pub state: String,
}

impl ProcessRecord {
    /// Single-letter state code (`R`, `S`, `D`, `Z`, ...).
    pub fn state_code(&self) -> Option<char> {
        self.state.chars().next()
    }
}

/// All processes found in one listing, in directory order.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ProcessSnapshot {
    processes: Vec<ProcessRecord>,
}

impl ProcessSnapshot {
    pub fn new(processes: Vec<ProcessRecord>) -> Self {
        Self { processes }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessRecord> {
        self.processes.iter()
    }

    pub fn as_slice(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn find_by_pid(&self, pid: u32) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// All processes whose `Name:` equals `name`.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ProcessRecord> {
        self.processes.iter().filter(move |p| p.name == name)
    }

    pub fn into_inner(self) -> Vec<ProcessRecord> {
        self.processes
    }
}

impl IntoIterator for ProcessSnapshot {
    type Item = ProcessRecord;
    type IntoIter = std::vec::IntoIter<ProcessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProcessSnapshot {
    type Item = &'a ProcessRecord;
    type IntoIter = std::slice::Iter<'a, ProcessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}
