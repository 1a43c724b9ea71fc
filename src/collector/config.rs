//! Collector configuration: source roots and failure policies.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How per-core frequency files are treated when they cannot be used.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyPolicy {
    /// A missing or malformed frequency file aborts the CPU snapshot.
    #[default]
    Strict,
    /// A missing or malformed frequency file leaves that value as `None`.
    Tolerant,
}

/// Configuration shared by all collectors.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CollectorConfig {
    /// Base path to the proc filesystem.
    pub proc_path: PathBuf,
    /// Base path to the sysfs CPU tree.
    pub sys_cpu_path: PathBuf,
    pub frequency_policy: FrequencyPolicy,
    /// Skip processes whose status file disappeared after the directory
    /// listing instead of failing the whole process snapshot.
    pub skip_vanished_processes: bool,
}

impl CollectorConfig {
    /// Default proc filesystem path.
    pub const DEFAULT_PROC_PATH: &'static str = "/proc";
    /// Default sysfs CPU path.
    pub const DEFAULT_SYS_CPU_PATH: &'static str = "/sys/devices/system/cpu";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proc_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.proc_path = path.into();
        self
    }

    pub fn with_sys_cpu_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sys_cpu_path = path.into();
        self
    }

    pub fn with_frequency_policy(mut self, policy: FrequencyPolicy) -> Self {
        self.frequency_policy = policy;
        self
    }

    pub fn with_skip_vanished_processes(mut self, skip: bool) -> Self {
        self.skip_vanished_processes = skip;
        self
    }

    /// Rebases the default source paths under `root`.
    ///
    /// For containers that see the host filesystems mounted under a prefix,
    /// e.g. `/host/proc` and `/host/sys`.
    pub fn with_root(self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let proc_path = root.join(Self::DEFAULT_PROC_PATH.trim_start_matches('/'));
        let sys_cpu_path = root.join(Self::DEFAULT_SYS_CPU_PATH.trim_start_matches('/'));
        self.with_proc_path(proc_path).with_sys_cpu_path(sys_cpu_path)
    }

    pub fn meminfo_path(&self) -> PathBuf {
        self.proc_path.join("meminfo")
    }

    pub fn cpuinfo_path(&self) -> PathBuf {
        self.proc_path.join("cpuinfo")
    }

    /// `cpu{core}/cache/index{index}/size`
    pub fn cache_size_path(&self, core: usize, index: usize) -> PathBuf {
        self.sys_cpu_path
            .join(format!("cpu{core}"))
            .join("cache")
            .join(format!("index{index}"))
            .join("size")
    }

    /// `cpu{core}/cpufreq/{file}`
    pub fn cpufreq_path(&self, core: usize, file: &str) -> PathBuf {
        self.sys_cpu_path
            .join(format!("cpu{core}"))
            .join("cpufreq")
            .join(file)
    }

    pub fn process_status_path(&self, pid: u32) -> PathBuf {
        self.proc_path.join(pid.to_string()).join("status")
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            proc_path: PathBuf::from(Self::DEFAULT_PROC_PATH),
            sys_cpu_path: PathBuf::from(Self::DEFAULT_SYS_CPU_PATH),
            frequency_policy: FrequencyPolicy::Strict,
            skip_vanished_processes: true,
        }
    }
}
