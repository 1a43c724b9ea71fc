//! Memory collector for `/proc/meminfo`.

use tracing::debug;

use crate::collector::config::CollectorConfig;
use crate::collector::procfs::error::CollectError;
use crate::collector::procfs::parser::parse_kb_field;
use crate::collector::procfs::reader::read_records;
use crate::collector::traits::FileSystem;
use crate::model::MemorySnapshot;

/// Collects memory usage from `/proc/meminfo`.
pub struct MemoryCollector<F: FileSystem> {
    fs: F,
    config: CollectorConfig,
}

impl<F: FileSystem> MemoryCollector<F> {
    /// Creates a new memory collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `config` - Source paths, only `proc_path` is used
    pub fn new(fs: F, config: CollectorConfig) -> Self {
        Self { fs, config }
    }

    /// Reads and parses `/proc/meminfo`.
    ///
    /// Fails if the file cannot be read or if any of `MemTotal`,
    /// `MemAvailable`, `Buffers`, `Cached` or `MemFree` is missing or
    /// not numeric.
    pub fn collect(&self) -> Result<MemorySnapshot, CollectError> {
        let path = self.config.meminfo_path();
        let records = read_records(&self.fs, &path)?;

        let field = |name: &str| {
            parse_kb_field(&records, name).map_err(|e| CollectError::parse(&path, e))
        };

        let total = field("MemTotal")?;
        let available = field("MemAvailable")?;
        let buffers = field("Buffers")?;
        let cached = field("Cached")?;
        let free = field("MemFree")?;

        let snapshot = MemorySnapshot::new(total, available, free, buffers, cached);
        debug!(
            total = snapshot.total,
            used = snapshot.used,
            available = snapshot.available,
            "collected meminfo"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::procfs::parser::ParseError;
    use std::io;

    fn collector(fs: MockFs) -> MemoryCollector<MockFs> {
        MemoryCollector::new(fs, CollectorConfig::default())
    }

    #[test]
    fn test_collect_meminfo() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       2025 kB
MemFree:         518 kB
MemAvailable:   1298 kB
Buffers:          103 kB
Cached:          745 kB
",
        );

        let snapshot = collector(fs).collect().unwrap();

        assert_eq!(
            snapshot,
            MemorySnapshot {
                total: 2025,
                used: 659,
                available: 1298,
                free: 518,
                buffers: 103,
                cached: 745,
            }
        );
    }

    #[test]
    fn test_collect_typical_system() {
        let snapshot = collector(MockFs::typical_system()).collect().unwrap();

        assert_eq!(snapshot.total, 16384000);
        assert_eq!(snapshot.cached, 2048000);
        assert_eq!(
            snapshot.used,
            snapshot.total - snapshot.free - snapshot.buffers - snapshot.cached
        );
    }

    #[test]
    fn test_swap_cached_does_not_shadow_cached() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000 kB\nMemFree: 100 kB\nMemAvailable: 500 kB\nBuffers: 10 kB\nSwapCached: 999 kB\nCached: 200 kB\n",
        );

        let snapshot = collector(fs).collect().unwrap();
        assert_eq!(snapshot.cached, 200);
        assert_eq!(snapshot.used, 690);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = collector(MockFs::new()).collect().unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_invalid_value_is_parse_error() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal:       InvalidValue kB\n");

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::invalid("MemTotal", "InvalidValue kB"))
        );
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000 kB\nMemAvailable: 500 kB\nBuffers: 10 kB\nCached: 200 kB\n",
        );

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(err.parse_error().map(ParseError::field), Some("MemFree"));
        assert_eq!(err.path(), std::path::Path::new("/proc/meminfo"));
    }
}
