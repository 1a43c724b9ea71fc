//! Reads whole source files through a [`FileSystem`].

use std::path::Path;

use crate::collector::procfs::error::CollectError;
use crate::collector::procfs::parser::TextRecords;
use crate::collector::traits::FileSystem;

/// Reads `path` in one go and splits it into line records.
pub fn read_records<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
) -> Result<TextRecords, CollectError> {
    read_value(fs, path).map(|content| TextRecords::from_content(&content))
}

/// Reads a single-value attribute file such as a sysfs cache size.
pub fn read_value<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<String, CollectError> {
    fs.read_to_string(path)
        .map_err(|e| CollectError::read(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::traits::RealFs;
    use std::io;

    #[test]
    fn test_read_records_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testfile");
        std::fs::write(&path, "line1\nline2\nline3").unwrap();

        let records = read_records(&RealFs::new(), &path).unwrap();
        assert_eq!(records.lines(), ["line1", "line2", "line3"]);
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(&RealFs::new(), Path::new("nonexistentfile.txt")).unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert_eq!(err.path(), Path::new("nonexistentfile.txt"));
    }

    #[test]
    fn test_read_records_through_dyn() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/1/status", "Name:\tinit\nState:\tS (sleeping)\n");
        let fs: &dyn FileSystem = &fs;

        let records = read_records(fs, Path::new("/proc/1/status")).unwrap();
        assert_eq!(records.field("Name"), "init");
        assert_eq!(records.field("State"), "S (sleeping)");
    }

    #[test]
    fn test_read_value_permission_denied() {
        let mut fs = MockFs::new();
        fs.add_file("/sys/devices/system/cpu/cpu0/cache/index0/size", "32K\n");
        fs.deny("/sys/devices/system/cpu/cpu0/cache/index0/size");

        let err = read_value(
            &fs,
            Path::new("/sys/devices/system/cpu/cpu0/cache/index0/size"),
        )
        .unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
    }
}
