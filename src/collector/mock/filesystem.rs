//! In-memory mock filesystem for testing collectors without real `/proc`.
//!
//! This module provides `MockFs` which simulates a filesystem in memory,
//! allowing tests to run on macOS and in CI environments without Linux.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory, allowing tests to simulate
/// various `/proc` and `/sys` states without needing actual Linux access.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
    /// Paths that fail with `PermissionDenied` on read.
    denied: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Removes a file, simulating a process that exited between listing
    /// `/proc` and reading its files. The parent directory is kept.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }

    /// Checks whether a file or directory has been added at `path`.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.files.contains_key(path) || self.directories.contains(path)
    }

    /// Makes reads of `path` fail with `PermissionDenied`.
    ///
    /// Works for files and for directories passed to `read_dir`.
    pub fn deny(&mut self, path: impl AsRef<Path>) {
        self.denied.insert(path.as_ref().to_path_buf());
    }

    /// Adds a process directory with its `status` file.
    ///
    /// # Arguments
    /// * `proc_path` - Root of the mocked proc tree (usually "/proc")
    /// * `pid` - Process ID
    /// * `name` - Value of the `Name:` field
    /// * `state` - Value of the `State:` field, e.g. "S (sleeping)"
    pub fn add_process(&mut self, proc_path: impl AsRef<Path>, pid: u32, name: &str, state: &str) {
        let base = proc_path.as_ref().join(pid.to_string());
        self.add_dir(&base);
        self.add_file(
            base.join("status"),
            format!(
                "Name:\t{name}\nUmask:\t0022\nState:\t{state}\nTgid:\t{pid}\nPid:\t{pid}\nPPid:\t1\n"
            ),
        );
    }

    /// Adds the four `cpu0/cache/index{0..3}/size` attributes.
    ///
    /// Sizes are given as sysfs prints them, e.g. `"32K"`.
    pub fn add_cpu_caches(&mut self, sys_cpu_path: impl AsRef<Path>, sizes: [&str; 4]) {
        let cache = sys_cpu_path.as_ref().join("cpu0").join("cache");
        for (index, size) in sizes.iter().enumerate() {
            self.add_file(
                cache.join(format!("index{index}")).join("size"),
                format!("{size}\n"),
            );
        }
    }

    /// Adds `cpu{core}/cpufreq/cpuinfo_{min,max}_freq` in kHz.
    pub fn add_cpu_frequency(
        &mut self,
        sys_cpu_path: impl AsRef<Path>,
        core: usize,
        min_khz: u64,
        max_khz: u64,
    ) {
        let cpufreq = sys_cpu_path.as_ref().join(format!("cpu{core}")).join("cpufreq");
        self.add_file(cpufreq.join("cpuinfo_min_freq"), format!("{min_khz}\n"));
        self.add_file(cpufreq.join("cpuinfo_max_freq"), format!("{max_khz}\n"));
    }

    /// Loads a mock filesystem from a directory snapshot.
    ///
    /// The tree under `dir` is mounted at `mount_point`, so a captured copy
    /// of `/proc` can be replayed under its original path.
    pub fn from_snapshot(dir: &Path, mount_point: impl AsRef<Path>) -> io::Result<Self> {
        let mut fs = Self::new();
        load_directory_recursive(&mut fs, dir, mount_point.as_ref())?;
        Ok(fs)
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }

    fn check_access(&self, path: &Path) -> io::Result<()> {
        if self.denied.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        Ok(())
    }
}

fn load_directory_recursive(
    fs: &mut MockFs,
    real_path: &Path,
    virtual_path: &Path,
) -> io::Result<()> {
    fs.add_dir(virtual_path);

    for entry in std::fs::read_dir(real_path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let real_child = entry.path();
        let virtual_child = virtual_path.join(entry.file_name());

        if file_type.is_dir() {
            load_directory_recursive(fs, &real_child, &virtual_child)?;
        } else if file_type.is_file() {
            // Binary files are not text records, skip them
            if let Ok(content) = std::fs::read_to_string(&real_child) {
                fs.add_file(&virtual_child, content);
            }
        }
    }
    Ok(())
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.check_access(path)?;
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.check_access(path)?;
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();

        for file_path in self.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }

        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        // Sorted so listing order is stable across runs
        let mut entries: Vec<PathBuf> = entries.into_iter().collect();
        entries.sort();
        Ok(entries)
    }
}
