//! CPU collector combining `/proc/cpuinfo` with per-core sysfs attributes.

use tracing::{debug, warn};

use crate::collector::config::{CollectorConfig, FrequencyPolicy};
use crate::collector::procfs::error::CollectError;
use crate::collector::procfs::parser::{
    ParseError, parse_cache_size, parse_cpuinfo, parse_frequency,
};
use crate::collector::procfs::reader::{read_records, read_value};
use crate::collector::traits::FileSystem;
use crate::model::{CoreFrequency, CpuSnapshot, aggregate_cache_size};

/// Cache levels sampled from `cpu0/cache/index{0..3}`: L1i, L1d, L2, L3.
const CACHE_INDICES: usize = 4;

const MIN_FREQ_FILE: &str = "cpuinfo_min_freq";
const MAX_FREQ_FILE: &str = "cpuinfo_max_freq";

/// Collects the CPU description.
///
/// Only core 0's cache geometry is read; all cores are assumed to have the
/// same private caches.
pub struct CpuCollector<F: FileSystem> {
    fs: F,
    config: CollectorConfig,
}

impl<F: FileSystem> CpuCollector<F> {
    /// Creates a new CPU collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `config` - Source paths and the frequency failure policy
    pub fn new(fs: F, config: CollectorConfig) -> Self {
        Self { fs, config }
    }

    /// Collects core count, model, average clock, aggregate cache size and
    /// per-core frequency limits.
    pub fn collect(&self) -> Result<CpuSnapshot, CollectError> {
        let cpuinfo = read_records(&self.fs, &self.config.cpuinfo_path())?;
        let summary = parse_cpuinfo(&cpuinfo);
        if summary.num_cores == 0 {
            debug!("no processor records in cpuinfo");
        }

        let [l1i, l1d, l2, l3] = self.collect_cache_sizes()?;
        let cache_size = aggregate_cache_size(summary.num_cores, l1i, l1d, l2, l3)
            .ok_or_else(|| {
                CollectError::parse(
                    self.config.sys_cpu_path.join("cpu0").join("cache"),
                    ParseError::invalid(
                        "cache_size",
                        format!("{} x ({l1i} + {l1d} + {l2}) + {l3}", summary.num_cores),
                    ),
                )
            })?;

        let frequency = (0..summary.num_cores)
            .map(|core| self.collect_core_frequency(core))
            .collect::<Result<Vec<_>, _>>()?;

        let cpu_mhz = summary.average_mhz();
        Ok(CpuSnapshot {
            num_cores: summary.num_cores,
            model_name: summary.model_name,
            cache_size,
            cpu_mhz,
            frequency,
        })
    }

    /// Reads the four cache size attributes of core 0, in KB.
    fn collect_cache_sizes(&self) -> Result<[u64; CACHE_INDICES], CollectError> {
        let mut sizes = [0; CACHE_INDICES];
        for (index, size) in sizes.iter_mut().enumerate() {
            let path = self.config.cache_size_path(0, index);
            let content = read_value(&self.fs, &path)?;
            *size = parse_cache_size(&content, &format!("index{index}"))
                .map_err(|e| CollectError::parse(&path, e))?;
        }
        debug!(?sizes, "collected cache sizes");
        Ok(sizes)
    }

    fn collect_core_frequency(&self, core: usize) -> Result<CoreFrequency, CollectError> {
        Ok(CoreFrequency {
            core: CoreFrequency::label(core),
            min_freq: self.read_frequency(core, MIN_FREQ_FILE)?,
            max_freq: self.read_frequency(core, MAX_FREQ_FILE)?,
        })
    }

    /// Reads one frequency attribute according to the configured policy.
    ///
    /// Under `Strict` both read and parse failures are errors. Under
    /// `Tolerant` both become `None`.
    fn read_frequency(&self, core: usize, file: &str) -> Result<Option<u64>, CollectError> {
        let path = self.config.cpufreq_path(core, file);
        let result = read_value(&self.fs, &path).and_then(|content| {
            parse_frequency(&content, file).map_err(|e| CollectError::parse(&path, e))
        });

        match (result, self.config.frequency_policy) {
            (Ok(freq), _) => Ok(Some(freq)),
            (Err(e), FrequencyPolicy::Strict) => Err(e),
            (Err(e), FrequencyPolicy::Tolerant) => {
                warn!(core, error = %e, "cpu frequency unavailable");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use std::io;
    use std::path::Path;

    const TWO_CORE_CPUINFO: &str = "\
processor\t: 0
model name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz
cpu MHz\t\t: 3400.000

processor\t: 1
model name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz
cpu MHz\t\t: 3400.000
";

    fn two_core_fs() -> MockFs {
        let mut fs = MockFs::new();
        fs.add_file("/proc/cpuinfo", TWO_CORE_CPUINFO);
        fs.add_cpu_caches("/sys/devices/system/cpu", ["32K", "32K", "256K", "6144K"]);
        for core in 0..2 {
            fs.add_cpu_frequency("/sys/devices/system/cpu", core, 400000, 3400000);
        }
        fs
    }

    fn collector(fs: MockFs) -> CpuCollector<MockFs> {
        CpuCollector::new(fs, CollectorConfig::default())
    }

    fn tolerant(fs: MockFs) -> CpuCollector<MockFs> {
        CpuCollector::new(
            fs,
            CollectorConfig::default().with_frequency_policy(FrequencyPolicy::Tolerant),
        )
    }

    #[test]
    fn test_collect_two_cores() {
        let snapshot = collector(two_core_fs()).collect().unwrap();

        assert_eq!(snapshot.num_cores, 2);
        assert_eq!(snapshot.model_name, "Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz");
        assert_eq!(snapshot.cpu_mhz, Some(3400.0));
        assert_eq!(snapshot.cache_size, 6784);
        assert_eq!(
            snapshot.frequency,
            vec![
                CoreFrequency {
                    core: "cpu0".to_string(),
                    min_freq: Some(400000),
                    max_freq: Some(3400000),
                },
                CoreFrequency {
                    core: "cpu1".to_string(),
                    min_freq: Some(400000),
                    max_freq: Some(3400000),
                },
            ]
        );
    }

    #[test]
    fn test_collect_typical_system() {
        let snapshot = collector(MockFs::typical_system()).collect().unwrap();

        assert_eq!(snapshot.num_cores, 4);
        assert_eq!(snapshot.frequency.len(), 4);
        assert_eq!(snapshot.frequency[3].core, "cpu3");
        // 4 * (48 + 32 + 1280) + 12288
        assert_eq!(snapshot.cache_size, 17728);
        assert_eq!(snapshot.cpu_mhz, Some(2500.0));
    }

    #[test]
    fn test_average_skips_unparsable_readings() {
        let mut fs = two_core_fs();
        fs.add_file(
            "/proc/cpuinfo",
            "processor : 0\ncpu MHz : 1200.5\nprocessor : 1\ncpu MHz : ???\n",
        );

        let snapshot = collector(fs).collect().unwrap();
        assert_eq!(snapshot.num_cores, 2);
        assert_eq!(snapshot.cpu_mhz, Some(1200.5));
    }

    #[test]
    fn test_no_cores() {
        let mut fs = two_core_fs();
        fs.add_file("/proc/cpuinfo", "");

        let snapshot = collector(fs).collect().unwrap();
        assert_eq!(snapshot.num_cores, 0);
        assert_eq!(snapshot.model_name, "");
        assert_eq!(snapshot.cpu_mhz, None);
        assert_eq!(snapshot.cache_size, 6144);
        assert!(snapshot.frequency.is_empty());
    }

    #[test]
    fn test_missing_cpuinfo() {
        let mut fs = MockFs::new();
        fs.add_cpu_caches("/sys/devices/system/cpu", ["32K", "32K", "256K", "6144K"]);

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert_eq!(err.path(), Path::new("/proc/cpuinfo"));
    }

    #[test]
    fn test_missing_cache_file_aborts() {
        let mut fs = two_core_fs();
        fs.remove_file("/sys/devices/system/cpu/cpu0/cache/index2/size");

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert_eq!(
            err.path(),
            Path::new("/sys/devices/system/cpu/cpu0/cache/index2/size")
        );
    }

    #[test]
    fn test_malformed_cache_file_aborts() {
        let mut fs = two_core_fs();
        fs.add_file("/sys/devices/system/cpu/cpu0/cache/index3/size", "lots\n");

        let err = tolerant(fs).collect().unwrap_err();
        assert_eq!(err.parse_error().map(ParseError::field), Some("index3"));
    }

    #[test]
    fn test_oversized_cache_reading_is_parse_error() {
        let mut fs = two_core_fs();
        fs.add_file(
            "/sys/devices/system/cpu/cpu0/cache/index0/size",
            "18446744073709551615K\n",
        );

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(err.parse_error().map(ParseError::field), Some("cache_size"));
    }

    #[test]
    fn test_cache_size_unit_overflow_is_parse_error() {
        let mut fs = two_core_fs();
        fs.add_file(
            "/sys/devices/system/cpu/cpu0/cache/index3/size",
            "18446744073709551615G\n",
        );

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::invalid("index3", "18446744073709551615G"))
        );
        assert_eq!(
            err.path(),
            Path::new("/sys/devices/system/cpu/cpu0/cache/index3/size")
        );
    }

    #[test]
    fn test_strict_missing_frequency_aborts() {
        let fs = MockFs::without_cpufreq();

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert_eq!(
            err.path(),
            Path::new("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_min_freq")
        );
    }

    #[test]
    fn test_strict_malformed_frequency_aborts() {
        let mut fs = two_core_fs();
        fs.add_file("/sys/devices/system/cpu/cpu1/cpufreq/cpuinfo_max_freq", "fast\n");

        let err = collector(fs).collect().unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::invalid("cpuinfo_max_freq", "fast"))
        );
    }

    #[test]
    fn test_tolerant_missing_frequency() {
        let snapshot = tolerant(MockFs::without_cpufreq()).collect().unwrap();

        assert_eq!(snapshot.num_cores, 4);
        assert!(
            snapshot
                .frequency
                .iter()
                .all(|f| f.min_freq.is_none() && f.max_freq.is_none())
        );
    }

    #[test]
    fn test_tolerant_malformed_frequency() {
        let mut fs = two_core_fs();
        fs.add_file("/sys/devices/system/cpu/cpu1/cpufreq/cpuinfo_max_freq", "fast\n");

        let snapshot = tolerant(fs).collect().unwrap();
        assert_eq!(snapshot.frequency[0].max_freq, Some(3400000));
        assert_eq!(snapshot.frequency[1].min_freq, Some(400000));
        assert_eq!(snapshot.frequency[1].max_freq, None);
    }
}
