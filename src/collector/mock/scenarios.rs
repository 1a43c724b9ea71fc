//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` and `/sys` states
//! for testing various system conditions.

use super::filesystem::MockFs;

const PROC: &str = "/proc";
const SYS_CPU: &str = "/sys/devices/system/cpu";

const TYPICAL_CORES: usize = 4;

impl MockFs {
    /// Creates a typical 4-core system with a few processes.
    ///
    /// Includes: init (PID 1), a bash shell and a sleeping daemon, plus the
    /// non-process entries a real `/proc` has (`self`, `sys`, `meminfo`).
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Dirty:              1024 kB
Writeback:             0 kB
Slab:             512000 kB
SReclaimable:     256000 kB
",
        );

        let mut cpuinfo = String::new();
        for (core, mhz) in ["2400.000", "2600.000", "2450.125", "2549.875"]
            .iter()
            .enumerate()
        {
            cpuinfo.push_str(&format!(
                "\
processor\t: {core}
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 140
model name\t: 11th Gen Intel(R) Core(TM) i5-1135G7 @ 2.40GHz
stepping\t: 1
cpu MHz\t\t: {mhz}
cache size\t: 8192 KB
physical id\t: 0
siblings\t: 4
core id\t\t: {core}
cpu cores\t: 4
flags\t\t: fpu vme de pse tsc msr pae mce cx8 apic sep

"
            ));
        }
        fs.add_file("/proc/cpuinfo", cpuinfo);

        fs.add_cpu_caches(SYS_CPU, ["48K", "32K", "1280K", "12288K"]);
        for core in 0..TYPICAL_CORES {
            fs.add_cpu_frequency(SYS_CPU, core, 400000, 4200000);
        }

        fs.add_process(PROC, 1, "systemd", "S (sleeping)");
        fs.add_process(PROC, 1000, "bash", "S (sleeping)");
        fs.add_process(PROC, 1001, "sshd", "R (running)");

        // Non-process entries that listing must skip
        fs.add_file("/proc/self/status", "Name:\tself\nState:\tR (running)\n");
        fs.add_dir("/proc/sys/kernel");

        fs
    }

    /// Typical system on a VM without `cpufreq` support.
    pub fn without_cpufreq() -> Self {
        let mut fs = Self::typical_system();
        for core in 0..TYPICAL_CORES {
            let cpufreq = format!("{SYS_CPU}/cpu{core}/cpufreq");
            fs.remove_file(format!("{cpufreq}/cpuinfo_min_freq"));
            fs.remove_file(format!("{cpufreq}/cpuinfo_max_freq"));
        }
        fs
    }

    /// Typical system where PID 1500 exited between listing `/proc` and
    /// reading its status: the directory is listed, the file is gone.
    pub fn with_vanished_process() -> Self {
        let mut fs = Self::typical_system();
        fs.add_process(PROC, 1500, "make", "R (running)");
        fs.remove_file("/proc/1500/status");
        fs
    }

    /// Typical system with a zombie and a process in uninterruptible sleep.
    pub fn with_zombie_process() -> Self {
        let mut fs = Self::typical_system();
        fs.add_process(PROC, 4000, "defunct", "Z (zombie)");
        fs.add_process(PROC, 4001, "kworker/u8:2", "D (disk sleep)");
        fs
    }
}
