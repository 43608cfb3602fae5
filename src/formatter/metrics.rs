//! Host metrics collaborator used by the system placeholders.
//!
//! Values are read live on every call; nothing is cached between log calls.

/// Physical memory snapshot in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total: u64,
    pub free: u64,
}

impl MemoryInfo {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    /// `part` as a percentage of total, two decimals. Zero total reads as 0.
    pub fn percent(&self, part: u64) -> String {
        if self.total == 0 {
            return "0.00".to_string();
        }
        format!("{:.2}", part as f64 / self.total as f64 * 100.0)
    }
}

/// CPU snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuInfo {
    /// Distinct model names, in first-seen order
    pub names: Vec<String>,
    /// Logical core count
    pub cores: usize,
    /// Lowest reported core frequency in MHz
    pub speed_mhz: u64,
}

/// OS-facing accessor for the values behind `ram`, `cpu`, `hostname`,
/// `username` and `uptime` placeholders.
pub trait HostMetrics: Send + Sync {
    fn memory(&self) -> MemoryInfo;
    fn cpu(&self) -> CpuInfo;
    fn hostname(&self) -> String;
    /// `None` leaves the placeholder unresolved.
    fn username(&self) -> Option<String>;
    fn uptime_secs(&self) -> u64;
}

/// Live metrics from the running host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMetrics;

impl HostMetrics for SystemMetrics {
    #[cfg(feature = "system-monitor")]
    fn memory(&self) -> MemoryInfo {
        use sysinfo::{MemoryRefreshKind, RefreshKind, System};

        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        MemoryInfo {
            total: sys.total_memory(),
            free: sys.free_memory(),
        }
    }

    #[cfg(not(feature = "system-monitor"))]
    fn memory(&self) -> MemoryInfo {
        MemoryInfo::default()
    }

    #[cfg(feature = "system-monitor")]
    fn cpu(&self) -> CpuInfo {
        use sysinfo::{CpuRefreshKind, RefreshKind, System};

        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_frequency()),
        );
        let mut names: Vec<String> = Vec::new();
        for cpu in sys.cpus() {
            let brand = cpu.brand().trim();
            if !brand.is_empty() && !names.iter().any(|n| n == brand) {
                names.push(brand.to_string());
            }
        }
        CpuInfo {
            names,
            cores: sys.cpus().len(),
            speed_mhz: sys.cpus().iter().map(|c| c.frequency()).min().unwrap_or(0),
        }
    }

    #[cfg(not(feature = "system-monitor"))]
    fn cpu(&self) -> CpuInfo {
        CpuInfo::default()
    }

    fn hostname(&self) -> String {
        hostname::get()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|_| "localhost".to_string())
    }

    fn username(&self) -> Option<String> {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
    }

    #[cfg(feature = "system-monitor")]
    fn uptime_secs(&self) -> u64 {
        sysinfo::System::uptime()
    }

    #[cfg(not(feature = "system-monitor"))]
    fn uptime_secs(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_percent() {
        let mem = MemoryInfo {
            total: 1000,
            free: 250,
        };
        assert_eq!(mem.used(), 750);
        assert_eq!(mem.percent(mem.free), "25.00");
        assert_eq!(mem.percent(mem.used()), "75.00");
        assert_eq!(MemoryInfo::default().percent(0), "0.00");
    }

    #[test]
    fn test_system_hostname_is_not_empty() {
        assert!(!SystemMetrics.hostname().is_empty());
    }
}
