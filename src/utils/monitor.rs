use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// Tracks the wall-clock time of a run and, when enabled, the resource usage
/// of this process.
pub struct RunMonitor {
    start_time: Instant,
    #[cfg(feature = "cli")]
    process: Option<ProcessProbe>,
}

#[cfg(feature = "cli")]
struct ProcessProbe {
    system: Mutex<System>,
    pid: Pid,
    peak_memory_mb: Mutex<u64>,
}

impl RunMonitor {
    #[cfg(feature = "cli")]
    pub fn new(stats_enabled: bool) -> Self {
        let process = if stats_enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(ProcessProbe {
                    system: Mutex::new(System::new()),
                    pid,
                    peak_memory_mb: Mutex::new(0),
                }),
                Err(e) => {
                    tracing::warn!("Process stats unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            start_time: Instant::now(),
            process,
        }
    }

    #[cfg(not(feature = "cli"))]
    pub fn new(_stats_enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[cfg(feature = "cli")]
    pub fn get_stats(&self) -> Option<ProcessStats> {
        let probe = self.process.as_ref()?;
        let mut system = probe.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[probe.pid]),
            true,
            ProcessRefreshKind::everything(),
        );

        let process = system.process(probe.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;

        let mut peak = probe.peak_memory_mb.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
            elapsed_time: self.elapsed(),
        })
    }

    #[cfg(not(feature = "cli"))]
    pub fn get_stats(&self) -> Option<ProcessStats> {
        None
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        self.log_stats("Final");
        tracing::info!("Execution time: {}ms", self.elapsed().as_millis());
    }

    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.process.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
