//! Resource governor — process ceilings and the wall-clock deadline.

use sc_core::{GovernorConfig, Result, ScError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

/// Working-set estimate per input byte, covering the copies the strategies
/// make of the content.
const WORKING_SET_FACTOR: u64 = 16;

/// Wall-clock deadline threaded through the pipeline and checked at
/// strategy boundaries.
#[derive(Debug, Clone)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn after(limit: Duration) -> Self {
        Self { started: Instant::now(), limit: Some(limit) }
    }

    /// A deadline that never fires.
    pub fn none() -> Self {
        Self { started: Instant::now(), limit: None }
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    pub fn check(&self) -> Result<()> {
        match self.limit {
            Some(limit) if self.expired() => Err(ScError::OperationTimeout {
                elapsed_secs: self.elapsed().as_secs_f64(),
                deadline_secs: limit.as_secs_f64(),
            }),
            _ => Ok(()),
        }
    }
}

/// Which process ceilings were installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitReport {
    pub memory: bool,
    pub cpu: bool,
}

/// Disarms the governor when dropped.
struct ArmGuard<'a>(&'a AtomicBool);

impl Drop for ArmGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ResourceGovernor {
    config: GovernorConfig,
    armed: AtomicBool,
}

impl ResourceGovernor {
    pub fn new(config: GovernorConfig) -> Self {
        Self { config, armed: AtomicBool::new(false) }
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Install the address-space and CPU-time ceilings. Failures are logged
    /// and reported, never raised.
    pub fn apply_limits(&self) -> LimitReport {
        let report = platform::apply(self.config.memory_limit_bytes(), self.config.cpu_limit_secs);
        if report.memory && report.cpu {
            info!(
                "Resource limits set: {}MB memory, {}s CPU time",
                self.config.memory_limit_mib, self.config.cpu_limit_secs
            );
        }
        report
    }

    /// `min(requested, environment override or default)`.
    pub fn effective_timeout(&self, requested: Duration) -> Duration {
        requested.min(self.config.timeout_ceiling())
    }

    /// Refuse inputs whose working set would exceed the memory ceiling.
    pub fn check_memory(&self, content: &str) -> Result<()> {
        let needed = (content.len() as u64).saturating_mul(WORKING_SET_FACTOR);
        let limit = self.config.memory_limit_bytes();
        if needed > limit {
            return Err(ScError::ResourceExhausted(format!(
                "estimated working set {needed} bytes exceeds {limit} byte ceiling"
            )));
        }
        Ok(())
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    fn arm(&self) -> ArmGuard<'_> {
        self.armed.store(true, Ordering::SeqCst);
        ArmGuard(&self.armed)
    }

    /// Run `op` under a deadline of `effective_timeout(requested)`. A deadline
    /// that fires before `op` returns fails the whole operation; the
    /// deadline is disarmed on every exit path.
    pub fn run<T>(&self, requested: Duration, op: impl FnOnce(&Deadline) -> Result<T>) -> Result<T> {
        let deadline = Deadline::after(self.effective_timeout(requested));
        let _guard = self.arm();
        let value = op(&deadline)?;
        deadline.check()?;
        Ok(value)
    }
}

impl Default for ResourceGovernor {
    fn default() -> Self {
        Self::new(GovernorConfig::default())
    }
}

#[cfg(unix)]
mod platform {
    use super::LimitReport;
    use nix::libc::rlim_t;
    use nix::sys::resource::{setrlimit, Resource};
    use tracing::warn;

    fn set(resource: Resource, value: u64) -> bool {
        match setrlimit(resource, value as rlim_t, value as rlim_t) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not set resource limit {:?}: {}", resource, e);
                false
            }
        }
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
    fn set_memory(bytes: u64) -> bool {
        set(Resource::RLIMIT_AS, bytes)
    }

    #[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos")))]
    fn set_memory(_bytes: u64) -> bool {
        warn!("Address-space limit unsupported on this platform");
        false
    }

    pub fn apply(memory_bytes: u64, cpu_secs: u64) -> LimitReport {
        LimitReport { memory: set_memory(memory_bytes), cpu: set(Resource::RLIMIT_CPU, cpu_secs) }
    }
}

#[cfg(not(unix))]
mod platform {
    use super::LimitReport;
    use tracing::warn;

    pub fn apply(_memory_bytes: u64, _cpu_secs: u64) -> LimitReport {
        warn!("Resource limits unsupported on this platform");
        LimitReport::default()
    }
}
