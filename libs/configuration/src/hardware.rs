use std::thread;

/// Source of the machine facts that feed option defaults.
pub trait Hardware {
    /// Number of logical cores available to the process. Never zero.
    fn logical_cores(&self) -> u32;
}

/// The machine the process is running on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Host;

impl Hardware for Host {
    fn logical_cores(&self) -> u32 {
        match thread::available_parallelism() {
            Ok(n) => u32::try_from(n.get()).unwrap_or(u32::MAX),
            Err(e) => {
                tracing::debug!("could not query available parallelism, assuming 1 core: {e}");
                1
            }
        }
    }
}

/// A fixed core count, for tests and for callers that pin the thread default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCores(pub u32);

impl Hardware for FixedCores {
    fn logical_cores(&self) -> u32 {
        self.0.max(1)
    }
}
