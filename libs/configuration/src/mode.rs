/// The kind of measurement a benchmark run performs.
///
/// The mode decides which option groups exist and which defaults apply; it is chosen once when a
/// [`Configuration`](crate::Configuration) is created and never changes afterwards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
pub enum TestingMode {
    /// A single thread chasing pointers through an otherwise idle memory subsystem.
    #[strum(
        to_string = "latency",
        serialize = "idle-latency",
        ascii_case_insensitive
    )]
    #[value(name = "latency", alias = "idle-latency")]
    Latency,
    /// All threads streaming reads/writes to saturate the memory subsystem.
    #[strum(
        to_string = "bandwidth",
        serialize = "peak-bandwidth",
        ascii_case_insensitive
    )]
    #[value(name = "bandwidth", alias = "peak-bandwidth")]
    Bandwidth,
    /// One latency thread measuring while the remaining threads generate bandwidth load.
    #[strum(
        to_string = "loaded-latency",
        serialize = "latency-bandwidth",
        ascii_case_insensitive
    )]
    #[value(name = "loaded-latency", alias = "latency-bandwidth")]
    LatencyBandwidth,
}

impl TestingMode {
    /// Heading shown at the top of the usage text.
    pub fn title(self) -> &'static str {
        match self {
            TestingMode::Latency => "Idle latency",
            TestingMode::Bandwidth => "Peak bandwidth",
            TestingMode::LatencyBandwidth => {
                "Loaded latency; 1 latency thread + n-1 bandwidth threads"
            }
        }
    }

    pub fn has_latency_options(self) -> bool {
        matches!(self, TestingMode::Latency | TestingMode::LatencyBandwidth)
    }

    pub fn has_bandwidth_options(self) -> bool {
        matches!(self, TestingMode::Bandwidth | TestingMode::LatencyBandwidth)
    }
}
