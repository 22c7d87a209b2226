use std::fmt;

use crate::TestingMode;
use crate::descriptor::{self, AccessPattern, Descriptor, HugePage, ReadWriteMix};

/// One bindable benchmark setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    NumThreads,
    RegionSizeKb,
    ChunkSizeKb,
    StrideSizeB,
    AccessPattern,
    UseHugepage,
    ReadWriteMix,
    TargetDurationS,
}

impl Field {
    /// Smallest value the field accepts.
    pub fn min(self) -> u64 {
        match self {
            Field::NumThreads => 1,
            _ => 0,
        }
    }

    /// Largest value the field can hold.
    pub fn max(self) -> u64 {
        match self {
            Field::RegionSizeKb
            | Field::ChunkSizeKb
            | Field::StrideSizeB
            | Field::TargetDurationS => u64::MAX,
            Field::NumThreads | Field::AccessPattern | Field::UseHugepage | Field::ReadWriteMix => {
                u64::from(u32::MAX)
            }
        }
    }
}

/// The bound parameter set handed to the benchmark engine.
///
/// Fields whose option is not part of the active mode's schema stay at zero and carry no meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub num_threads: u32,
    pub region_size_kb: u64,
    pub chunk_size_kb: u64,
    pub stride_size_b: u64,
    pub access_pattern: u32,
    pub use_hugepage: u32,
    pub read_write_mix: u32,
    pub target_duration_s: u64,
}

impl Settings {
    pub fn get(&self, field: Field) -> u64 {
        match field {
            Field::NumThreads => self.num_threads.into(),
            Field::RegionSizeKb => self.region_size_kb,
            Field::ChunkSizeKb => self.chunk_size_kb,
            Field::StrideSizeB => self.stride_size_b,
            Field::AccessPattern => self.access_pattern.into(),
            Field::UseHugepage => self.use_hugepage.into(),
            Field::ReadWriteMix => self.read_write_mix.into(),
            Field::TargetDurationS => self.target_duration_s,
        }
    }

    /// Stores `value` into `field`. Values wider than a 32-bit field saturate; callers range check
    /// against [`Field::max`] first.
    pub(crate) fn store(&mut self, field: Field, value: u64) {
        let narrow = || u32::try_from(value).unwrap_or(u32::MAX);
        match field {
            Field::NumThreads => self.num_threads = narrow(),
            Field::RegionSizeKb => self.region_size_kb = value,
            Field::ChunkSizeKb => self.chunk_size_kb = value,
            Field::StrideSizeB => self.stride_size_b = value,
            Field::AccessPattern => self.access_pattern = narrow(),
            Field::UseHugepage => self.use_hugepage = narrow(),
            Field::ReadWriteMix => self.read_write_mix = narrow(),
            Field::TargetDurationS => self.target_duration_s = value,
        }
    }

    pub fn access_pattern(&self) -> Option<AccessPattern> {
        AccessPattern::from_code(self.access_pattern)
    }

    pub fn huge_page(&self) -> Option<HugePage> {
        HugePage::from_code(self.use_hugepage)
    }

    pub fn read_write_mix(&self) -> Option<ReadWriteMix> {
        ReadWriteMix::from_code(self.read_write_mix)
    }

    /// Coded settings of `mode` that hold a value outside their domain.
    ///
    /// Parsing accepts any unsigned integer for the coded options; this is the opt-in check for
    /// callers that want to report or reject such values.
    pub fn domain_violations(&self, mode: TestingMode) -> Vec<DomainViolation> {
        let mut violations = vec![];
        if mode.has_latency_options() {
            if self.access_pattern().is_none() {
                violations.push(DomainViolation::new(Field::AccessPattern, self.access_pattern));
            }
            if self.huge_page().is_none() {
                violations.push(DomainViolation::new(Field::UseHugepage, self.use_hugepage));
            }
        }
        if mode.has_bandwidth_options()
            && !self
                .read_write_mix()
                .is_some_and(|mix| mix.offered_in(mode))
        {
            violations.push(DomainViolation::new(Field::ReadWriteMix, self.read_write_mix));
        }
        violations
    }

    /// Prints the configuration report to stdout.
    pub fn dump(&self) {
        print!("{self}");
    }
}

/// Fixed-order report, one `label: value` line per setting. Result post-processing scrapes these
/// labels, so they must stay stable.
impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "threads:           {}", self.num_threads)?;
        writeln!(f, "region size in KB: {}", self.region_size_kb)?;
        writeln!(f, "chunk size in KB:  {}", self.chunk_size_kb)?;
        writeln!(f, "stride size in B:  {}", self.stride_size_b)?;
        writeln!(
            f,
            "access pattern:    {} - {}",
            self.access_pattern,
            descriptor::access_pattern(self.access_pattern)
        )?;
        writeln!(
            f,
            "use hugepage:      {} - {}",
            self.use_hugepage,
            descriptor::huge_page(self.use_hugepage)
        )?;
        writeln!(
            f,
            "read/write mix:    {} - {}",
            self.read_write_mix,
            descriptor::read_write_mix(self.read_write_mix)
        )?;
        writeln!(f, "target duration:   {}", self.target_duration_s)
    }
}

/// A coded setting whose value has no meaning under the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainViolation {
    pub field: Field,
    pub code: u32,
}

impl DomainViolation {
    fn new(field: Field, code: u32) -> Self {
        Self { field, code }
    }
}

impl fmt::Display for DomainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} is not a valid choice", self.field, self.code)
    }
}
