//! Human readable labels for the integer coded settings.
//!
//! The benchmark keeps access pattern, huge page mode and read/write mix as small integers on the
//! command line and in the configuration dump. The enums below give those integers a name, and the
//! free functions turn any integer into a label, falling back to [`INVALID`] for codes outside the
//! known domain. Rendering never fails.

use strum::IntoEnumIterator;

use crate::TestingMode;

/// Label rendered for any code outside a family's domain.
pub const INVALID: &str = "invalid";

/// A family of integer coded settings with a label per code.
pub trait Descriptor: Copy + Into<&'static str> + IntoEnumIterator {
    fn from_code(code: u32) -> Option<Self>;

    fn code(self) -> u32;

    fn label(self) -> &'static str {
        self.into()
    }
}

macro_rules! impl_descriptor {
    ($($family:ty),+ $(,)?) => {
        $(
            impl Descriptor for $family {
                fn from_code(code: u32) -> Option<Self> {
                    Self::from_repr(code)
                }

                fn code(self) -> u32 {
                    self as u32
                }
            }
        )+
    };
}

/// Order in which the latency thread walks its buffer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::FromRepr, strum::EnumIter, strum::IntoStaticStr,
)]
#[repr(u32)]
pub enum AccessPattern {
    #[strum(serialize = "sequential")]
    Sequential = 0,
    /// Random accesses confined to one chunk, so the chunk's translations stay TLB resident.
    #[strum(serialize = "random in chunk")]
    RandomInChunk = 1,
    #[strum(serialize = "random in region")]
    RandomInRegion = 2,
}

/// Page size backing the measured region.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::FromRepr, strum::EnumIter, strum::IntoStaticStr,
)]
#[repr(u32)]
pub enum HugePage {
    #[strum(serialize = "no huge page")]
    Disabled = 0,
    #[strum(serialize = "2MB huge page")]
    TwoMegabytes = 1,
    #[strum(serialize = "1GB huge page")]
    OneGigabyte = 2,
}

/// Ratio of reads to writes issued by the bandwidth threads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::FromRepr, strum::EnumIter, strum::IntoStaticStr,
)]
#[repr(u32)]
pub enum ReadWriteMix {
    #[strum(serialize = "all reads")]
    AllReads = 0,
    #[strum(serialize = "1:1 read/write")]
    OneToOne = 1,
    #[strum(serialize = "2:1 read/write")]
    TwoToOne = 2,
    #[strum(serialize = "3:1 read/write")]
    ThreeToOne = 3,
    /// Run every ratio in turn.
    #[strum(serialize = "sweep read/write ratio")]
    Sweep = 100,
}

impl ReadWriteMix {
    /// Whether this mix is a legal choice under `mode`.
    ///
    /// A loaded latency run keeps a fixed latency probe alive for the whole run, so changing the
    /// ratio mid-measurement is only offered for pure bandwidth runs.
    pub fn offered_in(self, mode: TestingMode) -> bool {
        match self {
            ReadWriteMix::Sweep => mode == TestingMode::Bandwidth,
            _ => mode.has_bandwidth_options(),
        }
    }
}

impl_descriptor!(AccessPattern, HugePage, ReadWriteMix);

/// Label of `code` within family `D`, or [`INVALID`].
pub fn describe<D: Descriptor>(code: impl Into<i64>) -> &'static str {
    u32::try_from(code.into())
        .ok()
        .and_then(D::from_code)
        .map_or(INVALID, D::label)
}

pub fn access_pattern(code: impl Into<i64>) -> &'static str {
    describe::<AccessPattern>(code)
}

pub fn huge_page(code: impl Into<i64>) -> &'static str {
    describe::<HugePage>(code)
}

pub fn read_write_mix(code: impl Into<i64>) -> &'static str {
    describe::<ReadWriteMix>(code)
}

/// Renders one `"  <code> - <label>"` line per member of `D` accepted by `offered`.
///
/// Each line starts with a newline so the result can be appended directly to an option's
/// one-line description.
pub fn choices<D: Descriptor>(offered: impl Fn(D) -> bool) -> String {
    D::iter()
        .filter(|member| offered(*member))
        .map(|member| format!("\n  {} - {}", member.code(), describe::<D>(member.code())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_pattern_labels() {
        assert_eq!(access_pattern(0), "sequential");
        assert_eq!(access_pattern(1), "random in chunk");
        assert_eq!(access_pattern(2), "random in region");
    }

    #[test]
    fn huge_page_labels() {
        assert_eq!(huge_page(0), "no huge page");
        assert_eq!(huge_page(1), "2MB huge page");
        assert_eq!(huge_page(2), "1GB huge page");
    }

    #[test]
    fn read_write_mix_labels() {
        assert_eq!(read_write_mix(0), "all reads");
        assert_eq!(read_write_mix(1), "1:1 read/write");
        assert_eq!(read_write_mix(2), "2:1 read/write");
        assert_eq!(read_write_mix(3), "3:1 read/write");
        assert_eq!(read_write_mix(100), "sweep read/write ratio");
    }

    /// Out of domain codes degrade to the explicit marker instead of failing.
    #[test]
    fn out_of_domain_codes_are_invalid() {
        for code in [-1_i64, 3, 4, 99, 101, i64::from(u32::MAX) + 1, i64::MIN] {
            assert_eq!(access_pattern(code), INVALID, "access pattern {code}");
            assert_eq!(huge_page(code), INVALID, "huge page {code}");
        }
        for code in [-1_i64, 4, 5, 99, 101, 1_000] {
            assert_eq!(read_write_mix(code), INVALID, "read/write mix {code}");
        }
    }

    #[test]
    fn codes_match_the_documented_integers() {
        assert_eq!(AccessPattern::RandomInChunk.code(), 1);
        assert_eq!(HugePage::OneGigabyte.code(), 2);
        assert_eq!(ReadWriteMix::Sweep.code(), 100);
        assert_eq!(ReadWriteMix::from_code(100), Some(ReadWriteMix::Sweep));
        assert_eq!(ReadWriteMix::from_code(4), None);
    }

    #[test]
    fn sweep_only_offered_for_pure_bandwidth() {
        assert!(ReadWriteMix::Sweep.offered_in(TestingMode::Bandwidth));
        assert!(!ReadWriteMix::Sweep.offered_in(TestingMode::LatencyBandwidth));
        assert!(ReadWriteMix::OneToOne.offered_in(TestingMode::LatencyBandwidth));
        assert!(!ReadWriteMix::AllReads.offered_in(TestingMode::Latency));
    }

    #[test]
    fn choices_render_one_line_per_offered_code() {
        assert_eq!(
            choices::<HugePage>(|_| true),
            "\n  0 - no huge page\n  1 - 2MB huge page\n  2 - 1GB huge page"
        );

        let mixed = choices::<ReadWriteMix>(|mix| mix.offered_in(TestingMode::LatencyBandwidth));
        assert!(mixed.ends_with("3 - 3:1 read/write"));
        assert!(!mixed.contains("100"));
    }
}
