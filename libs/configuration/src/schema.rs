//! The set of options a benchmark mode accepts, with their defaults and help text.

use clap::{Arg, ArgAction, Command};

use crate::TestingMode;
use crate::descriptor::{self, AccessPattern, HugePage, ReadWriteMix};
use crate::hardware::Hardware;
use crate::settings::{Field, Settings};

/// Name the usage text refers to the program by.
pub const PROGRAM: &str = "membench";

const REGION_SIZE_KB: u64 = 128 * 1024;
/// A single pointer chasing thread needs a region well beyond the last level cache.
const LATENCY_REGION_SIZE_KB: u64 = 512 * 1024;
const TARGET_DURATION_S: u64 = 10;
const CHUNK_SIZE_KB: u64 = 128;
const STRIDE_SIZE_B: u64 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Generic,
    Latency,
    Bandwidth,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Generic => "Generic options",
            Category::Latency => "Latency thread options",
            Category::Bandwidth => "Bandwidth threads options",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Takes no value; only its presence matters.
    Flag,
    /// Binds a value to `field`, which holds `default` when the option is absent.
    Value { field: Field, default: u64 },
}

/// One command line option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long name, used as `--<name>`.
    pub name: &'static str,
    pub short: char,
    pub kind: OptionKind,
    pub help: String,
}

impl OptionSpec {
    fn flag(name: &'static str, short: char, help: &str) -> Self {
        Self {
            name,
            short,
            kind: OptionKind::Flag,
            help: help.to_string(),
        }
    }

    fn value(
        name: &'static str,
        short: char,
        field: Field,
        default: impl Into<u64>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            name,
            short,
            kind: OptionKind::Value {
                field,
                default: default.into(),
            },
            help: help.into(),
        }
    }

    pub fn field(&self) -> Option<Field> {
        match self.kind {
            OptionKind::Flag => None,
            OptionKind::Value { field, .. } => Some(field),
        }
    }

    pub fn default(&self) -> Option<u64> {
        match self.kind {
            OptionKind::Flag => None,
            OptionKind::Value { default, .. } => Some(default),
        }
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name).short(self.short).long(self.name);
        match self.kind {
            OptionKind::Flag => arg.action(ArgAction::SetTrue).help(self.help.clone()),
            OptionKind::Value { default, .. } => arg
                .action(ArgAction::Set)
                .value_name("N")
                .allow_negative_numbers(true)
                .help(with_default(&self.help, default)),
        }
    }
}

/// Puts the default at the end of the first help line, ahead of any listed choices.
fn with_default(help: &str, default: u64) -> String {
    match help.split_once('\n') {
        Some((summary, choices)) => format!("{summary} [default: {default}]\n{choices}"),
        None => format!("{help} [default: {default}]"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub category: Category,
    pub options: Vec<OptionSpec>,
}

/// Ordered option groups for one testing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    mode: TestingMode,
    groups: Vec<OptionGroup>,
}

impl Schema {
    /// Assembles the options of `mode`. Generic options come first, followed by the latency
    /// and/or bandwidth groups the mode uses.
    pub fn build(mode: TestingMode, hardware: &impl Hardware) -> Self {
        let mut groups = vec![generic_options(mode, hardware)];
        if mode.has_latency_options() {
            groups.push(latency_options());
        }
        if mode.has_bandwidth_options() {
            groups.push(bandwidth_options(mode));
        }
        Self { mode, groups }
    }

    pub fn mode(&self) -> TestingMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// All options in display order.
    pub fn options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.groups.iter().flat_map(|group| group.options.iter())
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options().find(|spec| spec.name == name)
    }

    /// Default of `field`, or `None` when the mode does not expose it.
    pub fn default_of(&self, field: Field) -> Option<u64> {
        self.options()
            .find(|spec| spec.field() == Some(field))
            .and_then(OptionSpec::default)
    }

    /// Settings holding every default of this schema. Fields outside the schema stay zero.
    pub fn defaults(&self) -> Settings {
        let mut settings = Settings::default();
        for spec in self.options() {
            if let OptionKind::Value { field, default } = spec.kind {
                settings.store(field, default);
            }
        }
        settings
    }

    /// The schema expressed as a clap command, used for tokenising and for the usage text.
    pub fn command(&self) -> Command {
        let command = Command::new(PROGRAM)
            .bin_name(format!("{PROGRAM} {}", self.mode))
            .about(self.title())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true);

        self.groups.iter().fold(command, |command, group| {
            group.options.iter().fold(command, |command, spec| {
                command.arg(spec.to_arg().help_heading(group.category.title()))
            })
        })
    }

    pub fn render_help(&self) -> String {
        self.command().render_help().to_string()
    }
}

fn generic_options(mode: TestingMode, hardware: &impl Hardware) -> OptionGroup {
    let (num_threads, region_size_kb) = match mode {
        // a latency probe must not contend with other active threads
        TestingMode::Latency => (1, LATENCY_REGION_SIZE_KB),
        TestingMode::Bandwidth | TestingMode::LatencyBandwidth => {
            (hardware.logical_cores(), REGION_SIZE_KB)
        }
    };

    OptionGroup {
        category: Category::Generic,
        options: vec![
            OptionSpec::flag("help", 'h', "print usage message"),
            OptionSpec::value(
                "num_threads",
                'n',
                Field::NumThreads,
                num_threads,
                "total number of threads",
            ),
            OptionSpec::value(
                "region_size",
                'b',
                Field::RegionSizeKb,
                region_size_kb,
                "region size in KB",
            ),
            OptionSpec::value(
                "target_duration",
                't',
                Field::TargetDurationS,
                TARGET_DURATION_S,
                "target duration in seconds",
            ),
        ],
    }
}

fn latency_options() -> OptionGroup {
    OptionGroup {
        category: Category::Latency,
        options: vec![
            OptionSpec::value(
                "access_pattern",
                'p',
                Field::AccessPattern,
                AccessPattern::RandomInChunk as u32,
                format!(
                    "access pattern{}",
                    descriptor::choices::<AccessPattern>(|_| true)
                ),
            ),
            OptionSpec::value(
                "chunk_size",
                'c',
                Field::ChunkSizeKb,
                CHUNK_SIZE_KB,
                "chunk size in KB - target L1TLB can cover",
            ),
            OptionSpec::value(
                "stride_size",
                's',
                Field::StrideSizeB,
                STRIDE_SIZE_B,
                "stride size in byte",
            ),
            OptionSpec::value(
                "use_hugepage",
                'H',
                Field::UseHugepage,
                HugePage::Disabled as u32,
                format!("use huge pages{}", descriptor::choices::<HugePage>(|_| true)),
            ),
        ],
    }
}

fn bandwidth_options(mode: TestingMode) -> OptionGroup {
    // a loaded latency run keeps its latency probe fixed, so it must not sweep implicitly
    let read_write_mix = match mode {
        TestingMode::Bandwidth => ReadWriteMix::Sweep,
        TestingMode::Latency | TestingMode::LatencyBandwidth => ReadWriteMix::AllReads,
    };

    OptionGroup {
        category: Category::Bandwidth,
        options: vec![OptionSpec::value(
            "read_write_mix",
            'm',
            Field::ReadWriteMix,
            read_write_mix as u32,
            format!(
                "read/write mix{}",
                descriptor::choices::<ReadWriteMix>(|mix| mix.offered_in(mode))
            ),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::FixedCores;

    const CORES: FixedCores = FixedCores(16);

    fn names(schema: &Schema) -> Vec<&'static str> {
        schema.options().map(|spec| spec.name).collect()
    }

    fn categories(schema: &Schema) -> Vec<Category> {
        schema.groups().iter().map(|group| group.category).collect()
    }

    #[test]
    fn latency_schema() {
        let schema = Schema::build(TestingMode::Latency, &CORES);
        assert_eq!(categories(&schema), vec![Category::Generic, Category::Latency]);
        assert_eq!(
            names(&schema),
            vec![
                "help",
                "num_threads",
                "region_size",
                "target_duration",
                "access_pattern",
                "chunk_size",
                "stride_size",
                "use_hugepage",
            ]
        );
        assert!(schema.option("read_write_mix").is_none());
    }

    #[test]
    fn bandwidth_schema() {
        let schema = Schema::build(TestingMode::Bandwidth, &CORES);
        assert_eq!(categories(&schema), vec![Category::Generic, Category::Bandwidth]);
        assert_eq!(
            names(&schema),
            vec![
                "help",
                "num_threads",
                "region_size",
                "target_duration",
                "read_write_mix",
            ]
        );
        for latency_only in ["access_pattern", "chunk_size", "stride_size", "use_hugepage"] {
            assert!(schema.option(latency_only).is_none(), "{latency_only}");
        }
    }

    #[test]
    fn loaded_latency_schema() {
        let schema = Schema::build(TestingMode::LatencyBandwidth, &CORES);
        assert_eq!(
            categories(&schema),
            vec![Category::Generic, Category::Latency, Category::Bandwidth]
        );
        assert_eq!(schema.options().count(), 9);
    }

    #[test]
    fn thread_default_follows_mode_and_hardware() {
        let latency = Schema::build(TestingMode::Latency, &CORES);
        let bandwidth = Schema::build(TestingMode::Bandwidth, &CORES);
        let loaded = Schema::build(TestingMode::LatencyBandwidth, &CORES);

        assert_eq!(latency.default_of(Field::NumThreads), Some(1));
        assert_eq!(bandwidth.default_of(Field::NumThreads), Some(16));
        assert_eq!(loaded.default_of(Field::NumThreads), Some(16));
    }

    #[test]
    fn region_default_follows_mode() {
        assert_eq!(
            Schema::build(TestingMode::Latency, &CORES).default_of(Field::RegionSizeKb),
            Some(524_288)
        );
        assert_eq!(
            Schema::build(TestingMode::Bandwidth, &CORES).default_of(Field::RegionSizeKb),
            Some(131_072)
        );
        assert_eq!(
            Schema::build(TestingMode::LatencyBandwidth, &CORES).default_of(Field::RegionSizeKb),
            Some(131_072)
        );
    }

    #[test]
    fn read_write_mix_default_follows_mode() {
        assert_eq!(
            Schema::build(TestingMode::Bandwidth, &CORES).default_of(Field::ReadWriteMix),
            Some(100)
        );
        assert_eq!(
            Schema::build(TestingMode::LatencyBandwidth, &CORES).default_of(Field::ReadWriteMix),
            Some(0)
        );
        assert_eq!(
            Schema::build(TestingMode::Latency, &CORES).default_of(Field::ReadWriteMix),
            None
        );
    }

    #[test]
    fn latency_group_defaults() {
        let defaults = Schema::build(TestingMode::LatencyBandwidth, &CORES).defaults();
        assert_eq!(defaults.access_pattern, 1);
        assert_eq!(defaults.chunk_size_kb, 128);
        assert_eq!(defaults.stride_size_b, 64);
        assert_eq!(defaults.use_hugepage, 0);
        assert_eq!(defaults.target_duration_s, 10);
    }

    /// Fields of groups the mode does not use stay at zero.
    #[test]
    fn defaults_leave_foreign_fields_zeroed() {
        let defaults = Schema::build(TestingMode::Bandwidth, &CORES).defaults();
        assert_eq!(defaults.access_pattern, 0);
        assert_eq!(defaults.chunk_size_kb, 0);
        assert_eq!(defaults.stride_size_b, 0);
        assert_eq!(defaults.read_write_mix, 100);
    }

    #[test]
    fn sweep_is_only_advertised_for_pure_bandwidth() {
        let bandwidth = Schema::build(TestingMode::Bandwidth, &CORES);
        let loaded = Schema::build(TestingMode::LatencyBandwidth, &CORES);

        let help = |schema: &Schema| schema.option("read_write_mix").unwrap().help.clone();
        assert!(help(&bandwidth).contains("100 - sweep read/write ratio"));
        assert!(!help(&loaded).contains("sweep"));
        assert!(help(&loaded).contains("3 - 3:1 read/write"));
    }

    #[test]
    fn enumerated_help_lists_every_choice() {
        let schema = Schema::build(TestingMode::Latency, &CORES);
        assert_eq!(
            schema.option("access_pattern").unwrap().help,
            "access pattern\n  0 - sequential\n  1 - random in chunk\n  2 - random in region"
        );
    }

    #[test]
    fn default_goes_on_the_summary_line() {
        assert_eq!(
            with_default("use huge pages\n  0 - no huge page", 0),
            "use huge pages [default: 0]\n  0 - no huge page"
        );
        assert_eq!(with_default("stride size in byte", 64), "stride size in byte [default: 64]");
    }

    #[test]
    fn usage_text_lists_groups_in_order() {
        let usage = Schema::build(TestingMode::LatencyBandwidth, &CORES).render_help();

        assert!(usage.contains("Loaded latency; 1 latency thread + n-1 bandwidth threads"));
        let generic = usage.find("Generic options").unwrap();
        let latency = usage.find("Latency thread options").unwrap();
        let bandwidth = usage.find("Bandwidth threads options").unwrap();
        assert!(generic < latency && latency < bandwidth);

        assert!(usage.contains("--num_threads"));
        assert!(usage.contains("-H, --use_hugepage"));
        assert!(usage.contains("random in region"));
    }

    #[test]
    fn command_is_consistent() {
        for mode in [
            TestingMode::Latency,
            TestingMode::Bandwidth,
            TestingMode::LatencyBandwidth,
        ] {
            Schema::build(mode, &CORES).command().debug_assert();
        }
    }
}
