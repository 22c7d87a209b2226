use configuration::TestingMode;

/// Command line of the benchmark: a testing mode followed by that mode's options.
///
/// The options, `--help` included, are left untouched here and handed to the option parser of the
/// selected mode.
#[derive(Debug, Clone, clap::Parser)]
#[command(
    name = configuration::PROGRAM,
    disable_help_flag = true,
    arg_required_else_help = true
)]
pub struct Cfg {
    /// The measurement to configure.
    #[arg(allow_hyphen_values = true)]
    pub mode: TestingMode,
    /// Options of the selected mode; pass `--help` after the mode to list them.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub options: Vec<String>,
}
