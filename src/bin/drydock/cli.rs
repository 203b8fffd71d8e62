//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use drydock::core::Profile;
use drydock::util::shell::ColorChoice;

/// Drydock - staged configure, build, test and run for CMake projects
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted before or after any subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Show skipped prerequisites and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only; tool output is shown when a stage fails
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Build directory (default: <source-dir>/build)
    #[arg(long, global = true, value_name = "DIR")]
    pub build_root: Option<PathBuf>,

    /// Project directory holding CMakeLists.txt (default: nearest drydock.toml, else cwd)
    #[arg(long, global = true, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the build tree
    Configure(ConfigureArgs),

    /// Compile the project, configuring first if needed
    Build(BuildArgs),

    /// Run the test suite, building first if needed
    Test(TestArgs),

    /// Run the built executable, building first if needed
    Run(RunArgs),

    /// Remove the build directory
    Clean,

    /// Configure, build and test in one go
    All(AllArgs),

    /// Show what the build directory currently holds
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Build profile: debug, release, relwithdebinfo, minsizerel
    #[arg(long, value_name = "PROFILE", conflicts_with = "release")]
    pub profile: Option<Profile>,

    /// Build in release mode
    #[arg(short, long)]
    pub release: bool,
}

impl ProfileArgs {
    /// The profile picked on the command line, if any.
    pub fn selected(&self) -> Option<Profile> {
        Profile::from_flags(self.release, self.profile)
    }
}

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Number of parallel jobs
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct TestArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Number of parallel jobs
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Arguments passed to the executable unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct AllArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Number of parallel jobs
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Also run the executable after the tests pass
    #[arg(long)]
    pub with_run: bool,

    /// Arguments passed to the executable with --with-run
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
