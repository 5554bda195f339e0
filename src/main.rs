use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;

use bvm::commands::{set_default, use_version};
use bvm::error::Error;
use bvm::runtime::{RealRuntime, Runtime};

/// bvm - Homebrew Version Manager
///
/// Manage multiple installed versions of a Homebrew formula and switch
/// between them: `use` starts a new shell with the chosen version first on
/// PATH, `set` re-points the system-wide default link.
///
/// Examples:
///   bvm use python 3.11    # New shell with python 3.11 active
///   bvm set python 3.11    # Make python 3.11 the system default
#[derive(Parser, Debug)]
#[command(author, version = env!("BVM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Homebrew executable (overrides the default; also via BVM_BREW)
    #[arg(long = "brew", env = "BVM_BREW", value_name = "PATH", global = true)]
    pub brew: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start a new shell with the specified formula version in PATH
    ///
    /// Example: bvm use python 3.11
    ///
    /// Type 'exit' to return to the normal shell.
    Use(FormulaArgs),

    /// Set a specific version of a formula as the system default
    ///
    /// Example: bvm set python 3.11
    Set(FormulaArgs),
}

#[derive(clap::Args, Debug)]
pub struct FormulaArgs {
    /// The base formula name, e.g. "python"
    #[arg(value_name = "FORMULA")]
    pub formula: Option<String>,

    /// The version to activate, e.g. "3.11"
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,
}

impl FormulaArgs {
    /// A bare subcommand invocation is an informational no-op, not a
    /// validation failure.
    fn is_empty(&self) -> bool {
        self.formula.is_none() && self.version.is_none()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    if let Err(err) = run(cli, &runtime) {
        // One explanatory message per failure, then a non-zero exit.
        println!("Error: {err}");
        process::exit(1);
    }
}

fn run<R: Runtime>(cli: Cli, runtime: &R) -> Result<(), Error> {
    match cli.command {
        Some(Commands::Use(args)) => {
            if args.is_empty() {
                print_subcommand_help("use");
                return Ok(());
            }
            let launch = use_version(
                runtime,
                args.formula.as_deref(),
                args.version.as_deref(),
                cli.brew,
            )?;
            // A successful hand-off replaces this process; only errors return.
            match launch.hand_off(runtime)? {}
        }
        Some(Commands::Set(args)) => {
            if args.is_empty() {
                print_subcommand_help("set");
                return Ok(());
            }
            set_default(
                runtime,
                args.formula.as_deref(),
                args.version.as_deref(),
                cli.brew,
            )
        }
        None => {
            // Bare `bvm` is an informational no-op: usage text, zero exit.
            Cli::command().print_long_help().ok();
            println!();
            Ok(())
        }
    }
}

fn print_subcommand_help(name: &str) {
    let mut command = Cli::command();
    if let Some(sub) = command.find_subcommand_mut(name) {
        sub.print_long_help().ok();
        println!();
    }
}
