mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{cmd_info, cmd_interactive, cmd_use};
use crate::output::print_error;

/// pmod - compose shell environments from a package catalog
#[derive(Parser)]
#[command(name = "pmod")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Extra directory searched for pkg.json and meta.json, after the defaults
  #[arg(short = 'C', long = "config-dir", value_name = "DIR", global = true)]
  config_dirs: Vec<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

/// Output shell selection shared by `use` and `interactive`.
#[derive(Args, Debug, Clone)]
pub struct ShellArgs {
  /// Shell to print statements for (default: basename of $SHELL, else bash)
  #[arg(short, long)]
  pub shell: Option<String>,

  /// Reference $HOME and $VAR instead of baking in their current values
  #[arg(short = 'n', long)]
  pub not_expand: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Print statements that add the given packages to the environment
  ///
  /// Intended for `eval "$(pmod use gcc cuda)"`.
  Use {
    /// Package names or aliases, in the order they should take precedence
    #[arg(required = true)]
    packages: Vec<String>,

    #[command(flatten)]
    shell: ShellArgs,
  },

  /// List available packages, or show one package
  #[command(visible_alias = "avail")]
  Info {
    /// Package name or alias
    name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Read package names from stdin until EOF, then print like `use`
  Interactive {
    #[command(flatten)]
    shell: ShellArgs,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Use { packages, shell } => cmd_use(&packages, &shell, &cli.config_dirs),
    Commands::Info { name, json } => cmd_info(name.as_deref(), json, &cli.config_dirs),
    Commands::Interactive { shell } => cmd_interactive(&shell, &cli.config_dirs),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
