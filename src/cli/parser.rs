use std::path::PathBuf;

use clap::Parser;

use crate::github::issues::IssueState;

/// Retrieves all GitHub issues of a repository and writes them as a Doxygen
/// requirements page.
///
/// Options left out fall back to the config file, then to the built-in
/// defaults.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "doxy-issues", version)]
pub struct Args {
    /// The user or organization of the repo [default: BenBoZ]
    #[arg(short, long)]
    pub user: Option<String>,

    /// The name of the repo [default: DoxyIssues]
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Define in which state the issues are in [default: all]
    #[arg(short, long, value_enum)]
    pub state: Option<IssueState>,

    /// The relative or absolute path where the file will be written [default: output.dox]
    #[arg(short, long = "output_path", alias = "output-path")]
    pub output_path: Option<PathBuf>,

    /// Download only issues with specified labels, comma-separate multiple
    #[arg(short, long)]
    pub labels: Option<String>,

    /// Base URL of the GitHub REST API [default: https://api.github.com]
    #[arg(long)]
    pub api_url: Option<String>,

    /// Token used to authenticate against the API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// JSON config file with default values for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Parses command line arguments, program name included.
///
/// Usage errors, `--help` and `--version` come back as a `clap::Error`; call
/// `exit()` on it to print the message with clap's exit status.
pub fn parse_args(args: &[String]) -> Result<Args, clap::Error> {
    Args::try_parse_from(args)
}
