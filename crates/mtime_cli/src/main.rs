//! # Usage
//!
//! - `git set-mtime` - Set every tracked file's mtime to its last commit time,
//!   and every directory's mtime to the newest time beneath it
//!
//! Any argument prints usage and exits without touching the working tree.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod git;
mod ui;

use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use console::style;

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/git-set-mtime/git-set-mtime";

#[derive(Debug, Parser)]
#[command(
    name = "git-set-mtime",
    bin_name = "git set-mtime",
    version,
    styles = ui::clap_styles(),
    disable_help_flag = true,
    disable_version_flag = true,
)]
struct Cli {
    /// Any argument shows this help.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    args: Vec<OsString>,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
            .with(EnvFilter::from_default_env())
            .init();
    }

    match Cli::try_parse() {
        Ok(cli) if cli.args.is_empty() => {}
        _ => {
            print_usage();
            return;
        }
    }

    if let Err(e) = commands::set_mtime::run() {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn print_usage() {
    let mut cmd = Cli::command()
        .about(build_about())
        .after_help(build_after_help())
        .help_template("{before-help}{about-with-newline}\n{usage-heading} {usage}\n\nVersion: {version}\n{after-help}");

    eprintln!("{}", cmd.render_help().ansi());
}

fn build_about() -> String {
    format!(
        r"
  {} sets each tracked file's mtime to the time of the last commit
  that touched it, and each directory's mtime to the newest time of
  anything beneath it. Fresh clones get a reproducible timestamp layout.",
        colors::accent().apply_to("git set-mtime").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    .git-set-mtime.toml            Optional config at the repository root
      skip_modified = true         Leave locally modified files alone
      resolution = first-match     Or `newest` for unordered history
      max_record_bytes = 8388608   Longest accepted history line

  Set RUST_LOG=debug for diagnostics.

  Learn more: {}",
        style("Configuration:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
