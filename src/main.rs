use clap::Parser;
use sahamlab::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
