//! `aqua-sync` binary entry point.
use anyhow::Result;
use clap::Parser;

use aqua_sync_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        // --help and --version are reported as "errors" that belong on stdout.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    let summary = commands::sync::run(&args, &log)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{summary}");
    }
    Ok(())
}
