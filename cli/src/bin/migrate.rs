use std::io::{self, Write};

use clap::Parser;
use pocketbook_cli::migrate::{self, MigrateOperation};
use pocketbook_cli::{GlobalArgs, Result};

#[derive(Debug, Parser)]
#[command(name = "pocketbook-migrate", version)]
#[command(about = "Create, drop, and seed the pocketbook databases")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    operation: MigrateOperation,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.global.init()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    migrate::run(&cli.operation, &config, &mut out)?;
    out.flush()?;
    Ok(())
}
