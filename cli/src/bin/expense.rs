use std::io::{self, Write};

use chrono::Local;
use clap::Parser;
use pocketbook_cli::expense::{self, ExpenseRequest, HELP};
use pocketbook_cli::settings::open_session;
use pocketbook_cli::{GlobalArgs, Result, exit_with_error};
use pocketbook_sqlite::Database;

#[derive(Debug, Parser)]
#[command(name = "expense", version)]
#[command(about = "An expense recording system")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// The command followed by its arguments. Options must come before the
    /// command; everything after it is passed through untouched.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    input: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let Some((command, args)) = cli.input.split_first() else {
        print!("{HELP}");
        return;
    };

    if let Err(err) = run(&cli.global, command, args) {
        exit_with_error(&err, HELP);
    }
}

fn run(global: &GlobalArgs, command: &str, args: &[String]) -> Result<()> {
    let request = ExpenseRequest::parse(command, args)?;
    let config = global.init()?;
    let session = open_session(&config, Database::Expenses)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let today = Local::now().date_naive();
    expense::execute(&request, &session, today, &mut out, &mut io::stdin().lock())?;
    out.flush()?;

    session.close()?;
    Ok(())
}
