use std::io::{self, Write};

use clap::Parser;
use pocketbook_cli::settings::open_session;
use pocketbook_cli::todo::{self, HELP, TodoRequest};
use pocketbook_cli::{GlobalArgs, Result, exit_with_error};
use pocketbook_sqlite::Database;

#[derive(Debug, Parser)]
#[command(name = "todo", version)]
#[command(about = "A todo list manager")]
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
    let request = TodoRequest::parse(command, args)?;
    let config = global.init()?;
    let session = open_session(&config, Database::Todos)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    todo::execute(&request, &session, &mut out)?;
    out.flush()?;

    session.close()?;
    Ok(())
}
