//! Interactive command palette host.
//!
//! Reads command lines from stdin, runs them through the palette, and
//! prints rendered responses. `help`, `history`, and `errors` are answered
//! by the host itself; `quit` or end of input stops the loop.

use std::{
    error::Error,
    fmt::Write as _,
    io::{self as std_io, Write},
    path::PathBuf,
};

use chrono::Local;
use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::info;

use cmdpalette::{
    config::PaletteConfig,
    errors::BoxError,
    palette::{
        CommandPalette,
        formatting::{
            format_command, format_description, format_error, format_error_record,
            format_header, format_history_entry, render_response,
        },
    },
    registry::{Command, CommandResponse, HandlerResult, Invocation},
    tracing_config,
    validation::{ParsedValue, ValidationRule, ValidationSchema},
};

#[derive(Parser)]
#[command(name = "palette")]
#[command(about = "Interactive command palette", version)]
struct Cli {
    /// Configuration file to load instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    print_config_schema: bool,

    /// Log to stderr instead of the rotating log file
    #[arg(long)]
    log_stderr: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.print_config_schema {
        println!("{}", PaletteConfig::json_schema()?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => PaletteConfig::load(path)?,
        None => PaletteConfig::load_default()?,
    };

    if cli.log_stderr {
        tracing_config::init(config.general.log_level)?;
    } else {
        tracing_config::init_with_file(config.general.log_level)?;
    }
    info!("Starting command palette");

    let mut palette = CommandPalette::from_config(&config);
    palette.registry_mut().register_commands(demo_commands())?;

    run_loop(&palette).await
}

async fn run_loop(palette: &CommandPalette) -> Result<(), Box<dyn Error>> {
    let mut lines = BufReader::new(io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "quit" | "exit" => break,
            "help" => print_help(palette),
            "history" => {
                for entry in palette.history() {
                    println!("{}", format_history_entry(&entry));
                }
            }
            "errors" => {
                for record in palette.error_handler().get_error_log() {
                    println!("{}\n", format_error_record(&record));
                }
            }
            _ => match palette.run(&line).await {
                Ok(response) => {
                    let output = render_response(&response);
                    if !output.is_empty() {
                        println!("{output}");
                    }
                }
                Err(e) => eprintln!("{}", format_error(&e.to_string())),
            },
        }
        prompt()?;
    }

    info!("Stopping command palette");
    Ok(())
}

fn prompt() -> Result<(), std_io::Error> {
    let mut stdout = std_io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

fn print_help(palette: &CommandPalette) {
    println!("{}", format_header("Commands"));
    for entry in palette.registry().get_root_commands() {
        println!(
            "  {:<12} {}",
            format_command(&entry.path.to_string()),
            format_description(&entry.description)
        );
    }
    println!();
    println!("{}", format_header("All paths"));
    for line in palette.registry().help_lines() {
        println!("  {line}");
    }
    println!();
    println!("{}", format_description("help, history, errors, quit"));
}

fn demo_commands() -> Vec<Command> {
    let operands = || {
        ValidationSchema::new()
            .arg(ValidationRule::number("a").required())
            .arg(ValidationRule::number("b").required())
    };

    vec![
        Command::new("echo", "Print the arguments back").handler(echo),
        Command::new("math", "Arithmetic")
            .subcommand(
                Command::new("add", "Add two numbers")
                    .handler(add)
                    .schema(operands()),
            )
            .subcommand(
                Command::new("mul", "Multiply two numbers")
                    .handler(mul)
                    .schema(operands()),
            ),
        Command::new("time", "Clock").subcommand(
            Command::new("now", "Show the local time")
                .handler(now)
                .schema(ValidationSchema::new().option(ValidationRule::string("format"))),
        ),
    ]
}

async fn echo(invocation: Invocation) -> HandlerResult {
    Ok(CommandResponse::text(invocation.args.join(" ")))
}

async fn add(invocation: Invocation) -> HandlerResult {
    let (a, b) = operands(&invocation)?;
    Ok(CommandResponse::text((a + b).to_string()))
}

async fn mul(invocation: Invocation) -> HandlerResult {
    let (a, b) = operands(&invocation)?;
    Ok(CommandResponse::text((a * b).to_string()))
}

async fn now(invocation: Invocation) -> HandlerResult {
    let format = invocation
        .parsed
        .as_ref()
        .and_then(|parsed| parsed.option("format"))
        .and_then(ParsedValue::as_str)
        .unwrap_or("%Y-%m-%d %H:%M:%S");

    let mut rendered = String::new();
    write!(rendered, "{}", Local::now().format(format))
        .map_err(|_| format!("invalid time format: {format}"))?;
    Ok(CommandResponse::text(rendered))
}

fn operands(invocation: &Invocation) -> Result<(f64, f64), BoxError> {
    let parsed = invocation
        .parsed
        .as_ref()
        .ok_or("arguments were not validated")?;
    let a = parsed.arg(0).and_then(ParsedValue::as_f64).ok_or("missing a")?;
    let b = parsed.arg(1).and_then(ParsedValue::as_f64).ok_or("missing b")?;
    Ok((a, b))
}
