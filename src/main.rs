use clap::{Parser as ClapParser, Subcommand};
use sprig_lang::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sprig")]
#[command(about = "Sprig - evaluate predicate expressions against JSON data")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate an expression
    Check {
        /// The expression to evaluate
        expression: String,

        /// JSON object providing the variables (reads from stdin if not provided)
        #[arg(short, long, conflicts_with = "context_file")]
        context: Option<String>,

        /// Read the JSON context from a file
        #[arg(long)]
        context_file: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the tokens of an expression
    Tokens { expression: String },

    /// Print the fully parenthesized syntax tree of an expression
    Ast { expression: String },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Check {
            expression,
            context,
            context_file,
            pretty,
            syntax_only,
        } => run_check(expression, context, context_file, pretty, syntax_only),
        Commands::Tokens { expression } => {
            cli::render_tokens(&expression).map(|out| print!("{}", out))
        }
        Commands::Ast { expression } => cli::render_ast(&expression).map(|out| println!("{}", out)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Uses `RUST_LOG` if set, otherwise `--log-level`. Logs go to stderr.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_check(
    expression: String,
    context: Option<String>,
    context_file: Option<PathBuf>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let context = match (context, context_file) {
        (Some(s), _) => Some(s),
        (None, Some(path)) => Some(std::fs::read_to_string(path)?),
        (None, None) if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer).filter(|b| !b.trim().is_empty())
        }
        (None, None) => None,
    };

    let options = CheckOptions {
        expression,
        context,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}
