use booru_query::cli::{
    self, ActiveOptions, CliError, CompletionOptions, ReplaceOptions, TokensOptions,
};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "booru-query")]
#[command(about = "Tokenize booru search queries and complete the term under the caret")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a query as JSON
    Tokens {
        /// The search query (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show the token under the caret and the fragment being edited
    Active {
        query: Option<String>,

        /// Caret offset in characters
        #[arg(short, long)]
        caret: usize,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Suggest search properties for the term under the caret
    Suggest {
        query: Option<String>,

        #[arg(short, long)]
        caret: usize,

        /// Search settings as JSON
        #[arg(long, conflicts_with = "settings_file")]
        settings: Option<String>,

        /// File holding search settings as JSON
        #[arg(long)]
        settings_file: Option<PathBuf>,

        /// Site autocomplete item to merge with (repeatable)
        #[arg(long = "site")]
        site: Vec<String>,
    },

    /// Replace the term under the caret and print the new query
    Replace {
        query: Option<String>,

        #[arg(short, long)]
        caret: usize,

        /// Replacement term
        #[arg(short, long = "with")]
        with: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tokens { query, pretty } => run_tokens(query, pretty),
        Commands::Active {
            query,
            caret,
            pretty,
        } => run_active(query, caret, pretty),
        Commands::Suggest {
            query,
            caret,
            settings,
            settings_file,
            site,
        } => run_suggest(query, caret, settings, settings_file, site),
        Commands::Replace { query, caret, with } => run_replace(query, caret, with),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Take the query from the argument, or from stdin when it is piped.
fn read_query(query: Option<String>) -> Result<Option<String>, CliError> {
    match query {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            // A trailing newline from `echo` is not part of the query.
            let trimmed = buffer.strip_suffix('\n').unwrap_or(&buffer);
            let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
            Ok(Some(trimmed.to_string()))
        }
        None => Ok(None),
    }
}

fn run_tokens(query: Option<String>, pretty: bool) -> Result<(), CliError> {
    let options = TokensOptions {
        query: read_query(query)?,
    };

    let tokens = cli::execute_tokens(&options)?;
    println!("{}", cli::render_json(&tokens, pretty)?);
    Ok(())
}

fn run_active(query: Option<String>, caret: usize, pretty: bool) -> Result<(), CliError> {
    let options = ActiveOptions {
        query: read_query(query)?,
        caret,
    };

    let active = cli::execute_active(&options)?;
    println!("{}", cli::render_json(&active, pretty)?);
    Ok(())
}

fn run_suggest(
    query: Option<String>,
    caret: usize,
    settings: Option<String>,
    settings_file: Option<PathBuf>,
    site: Vec<String>,
) -> Result<(), CliError> {
    let settings = match settings_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => settings,
    };

    let options = CompletionOptions {
        query: read_query(query)?,
        caret,
        settings,
        site,
    };

    for suggestion in cli::execute_suggest(&options)? {
        println!("{}", suggestion);
    }
    Ok(())
}

fn run_replace(query: Option<String>, caret: usize, with: String) -> Result<(), CliError> {
    let options = ReplaceOptions {
        query: read_query(query)?,
        caret,
        replacement: with,
    };

    println!("{}", cli::execute_replace(&options)?);
    Ok(())
}
