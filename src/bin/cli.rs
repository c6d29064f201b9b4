//! userdir CLI Client
//!
//! Command-line interface for querying a userdir server.

use clap::{Parser, Subcommand, ValueEnum};
use userdir::network::Client;
use userdir::{DirectoryError, Result, UserId};

/// userdir CLI
#[derive(Parser, Debug)]
#[command(name = "userdir-cli")]
#[command(about = "CLI for the userdir directory service")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a user by ID
    Get {
        /// The user ID
        id: UserId,
    },

    /// Get several users by ID
    GetMany {
        /// User IDs, comma- or space-separated
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List every user
    All,

    /// Search users by one criterion
    Search {
        /// Which field the query is meant for
        #[arg(short, long, value_enum)]
        by: SearchField,

        /// The search text
        query: String,
    },

    /// Ping the server
    Ping,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SearchField {
    Name,
    City,
    Phone,
    Married,
}

impl SearchField {
    /// Client-side sanity check before the query goes over the wire
    fn validate(self, query: &str) -> Result<()> {
        let len = query.len();
        let problem = match self {
            SearchField::Name if !(3..=20).contains(&len) => {
                "First name should be between 3 and 20 characters."
            }
            SearchField::City if !(1..=20).contains(&len) => {
                "City should be between 1 and 20 characters."
            }
            SearchField::Phone if len != 10 => "Phone number should be 10 digits.",
            SearchField::Married if query != "true" && query != "false" => {
                "Invalid marital status format. Marital status should be true or false."
            }
            _ => return Ok(()),
        };
        Err(DirectoryError::invalid_argument(problem))
    }
}

/// Parse ids from arguments like `1,2 3`, skipping bad entries with a note
fn parse_ids(raw: &[String]) -> (Vec<UserId>, Vec<String>) {
    let mut ids = Vec::new();
    let mut rejected = Vec::new();

    for token in raw.iter().flat_map(|arg| arg.split(',')) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<UserId>() {
            Ok(id) if id > 0 => ids.push(id),
            Ok(id) => rejected.push(format!(
                "Invalid user ID: {}. Please enter positive integers only.",
                id
            )),
            Err(_) => rejected.push(format!(
                "Invalid input: '{}'. Please enter comma-separated integers.",
                token
            )),
        }
    }

    (ids, rejected)
}

fn run(args: Args) -> Result<()> {
    // Validate locally before opening a connection
    if let Commands::Search { by, query } = &args.command {
        by.validate(query.trim())?;
    }

    let mut client = Client::connect(args.server.as_str())?;

    match args.command {
        Commands::Get { id } => {
            let user = client.get_user(id)?;
            println!("User details: {}", user);
        }
        Commands::GetMany { ids } => {
            let (ids, rejected) = parse_ids(&ids);
            for note in &rejected {
                println!("{}", note);
            }
            if ids.is_empty() {
                return Err(DirectoryError::invalid_argument("no valid user IDs given"));
            }

            let lookup = client.get_users(&ids)?;
            println!("Users found:");
            for user in &lookup.found {
                println!("{}", user);
            }
            if !lookup.missing.is_empty() {
                println!("User IDs not found: {:?}", lookup.missing);
            }
        }
        Commands::All => {
            let users = client.get_all_users()?;
            println!("All users:");
            for user in &users {
                println!("{}", user);
            }
        }
        Commands::Search { query, .. } => {
            let users = client.search_users(query.trim())?;
            println!("Search results:");
            for user in &users {
                println!("{}", user);
            }
        }
        Commands::Ping => {
            client.ping()?;
            println!("PONG");
        }
    }

    Ok(())
}

/// Process exit code for a command outcome
///
/// A lookup that finds nothing is a normal answer, not a failure.
fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) | Err(DirectoryError::NotFound(_)) => 0,
        Err(DirectoryError::InvalidArgument(_)) => 2,
        Err(_) => 1,
    }
}

fn report(result: &Result<()>) {
    match result {
        Ok(()) => {}
        Err(DirectoryError::NotFound(_)) => println!("User not found."),
        Err(DirectoryError::InvalidArgument(msg)) => eprintln!("{}", msg),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn main() {
    let args = Args::parse();

    let result = run(args);
    report(&result);
    std::process::exit(exit_code(&result));
}
