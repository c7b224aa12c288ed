pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo-collab-api")]
#[command(about = "Todo collaboration API server and maintenance commands")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Port to bind (overrides API_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Use in-memory storage instead of Postgres")]
        memory: bool,
    },

    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Issue a bearer token signed with the configured secret")]
    Token {
        #[arg(help = "User id")]
        user_id: i64,
        #[arg(help = "Email")]
        email: String,
        #[arg(default_value = "USER", help = "USER or ADMIN")]
        role: String,
    },

    #[command(about = "Print the bcrypt hash of a password")]
    HashPassword {
        #[arg(help = "Raw password")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve { port, memory } => commands::serve::handle(port, memory).await,
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::Token { user_id, email, role } => commands::token::handle(user_id, &email, &role, output_format),
        Commands::HashPassword { password } => commands::token::hash_password(&password, output_format),
    }
}
