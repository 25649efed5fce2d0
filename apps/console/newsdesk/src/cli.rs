use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "newsdesk", about = "Newsroom admin console", version)]
pub struct Cli {
    /// Data directory for session files, config and logs.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug-level logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Sign in and store the session.
    Login(LoginArgs),
    /// Clear the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List articles.
    Articles(ArticlesArgs),
    /// Run the route guard for a route and show where it lands.
    Visit {
        route: String,
    },
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ArticlesArgs {
    #[arg(long)]
    pub search: Option<String>,

    /// Category slug.
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size; defaults to the configured page size.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Include unpublished articles (requires a session).
    #[arg(long)]
    pub all: bool,
}
