use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "naturedopes-cli")]
#[command(about = "CLI tool for the Nature Dopes API", long_about = LONG_ABOUT)]
#[command(version)]
pub struct App {
    /// API base URL for this invocation (overrides the stored value; not accepted by `config`)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// API key for this invocation (overrides the stored value; not accepted by `config`)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Log requests and config access to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

const LONG_ABOUT: &str = "A command-line interface for interacting with the Nature Dopes API.

Manage images, search for flora species, and work with API keys.

Example usage:
  naturedopes-cli images list
  naturedopes-cli images search --species \"Red Oak\"
  naturedopes-cli keys generate \"My Key\"";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage CLI configuration
    #[command(subcommand)]
    Config(ConfigCmd),

    /// Browse and search catalogued images
    #[command(subcommand)]
    Images(ImagesCmd),

    /// Manage API keys
    #[command(subcommand)]
    Keys(KeysCmd),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Set a configuration value (api-url or api-key)
    Set { key: String, value: String },
    /// Print a configuration value (api-url or api-key)
    Get { key: String },
    /// List all current config values
    List,
    /// Print the location of the config file
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ImagesCmd {
    /// List every image
    List,
    /// Show a single image
    Get {
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Filter images by species name and/or uploader
    Search {
        /// Species name to match
        #[arg(long)]
        species: Option<String>,
        /// Only images uploaded by this user id
        #[arg(long)]
        user_id: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeysCmd {
    /// List your API keys (secrets are masked)
    List,
    /// Create a new API key
    Generate { name: String },
    /// Revoke the configured API key
    Revoke {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
