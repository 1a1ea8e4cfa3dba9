//! CLI argument definitions for PromptRoute.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PromptRoute -- send each prompt to the model best suited for it.
#[derive(Parser)]
#[command(
    name = "promptroute",
    version,
    about = "PromptRoute -- multi-provider prompt router",
    long_about = "Classifies prompts by task, dispatches them to a coding, chat, image or \
                  reasoning backend, and returns one normalized text answer."
)]
pub struct Cli {
    /// Emit logs as JSON lines instead of the compact text format.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API.
    Serve {
        /// Address to bind the HTTP server to.  Overrides configuration.
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on.  Overrides configuration and `PORT`.
        #[arg(long, short)]
        port: Option<u16>,

        /// Path to a TOML configuration file.
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Route a single prompt and print the answer.
    Route {
        /// The prompt text.
        prompt: String,

        /// Explicit provider id (claude, deepseek, chatgpt, gemini, gemini-llama)
        /// or category name.
        #[arg(long, short)]
        model: Option<String>,

        /// Path to a TOML configuration file.
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Print `{"response", "model"}` JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Show which category and provider a prompt would be routed to.
    /// Needs no credentials and makes no network calls.
    Classify {
        /// The prompt text.
        prompt: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_with_model() {
        let cli = Cli::parse_from(["promptroute", "route", "hello", "--model", "claude"]);
        match cli.command {
            Commands::Route {
                prompt, model, json, ..
            } => {
                assert_eq!(prompt, "hello");
                assert_eq!(model.as_deref(), Some("claude"));
                assert!(!json);
            }
            _ => panic!("expected route"),
        }
    }

    #[test]
    fn serve_flags_are_optional() {
        let cli = Cli::parse_from(["promptroute", "serve"]);
        match cli.command {
            Commands::Serve { bind, port, config } => {
                assert!(bind.is_none());
                assert!(port.is_none());
                assert!(config.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn log_json_is_global() {
        let cli = Cli::parse_from(["promptroute", "classify", "hi", "--log-json"]);
        assert!(cli.log_json);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
