//! CLI entry point for PromptRoute.
//!
//! This binary provides the `promptroute` command with subcommands for
//! serving the HTTP API, routing a single prompt, and inspecting the
//! classifier.

mod cli;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use promptroute_kernel::dispatch::category_route;
use promptroute_kernel::{PromptRouter, TaskClassifier};
use promptroute_web::WebServer;
use serde_json::json;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::helpers::{init_tracing, load_settings};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, port, config } => {
            init_tracing("info", cli.log_json);
            cmd_serve(bind, port, config).await
        }
        Commands::Route {
            prompt,
            model,
            config,
            json,
        } => {
            init_tracing("warn", cli.log_json);
            cmd_route(&prompt, model, config, json).await
        }
        Commands::Classify { prompt } => {
            init_tracing("warn", cli.log_json);
            cmd_classify(&prompt);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(bind: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(config.as_deref())?;
    let router = Arc::new(PromptRouter::new(promptroute_adapters::build_adapter_set(
        &settings.router,
    )));

    let mut web_config = settings.web;
    if let Some(bind) = bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = port {
        web_config.port = port;
    }

    info!(
        bind = %web_config.bind_addr,
        port = web_config.port,
        cors_origins = web_config.cors_origins.len(),
        "starting PromptRoute"
    );

    WebServer::new(web_config, router)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("web server failed")
}

// ---------------------------------------------------------------------------
// Subcommand: route
// ---------------------------------------------------------------------------

async fn cmd_route(
    prompt: &str,
    model: Option<String>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let settings = load_settings(config.as_deref())?;
    let router = PromptRouter::new(promptroute_adapters::build_adapter_set(&settings.router));

    let result = router
        .route_input(prompt, model)
        .await
        .context("request refused")?;

    if json {
        println!(
            "{}",
            json!({ "response": result.text, "model": result.model_label })
        );
    } else {
        println!("{}", result.text);
        println!();
        println!("model: {}", result.model_label);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: classify
// ---------------------------------------------------------------------------

fn cmd_classify(prompt: &str) {
    let category = TaskClassifier::default().classify(prompt);
    let route = category_route(category);
    println!("{category} -> {} ({})", route.label, route.kind);
}
