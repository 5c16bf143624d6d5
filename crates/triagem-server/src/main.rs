//! Triagem CLI
//!
//! Starts the email triage HTTP server.

use anyhow::Context;
use std::env;
use std::process;
use triagem_server::{config::ServerConfig, init_tracing, start_server};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // API keys may live in a local .env file
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)
            .with_context(|| format!("loading {}", config_path))?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        return Ok(());
    } else if args.len() > 1 {
        print_help();
        anyhow::bail!("unrecognised arguments: {}", args[1..].join(" "));
    } else {
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Triagem - Email triage with an LLM");
    println!();
    println!("USAGE:");
    println!("    triagem [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    GOOGLE_API_KEY     API key for the gemini provider (default)");
    println!("    OPENAI_API_KEY     API key for the openai provider");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 5000)");
    println!("    - provider: 'gemini' or 'openai' (default: 'gemini')");
    println!("    - model: Model identifier (default depends on provider)");
    println!("    - temperature: Sampling temperature, 0.0 to 2.0");
    println!("    - use_system_instruction: Send the triage system prompt");
    println!("    - max_upload_bytes: Request body limit (default: 10 MiB)");
    println!("    - [classifier] backend_timeout_secs, structured_output");
    println!();
}
