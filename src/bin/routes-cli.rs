use std::path::PathBuf;
use std::sync::Arc;

use axum::http::Method;
use clap::{Parser, Subcommand};

use subdomain_routes::config::load_config;
use subdomain_routes::routing::environment::split_authority;
use subdomain_routes::routing::{Params, RouteSet};
use subdomain_routes::urls::{UrlContext, UrlOptions, UrlWriter};

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect the routes of a subdomain-routes configuration", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route in recognition order
    List,
    /// Recognize a request and print its parameters
    Recognize {
        #[arg(long)]
        host: String,
        #[arg(long)]
        path: String,
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
    /// Generate the URL of a named route
    Generate {
        #[arg(short, long)]
        name: String,
        /// Host of the request the URL is rendered for
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "http")]
        protocol: String,
        /// Route parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Generate a path instead of a full URL
        #[arg(long)]
        path: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let routes = RouteSet::from_config(&config)?;

    match cli.command {
        Commands::List => {
            for rule in routes.routes() {
                match &rule.requirements().subdomain {
                    Some(subdomain) => println!("{} (requires {})", rule, subdomain),
                    None => println!("{}", rule),
                }
            }
        }
        Commands::Recognize { host, path, method } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            match routes.recognize_path(method, &host, &path) {
                Ok(params) => println!("{}", serde_json::to_string_pretty(&params)?),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Generate {
            name,
            host,
            protocol,
            params,
            path,
        } => {
            let (host, port) = split_authority(&host)?;
            let mut context = UrlContext::new(protocol, host);
            if let Some(port) = port {
                context = context.with_port(port);
            }
            let writer = UrlWriter::new(Arc::new(routes), Some(context));
            let params: Params = params.into_iter().collect();
            let options = if path { UrlOptions::path() } else { UrlOptions::url() };
            println!("{}", writer.url_for_with(&name, &params, &options)?);
        }
    }

    Ok(())
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}
