use std::path::PathBuf;

use clap::Parser;
use log::info;

use filegate::{HttpServer, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "filegate")]
#[command(about = "Minimal HTTP/1.1 gateway for reading and writing files under a working directory")]
#[command(version)]
struct Cli {
    /// Host or address to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    port: u16,

    /// Directory every request path is resolved against
    #[arg(long, env = "SERVER_WORKING_DIRECTORY")]
    working_directory: PathBuf,

    /// Domain the Host header must match; empty accepts any host
    #[arg(long, env = "SERVER_DOMAIN", default_value = "")]
    server_domain: String,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            ..ServerConfig::new(self.working_directory)
        }
        .with_domain(self.server_domain)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    config.validate()?;

    HttpServer::new(config).start().await?;
    info!("Bye");

    Ok(())
}
