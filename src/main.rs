use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod sanitize;
mod server;
#[cfg(test)]
mod testing;

use handler::deleter::{self, DeleteError};
use handler::{greeter, CgiRequest};
use http::ResponseDocument;

#[derive(Debug, Parser)]
#[command(
    name = "cgi-handlers",
    version,
    about = "Greeting page and upload deletion handlers, run as CGI or as a local server"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Host both handlers on a local HTTP listener
    Serve {
        /// Config file path without extension
        #[arg(long, default_value = "config")]
        config: String,
    },
    /// Answer one greeter request from the CGI environment
    Greet,
    /// Answer one deleter request from the CGI environment and stdin
    Delete,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config } => serve(&config),
        Command::Greet => {
            init_cgi_logger();
            let doc = match CgiRequest::from_env(io::stdin().lock()) {
                Ok(request) => greeter::handle(&request),
                Err(e) => {
                    logger::log_warning(&format!("Ignoring unreadable request body: {e}"));
                    greeter::handle(&CgiRequest::new(hyper::Method::GET, ""))
                }
            };
            write_response(&doc)
        }
        Command::Delete => {
            init_cgi_logger();
            let cfg = config::CgiConfig::from_env().unwrap_or_else(|e| {
                logger::log_warning(&format!("Invalid CGI environment, using defaults: {e}"));
                config::CgiConfig::default()
            });
            let doc = match CgiRequest::from_env(io::stdin().lock()) {
                Ok(request) => deleter::handle(&request, &cfg),
                Err(e) => deleter::respond(&Err(DeleteError::Processing(e.to_string())), &cfg),
            };
            write_response(&doc)
        }
    }
}

fn serve(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from(config_path)?;
    logger::init(&cfg)?;

    // One thread: requests are handled strictly one after another
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    server::start_server_loop(listener, Arc::new(cfg)).await
}

fn init_cgi_logger() {
    if let Err(e) = logger::writer::init_cgi() {
        eprintln!("[WARN] Logger init failed: {e}");
    }
}

fn write_response(doc: &ResponseDocument) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(&doc.to_wire())?;
    stdout.flush()?;
    Ok(())
}
