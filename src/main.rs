use astra::Server;
use clap::Parser;
use domain_dump::config::CommonArgs;
use domain_dump::responses::error_to_response;
use domain_dump::router::handle;
use log::{error, info};
use std::env;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Fetch server: Domain rental listings into BigQuery")]
struct Args {
    #[clap(flatten)]
    common: CommonArgs,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let cfg = match args.common.into_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr: SocketAddr = match format!("0.0.0.0:{port}").parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid PORT {port}: {e}");
            std::process::exit(1);
        }
    };

    info!("Fetch server started at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &cfg) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        std::process::exit(1);
    }
}
