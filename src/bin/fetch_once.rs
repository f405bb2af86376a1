use clap::Parser;
use domain_dump::bigquery::{BigQueryClient, BigQueryTable};
use domain_dump::config::CommonArgs;
use domain_dump::domain_api::DomainClient;
use domain_dump::pipeline::{self, RunError, SuburbQuery};
use log::{error, info, warn};

#[derive(Parser, Debug)]
#[clap(author, version, about = "One-shot fetch: one suburb's rental listings into BigQuery")]
struct Args {
    #[clap(flatten)]
    common: CommonArgs,

    /// Suburb to search
    #[clap(long, default_value = "Pyrmont")]
    suburb: String,

    /// Postcode of the suburb
    #[clap(long, default_value = "2009")]
    postcode: String,
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

    let source = match DomainClient::new(cfg.domain_api_key.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("Could not create Domain client: {e}");
            std::process::exit(1);
        }
    };
    let bq = match BigQueryClient::new(cfg.bigquery_access_token.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("Could not create BigQuery client: {e}");
            std::process::exit(1);
        }
    };
    let sink = BigQueryTable::new(&bq, &cfg.bigquery_project_id, &cfg.dataset, &cfg.table);

    let query = SuburbQuery {
        suburb: args.suburb,
        postcode: Some(args.postcode),
    };

    // A failed search is worth retrying on the next scheduled run, so it
    // only warns; provisioning and insert failures exit non-zero.
    match pipeline::run(&source, &sink, &cfg.state, &[query]) {
        Ok(()) => info!("OK"),
        Err(e @ RunError::Search { .. }) => warn!("{e}"),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
