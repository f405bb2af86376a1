use crate::errors::ServerError;
use std::env;

/// Flags shared by the server and the one-shot binary.
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Domain API key
    #[clap(long)]
    pub domain_api_key: String,

    /// Google BigQuery project ID
    #[clap(long)]
    pub bigquery_project_id: String,

    /// BigQuery dataset ID
    #[clap(long, default_value = "domain")]
    pub dataset: String,

    /// BigQuery table ID
    #[clap(long, default_value = "listings_test")]
    pub table: String,

    /// State to search
    #[clap(long, default_value = "NSW")]
    pub state: String,
}

/// Resolved startup configuration. Built once in main and passed by
/// reference from there on.
#[derive(Debug, Clone)]
pub struct Config {
    pub domain_api_key: String,
    pub bigquery_project_id: String,
    pub dataset: String,
    pub table: String,
    pub state: String,
    pub bigquery_access_token: String,
}

impl CommonArgs {
    /// Combines the parsed flags with the environment-supplied BigQuery
    /// token. The token has no flag equivalent so it stays out of shell
    /// history and process listings.
    pub fn into_config(self) -> Result<Config, ServerError> {
        let token = env::var("BIGQUERY_ACCESS_TOKEN").map_err(|_| {
            ServerError::Config("BIGQUERY_ACCESS_TOKEN environment variable not set".into())
        })?;

        Ok(Config {
            domain_api_key: self.domain_api_key,
            bigquery_project_id: self.bigquery_project_id,
            dataset: self.dataset,
            table: self.table,
            state: self.state,
            bigquery_access_token: token,
        })
    }
}
