use crate::bigquery::{BigQueryClient, BigQueryTable};
use crate::config::Config;
use crate::domain_api::DomainClient;
use crate::errors::{ResultResp, ServerError};
use crate::pipeline::{self, SuburbQuery};
use crate::responses::text_response;
use astra::Request;
use log::{error, info};

pub fn handle(req: Request, cfg: &Config) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/fetch") | ("POST", "/fetch") => fetch(&req, cfg),
        (_, "/fetch") => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}

/// Runs one provision-then-fetch-then-insert cycle per `suburb` query
/// parameter. Each request gets its own API clients; nothing is shared
/// across requests.
fn fetch(req: &Request, cfg: &Config) -> ResultResp {
    let suburbs = parse_suburbs(req);

    let result = fetch_internal(cfg, suburbs);
    match result {
        Ok(()) => {
            info!("OK");
            text_response("OK")
        }
        Err(msg) => {
            let err = ServerError::Fetch(msg);
            error!("{err}");
            Err(err)
        }
    }
}

fn fetch_internal(cfg: &Config, suburbs: Vec<SuburbQuery>) -> Result<(), String> {
    let source = DomainClient::new(cfg.domain_api_key.clone()).map_err(|e| e.to_string())?;
    let bq = BigQueryClient::new(cfg.bigquery_access_token.clone()).map_err(|e| e.to_string())?;
    let sink = BigQueryTable::new(&bq, &cfg.bigquery_project_id, &cfg.dataset, &cfg.table);

    pipeline::run(&source, &sink, &cfg.state, &suburbs).map_err(|e| e.to_string())
}

/// Pulls the repeated `suburb` query parameters out of the request URI,
/// percent-decoded, in the order given.
pub(crate) fn parse_suburbs(req: &Request) -> Vec<SuburbQuery> {
    let query = req.uri().query().unwrap_or("");

    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "suburb")
        .map(|(_, value)| SuburbQuery {
            suburb: value.into_owned(),
            postcode: None,
        })
        .collect()
}
