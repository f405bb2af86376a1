use crate::bigquery::client::BigQueryError;
use crate::bigquery::schema::{relax, row_schema, Field};
use crate::domain_api::client::DomainError;
use crate::domain_api::models::{
    LocationFilter, PropertyListing, ResidentialSearchRequest, SearchResult,
};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt;

const TABLE_DISPLAY_NAME: &str = "Domain Listings";

/// Unit of persistence: the run's shared fetch timestamp plus one
/// listing payload, passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub fetch_time: DateTime<Utc>,
    pub listing: PropertyListing,
}

/// One suburb to fetch. The server fills only the suburb name; the
/// one-shot binary supplies a postcode too.
#[derive(Debug, Clone)]
pub struct SuburbQuery {
    pub suburb: String,
    pub postcode: Option<String>,
}

/// Where listings come from. Implemented by `DomainClient`; faked in
/// tests.
pub trait ListingSource {
    fn search(&self, request: &ResidentialSearchRequest) -> Result<Vec<SearchResult>, DomainError>;
}

/// Where rows go. Implemented by `BigQueryTable`; faked in tests.
/// Metadata lookups return `Ok(None)` for "not found" so the
/// create-on-missing branch is explicit.
pub trait ListingSink {
    fn dataset_metadata(&self) -> Result<Option<String>, BigQueryError>;
    fn create_dataset(&self) -> Result<(), BigQueryError>;
    fn table_metadata(&self) -> Result<Option<String>, BigQueryError>;
    fn create_table(&self) -> Result<(), BigQueryError>;
    fn update_table(&self, friendly_name: &str, schema: &[Field]) -> Result<(), BigQueryError>;
    fn insert_rows(&self, rows: &[Row]) -> Result<(), BigQueryError>;
}

/// A failed run, tagged with the stage that failed. The two binaries
/// apply different severities per stage, so the stage has to survive up
/// to them.
#[derive(Debug)]
pub enum RunError {
    Provision {
        what: &'static str,
        source: BigQueryError,
    },
    Search {
        filter: ResidentialSearchRequest,
        source: DomainError,
    },
    Insert(BigQueryError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Provision { what, source } => write!(f, "{what}: {source}"),
            RunError::Search { filter, source } => {
                write!(f, "error searching domain for {filter:?}: {source}")
            }
            RunError::Insert(source) => write!(f, "could not insert to bigquery: {source}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RunError::Provision { source, .. } => Some(source),
            RunError::Search { source, .. } => Some(source),
            RunError::Insert(source) => Some(source),
        }
    }
}

/// Builds the fixed rental search filter: one location, no area or
/// region restriction, no surrounding suburbs.
pub fn rent_filter(state: &str, suburb: &str, postcode: Option<&str>) -> ResidentialSearchRequest {
    ResidentialSearchRequest {
        listing_type: "Rent".to_string(),
        locations: vec![LocationFilter {
            state: state.to_string(),
            area: String::new(),
            region: String::new(),
            suburb: suburb.to_string(),
            post_code: postcode.unwrap_or("").to_string(),
            include_surrounding_suburbs: false,
        }],
    }
}

/// Makes sure the destination exists and carries the current schema:
/// dataset, then table, each created only when the lookup says missing,
/// then an unconditional schema + display name push.
pub fn provision<W: ListingSink>(sink: &W) -> Result<(), RunError> {
    match sink.dataset_metadata() {
        Ok(Some(meta)) => info!("dataset exists: {meta}"),
        Ok(None) => {
            sink.create_dataset().map_err(|e| RunError::Provision {
                what: "couldn't create dataset",
                source: e,
            })?;
            info!("created dataset");
        }
        Err(e) => {
            return Err(RunError::Provision {
                what: "couldn't get dataset metadata",
                source: e,
            })
        }
    }

    match sink.table_metadata() {
        Ok(Some(meta)) => info!("table exists: {meta}"),
        Ok(None) => {
            sink.create_table().map_err(|e| RunError::Provision {
                what: "couldn't create table",
                source: e,
            })?;
            info!("created table");
        }
        Err(e) => {
            return Err(RunError::Provision {
                what: "couldn't get table metadata",
                source: e,
            })
        }
    }

    let schema = relax(row_schema());
    sink.update_table(TABLE_DISPLAY_NAME, &schema)
        .map_err(|e| RunError::Provision {
            what: "couldn't update table metadata",
            source: e,
        })
}

/// One search-and-insert cycle. An empty search result still goes
/// through the insert call as an empty batch.
pub fn fetch_and_insert<S: ListingSource, W: ListingSink>(
    source: &S,
    sink: &W,
    filter: ResidentialSearchRequest,
    fetch_time: DateTime<Utc>,
) -> Result<usize, RunError> {
    let results = source.search(&filter).map_err(|e| RunError::Search {
        filter: filter.clone(),
        source: e,
    })?;

    let rows: Vec<Row> = results
        .into_iter()
        .map(|r| Row {
            fetch_time,
            listing: r.listing,
        })
        .collect();

    sink.insert_rows(&rows).map_err(RunError::Insert)?;
    Ok(rows.len())
}

/// Full run: capture the fetch timestamp, provision the destination,
/// then work through the suburbs in order, stopping at the first error.
pub fn run<S: ListingSource, W: ListingSink>(
    source: &S,
    sink: &W,
    state: &str,
    suburbs: &[SuburbQuery],
) -> Result<(), RunError> {
    let fetch_time = Utc::now();

    provision(sink)?;

    for query in suburbs {
        let filter = rent_filter(state, &query.suburb, query.postcode.as_deref());
        let inserted = fetch_and_insert(source, sink, filter, fetch_time)?;
        info!("inserted {inserted} listings for {}", query.suburb);
    }
    Ok(())
}
