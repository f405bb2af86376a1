use crate::bigquery::schema::Field;
use crate::pipeline::{ListingSink, Row};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::error::Error;
use std::fmt;
use std::time::Duration;

const BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

#[derive(Debug)]
pub enum BigQueryError {
    Network(String),
    Api(u16, String),
    Decode(String),
    RowErrors(String),
}

impl fmt::Display for BigQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigQueryError::Network(msg) => write!(f, "Network error: {msg}"),
            BigQueryError::Api(status, body) => {
                write!(f, "BigQuery API error: {status} - {body}")
            }
            BigQueryError::Decode(msg) => write!(f, "Response decode error: {msg}"),
            BigQueryError::RowErrors(msg) => write!(f, "Insert rejected rows: {msg}"),
        }
    }
}

impl Error for BigQueryError {}

/// Subset of dataset metadata we care to log.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub id: Option<String>,
    pub friendly_name: Option<String>,
    pub location: Option<String>,
}

/// Subset of table metadata we care to log.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub id: Option<String>,
    pub friendly_name: Option<String>,
    pub num_rows: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertAllResponse {
    insert_errors: Option<Vec<InsertErrorEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertErrorEntry {
    index: Option<u64>,
    errors: Option<Vec<InsertErrorDetail>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertErrorDetail {
    reason: Option<String>,
    message: Option<String>,
}

/// Thin client over the BigQuery v2 REST API. Auth is a bearer token
/// supplied at startup; every call is one blocking request.
pub struct BigQueryClient {
    access_token: String,
    client: Client,
}

impl BigQueryClient {
    pub fn new(access_token: String) -> Result<Self, BigQueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| BigQueryError::Network(e.to_string()))?;

        Ok(Self {
            access_token,
            client,
        })
    }

    /// Metadata lookup: `Ok(Some)` when found, `Ok(None)` on 404, `Err`
    /// for anything else. Callers branch on the three cases explicitly.
    fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, BigQueryError> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| BigQueryError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(BigQueryError::Api(status.as_u16(), body));
        }

        resp.json::<T>()
            .map(Some)
            .map_err(|e| BigQueryError::Decode(e.to_string()))
    }

    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<(), BigQueryError> {
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .map_err(|e| BigQueryError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(BigQueryError::Api(status.as_u16(), body));
        }
        Ok(())
    }

    pub fn dataset_metadata(
        &self,
        project: &str,
        dataset: &str,
    ) -> Result<Option<DatasetMetadata>, BigQueryError> {
        let url = format!("{BASE_URL}/projects/{project}/datasets/{dataset}");
        self.get_optional(&url)
    }

    pub fn create_dataset(&self, project: &str, dataset: &str) -> Result<(), BigQueryError> {
        let url = format!("{BASE_URL}/projects/{project}/datasets");
        let body = json!({
            "datasetReference": { "projectId": project, "datasetId": dataset }
        });
        self.post_json(&url, &body)
    }

    pub fn table_metadata(
        &self,
        project: &str,
        dataset: &str,
        table: &str,
    ) -> Result<Option<TableMetadata>, BigQueryError> {
        let url = format!("{BASE_URL}/projects/{project}/datasets/{dataset}/tables/{table}");
        self.get_optional(&url)
    }

    pub fn create_table(
        &self,
        project: &str,
        dataset: &str,
        table: &str,
    ) -> Result<(), BigQueryError> {
        let url = format!("{BASE_URL}/projects/{project}/datasets/{dataset}/tables");
        let body = json!({
            "tableReference": {
                "projectId": project,
                "datasetId": dataset,
                "tableId": table,
            }
        });
        self.post_json(&url, &body)
    }

    /// Pushes display name and schema. Issued on every run, whether or
    /// not anything changed, so newly added optional fields land in the
    /// table without a migration step.
    pub fn patch_table(
        &self,
        project: &str,
        dataset: &str,
        table: &str,
        friendly_name: &str,
        schema: &[Field],
    ) -> Result<(), BigQueryError> {
        let url = format!("{BASE_URL}/projects/{project}/datasets/{dataset}/tables/{table}");
        let body = json!({
            "friendlyName": friendly_name,
            "schema": { "fields": schema },
        });

        let resp = self
            .client
            .patch(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .map_err(|e| BigQueryError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(BigQueryError::Api(status.as_u16(), body));
        }
        Ok(())
    }

    /// `tabledata.insertAll` with the whole batch in one call. A 2xx
    /// response can still carry per-row errors; the first one fails the
    /// insert.
    pub fn insert_all<T: Serialize>(
        &self,
        project: &str,
        dataset: &str,
        table: &str,
        rows: &[T],
    ) -> Result<(), BigQueryError> {
        let url =
            format!("{BASE_URL}/projects/{project}/datasets/{dataset}/tables/{table}/insertAll");
        let wrapped: Vec<serde_json::Value> =
            rows.iter().map(|r| json!({ "json": r })).collect();
        let body = json!({ "rows": wrapped });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .map_err(|e| BigQueryError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(BigQueryError::Api(status.as_u16(), body));
        }

        let parsed: InsertAllResponse = resp
            .json()
            .map_err(|e| BigQueryError::Decode(e.to_string()))?;

        if let Some(errors) = parsed.insert_errors {
            if let Some(first) = errors.first() {
                let index = first.index.unwrap_or(0);
                let detail = first
                    .errors
                    .as_ref()
                    .and_then(|e| e.first())
                    .map(|e| {
                        format!(
                            "{}: {}",
                            e.reason.as_deref().unwrap_or("unknown"),
                            e.message.as_deref().unwrap_or("")
                        )
                    })
                    .unwrap_or_else(|| "unknown".to_string());
                return Err(BigQueryError::RowErrors(format!(
                    "row {index} rejected ({detail})"
                )));
            }
        }
        Ok(())
    }
}

/// One destination table. Binds a client to the (project, dataset, table)
/// triple so the pipeline can stay ignorant of identifiers.
pub struct BigQueryTable<'a> {
    client: &'a BigQueryClient,
    project: &'a str,
    dataset: &'a str,
    table: &'a str,
}

impl<'a> BigQueryTable<'a> {
    pub fn new(
        client: &'a BigQueryClient,
        project: &'a str,
        dataset: &'a str,
        table: &'a str,
    ) -> Self {
        Self {
            client,
            project,
            dataset,
            table,
        }
    }
}

impl ListingSink for BigQueryTable<'_> {
    fn dataset_metadata(&self) -> Result<Option<String>, BigQueryError> {
        self.client
            .dataset_metadata(self.project, self.dataset)
            .map(|meta| meta.map(|m| format!("{m:?}")))
    }

    fn create_dataset(&self) -> Result<(), BigQueryError> {
        self.client.create_dataset(self.project, self.dataset)
    }

    fn table_metadata(&self) -> Result<Option<String>, BigQueryError> {
        self.client
            .table_metadata(self.project, self.dataset, self.table)
            .map(|meta| meta.map(|m| format!("{m:?}")))
    }

    fn create_table(&self) -> Result<(), BigQueryError> {
        self.client
            .create_table(self.project, self.dataset, self.table)
    }

    fn update_table(&self, friendly_name: &str, schema: &[Field]) -> Result<(), BigQueryError> {
        self.client.patch_table(
            self.project,
            self.dataset,
            self.table,
            friendly_name,
            schema,
        )
    }

    fn insert_rows(&self, rows: &[Row]) -> Result<(), BigQueryError> {
        self.client
            .insert_all(self.project, self.dataset, self.table, rows)
    }
}
