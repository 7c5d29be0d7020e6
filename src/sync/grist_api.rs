use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::calendar::{Record, RecordId};
use crate::storage::config::{StoreConfig, TablesConfig};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Teams,
    Reservations,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody {
    Envelope { records: Vec<Record> },
    Bare(Vec<Record>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WriteBody {
    Single(Record),
    Envelope { records: Vec<PartialRecord> },
}

#[derive(Debug, Deserialize)]
struct PartialRecord {
    id: RecordId,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ApiError>;

    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Record, ApiError>;

    async fn update(
        &self,
        collection: Collection,
        id: RecordId,
        fields: Map<String, Value>,
    ) -> Result<Record, ApiError>;

    async fn delete(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> Result<(), ApiError>;
}

pub struct GristClient {
    base_url: String,
    api_key: String,
    tables: TablesConfig,
    client: reqwest::Client,
}

impl GristClient {
    pub fn new(store: &StoreConfig, tables: TablesConfig) -> Self {
        Self {
            base_url: store.base_url.trim_end_matches('/').to_string(),
            api_key: store.api_key.clone(),
            tables,
            client: reqwest::Client::new(),
        }
    }

    pub fn table_name(&self, collection: Collection) -> &str {
        match collection {
            Collection::Teams => &self.tables.teams,
            Collection::Reservations => &self.tables.reservations,
        }
    }

    fn records_url(&self, collection: Collection) -> String {
        format!(
            "{}/tables/{}/records",
            self.base_url,
            urlencoding::encode(self.table_name(collection))
        )
    }

    fn record_url(&self, collection: Collection, id: &RecordId) -> String {
        let id = id.to_string();
        format!("{}/{}", self.records_url(collection), urlencoding::encode(&id))
    }

    async fn ensure_success(
        &self,
        response: reqwest::Response,
        what: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        tracing::info!("{} response status: {}", what, status);

        if status == 401 || status == 403 {
            tracing::error!("Authentication failed when trying to {}", what);
            return Err(ApiError::AuthenticationFailed);
        }

        if status == 404 {
            let url = response.url().to_string();
            tracing::error!("Not found while trying to {}: {}", what, url);
            return Err(ApiError::NotFound(url));
        }

        if status == 429 {
            tracing::warn!("Rate limit exceeded");
            return Err(ApiError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Failed to {}. Status: {}, Body: {}", what, status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        Ok(response)
    }
}

/// Grist answers writes with a record, a `{"records": [...]}` envelope, or
/// nothing at all. Whatever comes back is completed with the fields we sent.
fn written_record(
    body: &str,
    known_id: Option<RecordId>,
    sent: Map<String, Value>,
) -> Result<Record, ApiError> {
    let returned = if body.trim().is_empty() || body.trim() == "null" {
        None
    } else {
        match serde_json::from_str::<WriteBody>(body) {
            Ok(WriteBody::Single(record)) => Some((record.id, record.fields)),
            Ok(WriteBody::Envelope { records }) => records.into_iter().next().map(|r| (r.id, r.fields)),
            Err(e) => {
                tracing::debug!("Ignoring unrecognised write response body: {}", e);
                None
            }
        }
    };

    let (id, fields) = match (returned, known_id) {
        (Some((id, fields)), _) => (id, fields),
        (None, Some(id)) => (id, Map::new()),
        (None, None) => return Err(ApiError::ParseError("Response carried no record id".to_string())),
    };

    let fields = if fields.is_empty() { sent } else { fields };
    Ok(Record { id, fields })
}

#[async_trait]
impl RecordStore for GristClient {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>, ApiError> {
        let url = self.records_url(collection);

        tracing::info!("Fetching records from {}", self.table_name(collection));

        let response = self.client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = self.ensure_success(response, "list records").await?;

        let body: ListBody = response.json().await?;
        let records = match body {
            ListBody::Envelope { records } => records,
            ListBody::Bare(records) => records,
        };

        tracing::info!("Fetched {} records from {}", records.len(), self.table_name(collection));
        Ok(records)
    }

    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Record, ApiError> {
        let url = self.records_url(collection);

        tracing::info!("Creating record in {}", self.table_name(collection));
        tracing::debug!("POST {} with payload: {:?}", url, fields);

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&fields)
            .send()
            .await?;

        let response = self.ensure_success(response, "create record").await?;
        let body = response.text().await?;
        let record = written_record(&body, None, fields)?;

        tracing::info!("Record created successfully with ID: {}", record.id);
        Ok(record)
    }

    async fn update(
        &self,
        collection: Collection,
        id: RecordId,
        fields: Map<String, Value>,
    ) -> Result<Record, ApiError> {
        let url = self.record_url(collection, &id);

        tracing::info!("Updating record {} in {}", id, self.table_name(collection));
        tracing::debug!("PATCH {} with payload: {:?}", url, fields);

        let response = self.client
            .patch(&url)
            .bearer_auth(&self.api_key)
            .json(&fields)
            .send()
            .await?;

        let response = self.ensure_success(response, "update record").await?;
        let body = response.text().await?;

        tracing::info!("Record {} updated successfully", id);
        written_record(&body, Some(id), fields)
    }

    async fn delete(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> Result<(), ApiError> {
        let url = self.record_url(collection, &id);

        tracing::info!("Deleting record {} from {}", id, self.table_name(collection));

        let response = self.client
            .delete(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        self.ensure_success(response, "delete record").await?;

        tracing::info!("Record {} deleted successfully", id);
        Ok(())
    }
}
