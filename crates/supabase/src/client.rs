//! HTTP client for the hosted PostgREST API.

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::errors::{ApiErrorResponse, SupabaseError};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const REST_PATH: &str = "/rest/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// PostgREST query parameters: `select=*`, equality filters and one ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut params = vec!["select=*".to_string()];
        for (column, value) in &self.filters {
            params.push(format!("{}=eq.{}", column, urlencoding::encode(value)));
        }
        if let Some((column, order)) = &self.order {
            params.push(format!("order={}.{}", column, order.as_str()));
        }
        params.join("&")
    }
}

/// HTTP client for one Supabase project's REST endpoint.
///
/// Every request carries the project key both as `apikey` and as a bearer
/// token, which is what PostgREST expects for the anon and service roles.
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: HeaderValue,
    auth_header: HeaderValue,
}

impl PostgrestClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The project URL (e.g., "https://xyz.supabase.co")
    /// * `api_key` - The project's anon or service-role key
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, SupabaseError> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, SupabaseError> {
        if base_url.trim().is_empty() {
            return Err(SupabaseError::Config("Supabase URL is empty".to_string()));
        }
        let api_key_header = HeaderValue::from_str(api_key)
            .map_err(|e| SupabaseError::Config(format!("Invalid API key format: {}", e)))?;
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| SupabaseError::Config(format!("Invalid API key format: {}", e)))?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key_header,
            auth_header,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("apikey"), self.api_key.clone());
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    pub(crate) fn table_url(&self, table: &str, query: &Query) -> String {
        format!(
            "{}{}/{}?{}",
            self.base_url,
            REST_PATH,
            table,
            query.to_query_string()
        )
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> RequestBuilder {
        let url = self.table_url(table, query);
        debug!("[Supabase] {} {}", method, url);
        self.client.request(method, url).headers(self.headers())
    }

    /// Rows of `table` matching `query`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, SupabaseError> {
        let response = self.request(Method::GET, table, query).send().await?;
        parse_response(response).await
    }

    /// The row with the given id, if any.
    pub async fn select_by_id<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<T>, SupabaseError> {
        let rows: Vec<T> = self.select(table, &Query::new().eq("id", id)).await?;
        Ok(rows.into_iter().next())
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, SupabaseError> {
        let response = self
            .request(Method::POST, table, &Query::new())
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = parse_response(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseError::Decode("Insert returned no rows".to_string()))
    }

    /// Patches the row with the given id. Returns `None` when no row matched.
    pub async fn update_by_id<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<Option<T>, SupabaseError> {
        let response = self
            .request(Method::PATCH, table, &Query::new().eq("id", id))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = parse_response(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Deletes the row with the given id and returns the number of rows removed.
    pub async fn delete_by_id(&self, table: &str, id: &str) -> Result<usize, SupabaseError> {
        let response = self
            .request(Method::DELETE, table, &Query::new().eq("id", id))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = parse_response(response).await?;
        Ok(rows.len())
    }
}

/// Parse an HTTP response, turning error statuses into `SupabaseError::Api`.
async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SupabaseError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorResponse>(&body)
            .ok()
            .and_then(ApiErrorResponse::into_message)
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(SupabaseError::Api { status, message });
    }

    serde_json::from_str(&body).map_err(|e| {
        SupabaseError::Decode(format!(
            "{} - {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_normalization() {
        let client = PostgrestClient::new("https://demo.supabase.co/", "anon-key").unwrap();
        assert_eq!(client.base_url, "https://demo.supabase.co");
    }

    #[test]
    fn test_rejects_empty_url_and_bad_key() {
        assert!(matches!(
            PostgrestClient::new("  ", "anon-key"),
            Err(SupabaseError::Config(_))
        ));
        assert!(matches!(
            PostgrestClient::new("https://demo.supabase.co", "bad\nkey"),
            Err(SupabaseError::Config(_))
        ));
    }

    #[test]
    fn test_query_string() {
        let query = Query::new()
            .eq("market_id", "m 1&x")
            .order("created_at", Order::Desc);
        assert_eq!(
            query.to_query_string(),
            "select=*&market_id=eq.m%201%26x&order=created_at.desc"
        );
        assert_eq!(Query::new().to_query_string(), "select=*");
    }

    #[test]
    fn test_table_url() {
        let client = PostgrestClient::new("https://demo.supabase.co", "anon-key").unwrap();
        let url = client.table_url("clients", &Query::new().order("name", Order::Asc));
        assert_eq!(
            url,
            "https://demo.supabase.co/rest/v1/clients?select=*&order=name.asc"
        );
    }
}
