//! Repository tests against an in-process stand-in for the PostgREST API.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use franchise_crm_core::clients::{ClientRepositoryTrait, ClientStatus, ClientUpdate, NewClient};
use franchise_crm_core::errors::Error;
use franchise_crm_core::markets::{MarketRepositoryTrait, NewMarket};
use franchise_crm_supabase::{PostgrestClient, SupabaseClientRepository, SupabaseMarketRepository};

const API_KEY: &str = "test-anon-key";

#[derive(Clone, Default)]
struct FakeStore {
    tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    next_id: Arc<Mutex<usize>>,
}

type Reply = (StatusCode, Json<Value>);

fn authorized(headers: &HeaderMap) -> Result<(), Reply> {
    let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {}", API_KEY);
    if api_key == Some(API_KEY) && bearer == Some(expected_bearer.as_str()) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "PGRST301", "message": "JWT invalid", "details": null, "hint": null})),
        ))
    }
}

/// `column=eq.value` filters from the query string.
fn filters(params: &HashMap<String, String>) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(k, _)| k.as_str() != "select" && k.as_str() != "order")
        .filter_map(|(k, v)| v.strip_prefix("eq.").map(|v| (k.clone(), v.to_string())))
        .collect()
}

fn matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(column, value)| row.get(column).and_then(Value::as_str) == Some(value.as_str()))
}

async fn select(
    State(store): State<FakeStore>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reply> {
    authorized(&headers)?;
    let tables = store.tables.lock().unwrap();
    let filters = filters(&params);
    let mut rows: Vec<Value> = tables
        .get(&table)
        .map(|rows| rows.iter().filter(|r| matches(r, &filters)).cloned().collect())
        .unwrap_or_default();
    if let Some((column, direction)) = params.get("order").and_then(|o| o.split_once('.')) {
        rows.sort_by(|a, b| {
            let a = a.get(column).and_then(Value::as_str).unwrap_or_default();
            let b = b.get(column).and_then(Value::as_str).unwrap_or_default();
            if direction == "desc" {
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        });
    }
    Ok(Json(Value::Array(rows)))
}

async fn insert(
    State(store): State<FakeStore>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Reply> {
    authorized(&headers)?;
    let id = {
        let mut next = store.next_id.lock().unwrap();
        *next += 1;
        format!("{}-{}", table, next)
    };
    let now = Utc::now().to_rfc3339();
    if let Some(fields) = body.as_object_mut() {
        fields.entry("id").or_insert(Value::String(id));
        fields.insert("created_at".to_string(), Value::String(now.clone()));
        fields.insert("updated_at".to_string(), Value::String(now));
    }
    store
        .tables
        .lock()
        .unwrap()
        .entry(table)
        .or_default()
        .push(body.clone());
    Ok((StatusCode::CREATED, Json(json!([body]))))
}

async fn patch(
    State(store): State<FakeStore>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Reply> {
    authorized(&headers)?;
    let filters = filters(&params);
    let mut tables = store.tables.lock().unwrap();
    let mut updated = Vec::new();
    for row in tables.entry(table).or_default().iter_mut() {
        if matches(row, &filters) {
            if let (Some(target), Some(changes)) = (row.as_object_mut(), body.as_object()) {
                for (k, v) in changes {
                    target.insert(k.clone(), v.clone());
                }
            }
            updated.push(row.clone());
        }
    }
    Ok(Json(Value::Array(updated)))
}

async fn delete(
    State(store): State<FakeStore>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, Reply> {
    authorized(&headers)?;
    let filters = filters(&params);
    let mut tables = store.tables.lock().unwrap();
    let rows = tables.entry(table).or_default();
    let (removed, kept): (Vec<Value>, Vec<Value>) =
        rows.drain(..).partition(|r| matches(r, &filters));
    *rows = kept;
    Ok(Json(Value::Array(removed)))
}

async fn spawn_fake() -> String {
    spawn_fake_with(FakeStore::default()).await
}

async fn spawn_fake_with(store: FakeStore) -> String {
    let app = Router::new()
        .route(
            "/rest/v1/{table}",
            get(select).post(insert).patch(patch).delete(delete),
        )
        .with_state(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_client_crud_round_trip() {
    let base_url = spawn_fake().await;
    let repo = SupabaseClientRepository::new(PostgrestClient::new(&base_url, API_KEY).unwrap());

    let zeta = repo
        .create(NewClient {
            name: "Zeta Homes".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    repo.create(NewClient {
        name: "Alpha Realty".to_string(),
        email: Some("hello@alpha.test".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Alpha Realty", "Zeta Homes"]);

    let updated = repo
        .update(ClientUpdate {
            id: Some(zeta.id.clone()),
            status: Some(ClientStatus::Prospect),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.status, ClientStatus::Prospect);
    assert_eq!(updated.name, "Zeta Homes");
    assert!(updated.updated_at >= zeta.updated_at);

    assert_eq!(repo.delete(&zeta.id).await.unwrap(), 1);
    assert_eq!(repo.delete(&zeta.id).await.unwrap(), 0);
    assert!(repo.get_by_id(&zeta.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let base_url = spawn_fake().await;
    let repo = SupabaseClientRepository::new(PostgrestClient::new(&base_url, API_KEY).unwrap());

    let err = repo
        .update(ClientUpdate {
            id: Some("ghost".to_string()),
            name: Some("Ghost".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_markets_filter_by_client() {
    let base_url = spawn_fake().await;
    let repo = SupabaseMarketRepository::new(PostgrestClient::new(&base_url, API_KEY).unwrap());
    for (name, owner) in [("Houston", "c1"), ("Denver", "c2"), ("Austin", "c1")] {
        repo.create(NewMarket {
            name: name.to_string(),
            client_id: Some(owner.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    }

    let owned: Vec<String> = repo
        .list_by_client("c1")
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();

    assert_eq!(owned, vec!["Austin", "Houston"]);
}

#[tokio::test]
async fn test_bad_key_surfaces_as_store_error() {
    let base_url = spawn_fake().await;
    let repo = SupabaseClientRepository::new(PostgrestClient::new(&base_url, "wrong").unwrap());

    let err = repo.list().await.unwrap_err();

    match err {
        Error::Store(message) => assert!(message.contains("401"), "{}", message),
        other => panic!("expected store error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_market_list_tolerates_free_form_territory() {
    let store = FakeStore::default();
    let stamp = Utc::now().to_rfc3339();
    store.tables.lock().unwrap().insert(
        "markets".to_string(),
        vec![
            json!({
                "id": "m1", "client_id": "c1", "name": "Los Angeles",
                "territory": {"state": "CA", "counties": ["Los Angeles", "Orange"]},
                "created_at": stamp, "updated_at": stamp
            }),
            json!({
                "id": "m2", "client_id": "c1", "name": "Austin",
                "territory": {"states": ["TX"], "counties": {"TX": ["Travis"]}},
                "created_at": stamp, "updated_at": stamp
            }),
        ],
    );
    let base_url = spawn_fake_with(store).await;
    let repo = SupabaseMarketRepository::new(PostgrestClient::new(&base_url, API_KEY).unwrap());

    let markets = repo.list().await.unwrap();

    assert_eq!(markets.len(), 2);
    let los_angeles = markets.iter().find(|m| m.id == "m1").unwrap();
    assert_eq!(los_angeles.territory, None);
    let austin = markets.iter().find(|m| m.id == "m2").unwrap();
    assert!(austin.territory.as_ref().unwrap().contains_state("TX"));
}
