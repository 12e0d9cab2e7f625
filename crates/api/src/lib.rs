use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::contracts::registry::ContractSettings;
use shared::domain::event::{EventDraft, EventRecord};
use shared::form::{EventForm, SubmitOutcome};
use shared::repo::event_directory::EventDirectory;
use shared::wallet::{WalletConnector, WalletProvider};
use shared::ApiError;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState<W> {
    pub directory: EventDirectory,
    pub connector: WalletConnector<W>,
    pub contract: ContractSettings,
    pub display_delay: Duration,
}

pub fn router<W: WalletProvider + 'static>(state: Arc<AppState<W>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(list_events::<W>).post(create_event::<W>))
        .route("/events/:id", get(show_event::<W>))
        .route("/contract", get(contract_info::<W>))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventView<'a> {
    #[serde(flatten)]
    record: &'a EventRecord,
    display_date: String,
    seats_remaining: u32,
    sold_out: bool,
}

impl<'a> From<&'a EventRecord> for EventView<'a> {
    fn from(record: &'a EventRecord) -> Self {
        Self {
            record,
            display_date: record.display_date(),
            seats_remaining: record.seats_remaining(),
            sold_out: record.is_sold_out(),
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn list_events<W: WalletProvider>(
    State(state): State<Arc<AppState<W>>>,
    Query(query): Query<EventQuery>,
) -> Json<serde_json::Value> {
    let views: Vec<EventView<'_>> =
        state.directory.filter(&query.q).into_iter().map(EventView::from).collect();
    Json(serde_json::json!({ "query": query.q, "events": views }))
}

async fn show_event<W: WalletProvider>(
    State(state): State<Arc<AppState<W>>>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.directory.find(id).ok_or(ApiError::NotFound)?;
    Ok(Json(serde_json::json!(EventView::from(record))))
}

/// Runs one form instance per request, so each request owns its submission.
async fn create_event<W: WalletProvider>(
    State(state): State<Arc<AppState<W>>>,
    Json(draft): Json<EventDraft>,
) -> Result<(StatusCode, Json<SubmitOutcome>), ApiError> {
    let mut form = EventForm::new(state.connector.clone(), state.contract.clone(), state.display_delay);
    form.fill(draft);
    let outcome = form.submit().await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn contract_info<W: WalletProvider>(State(state): State<Arc<AppState<W>>>) -> Json<serde_json::Value> {
    let c = &state.contract;
    Json(serde_json::json!({
        "address": c.address.to_string(),
        "beneficiary": c.beneficiary.to_string(),
        "donation": c.donation,
        "methods": c.method_names(),
        "walletAvailable": state.connector.is_available(),
    }))
}
