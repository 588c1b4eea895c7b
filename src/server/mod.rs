mod page;

use std::{convert::Infallible, sync::Arc};

use anyhow::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html,
    },
    routing::{get, post, put},
    Json, Router,
};
use common::ViewState;
use futures::stream::{self, Stream};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use crate::{
    address::AddressDebouncer,
    config::Config,
    device::HttpDeviceClient,
    notify::Notifier,
    state::PanelState,
    toggle::Orchestrator,
};

#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator<HttpDeviceClient>>,
    debouncer: AddressDebouncer,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator<HttpDeviceClient>, debouncer: AddressDebouncer) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            debouncer,
        }
    }

    /// Wire up a fresh session from the config. Must run inside a tokio
    /// runtime, since the address debouncer gets its own task.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let state = PanelState::new(ViewState::new(config.device_address.clone()));
        let client = HttpDeviceClient::new(config.request_timeout())?;
        let orchestrator = Orchestrator::new(state.clone(), Notifier::new(), client);
        let debouncer = AddressDebouncer::spawn(state, config.address_debounce());

        Ok(Self::new(orchestrator, debouncer))
    }

    pub fn panel(&self) -> &PanelState {
        self.orchestrator.state()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/state", get(view_state))
        .route("/api/address", put(edit_address))
        .route("/api/leds/:id/toggle", post(toggle_led))
        .route("/api/events", get(toasts))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the panel until the server dies.
pub async fn serve(config: &Config) -> Result<(), Error> {
    let state = AppState::from_config(config)?;
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    info!(
        "💡 LED panel listening on http://{} (ESP32 at {})",
        listener.local_addr()?,
        config.device_address
    );

    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(page::INDEX)
}

async fn view_state(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.panel().snapshot())
}

#[derive(Deserialize)]
struct AddressEdit {
    address: String,
}

/// Record an edit to the address field. It only lands in the view once the
/// field has been idle for the debounce window.
async fn edit_address(
    State(state): State<AppState>,
    Json(edit): Json<AddressEdit>,
) -> StatusCode {
    match state.debouncer.edit(edit.address).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            error!("Address debouncer is gone: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Toggle one LED and answer with the view afterwards. Failures are part of
/// the view (`last_error`), so they still come back as 200.
///
/// The toggle runs on its own task: if the client goes away, the request
/// still finishes and the view still reflects what the device did.
async fn toggle_led(
    State(state): State<AppState>,
    Path(led_id): Path<u32>,
) -> Result<Json<ViewState>, StatusCode> {
    let orchestrator = state.orchestrator.clone();
    let toggle = tokio::spawn(async move { orchestrator.try_toggle(led_id).await });

    match toggle.await {
        Ok(Some(outcome)) => {
            debug!("LED {}: {:?}", led_id, outcome);
            Ok(Json(state.panel().snapshot()))
        }
        Ok(None) => {
            warn!("LED {}: toggle refused, another command is in flight", led_id);
            Err(StatusCode::CONFLICT)
        }
        Err(e) => {
            error!("LED {}: toggle task failed: {}", led_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Toasts as server-sent events, one `toast` event per message.
async fn toasts(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.orchestrator.notifier().subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(toast) => match Event::default().event("toast").json_data(&toast) {
                    Ok(event) => return Some((Ok(event), receiver)),
                    Err(e) => warn!("Dropping toast: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Toast listener fell behind, skipped {}", skipped)
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
