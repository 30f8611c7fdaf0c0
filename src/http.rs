//! HTTP surface for the dialog. Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET /archive-date?id=..&db=..` — open; returns the `DialogView` as JSON.
//! - `GET /archive-date/html?id=..&db=..` — open; returns the rendered form.
//! - `POST /archive-date?id=..&db=..` — confirm; body is a JSON `ConfirmForm`,
//!   response is `{"close": report}` or `{"alert": message}`.
//!
//! The caller is read from the `x-user` and `x-roles` headers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::access::{AccessPolicy, Session};
use crate::audit::AuditSink;
use crate::dialog::{ArchiveDateDialog, ConfirmForm, DialogRequest};
use crate::error::DialogError;
use crate::store::ItemStore;

type SharedDialog<S, A, L> = Arc<ArchiveDateDialog<S, A, L>>;

pub fn router<S, A, L>(dialog: SharedDialog<S, A, L>) -> Router
where
    S: ItemStore + 'static,
    A: AccessPolicy + 'static,
    L: AuditSink + 'static,
{
    Router::new()
        .route(
            "/archive-date",
            get(open_handler::<S, A, L>).post(confirm_handler::<S, A, L>),
        )
        .route("/archive-date/html", get(html_handler::<S, A, L>))
        .with_state(dialog)
}

/// Serve the dialog over HTTP at `addr` (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S, A, L>(dialog: SharedDialog<S, A, L>, addr: &str) -> Result<(), std::io::Error>
where
    S: ItemStore + 'static,
    A: AccessPolicy + 'static,
    L: AuditSink + 'static,
{
    let app = router(dialog);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "archive date dialog listening");
    axum::serve(listener, app).await
}

async fn open_handler<S, A, L>(
    State(dialog): State<SharedDialog<S, A, L>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response
where
    S: ItemStore + 'static,
    A: AccessPolicy + 'static,
    L: AuditSink + 'static,
{
    let session = session_from_headers(&headers);
    match DialogRequest::from_query(&query).and_then(|request| dialog.open(&request, &session)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn html_handler<S, A, L>(
    State(dialog): State<SharedDialog<S, A, L>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response
where
    S: ItemStore + 'static,
    A: AccessPolicy + 'static,
    L: AuditSink + 'static,
{
    let session = session_from_headers(&headers);
    match DialogRequest::from_query(&query).and_then(|request| dialog.open(&request, &session)) {
        Ok(view) => Html(view.render_html()).into_response(),
        Err(err) => error_response(err),
    }
}

async fn confirm_handler<S, A, L>(
    State(dialog): State<SharedDialog<S, A, L>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(form): Json<ConfirmForm>,
) -> Response
where
    S: ItemStore + 'static,
    A: AccessPolicy + 'static,
    L: AuditSink + 'static,
{
    let session = session_from_headers(&headers);
    match DialogRequest::from_query(&query)
        .and_then(|request| dialog.submit(&request, &session, &form))
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: DialogError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Build the session from `x-user` and `x-roles`.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut session = Session::new();
    for (header, key) in [("x-user", "user"), ("x-roles", "roles")] {
        if let Some(value) = headers.get(header).and_then(|v| v.to_str().ok()) {
            session.set(key, value);
        }
    }
    session
}
