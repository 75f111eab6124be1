//! Request routing and the capability middleware.

use std::collections::BTreeMap;

use axum::{
    Extension, Json, Router,
    extract::{Query, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use chrono::{Duration, NaiveDate, NaiveTime};
use hashgate_authn::Verdict;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::{
    error::ApiError,
    state::{AppState, VerifiedIdentity},
};

/// Days of history served per query.
const HISTORY_SPAN_DAYS: i64 = 30;

/// Builds the gateway router.
///
/// The capability middleware guards every route under `/api`; anything
/// else falls through to the fixed banner.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/prices/currencylist", get(currency_list))
        .route("/prices/history", get(price_history))
        .route("/", any(identity_echo))
        .route("/{*path}", any(identity_echo))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_capability));

    Router::new()
        .nest("/api", api)
        .fallback(nothing_here)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Middleware running the verification pipeline on `/api` requests.
///
/// Accepted requests continue with a [`VerifiedIdentity`] extension;
/// everything else short-circuits with the mapped rejection. The opaque
/// `Unauthorized` body is shared by all verification failures so the
/// response never discloses which gate rejected the token.
async fn require_capability(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match state.authorizer.authorize(header.as_deref()).await {
        Verdict::Accepted { account_id } => {
            let mut request = request;
            request.extensions_mut().insert(VerifiedIdentity { account_id });
            next.run(request).await
        },
        Verdict::MalformedToken { detail } => {
            tracing::debug!(%detail, "rejecting malformed token");
            (StatusCode::UNAUTHORIZED, "failed to parse token").into_response()
        },
        Verdict::RegistryFailure { detail } => (StatusCode::UNAUTHORIZED, detail).into_response(),
        Verdict::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    }
}

/// `GET /api/prices/currencylist`
async fn currency_list(State(state): State<AppState>) -> Result<Json<BTreeMap<String, f64>>, ApiError> {
    Ok(Json(state.market.current_prices().await?))
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    basetoken: Option<String>,
    currency: Option<String>,
    todate: Option<String>,
}

/// `GET /api/prices/history?basetoken=&currency=&todate=`
///
/// Serves the 30 days of prices ending at `todate`, one sample per
/// calendar day.
async fn price_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<BTreeMap<String, f64>>, ApiError> {
    let basetoken = params
        .basetoken
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing basetoken parameter".into()))?;
    let currency = params
        .currency
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing currency parameter".into()))?;
    let todate = params
        .todate
        .ok_or_else(|| ApiError::BadRequest("missing todate parameter".into()))?;

    let todate = NaiveDate::parse_from_str(&todate, "%Y-%m-%d")
        .map_err(|e| ApiError::BadRequest(format!("invalid todate: {e}")))?;

    // End of range is exclusive: midnight after todate, so todate's own
    // samples are included.
    let end = todate
        .succ_opt()
        .ok_or_else(|| ApiError::BadRequest("todate out of range".into()))?
        .and_time(NaiveTime::MIN)
        .and_utc();
    let start = end - Duration::days(HISTORY_SPAN_DAYS);

    let series = state.market.price_range(&basetoken, &currency, start, end).await?;

    Ok(Json(hashgate_market::aggregate_daily(&series)))
}

/// Identity echo for any other authenticated `/api` path.
async fn identity_echo(Extension(identity): Extension<VerifiedIdentity>) -> String {
    format!("You are authenticated as {}", identity.account_id)
}

/// Fixed banner for everything outside `/api`.
async fn nothing_here() -> &'static str {
    "nothing here"
}
