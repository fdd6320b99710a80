//! HTTP request handlers for the ledger engine API.
//!
//! Mutating handlers hold the store's write lock for the whole operation,
//! so a request either applies completely or not at all.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::accounting;
use crate::models::{
    BarberCommissionRate, BarberDailyRate, DateRange, PayrollSettings, ProductCommissionSetting,
    ServiceCommissionRate,
};
use crate::payroll;

use super::request::{
    AdjustmentRequest, AssetRequest, BarberRateRequest, BranchQuery, ClosePeriodRequest,
    ComparePeriodsRequest, CreateAccountingPeriodRequest, CreatePayrollPeriodRequest,
    CurrentPeriodQuery, DailyRateRequest, EquityRequest, LiabilityRequest, PayRecordRequest,
    PayrollSettingsRequest, PeriodsQuery, ProductSettingRequest, SaveBalanceRecordRequest,
    ServiceRateRequest, SummaryQuery,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/payroll/periods",
            post(create_payroll_period).get(list_payroll_periods),
        )
        .route("/payroll/periods/:id/calculate", post(calculate_period))
        .route("/payroll/periods/:id/pay", post(pay_period))
        .route("/payroll/periods/:id", delete(delete_payroll_period))
        .route("/payroll/periods/:id/records", get(list_period_records))
        .route("/payroll/records/:id/pay", post(pay_record))
        .route(
            "/payroll/records/:id/adjustments",
            post(add_adjustment).get(list_adjustments),
        )
        .route("/rates/services", put(set_service_rate))
        .route("/rates/barbers", put(set_barber_rate))
        .route("/rates/daily", put(set_daily_rate))
        .route("/rates/products", put(set_product_setting))
        .route("/rates/settings", put(upsert_payroll_settings))
        .route("/balance-sheet", get(balance_sheet))
        .route(
            "/balance-sheet/records",
            post(save_balance_record).get(list_balance_records),
        )
        .route(
            "/balance-sheet/assets",
            post(create_asset).get(list_assets),
        )
        .route(
            "/balance-sheet/assets/:id",
            put(update_asset).delete(delete_asset),
        )
        .route(
            "/balance-sheet/liabilities",
            post(create_liability).get(list_liabilities),
        )
        .route(
            "/balance-sheet/liabilities/:id",
            put(update_liability).delete(delete_liability),
        )
        .route(
            "/balance-sheet/equity",
            post(create_equity).get(list_equity),
        )
        .route(
            "/balance-sheet/equity/:id",
            put(update_equity).delete(delete_equity),
        )
        .route(
            "/accounting/periods",
            post(create_accounting_period).get(list_accounting_periods),
        )
        .route("/accounting/periods/current", get(current_accounting_period))
        .route("/accounting/periods/compare", post(compare_periods))
        .route("/accounting/periods/:id/closing", post(mark_period_closing))
        .route("/accounting/periods/:id/close", post(close_period))
        .route("/accounting/periods/:id/reopen", post(reopen_period))
        .route(
            "/accounting/periods/:id",
            delete(delete_accounting_period),
        )
        .route(
            "/accounting/periods/:id/reopen-audit",
            get(list_reopen_audit),
        )
        .with_state(state)
}

// ----- payroll -----

async fn create_payroll_period(
    State(state): State<AppState>,
    payload: Result<Json<CreatePayrollPeriodRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected payroll period body");
            return Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::malformed_json(rejection.body_text()),
            });
        }
    };

    let range = DateRange::new(request.start_date, request.end_date)?;
    let mut store = state.store().write().await;
    let period = payroll::create_payroll_period(
        &mut store,
        &request.branch_id,
        range,
        request.period_type,
    )?;
    Ok((StatusCode::CREATED, Json(period)))
}

async fn list_payroll_periods(
    State(state): State<AppState>,
    Query(query): Query<BranchQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(payroll::payroll_summary(&store, &query.branch_id))
}

async fn calculate_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %id, "Calculating payroll period");

    let mut store = state.store().write().await;
    let records = payroll::calculate_payroll_period(
        &mut store,
        state.feeds(),
        state.feeds(),
        state.feeds(),
        state.defaults(),
        &id,
    )
    .map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Payroll calculation failed");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        period_id = %id,
        records = records.len(),
        "Payroll calculation completed"
    );
    Ok(Json(records))
}

async fn pay_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let period = payroll::mark_period_paid(&mut store, &id)?;
    Ok(Json(period))
}

async fn delete_payroll_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    payroll::delete_payroll_period(&mut store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_period_records(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(store.records_for_period(&id))
}

async fn pay_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PayRecordRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let record = payroll::mark_record_paid(
        &mut store,
        &id,
        request.payment_method,
        request.payment_reference,
        request.notes,
    )?;
    Ok(Json(record))
}

async fn add_adjustment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AdjustmentRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let adjustment = payroll::add_adjustment(
        &mut store,
        &id,
        request.kind,
        request.amount,
        &request.reason,
    )?;
    Ok((StatusCode::CREATED, Json(adjustment)))
}

async fn list_adjustments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(store.adjustments_for_record(&id))
}

// ----- rates -----

async fn set_service_rate(
    State(state): State<AppState>,
    Json(request): Json<ServiceRateRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store.rates_mut().set_service_rate(ServiceCommissionRate {
        branch_id: request.branch_id,
        service_id: request.service_id,
        rate: request.rate,
        updated_at: Utc::now(),
    })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_barber_rate(
    State(state): State<AppState>,
    Json(request): Json<BarberRateRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store.rates_mut().set_barber_rate(BarberCommissionRate {
        barber_id: request.barber_id,
        rate: request.rate,
        updated_at: Utc::now(),
    })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_daily_rate(
    State(state): State<AppState>,
    Json(request): Json<DailyRateRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store.rates_mut().set_daily_rate(BarberDailyRate {
        barber_id: request.barber_id,
        daily_rate: request.daily_rate,
        updated_at: Utc::now(),
    })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_product_setting(
    State(state): State<AppState>,
    Json(request): Json<ProductSettingRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store
        .rates_mut()
        .set_product_setting(ProductCommissionSetting {
            branch_id: request.branch_id,
            product_id: request.product_id,
            share: request.share,
            updated_at: Utc::now(),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upsert_payroll_settings(
    State(state): State<AppState>,
    Json(request): Json<PayrollSettingsRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store.rates_mut().upsert_payroll_settings(PayrollSettings {
        branch_id: request.branch_id,
        default_commission_rate: request.default_commission_rate,
        payout_frequency: request.payout_frequency,
        payout_day: request.payout_day,
        tax_rate: request.tax_rate,
        updated_at: Utc::now(),
    })?;
    Ok(StatusCode::NO_CONTENT)
}

// ----- balance sheet -----

async fn balance_sheet(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(accounting::balance_sheet_summary(
        &store,
        state.feeds(),
        state.defaults(),
        &query.branch_id,
        query.as_of,
    ))
}

async fn save_balance_record(
    State(state): State<AppState>,
    Json(request): Json<SaveBalanceRecordRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let summary = accounting::balance_sheet_summary(
        &store,
        state.feeds(),
        state.defaults(),
        &request.branch_id,
        request.as_of,
    );
    let record = accounting::save_balance_sheet_record(&mut store, &summary, request.notes)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_balance_records(
    State(state): State<AppState>,
    Query(query): Query<BranchQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(store.balance_records_for_branch(&query.branch_id))
}

async fn create_asset(
    State(state): State<AppState>,
    Json(request): Json<AssetRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let asset = store.add_asset(
        &request.branch_id,
        &request.name,
        request.asset_type,
        request.category,
        request.amount,
    )?;
    Ok((StatusCode::CREATED, Json(asset)))
}

async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AssetRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let asset = store.update_asset(
        &id,
        &request.name,
        request.asset_type,
        request.category,
        request.amount,
    )?;
    Ok(Json(asset))
}

async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store.delete_asset(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<BranchQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(store.assets_for_branch(&query.branch_id))
}

async fn create_liability(
    State(state): State<AppState>,
    Json(request): Json<LiabilityRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let liability = store.add_liability(
        &request.branch_id,
        &request.name,
        request.liability_type,
        request.category,
        request.balance,
    )?;
    Ok((StatusCode::CREATED, Json(liability)))
}

async fn update_liability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<LiabilityRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let liability = store.update_liability(
        &id,
        &request.name,
        request.liability_type,
        request.category,
        request.balance,
    )?;
    Ok(Json(liability))
}

async fn delete_liability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store.delete_liability(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_liabilities(
    State(state): State<AppState>,
    Query(query): Query<BranchQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(store.liabilities_for_branch(&query.branch_id))
}

async fn create_equity(
    State(state): State<AppState>,
    Json(request): Json<EquityRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let entry = store.add_equity(
        &request.branch_id,
        &request.name,
        request.equity_type,
        request.amount,
    )?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_equity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<EquityRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let entry = store.update_equity(&id, &request.name, request.equity_type, request.amount)?;
    Ok(Json(entry))
}

async fn delete_equity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    store.delete_equity(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_equity(
    State(state): State<AppState>,
    Query(query): Query<BranchQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(store.equity_for_branch(&query.branch_id))
}

// ----- accounting periods -----

async fn create_accounting_period(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountingPeriodRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let range = DateRange::new(request.start_date, request.end_date)?;
    let mut store = state.store().write().await;
    let period = accounting::create_accounting_period(
        &mut store,
        &request.branch_id,
        &request.name,
        request.period_type,
        range,
    )?;
    Ok((StatusCode::CREATED, Json(period)))
}

async fn list_accounting_periods(
    State(state): State<AppState>,
    Query(query): Query<PeriodsQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(accounting::list_accounting_periods(
        &store,
        &query.branch_id,
        query.status,
    ))
}

async fn current_accounting_period(
    State(state): State<AppState>,
    Query(query): Query<CurrentPeriodQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(accounting::current_open_period(
        &store,
        &query.branch_id,
        query.on,
    ))
}

async fn compare_periods(
    State(state): State<AppState>,
    Json(request): Json<ComparePeriodsRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let store = state.store().read().await;
    let comparison =
        accounting::compare_periods(&store, &request.period_1_id, &request.period_2_id)?;
    Ok(Json(comparison))
}

async fn mark_period_closing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let period = accounting::mark_period_closing(&mut store, &id)?;
    Ok(Json(period))
}

async fn close_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ClosePeriodRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %id, "Closing accounting period");

    let mut store = state.store().write().await;
    let period = accounting::close_accounting_period(
        &mut store,
        state.feeds(),
        state.defaults(),
        &id,
        &request.closed_by,
        request.notes,
    )
    .map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Period close failed");
        ApiErrorResponse::from(err)
    })?;

    info!(correlation_id = %correlation_id, period_id = %id, "Accounting period closed");
    Ok(Json(period))
}

async fn reopen_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<super::request::ReopenPeriodRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    let period = accounting::reopen_accounting_period(
        &mut store,
        &id,
        &request.reason,
        &request.reopened_by,
    )?;
    Ok(Json(period))
}

async fn delete_accounting_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let mut store = state.store().write().await;
    accounting::delete_accounting_period(&mut store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_reopen_audit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    Json(store.reopen_audit_for(&id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineDefaults;
    use crate::ledger::InMemoryActivityLedger;
    use crate::store::LedgerStore;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            LedgerStore::new(),
            Arc::new(InMemoryActivityLedger::new()),
            EngineDefaults::standard(),
        )
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_payroll_period_returns_201() {
        let router = create_router(test_state());
        let body = r#"{
            "branch_id": "branch_1",
            "start_date": "2025-03-01",
            "end_date": "2025-03-15",
            "period_type": "bi_weekly"
        }"#;

        let response = router
            .oneshot(json_request("POST", "/payroll/periods", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(test_state());

        let response = router
            .oneshot(json_request("POST", "/payroll/periods", "{invalid json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_reversed_date_range_returns_400() {
        let router = create_router(test_state());
        let body = r#"{
            "branch_id": "branch_1",
            "start_date": "2025-03-15",
            "end_date": "2025-03-01",
            "period_type": "bi_weekly"
        }"#;

        let response = router
            .oneshot(json_request("POST", "/payroll/periods", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_calculate_unknown_period_returns_404() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payroll/periods/missing/calculate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_balance_sheet_query() {
        let router = create_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/balance-sheet?branch_id=branch_1&as_of=2025-03-31")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let summary: crate::models::BalanceSheetSummary =
            serde_json::from_slice(&body).unwrap();
        assert!(summary.is_balanced);
    }

    #[tokio::test]
    async fn test_manual_retained_earnings_rejected_with_400() {
        let router = create_router(test_state());
        let body = r#"{
            "branch_id": "branch_1",
            "name": "RE",
            "equity_type": "retained_earnings",
            "amount": "1000"
        }"#;

        let response = router
            .oneshot(json_request("POST", "/balance-sheet/equity", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_set_rate_out_of_range_returns_400() {
        let router = create_router(test_state());
        let body = r#"{"barber_id": "barber_a", "rate": "150"}"#;

        let response = router
            .oneshot(json_request("PUT", "/rates/barbers", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "RATE_OUT_OF_RANGE");
    }
}
