//! Report API Handlers

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use shared::models::{ReportScope, SalesReport};

use crate::core::ServerState;
use crate::relay::format_daily_report;
use crate::reports::{self, csv};
use crate::utils::time::{parse_date, parse_month};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Query params for monthly reports
#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    /// "YYYY-MM"; defaults to the current month (UTC)
    pub month: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
}

/// Query params for daily reports
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// "YYYY-MM-DD"; defaults to today (UTC)
    pub date: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

fn monthly_scope(month: &Option<String>) -> AppResult<ReportScope> {
    match month {
        Some(m) => {
            let (year, month) = parse_month(m)?;
            Ok(ReportScope::Month { year, month })
        }
        None => Ok(reports::current_month_scope()),
    }
}

fn daily_scope(date: &Option<String>) -> AppResult<ReportScope> {
    match date {
        Some(d) => Ok(ReportScope::Day {
            date: parse_date(d)?,
        }),
        None => Ok(reports::today_scope()),
    }
}

/// Monthly sales report (paginated order details)
pub async fn monthly(
    State(state): State<ServerState>,
    Query(query): Query<MonthlyQuery>,
) -> AppResult<Json<AppResponse<SalesReport>>> {
    let scope = monthly_scope(&query.month)?;
    let log = state.storage.all_orders()?;
    Ok(ok(reports::build_report(&log, scope, query.page)))
}

/// Daily sales report (paginated order details)
pub async fn daily(
    State(state): State<ServerState>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<AppResponse<SalesReport>>> {
    let scope = daily_scope(&query.date)?;
    let log = state.storage.all_orders()?;
    Ok(ok(reports::build_report(&log, scope, query.page)))
}

fn csv_response(body: String, filename: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Monthly CSV export; 404 when the month has no sales
pub async fn export_monthly(
    State(state): State<ServerState>,
    Query(query): Query<MonthlyQuery>,
) -> AppResult<Response> {
    let scope = monthly_scope(&query.month)?;
    let log = state.storage.all_orders()?;
    let filtered = reports::filter_orders(&log, scope);
    let body = csv::export_csv(&filtered, &scope.label())?;
    Ok(csv_response(body, csv::monthly_filename(&scope.label())))
}

/// Daily CSV export; 404 when the day has no sales
pub async fn export_daily(
    State(state): State<ServerState>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Response> {
    let scope = daily_scope(&query.date)?;
    let log = state.storage.all_orders()?;
    let filtered = reports::filter_orders(&log, scope);
    let body = csv::export_csv(&filtered, &scope.label())?;
    Ok(csv_response(body, csv::daily_filename(&scope.label())))
}

/// Format today's summary and push it through the relay now
pub async fn send_daily(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<String>>> {
    let relay = state
        .relay
        .clone()
        .ok_or_else(|| AppError::internal("Report relay is not configured"))?;

    let log = state.storage.all_orders()?;
    let store = state.storage.store_info()?;
    let summary = reports::daily_summary(&log, &store.name, Utc::now().date_naive());

    relay
        .send_report(&format_daily_report(&summary))
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    Ok(ok("Report sent successfully".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{RelayError, ReportRelay};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rust_decimal::prelude::*;
    use shared::models::DailySummary;
    use std::sync::Arc;

    fn state_with_orders(confirmed: usize) -> ServerState {
        let state = ServerState::for_tests();
        for _ in 0..confirmed {
            state.cart.add_item(1).unwrap();
            state.orders.confirm_order().unwrap();
            state.orders.start_new_order().unwrap();
        }
        state
    }

    #[tokio::test]
    async fn default_scopes_cover_orders_confirmed_now() {
        let state = state_with_orders(2);

        let query = MonthlyQuery {
            month: None,
            page: 1,
        };
        let report = monthly(State(state.clone()), Query(query))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert_eq!(report.order_count, 2);
        assert_eq!(report.total_sales, Decimal::from_str("10.00").unwrap());

        let query = DailyQuery {
            date: None,
            page: 1,
        };
        let report = daily(State(state), Query(query)).await.unwrap().0.data.unwrap();
        assert_eq!(report.order_count, 2);
    }

    #[tokio::test]
    async fn invalid_month_is_a_validation_error() {
        let state = state_with_orders(0);
        let query = MonthlyQuery {
            month: Some("March".to_string()),
            page: 1,
        };
        assert!(matches!(
            monthly(State(state), Query(query)).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn export_of_an_empty_month_is_no_data() {
        let state = state_with_orders(0);
        let query = MonthlyQuery {
            month: Some("1999-01".to_string()),
            page: 1,
        };
        assert!(matches!(
            export_monthly(State(state), Query(query)).await,
            Err(AppError::NoData(_))
        ));
    }

    #[derive(Default)]
    struct RecordingRelay {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReportRelay for RecordingRelay {
        async fn sync_sales(&self, _summary: &DailySummary) -> Result<(), RelayError> {
            Ok(())
        }

        async fn send_report(&self, text: &str) -> Result<(), RelayError> {
            self.sent.lock().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn send_daily_requires_a_configured_relay() {
        let state = state_with_orders(1);
        assert!(matches!(
            send_daily(State(state)).await,
            Err(AppError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn send_daily_pushes_the_formatted_report() {
        let relay = Arc::new(RecordingRelay::default());
        let mut state = state_with_orders(1);
        state.relay = Some(relay.clone());

        let response = send_daily(State(state)).await.unwrap();
        assert!(response.0.success);

        let sent = relay.sent.lock();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("*Daily Sales Report*"));
    }
}
