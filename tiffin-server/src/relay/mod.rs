//! Daily report relay
//!
//! Pushes sales summaries to an external notification service over
//! HTTP. The storage layer knows nothing about this: confirmations are
//! observed through the sales event channel (see [`worker`]) and the
//! summary is recomputed from the log each time.
//!
//! Relay failures are logged and retried on the next trigger, never
//! surfaced to the checkout path.

pub mod worker;

use async_trait::async_trait;
use shared::models::DailySummary;

use crate::reports::money::format_money;
use crate::storage::StorageError;
use crate::utils::time::format_time;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("relay rejected the report: HTTP {status}")]
    Rejected { status: u16 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outbound channel for sales summaries and formatted reports
#[async_trait]
pub trait ReportRelay: Send + Sync {
    /// Push the day's raw summary so the relay's cache stays current
    async fn sync_sales(&self, summary: &DailySummary) -> Result<(), RelayError>;

    /// Ask the relay to transmit a formatted report text
    async fn send_report(&self, text: &str) -> Result<(), RelayError>;
}

/// HTTP relay: JSON POSTs against a remote notification service
pub struct HttpRelay {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRelay {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn check(resp: &reqwest::Response) -> Result<(), RelayError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(RelayError::Rejected {
                status: resp.status().as_u16(),
            })
        }
    }
}

#[async_trait]
impl ReportRelay for HttpRelay {
    async fn sync_sales(&self, summary: &DailySummary) -> Result<(), RelayError> {
        let resp = self
            .client
            .post(format!("{}/api/sales-data", self.base_url))
            .json(summary)
            .send()
            .await?;
        Self::check(&resp)
    }

    async fn send_report(&self, text: &str) -> Result<(), RelayError> {
        let resp = self
            .client
            .post(format!("{}/api/send-report", self.base_url))
            .json(&serde_json::json!({ "message": text }))
            .send()
            .await?;
        Self::check(&resp)
    }
}

/// Render a daily summary as the report text the relay transmits
pub fn format_daily_report(summary: &DailySummary) -> String {
    let date = summary.date.format("%d/%m/%Y");

    if summary.total_orders == 0 {
        return format!(
            "📊 *Daily Sales Report*\n\n📅 Date: {date}\n\nNo sales recorded today."
        );
    }

    let mut report = String::from("📊 *Daily Sales Report*\n\n");
    report.push_str(&format!("🏪 {}\n", summary.restaurant_name));
    report.push_str(&format!("📅 Date: {date}\n\n"));

    report.push_str("📈 *Summary:*\n");
    report.push_str(&format!("• Total Orders: {}\n", summary.total_orders));
    report.push_str(&format!(
        "• Total Sales: ₹{}\n",
        format_money(summary.total_sales)
    ));
    if let Some(average) = summary.average_order {
        report.push_str(&format!("• Average Order: ₹{}\n", format_money(average)));
    }
    report.push('\n');

    if !summary.popular_items.is_empty() {
        report.push_str("🔥 *Top 5 Items:*\n");
        for item in &summary.popular_items {
            report.push_str(&format!("{} ({})\n", item.name, item.quantity));
        }
        report.push('\n');
    }

    report.push_str("📋 *Order Details:*\n");
    for (index, detail) in summary.order_details.iter().enumerate() {
        report.push_str(&format!("{}. Order #{}\n", index + 1, detail.order_id));
        report.push_str(&format!("   Time: {}\n", format_time(detail.date)));
        report.push_str(&format!("   Items: {}\n", detail.item_lines));
        report.push_str(&format!("   Total: ₹{}\n\n", format_money(detail.total)));
    }

    report.push_str("\n_Report generated automatically_");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::prelude::*;
    use shared::models::{OrderDetail, PopularItem};

    fn summary(orders: usize) -> DailySummary {
        let details: Vec<OrderDetail> = (1..=orders as u64)
            .map(|i| OrderDetail {
                order_id: i,
                // 2024-03-15 09:30 UTC
                date: 1_710_495_000_000,
                item_lines: 2,
                item_count: 3,
                total: Decimal::from_str("18.00").unwrap(),
                payment_method: None,
            })
            .collect();

        DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            restaurant_name: "Tiffin Corner".to_string(),
            total_orders: orders,
            total_sales: Decimal::from(orders as u64) * Decimal::from_str("18.00").unwrap(),
            average_order: (orders > 0).then(|| Decimal::from_str("18.00").unwrap()),
            popular_items: if orders > 0 {
                vec![PopularItem {
                    name: "Idly".to_string(),
                    quantity: 2 * orders as i64,
                }]
            } else {
                vec![]
            },
            order_details: details,
        }
    }

    #[test]
    fn empty_day_reports_no_sales() {
        let text = format_daily_report(&summary(0));
        assert!(text.contains("No sales recorded today."));
        assert!(text.contains("15/03/2024"));
        assert!(!text.contains("Order Details"));
    }

    #[test]
    fn report_lists_summary_ranking_and_details() {
        let text = format_daily_report(&summary(2));

        assert!(text.contains("🏪 Tiffin Corner"));
        assert!(text.contains("• Total Orders: 2"));
        assert!(text.contains("• Total Sales: ₹36.00"));
        assert!(text.contains("• Average Order: ₹18.00"));
        assert!(text.contains("Idly (4)"));
        assert!(text.contains("1. Order #1"));
        assert!(text.contains("2. Order #2"));
        assert!(text.contains("   Time: 09:30"));
        assert!(text.ends_with("_Report generated automatically_"));
    }
}
