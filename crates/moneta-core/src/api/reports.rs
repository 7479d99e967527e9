//! Read-only dashboard and report routes
//!
//! The `summery_widgets` path keeps the backend's historical spelling; the
//! Rust surface uses the corrected name.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{
    BankInfo, MonthCategory, MonthTracking, SummaryWidgets, TotalMonthExpenses, User,
};

impl ApiClient {
    /// One-line status of the current tracking month
    pub async fn month_tracking(&self) -> Result<MonthTracking> {
        self.get_json("/api/month-tracking", "month_tracking").await
    }

    /// Full user record, flags and permissions included
    pub async fn user_record(&self) -> Result<User> {
        self.get_json("/api/users/", "user_record").await
    }

    /// Aggregate bank balance indicator
    pub async fn bank_info(&self) -> Result<BankInfo> {
        self.get_json("/bank_info", "bank_info").await
    }

    /// Per-category breakdown for the current month
    pub async fn month_category(&self) -> Result<MonthCategory> {
        self.get_json("/month_category", "month_category").await
    }

    /// Dashboard summary widgets (graphs plus rolling averages)
    pub async fn summary_widgets(&self) -> Result<SummaryWidgets> {
        self.get_json("/summery_widgets", "summary_widgets").await
    }

    /// Month-to-date expense total with moving average
    pub async fn total_month_expenses(&self) -> Result<TotalMonthExpenses> {
        self.get_json("/total_month_expenses", "total_month_expenses")
            .await
    }
}
