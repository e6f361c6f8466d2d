//! A complete, consistent fetch of the three storefront collections

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use crate::domain::{Customer, Order, Product, ReportPeriod};
use crate::report::{self, CategoryBreakdown, MonthlyRevenue, ReportFilter, ReportSummary};

#[derive(Clone, Debug)]
pub struct Snapshot {
    pub id: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
}

/// Shape returned to callers after a refresh.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub id: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub orders: usize,
    pub customers: usize,
    pub products: usize,
    /// Orders whose status is outside the known lifecycle values.
    pub unknown_statuses: usize,
}

impl Snapshot {
    pub fn new(orders: Vec<Order>, customers: Vec<Customer>, products: Vec<Product>) -> Self {
        Self { id: Uuid::now_v7(), fetched_at: Utc::now(), orders, customers, products }
    }

    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            id: self.id, fetched_at: self.fetched_at,
            orders: self.orders.len(), customers: self.customers.len(), products: self.products.len(),
            unknown_statuses: self.orders.iter().filter(|o| o.known_status().is_none()).count(),
        }
    }

    pub fn summary(&self, filter: &ReportFilter) -> ReportSummary {
        report::compute_summary(&self.orders, &self.customers, &self.products, filter)
    }

    pub fn monthly_revenue(&self, year: i32) -> MonthlyRevenue {
        report::compute_monthly_revenue(&self.orders, year)
    }

    pub fn category_breakdown(&self, period: ReportPeriod) -> CategoryBreakdown {
        report::compute_category_breakdown(&self.orders, &self.products, period)
    }
}
