//! Derived report types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::domain::{Order, Product, ReportPeriod};

/// Filter values chosen on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub revenue_year: i32,
    pub category_period: ReportPeriod,
}

impl ReportFilter {
    pub fn current() -> Self {
        let period = ReportPeriod::current();
        Self { revenue_year: period.year(), category_period: period }
    }
}

impl Default for ReportFilter {
    fn default() -> Self { Self::current() }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product: Product,
    pub quantity: u64,
}

/// Revenue per calendar month of one year, January first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub months: [Decimal; 12],
}

impl MonthlyRevenue {
    pub fn zeroed(year: i32) -> Self { Self { year, months: [Decimal::ZERO; 12] } }
    pub fn total(&self) -> Decimal { self.months.iter().copied().sum() }
}

/// Quantity sold per category for one month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub period: ReportPeriod,
    pub categories: BTreeMap<String, u64>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool { self.categories.is_empty() }
    #[cfg(test)]
    pub fn get(&self, category: &str) -> u64 { self.categories.get(category).copied().unwrap_or(0) }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_revenue: Decimal,
    pub total_orders: usize,
    pub total_customers: usize,
    pub total_products: usize,
    pub recent_orders: Vec<Order>,
    pub top_products: Vec<TopProduct>,
    pub orders_by_status: BTreeMap<String, usize>,
    pub available_years: Vec<i32>,
    pub monthly_revenue: MonthlyRevenue,
    pub category_breakdown: CategoryBreakdown,
}
