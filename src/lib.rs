//! Shopprr Report
//!
//! Sales reporting for the Shopprr storefront admin.
//!
//! ## Features
//! - Concurrent, all-or-nothing snapshot of orders, customers and products
//! - Revenue totals and monthly revenue series
//! - Category breakdown per month
//! - Best sellers and order status histogram
//! - Admin order and customer search

use thiserror::Error;

pub mod client;
pub mod config;
pub mod domain;
pub mod report;
pub mod routes;
pub mod service;
pub mod snapshot;

pub use client::{HttpStorefrontClient, StorefrontClient};
pub use config::Config;
pub use service::ReportService;
pub use snapshot::Snapshot;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    UpstreamStatus { endpoint: &'static str, status: u16 },

    #[error("{endpoint} reported failure: {message}")]
    UpstreamRejected { endpoint: &'static str, message: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: &'static str, reason: String },

    #[error("Invalid report period: {0}")]
    InvalidPeriod(#[from] domain::PeriodError),
}

impl ReportError {
    /// Upstream failures can be retried with another refresh.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidPeriod(_))
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
