//! Report service
//!
//! Holds the latest snapshot and answers report queries from it. Refreshes
//! replace the snapshot wholesale; when refreshes overlap, the one started
//! last wins and older results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use crate::client::StorefrontClient;
use crate::domain::{Customer, Order, ReportPeriod};
use crate::report::{CategoryBreakdown, CustomerQuery, MonthlyRevenue, OrderQuery, ReportFilter, ReportSummary};
use crate::{Result, Snapshot};

#[derive(Default)]
struct Installed {
    ticket: u64,
    snapshot: Option<Arc<Snapshot>>,
}

pub struct ReportService {
    client: Arc<dyn StorefrontClient>,
    installed: RwLock<Installed>,
    tickets: AtomicU64,
}

impl ReportService {
    pub fn new(client: Arc<dyn StorefrontClient>) -> Self {
        Self { client, installed: RwLock::new(Installed::default()), tickets: AtomicU64::new(0) }
    }

    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.installed.read().await.snapshot.clone()
    }

    pub async fn current_or_refresh(&self) -> Result<Arc<Snapshot>> {
        match self.current().await {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh().await,
        }
    }

    /// Fetches a new snapshot and installs it unless a later refresh has
    /// already installed one. Returns whichever snapshot is current
    /// afterwards. On failure the installed snapshot is left untouched.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let started = Instant::now();
        let snapshot = match self.client.fetch_snapshot().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::warn!(ticket, error = %e, "report refresh failed");
                return Err(e);
            }
        };

        let mut installed = self.installed.write().await;
        if ticket < installed.ticket {
            if let Some(newer) = &installed.snapshot {
                tracing::info!(ticket, current = installed.ticket, "discarding stale snapshot");
                return Ok(newer.clone());
            }
        }
        installed.ticket = ticket;
        installed.snapshot = Some(snapshot.clone());
        let info = snapshot.info();
        if info.unknown_statuses > 0 {
            tracing::warn!(ticket, count = info.unknown_statuses, "orders with unrecognized status");
        }
        tracing::info!(
            ticket,
            snapshot = %snapshot.id,
            orders = snapshot.orders.len(),
            customers = snapshot.customers.len(),
            products = snapshot.products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report snapshot installed"
        );
        Ok(snapshot)
    }

    pub async fn summary(&self, filter: &ReportFilter) -> Result<ReportSummary> {
        Ok(self.current_or_refresh().await?.summary(filter))
    }

    pub async fn monthly_revenue(&self, year: i32) -> Result<MonthlyRevenue> {
        Ok(self.current_or_refresh().await?.monthly_revenue(year))
    }

    pub async fn category_breakdown(&self, period: ReportPeriod) -> Result<CategoryBreakdown> {
        Ok(self.current_or_refresh().await?.category_breakdown(period))
    }

    pub async fn orders(&self, query: &OrderQuery) -> Result<Vec<Order>> {
        let snapshot = self.current_or_refresh().await?;
        Ok(query.apply(&snapshot.orders).into_iter().cloned().collect())
    }

    pub async fn customers(&self, query: &CustomerQuery) -> Result<Vec<Customer>> {
        let snapshot = self.current_or_refresh().await?;
        Ok(query.apply(&snapshot.customers).into_iter().cloned().collect())
    }
}
