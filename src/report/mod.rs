//! Sales report derivation and admin list filters
pub mod aggregator;
pub mod search;
pub mod summary;

pub use aggregator::{compute_category_breakdown, compute_monthly_revenue, compute_summary};
pub use search::{CustomerQuery, OrderQuery};
pub use summary::{CategoryBreakdown, MonthlyRevenue, ReportFilter, ReportSummary, TopProduct};
