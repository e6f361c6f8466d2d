//! Report aggregation
//!
//! Every function here is a pure reduction over a complete snapshot. Filter
//! changes re-run them over the full order set; nothing is cached or patched
//! incrementally.

use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use crate::domain::{Customer, Order, Product, ReportPeriod};
use crate::report::summary::{CategoryBreakdown, MonthlyRevenue, ReportFilter, ReportSummary, TopProduct};

pub const RECENT_ORDERS_LIMIT: usize = 5;
pub const TOP_PRODUCTS_LIMIT: usize = 5;

pub fn compute_summary(orders: &[Order], customers: &[Customer], products: &[Product], filter: &ReportFilter) -> ReportSummary {
    let summary = ReportSummary {
        total_revenue: total_revenue(orders),
        total_orders: orders.len(),
        total_customers: customers.len(),
        total_products: products.len(),
        recent_orders: recent_orders(orders, RECENT_ORDERS_LIMIT),
        top_products: top_products(orders, products, TOP_PRODUCTS_LIMIT),
        orders_by_status: orders_by_status(orders),
        available_years: available_years(orders),
        monthly_revenue: compute_monthly_revenue(orders, filter.revenue_year),
        category_breakdown: compute_category_breakdown(orders, products, filter.category_period),
    };
    tracing::debug!(
        orders = summary.total_orders,
        revenue = %summary.total_revenue,
        revenue_year = filter.revenue_year,
        period = %filter.category_period,
        "computed report summary"
    );
    summary
}

pub fn total_revenue(orders: &[Order]) -> Decimal {
    revenue_orders(orders).map(|o| o.amount).sum()
}

/// Counts orders by their raw status string.
pub fn orders_by_status(orders: &[Order]) -> BTreeMap<String, usize> {
    orders.iter().fold(BTreeMap::new(), |mut acc, o| {
        *acc.entry(o.status.clone()).or_insert(0) += 1;
        acc
    })
}

/// Newest orders first; equal timestamps keep their input order.
/// Undated orders sort after every dated one (`None < Some` in reverse).
pub fn recent_orders(orders: &[Order], limit: usize) -> Vec<Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Best sellers by quantity across all orders, paid or not.
///
/// The ranking is cut to `limit` before products are resolved, so ids that
/// no longer exist in the catalog drop out and may leave fewer entries.
/// Ties keep the order in which products were first seen.
pub fn top_products(orders: &[Order], products: &[Product], limit: usize) -> Vec<TopProduct> {
    let mut sold: Vec<(&str, u64)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for item in orders.iter().flat_map(|o| &o.items) {
        let Some(id) = item.product_id() else { continue };
        let slot = *slots.entry(id).or_insert_with(|| {
            sold.push((id, 0));
            sold.len() - 1
        });
        sold[slot].1 += u64::from(item.quantity);
    }
    sold.sort_by(|a, b| b.1.cmp(&a.1));

    let catalog = product_index(products);
    sold.into_iter()
        .take(limit)
        .filter_map(|(id, quantity)| catalog.get(id).map(|p| TopProduct { product: (*p).clone(), quantity }))
        .collect()
}

/// Distinct order years, newest first. Undated orders contribute none.
pub fn available_years(orders: &[Order]) -> Vec<i32> {
    let years: BTreeSet<i32> = orders.iter().filter_map(|o| o.created_at).map(|at| at.year()).collect();
    years.into_iter().rev().collect()
}

/// Twelve monthly buckets for `year`; months without revenue stay zero.
pub fn compute_monthly_revenue(orders: &[Order], year: i32) -> MonthlyRevenue {
    let mut revenue = MonthlyRevenue::zeroed(year);
    for (order, at) in revenue_orders(orders).filter_map(|o| o.created_at.map(|at| (o, at))) {
        if at.year() == year { revenue.months[at.month0() as usize] += order.amount; }
    }
    revenue
}

/// Quantity per category for revenue orders placed in `period`.
///
/// Line items whose product is missing from the catalog are skipped.
pub fn compute_category_breakdown(orders: &[Order], products: &[Product], period: ReportPeriod) -> CategoryBreakdown {
    let catalog = product_index(products);
    let mut categories = BTreeMap::new();
    for order in revenue_orders(orders).filter(|o| o.created_at.is_some_and(|at| period.contains(&at))) {
        for item in &order.items {
            let Some(product) = item.product_id().and_then(|id| catalog.get(id)) else { continue };
            *categories.entry(product.report_category().to_string()).or_insert(0) += u64::from(item.quantity);
        }
    }
    CategoryBreakdown { period, categories }
}

fn revenue_orders(orders: &[Order]) -> impl Iterator<Item = &Order> {
    orders.iter().filter(|o| o.counts_toward_revenue())
}

/// First product wins when ids repeat.
fn product_index(products: &[Product]) -> HashMap<&str, &Product> {
    let mut index = HashMap::with_capacity(products.len());
    for p in products { index.entry(p.id.as_str()).or_insert(p); }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::parse_timestamp;
    use crate::domain::{LineItem, ProductRef};

    fn order(id: &str, amount: i64, paid: bool, status: &str, created_at: &str, items: Vec<LineItem>) -> Order {
        Order {
            id: id.into(), items, address: None, payment_method: None, paid,
            status: status.into(), amount: Decimal::new(amount, 0),
            created_at: parse_timestamp(created_at), updated_at: None,
        }
    }

    fn item(product: &str, quantity: u32) -> LineItem {
        LineItem { product: Some(ProductRef::Id(product.into())), quantity, size: Some("M".into()), price: Decimal::ZERO }
    }

    fn product(id: &str, category: Option<&str>) -> Product {
        Product {
            id: id.into(), name: format!("Product {}", id), image: vec![], category: category.map(Into::into),
            in_stock: true, price: None, offer_price: None, popular: false,
        }
    }

    #[test]
    fn test_revenue_only_paid_or_done() {
        let orders = vec![
            order("a", 100, true, "Packing", "2024-03-05T10:00:00", vec![]),
            order("b", 50, false, "Packing", "2024-03-06T10:00:00", vec![]),
            order("c", 30, false, "Done", "2023-11-01T10:00:00", vec![]),
            order("d", 7, false, "done", "2024-01-01T10:00:00", vec![]),
        ];
        assert_eq!(total_revenue(&orders), Decimal::new(130, 0));

        let monthly = compute_monthly_revenue(&orders, 2024);
        assert_eq!(monthly.months[2], Decimal::new(100, 0));
        assert_eq!(monthly.total(), Decimal::new(100, 0));
    }

    #[test]
    fn test_monthly_revenue_always_twelve_buckets() {
        let empty = compute_monthly_revenue(&[], 2022);
        assert_eq!(empty.months.len(), 12);
        assert!(empty.months.iter().all(|m| m.is_zero()));
        assert!(empty.total().is_zero());
    }

    #[test]
    fn test_monthly_sums_to_year_revenue() {
        let orders = vec![
            order("a", 10, true, "", "2024-01-15T00:00:00", vec![]),
            order("b", 20, false, "Done", "2024-12-31T23:59:59", vec![]),
            order("c", 40, true, "", "2025-01-01T00:00:00", vec![]),
        ];
        let monthly = compute_monthly_revenue(&orders, 2024);
        assert_eq!(monthly.months[0], Decimal::new(10, 0));
        assert_eq!(monthly.months[11], Decimal::new(20, 0));
        let in_year: Vec<Order> = orders.iter().filter(|o| o.created_at.is_some_and(|at| at.year() == 2024)).cloned().collect();
        assert_eq!(monthly.total(), total_revenue(&in_year));
    }

    #[test]
    fn test_orders_by_status_uses_raw_values() {
        let orders = vec![
            order("a", 1, false, "Shipped", "2024-01-01T00:00:00", vec![]),
            order("b", 1, false, "shipped ", "2024-01-01T00:00:00", vec![]),
            order("c", 1, false, "Shipped", "2024-01-01T00:00:00", vec![]),
        ];
        let by_status = orders_by_status(&orders);
        assert_eq!(by_status.get("Shipped"), Some(&2));
        assert_eq!(by_status.get("shipped "), Some(&1));
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let orders: Vec<Order> = (1..=7)
            .map(|d| order(&format!("o{}", d), 1, false, "", &format!("2024-05-0{}T00:00:00", d), vec![]))
            .collect();
        let recent = recent_orders(&orders, RECENT_ORDERS_LIMIT);
        let ids: Vec<&str> = recent.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o7", "o6", "o5", "o4", "o3"]);
    }

    #[test]
    fn test_top_products_ranking() {
        let orders = vec![
            order("a", 0, false, "Order Placed", "2024-01-01T00:00:00", vec![item("p1", 1), item("p2", 5)]),
            order("b", 0, false, "Packing", "2024-01-02T00:00:00", vec![item("p3", 2), item("p1", 3), item("ghost", 50)]),
            order("c", 0, true, "", "2024-01-03T00:00:00", vec![item("p4", 4), item("p5", 1), item("p6", 1)]),
        ];
        let products: Vec<Product> = ["p1", "p2", "p3", "p4", "p5", "p6"].iter().map(|id| product(id, None)).collect();

        let top = top_products(&orders, &products, TOP_PRODUCTS_LIMIT);
        let ranked: Vec<(&str, u64)> = top.iter().map(|t| (t.product.id.as_str(), t.quantity)).collect();
        // "ghost" ranks first but is not in the catalog; the cut happens before resolution.
        assert_eq!(ranked, vec![("p2", 5), ("p1", 4), ("p4", 4), ("p3", 2)]);
        assert!(top.windows(2).all(|w| w[0].quantity >= w[1].quantity));
        assert_eq!(top, top_products(&orders, &products, TOP_PRODUCTS_LIMIT));
    }

    #[test]
    fn test_top_products_at_most_five() {
        let items: Vec<LineItem> = (0..8).map(|i| item(&format!("p{}", i), 8 - i)).collect();
        let products: Vec<Product> = (0..8).map(|i| product(&format!("p{}", i), None)).collect();
        let orders = vec![order("a", 0, false, "", "2024-01-01T00:00:00", items)];
        let top = top_products(&orders, &products, TOP_PRODUCTS_LIMIT);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].product.id, "p0");
        assert_eq!(top[4].product.id, "p4");
    }

    #[test]
    fn test_available_years_descending_unique() {
        let orders = vec![
            order("a", 0, false, "", "2022-01-01T00:00:00", vec![]),
            order("b", 0, false, "", "2024-01-01T00:00:00", vec![]),
            order("c", 0, false, "", "2022-06-01T00:00:00", vec![]),
            order("d", 0, false, "", "2023-01-01T00:00:00", vec![]),
        ];
        let years = available_years(&orders);
        assert_eq!(years, vec![2024, 2023, 2022]);
        assert!(years.windows(2).all(|w| w[0] > w[1]));
        assert!(available_years(&[]).is_empty());
    }

    #[test]
    fn test_category_breakdown() {
        let products = vec![product("p1", Some("Men")), product("p2", Some("Women")), product("p3", None)];
        let orders = vec![
            order("a", 10, true, "", "2024-03-02T00:00:00", vec![item("p1", 2), item("p3", 1), item("gone", 9)]),
            order("b", 10, false, "Done", "2024-03-20T00:00:00", vec![item("p1", 1), item("p2", 4)]),
            order("c", 10, false, "Packing", "2024-03-21T00:00:00", vec![item("p2", 100)]),
            order("d", 10, true, "", "2024-04-01T00:00:00", vec![item("p2", 100)]),
        ];
        let breakdown = compute_category_breakdown(&orders, &products, ReportPeriod::new(2024, 3).unwrap());
        assert_eq!(breakdown.get("Men"), 3);
        assert_eq!(breakdown.get("Women"), 4);
        assert_eq!(breakdown.get("Other"), 1);
        assert_eq!(breakdown.categories.len(), 3);
    }

    #[test]
    fn test_category_breakdown_empty_period() {
        let products = vec![product("p1", Some("Men"))];
        let orders = vec![order("a", 10, true, "", "2024-03-02T00:00:00", vec![item("p1", 2)])];
        let breakdown = compute_category_breakdown(&orders, &products, ReportPeriod::new(2023, 7).unwrap());
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let products = vec![product("p1", Some("Men"))];
        let orders = vec![
            order("a", 100, true, "Packing", "2024-03-05T00:00:00", vec![item("p1", 2)]),
            order("b", 50, false, "Packing", "2024-03-06T00:00:00", vec![item("p1", 1)]),
        ];
        let filter = ReportFilter { revenue_year: 2024, category_period: ReportPeriod::new(2024, 3).unwrap() };
        let summary = compute_summary(&orders, &[], &products, &filter);

        assert_eq!(summary.total_revenue, Decimal::new(100, 0));
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_customers, 0);
        assert_eq!(summary.total_products, 1);
        assert_eq!(summary.recent_orders[0].id, "b");
        assert_eq!(summary.top_products[0].quantity, 3);
        assert_eq!(summary.orders_by_status.get("Packing"), Some(&2));
        assert_eq!(summary.available_years, vec![2024]);
        assert_eq!(summary.monthly_revenue.months[2], Decimal::new(100, 0));
        assert_eq!(summary.category_breakdown.get("Men"), 2);
    }

    #[test]
    fn test_undated_orders() {
        let products = vec![product("p1", Some("Men"))];
        let orders = vec![
            order("dated", 100, true, "Packing", "2024-03-05T00:00:00", vec![item("p1", 1)]),
            order("undated", 40, true, "Done", "", vec![item("p1", 6)]),
            order("older", 10, false, "Packing", "2023-01-01T00:00:00", vec![]),
        ];
        assert_eq!(orders[1].created_at, None);

        // Counted wherever no date is needed.
        assert_eq!(total_revenue(&orders), Decimal::new(140, 0));
        assert_eq!(orders_by_status(&orders).get("Done"), Some(&1));
        assert_eq!(top_products(&orders, &products, TOP_PRODUCTS_LIMIT)[0].quantity, 7);

        // Left out of every dated bucket.
        assert_eq!(available_years(&orders), vec![2024, 2023]);
        assert_eq!(compute_monthly_revenue(&orders, 2024).total(), Decimal::new(100, 0));
        let breakdown = compute_category_breakdown(&orders, &products, ReportPeriod::new(2024, 3).unwrap());
        assert_eq!(breakdown.get("Men"), 1);

        // Sorted after dated orders.
        let recent: Vec<String> = recent_orders(&orders, RECENT_ORDERS_LIMIT).into_iter().map(|o| o.id).collect();
        assert_eq!(recent, vec!["dated", "older", "undated"]);
    }
}
