//! Admin list filters for orders and customers

use serde::Deserialize;
use crate::domain::{Customer, Order};

/// Status value that disables status filtering.
pub const ALL_STATUSES: &str = "All";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        self.matches_search(order) && self.matches_status(order)
    }

    /// Case-insensitive substring over order id and contact fields.
    fn matches_search(&self, order: &Order) -> bool {
        let Some(needle) = normalized_needle(self.search.as_deref()) else { return true };
        let address = order.address.as_ref();
        std::iter::once(Some(order.id.as_str()))
            .chain([
                address.and_then(|a| a.first_name.as_deref()),
                address.and_then(|a| a.last_name.as_deref()),
                address.and_then(|a| a.phone.as_deref()),
                address.and_then(|a| a.email.as_deref()),
            ])
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Loose status match: equal, or either side contains the other.
    fn matches_status(&self, order: &Order) -> bool {
        let wanted = match self.status.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(s) if s.eq_ignore_ascii_case(ALL_STATUSES) => return true,
            Some(s) => s.to_lowercase(),
        };
        let actual = order.status.trim().to_lowercase();
        // A blank status never matches a specific filter, even though it is a
        // substring of every filter value.
        if actual.is_empty() { return false; }
        actual == wanted || actual.contains(&wanted) || wanted.contains(&actual)
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub search: Option<String>,
}

impl CustomerQuery {
    pub fn matches(&self, customer: &Customer) -> bool {
        let Some(needle) = normalized_needle(self.search.as_deref()) else { return true };
        [customer.name.as_deref(), customer.email.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, customers: &'a [Customer]) -> Vec<&'a Customer> {
        customers.iter().filter(|c| self.matches(c)).collect()
    }
}

fn normalized_needle(search: Option<&str>) -> Option<String> {
    search.filter(|s| !s.is_empty()).map(str::to_lowercase)
}
