//! Order read model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{deserialize_optional_timestamp, null_as_default, OrderStatus};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, rename = "isPaid", alias = "paid", deserialize_with = "null_as_default")]
    pub paid: bool,
    /// Raw status as stored upstream; may fall outside [`OrderStatus`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, alias = "totalAmount", deserialize_with = "null_as_default")]
    pub amount: Decimal,
    /// Imported orders can lack a creation time; they still count toward
    /// totals but fall outside every dated bucket.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
}

/// A line item's product: either a bare id or the summary the admin
/// order list embeds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(String),
    Summary(ProductSummary),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: Vec<String>,
    #[serde(default)]
    pub offer_price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductRef {
    pub fn id(&self) -> &str {
        match self { Self::Id(id) => id, Self::Summary(s) => &s.id }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)] pub first_name: Option<String>,
    #[serde(default)] pub last_name: Option<String>,
    #[serde(default)] pub email: Option<String>,
    #[serde(default)] pub street: Option<String>,
    #[serde(default)] pub city: Option<String>,
    #[serde(default)] pub state: Option<String>,
    #[serde(default)] pub zipcode: Option<String>,
    #[serde(default)] pub country: Option<String>,
    #[serde(default)] pub phone: Option<String>,
}

impl Order {
    /// The single revenue rule: paid orders and finished orders count.
    pub fn counts_toward_revenue(&self) -> bool {
        self.paid || self.status == OrderStatus::Done.as_str()
    }

    /// Parsed status, `None` for values outside the known set.
    pub fn known_status(&self) -> Option<OrderStatus> { self.status.parse().ok() }
}

impl LineItem {
    /// Referenced product id, skipping empty references.
    pub fn product_id(&self) -> Option<&str> {
        self.product.as_ref().map(ProductRef::id).filter(|id| !id.is_empty())
    }
}
