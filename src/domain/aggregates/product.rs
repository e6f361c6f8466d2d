//! Product read model

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use crate::domain::value_objects::null_as_default;

/// Category used when a product has none.
pub const UNCATEGORIZED: &str = "Other";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "images", deserialize_with = "null_as_default")]
    pub image: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "in_stock_default", deserialize_with = "null_as_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub offer_price: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popular: bool,
}

fn in_stock_default() -> bool { true }

/// `inStock` is a nullable flag upstream; null means the default, in stock.
fn null_as_in_stock<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or_else(in_stock_default))
}

impl Product {
    /// Category for reporting; blank categories fall back to [`UNCATEGORIZED`].
    pub fn report_category(&self) -> &str {
        self.category.as_deref().filter(|c| !c.is_empty()).unwrap_or(UNCATEGORIZED)
    }
}
