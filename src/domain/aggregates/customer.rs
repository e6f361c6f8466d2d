//! Customer read model
//!
//! The storefront's user listing also carries the stored password and cart
//! contents. Neither is modeled here, so both are dropped on deserialization
//! and can never be re-served.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::deserialize_optional_timestamp;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}
