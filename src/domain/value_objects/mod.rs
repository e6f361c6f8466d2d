//! Value Objects for the report domain

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known order lifecycle states.
///
/// Orders carry their status as a raw string on the wire; this enum names
/// the values the storefront admin actually writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Order Placed")]
    OrderPlaced,
    Packing,
    Shipped,
    Delivered,
    Done,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [Self::OrderPlaced, Self::Packing, Self::Shipped, Self::Delivered, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "Order Placed",
            Self::Packing => "Packing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|st| st.as_str() == s).ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub struct UnknownStatus(pub String);
impl std::error::Error for UnknownStatus {}
impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Unknown order status: {}", self.0) }
}

/// A calendar month of a given year, used to filter the category breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodParts")]
pub struct ReportPeriod { year: i32, month: u32 }

#[derive(Deserialize)]
struct PeriodParts { year: i32, month: u32 }

impl TryFrom<PeriodParts> for ReportPeriod {
    type Error = PeriodError;
    fn try_from(p: PeriodParts) -> Result<Self, Self::Error> { Self::new(p.year, p.month) }
}

impl ReportPeriod {
    /// `month` is 1-based (1 = January).
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) { return Err(PeriodError::MonthOutOfRange(month)); }
        Ok(Self { year, month })
    }
    pub fn current() -> Self {
        let now = Utc::now();
        Self { year: now.year(), month: now.month() }
    }
    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }
    pub fn contains(&self, at: &NaiveDateTime) -> bool { at.year() == self.year && at.month() == self.month }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:04}-{:02}", self.year, self.month) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum PeriodError { MonthOutOfRange(u32) }
impl std::error::Error for PeriodError {}
impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::MonthOutOfRange(m) => write!(f, "month {} is outside 1..=12", m) }
    }
}

/// Parses storefront timestamps.
///
/// Zone-less values are taken as-is; values carrying an offset are
/// normalized to UTC. A bare date reads as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) { return Some(dt.naive_utc()); }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}

pub(crate) fn deserialize_optional_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    match Option::<String>::deserialize(d)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw).map(Some).ok_or_else(|| de::Error::custom(format!("invalid timestamp `{}`", raw))),
    }
}

/// Reads an explicit JSON `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
