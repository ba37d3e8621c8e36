use std::fmt;

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Pre,
    Post,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Pre => f.write_str("pre-revaluation"),
            Phase::Post => f.write_str("post-revaluation"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareShift {
    Increase,
    Decrease,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub label: String,
    pub pre_value: f64,
    pub post_value: f64,
}

impl Property {
    pub fn new(label: impl Into<String>, pre_value: f64, post_value: f64) -> Self {
        Self {
            label: label.into(),
            pre_value,
            post_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub label: String,
    pub pre_value: f64,
    pub post_value: f64,
    pub pre_tax: i64,
    pub post_tax: i64,
    pub tax_change: i64,
    pub percent_change: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub results: Vec<AllocationResult>,
    pub levy: f64,
    pub pre_total: f64,
    pub post_total: f64,
    pub mill_rate_pre: f64,
    pub mill_rate_post: f64,
}

impl Allocation {
    pub fn pre_tax_total(&self) -> i64 {
        self.results
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.pre_tax))
    }

    pub fn post_tax_total(&self) -> i64 {
        self.results
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.post_tax))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareComparison {
    pub label: String,
    pub value_growth_percent: f64,
    pub grand_list_growth_percent: f64,
    pub shift: ShareShift,
    pub break_even_post_value: Option<i64>,
}
