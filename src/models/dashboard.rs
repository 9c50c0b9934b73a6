use serde::{Deserialize, Serialize};

/// A headline number with its month-over-month change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub value: f64,
    /// Percentage change from last month.
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub month: String,
    /// Units sold.
    pub sales: u64,
    /// Revenue in rupees.
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSales {
    pub region: String,
    pub sales: f64,
}

/// Pre-computed dashboard figures for one region and product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub region: String,
    pub category: String,
    pub total_revenue: Metric,
    pub conversion_rate: Metric,
    pub active_buyers: Metric,
    pub new_sellers: Metric,
    pub sales_over_time: Vec<MonthlySales>,
    pub sales_by_region: Vec<RegionSales>,
}

/// A selectable value in one of the dashboard filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// The region and category selectors shown above the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFilters {
    pub regions: Vec<FilterOption>,
    pub categories: Vec<FilterOption>,
    pub default_region: String,
    pub default_category: String,
}
