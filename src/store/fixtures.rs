//! Built-in data: dashboard figures and the initial roadmap.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{DashboardFilters, DashboardSnapshot, FilterOption, RoadmapBoard};

const DASHBOARD_JSON: &str = include_str!("fixtures/dashboard.json");
const ROADMAP_JSON: &str = include_str!("fixtures/roadmap.json");

pub const ALL_CATEGORIES: &str = "all-categories";

/// Read-only dashboard lookup table keyed by region and category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTable {
    regions: Vec<FilterOption>,
    categories: Vec<FilterOption>,
    default_region: String,
    default_category: String,
    snapshots: Vec<DashboardSnapshot>,
}

impl DashboardTable {
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(DASHBOARD_JSON).context("Failed to parse dashboard fixtures")
    }

    pub fn filters(&self) -> DashboardFilters {
        DashboardFilters {
            regions: self.regions.clone(),
            categories: self.categories.clone(),
            default_region: self.default_region.clone(),
            default_category: self.default_category.clone(),
        }
    }

    fn is_known(options: &[FilterOption], value: &str) -> bool {
        options.iter().any(|o| o.value == value)
    }

    fn find(&self, region: &str, category: &str) -> Option<&DashboardSnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.region == region && s.category == category)
    }

    /// Figures for a region and category; `None` picks the defaults.
    ///
    /// A known pair without its own figures falls back to the region's
    /// all-categories figures. Unknown regions or categories return `None`.
    pub fn lookup(&self, region: Option<&str>, category: Option<&str>) -> Option<DashboardSnapshot> {
        let region = region.unwrap_or(self.default_region.as_str());
        let category = category.unwrap_or(self.default_category.as_str());

        if !Self::is_known(&self.regions, region) || !Self::is_known(&self.categories, category) {
            return None;
        }

        self.find(region, category)
            .or_else(|| self.find(region, ALL_CATEGORIES))
            .cloned()
    }
}

/// The roadmap every fresh store starts with.
pub fn initial_roadmap() -> Result<RoadmapBoard> {
    serde_json::from_str(ROADMAP_JSON).context("Failed to parse roadmap fixtures")
}
