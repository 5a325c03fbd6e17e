// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire types for the returns API.

use std::collections::HashMap;

use serde::Deserialize;

/// One returned item, as served by the items endpoint.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ReturnItem {
    pub(crate) id: String,
    /// Material composition, material name to percentage.
    #[serde(default)]
    pub(crate) composition: HashMap<String, f64>,
    /// Sustainability score in `0..=100`.
    #[serde(default)]
    pub(crate) score: f64,
    /// Free-form routing status, e.g. `"Recycled"` or `"recycle-resell"`.
    #[serde(default)]
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) date: String,
    #[serde(default)]
    pub(crate) batch_no: Option<String>,
}

impl ReturnItem {
    /// The material with the largest composition share, if any.
    pub(crate) fn dominant_material(&self) -> Option<(&str, f64)> {
        self.composition
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, share)| (name.as_str(), *share))
    }
}

/// The items endpoint serves either a bare array or a wrapped object,
/// depending on server version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ItemsResponse {
    Wrapped { items: Vec<ReturnItem> },
    Bare(Vec<ReturnItem>),
}

impl ItemsResponse {
    pub(crate) fn into_items(self) -> Vec<ReturnItem> {
        match self {
            Self::Wrapped { items } => items,
            Self::Bare(items) => items,
        }
    }
}

/// One month of routing percentages from the stats endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct TrendRecord {
    /// Month key in `YYYY-MM` form.
    pub(crate) month: String,
    #[serde(rename = "Recycle_percent", default)]
    pub(crate) recycle_percent: f64,
    #[serde(rename = "Donate_percent", default)]
    pub(crate) donate_percent: f64,
    #[serde(rename = "Resell_percent", default)]
    pub(crate) resell_percent: f64,
}

/// Response of the stats endpoint. Only the monthly series is used here.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatsResponse {
    #[serde(default)]
    pub(crate) chart_data: Vec<TrendRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_parse_from_a_bare_array() {
        let body = r#"[{"id":"r1","score":82,"status":"Recycled","date":"2025-06-02",
            "composition":{"cotton":60.0,"polyester":40.0}}]"#;
        let items: ItemsResponse = serde_json::from_str(body).unwrap();
        let items = items.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "r1");
        assert_eq!(items[0].composition["cotton"], 60.0);
        assert_eq!(items[0].batch_no, None);
    }

    #[test]
    fn items_parse_from_a_wrapped_object() {
        let body = r#"{"items":[{"id":"r2","score":40,"status":"Donated","date":"2025-06-03",
            "batch_no":"B-7"}]}"#;
        let items: ItemsResponse = serde_json::from_str(body).unwrap();
        let items = items.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].batch_no.as_deref(), Some("B-7"));
    }

    #[test]
    fn missing_item_fields_fall_back_to_defaults() {
        let body = r#"[{"id":"r3"}]"#;
        let items: ItemsResponse = serde_json::from_str(body).unwrap();
        let item = &items.into_items()[0];
        assert_eq!(item.score, 0.0);
        assert_eq!(item.status, "");
        assert!(item.composition.is_empty());
    }

    #[test]
    fn dominant_material_is_the_largest_share() {
        let body = r#"[{"id":"r4","composition":{"cotton":55.0,"polyester":45.0}}]"#;
        let items: ItemsResponse = serde_json::from_str(body).unwrap();
        let item = &items.into_items()[0];
        assert_eq!(item.dominant_material(), Some(("cotton", 55.0)));

        let empty: ReturnItem = serde_json::from_str(r#"{"id":"r5"}"#).unwrap();
        assert_eq!(empty.dominant_material(), None);
    }

    #[test]
    fn stats_parse_monthly_percentages() {
        let body = r#"{"counts":{"Recycle":3,"Donate":1},
            "chart_data":[{"month":"2025-05","Recycle_percent":75.0,
                           "Donate_percent":25.0,"Resell_percent":0.0}]}"#;
        let stats: StatsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(stats.chart_data.len(), 1);
        assert_eq!(stats.chart_data[0].month, "2025-05");
        assert_eq!(stats.chart_data[0].recycle_percent, 75.0);
    }

    #[test]
    fn stats_without_chart_data_are_empty() {
        let stats: StatsResponse = serde_json::from_str("{}").unwrap();
        assert!(stats.chart_data.is_empty());
    }
}
