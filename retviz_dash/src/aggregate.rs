// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification of returned items into routing categories.

use peniko::Color;

use crate::model::ReturnItem;

/// Routing category of a returned item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Category {
    Resell,
    Recycle,
    Donate,
    RoutedAway,
}

impl Category {
    /// All categories, in classification order.
    pub(crate) const ALL: [Self; 4] = [Self::Resell, Self::Recycle, Self::Donate, Self::RoutedAway];

    /// Display name, as shown in legends and summaries.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Resell => "Resell",
            Self::Recycle => "Recycle",
            Self::Donate => "Donate",
            Self::RoutedAway => "Routed Away",
        }
    }

    /// Category accent color.
    pub(crate) fn color(self) -> Color {
        match self {
            Self::Resell => Color::from_rgb8(0x3B, 0x82, 0xF6),
            Self::Recycle => Color::from_rgb8(0x10, 0xB9, 0x81),
            Self::Donate => Color::from_rgb8(0x8B, 0x5C, 0xF6),
            Self::RoutedAway => Color::from_rgb8(0xF5, 0x9E, 0x0B),
        }
    }
}

/// Classifies a free-form status string into a category.
///
/// Matching is case-insensitive substring search, and the rules are ordered:
/// a status naming several routes resolves to the first match, so
/// `"recycle-resell"` is a resell.
pub(crate) fn classify(status: &str) -> Category {
    let status = status.to_lowercase();
    if status.contains("resell") {
        Category::Resell
    } else if status.contains("recycle") {
        Category::Recycle
    } else if status.contains("donate") {
        Category::Donate
    } else {
        Category::RoutedAway
    }
}

/// Per-category item counts. Every item lands in exactly one bucket, so the
/// four counts always sum back to the item total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CategoryCounts {
    pub(crate) resell: usize,
    pub(crate) recycle: usize,
    pub(crate) donate: usize,
    pub(crate) routed_away: usize,
}

impl CategoryCounts {
    pub(crate) fn tally(items: &[ReturnItem]) -> Self {
        let mut counts = Self::default();
        for item in items {
            match classify(&item.status) {
                Category::Resell => counts.resell += 1,
                Category::Recycle => counts.recycle += 1,
                Category::Donate => counts.donate += 1,
                Category::RoutedAway => counts.routed_away += 1,
            }
        }
        counts
    }

    pub(crate) fn get(&self, category: Category) -> usize {
        match category {
            Category::Resell => self.resell,
            Category::Recycle => self.recycle,
            Category::Donate => self.donate,
            Category::RoutedAway => self.routed_away,
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.resell + self.recycle + self.donate + self.routed_away
    }

    /// Integer percentage of `category`, rounded to the nearest point.
    /// An empty tally reports zero for every category.
    pub(crate) fn percent(&self, category: Category) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "a rounded percentage fits in u32"
        )]
        let pct = (self.get(category) as f64 / total as f64 * 100.0).round() as u32;
        pct
    }
}

/// One category's share of the item pool, ready for a legend or summary row.
#[derive(Clone, Debug)]
pub(crate) struct CategoryPoint {
    pub(crate) name: &'static str,
    pub(crate) count: usize,
    pub(crate) percent: u32,
    pub(crate) color: Color,
}

/// Builds legend-ready points for all four categories, in a fixed order.
pub(crate) fn category_points(counts: &CategoryCounts) -> Vec<CategoryPoint> {
    Category::ALL
        .iter()
        .map(|&c| CategoryPoint {
            name: c.name(),
            count: counts.get(c),
            percent: counts.percent(c),
            color: c.color(),
        })
        .collect()
}

/// Mean sustainability score over `items`, rounded to the nearest point.
/// Empty input scores zero.
pub(crate) fn mean_score(items: &[ReturnItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sum: f64 = items.iter().map(|i| i.score.clamp(0.0, 100.0)).sum();
    (sum / items.len() as f64).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: &str, score: f64) -> ReturnItem {
        serde_json::from_value(serde_json::json!({
            "id": "t",
            "status": status,
            "score": score,
        }))
        .unwrap()
    }

    #[test]
    fn classification_rules_apply_in_order() {
        assert_eq!(classify("Resold"), Category::RoutedAway);
        assert_eq!(classify("Resell pending"), Category::Resell);
        assert_eq!(classify("recycle-resell"), Category::Resell);
        assert_eq!(classify("RECYCLED"), Category::Recycle);
        assert_eq!(classify("donated to charity"), Category::Donate);
        assert_eq!(classify("landfill"), Category::RoutedAway);
        assert_eq!(classify(""), Category::RoutedAway);
    }

    #[test]
    fn counts_sum_to_the_item_total() {
        let items: Vec<_> = ["Recycled", "Donated", "Resell", "Broken", "recycle-resell"]
            .iter()
            .map(|s| item(s, 50.0))
            .collect();
        let counts = CategoryCounts::tally(&items);
        assert_eq!(counts.total(), items.len());
        assert_eq!(counts.resell, 2);
        assert_eq!(counts.recycle, 1);
        assert_eq!(counts.donate, 1);
        assert_eq!(counts.routed_away, 1);
    }

    #[test]
    fn four_distinct_categories_split_evenly() {
        let items: Vec<_> = ["Recycled", "Donated", "Resell", "Broken"]
            .iter()
            .map(|s| item(s, 50.0))
            .collect();
        let counts = CategoryCounts::tally(&items);
        for category in Category::ALL {
            assert_eq!(counts.percent(category), 25);
        }
    }

    #[test]
    fn thirds_round_to_whole_points() {
        let items: Vec<_> = ["Recycled", "Donated", "Resell"]
            .iter()
            .map(|s| item(s, 50.0))
            .collect();
        let counts = CategoryCounts::tally(&items);
        assert_eq!(counts.percent(Category::Recycle), 33);
    }

    #[test]
    fn empty_tally_reports_zero_percent() {
        let counts = CategoryCounts::tally(&[]);
        for category in Category::ALL {
            assert_eq!(counts.percent(category), 0);
        }
    }

    #[test]
    fn category_points_carry_the_palette() {
        let counts = CategoryCounts::tally(&[item("Resell", 80.0)]);
        let points = category_points(&counts);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].name, "Resell");
        assert_eq!(points[0].percent, 100);
        assert_eq!(points[0].color, Color::from_rgb8(0x3B, 0x82, 0xF6));
    }

    #[test]
    fn mean_score_rounds_and_handles_empty_input() {
        assert_eq!(mean_score(&[]), 0.0);
        let items = vec![item("Recycled", 70.0), item("Donated", 75.0)];
        assert_eq!(mean_score(&items), 73.0);
    }
}
