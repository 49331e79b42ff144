//! Sample records exchanged between the feed service and the chart.

use serde::{Deserialize, Serialize};

/// Metabolite class attached to each generated point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Lipids")]
    Lipids,
    #[serde(rename = "Amino Acids")]
    AminoAcids,
    #[serde(rename = "Carbohydrates")]
    Carbohydrates,
    #[serde(rename = "Nucleotides")]
    Nucleotides,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Lipids,
        Category::AminoAcids,
        Category::Carbohydrates,
        Category::Nucleotides,
    ];

    /// Map a uniform draw in [0, 1) onto one of the four categories.
    pub fn from_unit(u: f64) -> Self {
        let idx = (u * Self::ALL.len() as f64).floor() as usize;
        Self::ALL[idx.min(Self::ALL.len() - 1)]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Lipids        => "Lipids",
            Category::AminoAcids    => "Amino Acids",
            Category::Carbohydrates => "Carbohydrates",
            Category::Nucleotides   => "Nucleotides",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic reading from the mock instrument.
///
/// Field names on the wire (`time`, `metabolites`) are the ones the chart reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
    #[serde(rename = "time")]
    pub sequence: u64,
    pub value: f64,
    #[serde(rename = "metabolites")]
    pub metabolite_count: u32,
    pub confidence: f64,
    pub category: Category,
}

/// A point as the chart plots it. Placeholder points synthesised while the
/// feed is unreachable use categories outside [`Category`], so the category
/// is kept as plain text here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: String,
    pub time: i64,
    pub value: f64,
    pub metabolites: u32,
    pub confidence: f64,
    pub category: String,
}

impl From<SamplePoint> for ChartPoint {
    fn from(p: SamplePoint) -> Self {
        Self {
            timestamp: p.timestamp,
            time: i64::try_from(p.sequence).unwrap_or(i64::MAX),
            value: p.value,
            metabolites: p.metabolite_count,
            confidence: p.confidence,
            category: p.category.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_from_unit_covers_all_buckets() {
        assert_eq!(Category::from_unit(0.0), Category::Lipids);
        assert_eq!(Category::from_unit(0.26), Category::AminoAcids);
        assert_eq!(Category::from_unit(0.5), Category::Carbohydrates);
        assert_eq!(Category::from_unit(0.99), Category::Nucleotides);
        // out-of-range draws stay in bounds
        assert_eq!(Category::from_unit(1.0), Category::Nucleotides);
    }

    #[test]
    fn test_sample_point_wire_names() {
        let point = SamplePoint {
            timestamp: "2024-05-14T09:30:00.000Z".into(),
            sequence: 7,
            value: 104.5,
            metabolite_count: 33,
            confidence: 0.8,
            category: Category::AminoAcids,
        };
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value, json!({
            "timestamp": "2024-05-14T09:30:00.000Z",
            "time": 7,
            "value": 104.5,
            "metabolites": 33,
            "confidence": 0.8,
            "category": "Amino Acids",
        }));
    }

    #[test]
    fn test_chart_point_from_sample() {
        let point = SamplePoint {
            timestamp: "t".into(),
            sequence: 3,
            value: 1.0,
            metabolite_count: 20,
            confidence: 0.7,
            category: Category::Nucleotides,
        };
        let chart = ChartPoint::from(point);
        assert_eq!(chart.time, 3);
        assert_eq!(chart.metabolites, 20);
        assert_eq!(chart.category, "Nucleotides");
    }
}
