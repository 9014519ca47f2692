//! Column Schema Module
//! Column names of the Busan Port Authority annual volume file.

use serde::{Deserialize, Serialize};

/// Year column
pub const YEAR_COL: &str = "년도";
/// Port category column (북항, 신항, ...)
pub const PORT_COL: &str = "항구분";
/// Suffix appended to a source column name for its 10,000-ton sibling
pub const DERIVED_SUFFIX: &str = "_만톤";
/// Tons per display unit
pub const TONS_PER_UNIT: f64 = 10_000.0;

/// Numeric volume columns, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeField {
    Total,
    ForeignSubtotal,
    ForeignInbound,
    ForeignOutbound,
    TransshipInbound,
    TransshipOutbound,
    Coastal,
}

impl VolumeField {
    pub const ALL: [VolumeField; 7] = [
        VolumeField::Total,
        VolumeField::ForeignSubtotal,
        VolumeField::ForeignInbound,
        VolumeField::ForeignOutbound,
        VolumeField::TransshipInbound,
        VolumeField::TransshipOutbound,
        VolumeField::Coastal,
    ];

    /// Cargo composition categories (the five non-aggregate columns).
    pub const CATEGORIES: [VolumeField; 5] = [
        VolumeField::ForeignInbound,
        VolumeField::ForeignOutbound,
        VolumeField::TransshipInbound,
        VolumeField::TransshipOutbound,
        VolumeField::Coastal,
    ];

    /// Header of the column in the source file.
    pub fn source_column(self) -> &'static str {
        match self {
            VolumeField::Total => "총계",
            VolumeField::ForeignSubtotal => "외항소계",
            VolumeField::ForeignInbound => "외항입항",
            VolumeField::ForeignOutbound => "외항출항",
            VolumeField::TransshipInbound => "외항입항환적",
            VolumeField::TransshipOutbound => "외항출항환적",
            VolumeField::Coastal => "내항연안화물",
        }
    }

    /// Name of the derived 10,000-ton column.
    pub fn derived_column(self) -> String {
        format!("{}{}", self.source_column(), DERIVED_SUFFIX)
    }

    /// Short label used in charts.
    pub fn label(self) -> &'static str {
        match self {
            VolumeField::Total => "총계",
            VolumeField::ForeignSubtotal => "외항 소계",
            VolumeField::ForeignInbound => "외항 입항",
            VolumeField::ForeignOutbound => "외항 출항",
            VolumeField::TransshipInbound => "입항 환적",
            VolumeField::TransshipOutbound => "출항 환적",
            VolumeField::Coastal => "내항/연안",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_column_names() {
        assert_eq!(VolumeField::Total.derived_column(), "총계_만톤");
        assert_eq!(VolumeField::Coastal.derived_column(), "내항연안화물_만톤");
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, field) in VolumeField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }
}
