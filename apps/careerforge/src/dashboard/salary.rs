//! Salary insights: canned market figures with the band for the user's career stage highlighted.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryBand {
    pub level: &'static str,
    pub min: u32,
    pub median: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInsights {
    pub estimated_base: u32,
    pub market_average: u32,
    pub target: u32,
    pub bands: Vec<SalaryBand>,
    /// Band matching the derived career stage, once a profile exists.
    pub current_band: Option<&'static str>,
}

const BANDS: [(&str, u32, u32, u32); 4] = [
    ("Entry", 60_000, 70_000, 80_000),
    ("Mid", 75_000, 85_000, 95_000),
    ("Senior", 95_000, 110_000, 130_000),
    ("Lead", 120_000, 140_000, 160_000),
];

fn band_for_stage(stage: &str) -> Option<&'static str> {
    let stage = stage.to_lowercase();
    if stage.contains("early") || stage.contains("entry") || stage.contains("junior") {
        Some("Entry")
    } else if stage.contains("mid") {
        Some("Mid")
    } else if stage.contains("senior") {
        Some("Senior")
    } else if stage.contains("principal") || stage.contains("lead") || stage.contains("staff") {
        Some("Lead")
    } else {
        None
    }
}

pub fn salary_insights(career_stage: Option<&str>) -> SalaryInsights {
    SalaryInsights {
        estimated_base: 85_000,
        market_average: 95_000,
        target: 110_000,
        bands: BANDS
            .iter()
            .map(|&(level, min, median, max)| SalaryBand {
                level,
                min,
                median,
                max,
            })
            .collect(),
        current_band: career_stage.and_then(band_for_stage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_figures() {
        let insights = salary_insights(None);
        assert_eq!(
            (insights.estimated_base, insights.market_average, insights.target),
            (85_000, 95_000, 110_000)
        );
        assert_eq!(insights.bands.len(), 4);
        assert_eq!(
            insights.bands[2],
            SalaryBand { level: "Senior", min: 95_000, median: 110_000, max: 130_000 }
        );
        assert!(insights.current_band.is_none());
    }

    #[test]
    fn test_stage_selects_band() {
        assert_eq!(salary_insights(Some("Mid-Level")).current_band, Some("Mid"));
        assert_eq!(salary_insights(Some("Principal")).current_band, Some("Lead"));
        assert_eq!(salary_insights(Some("Early Career")).current_band, Some("Entry"));
        assert_eq!(salary_insights(Some("Wanderer")).current_band, None);
    }
}
