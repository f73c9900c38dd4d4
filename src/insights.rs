use serde::Serialize;

use crate::model::StressLevel;

pub const SURVEYED_STUDENTS: usize = 2000;

const LEVEL_COUNTS: [(StressLevel, usize); 3] = [
    (StressLevel::Low, 485),
    (StressLevel::Moderate, 485),
    (StressLevel::High, 1030),
];

const FACTOR_CORRELATIONS: [(&str, f64); 5] = [
    ("Study hours", 0.72),
    ("Sleep hours", -0.58),
    ("GPA", 0.45),
    ("Physical activity", -0.41),
    ("Social activity", -0.33),
];

const FEATURE_IMPORTANCE: [(&str, f64, &str); 5] = [
    ("Study hours", 0.28, "Most influential factor"),
    ("Sleep hours", 0.24, "Essential for recovery"),
    ("GPA", 0.19, "Academic pressure"),
    ("Physical activity", 0.16, "Natural stress reliever"),
    ("Social activity", 0.13, "Social support"),
];

const MODEL_ALGORITHM: &str = "Random Forest Classifier";
const MODEL_ACCURACY: f64 = 0.873;
const CROSS_VALIDATION_FOLDS: usize = 5;

/// Share of students reporting each headline fact, out of 100.
const HEADLINE_FACTS: [(usize, &str); 3] = [
    (75, "report academic stress in the last six months"),
    (60, "experience sleep disruption from academic and social pressure"),
    (45, "feel they lack enough support to cope with stress"),
];

const GPA_BANDS: [&str; 4] = ["2.0-2.5", "2.5-3.0", "3.0-3.5", "3.5-4.0"];

const GPA_BAND_COUNTS: [(StressLevel, [usize; 4]); 3] = [
    (StressLevel::Low, [21, 223, 52, 1]),
    (StressLevel::Moderate, [18, 307, 352, 5]),
    (StressLevel::High, [6, 167, 658, 198]),
];

#[derive(Serialize, Clone, Debug)]
pub struct DataInsights {
    pub total_students: usize,
    pub distribution: Vec<LevelShare>,
    pub correlations: Vec<FactorCorrelation>,
    pub gpa_by_level: Vec<GpaBreakdown>,
    pub feature_importance: Vec<FeatureImportance>,
    pub model_summary: ModelSummary,
    pub headline_facts: Vec<HeadlineFact>,
    pub key_findings: Vec<String>,
    pub chart_data: InsightChartData,
}

#[derive(Serialize, Clone, Debug)]
pub struct LevelShare {
    pub level: StressLevel,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct FactorCorrelation {
    pub factor: String,
    pub correlation: f64,
    pub impact: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct GpaBreakdown {
    pub level: StressLevel,
    pub bands: Vec<GpaBand>,
    pub total: usize,
    pub dominant_band: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct GpaBand {
    pub range: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct FeatureImportance {
    pub factor: String,
    pub importance: f64,
    pub percentage: f64,
    pub description: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct ModelSummary {
    pub algorithm: String,
    pub accuracy: f64,
    pub accuracy_percentage: f64,
    pub training_samples: usize,
    pub cross_validation_folds: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct HeadlineFact {
    pub percentage: f64,
    pub statement: String,
}

// Chart data structures
#[derive(Serialize, Clone, Debug)]
pub struct InsightChartData {
    pub levels: Vec<String>,
    pub level_percentages: Vec<f64>,
    pub factors: Vec<String>,
    pub correlations: Vec<f64>,
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    fraction_percentage(part as f64 / whole as f64)
}

/// Converts a fraction to a percentage rounded to two decimals.
fn fraction_percentage(fraction: f64) -> f64 {
    (fraction * 10_000.0).round() / 100.0
}

/// Describes a correlation coefficient the way the insight cards do.
pub fn correlation_impact(correlation: f64) -> String {
    let direction = if correlation >= 0.0 { "Positive" } else { "Negative" };
    let strength = match correlation.abs() {
        r if r >= 0.6 => "strong",
        r if r >= 0.4 => "moderate",
        _ => "weak",
    };
    format!("{} {}", direction, strength)
}

pub struct InsightsBuilder;

impl InsightsBuilder {
    pub fn new() -> Self {
        InsightsBuilder
    }

    pub fn build(&self) -> DataInsights {
        let distribution = self.distribution();
        let correlations = self.correlations();
        let gpa_by_level = self.gpa_by_level();
        let feature_importance = self.feature_importance();
        let key_findings = self.key_findings(&distribution, &gpa_by_level);
        let chart_data = self.chart_data(&distribution, &correlations);

        DataInsights {
            total_students: SURVEYED_STUDENTS,
            distribution,
            correlations,
            gpa_by_level,
            feature_importance,
            model_summary: self.model_summary(),
            headline_facts: self.headline_facts(),
            key_findings,
            chart_data,
        }
    }

    fn distribution(&self) -> Vec<LevelShare> {
        LEVEL_COUNTS
            .iter()
            .map(|&(level, count)| LevelShare {
                level,
                count,
                percentage: percentage(count, SURVEYED_STUDENTS),
            })
            .collect()
    }

    fn correlations(&self) -> Vec<FactorCorrelation> {
        FACTOR_CORRELATIONS
            .iter()
            .map(|&(factor, correlation)| FactorCorrelation {
                factor: factor.to_string(),
                correlation,
                impact: correlation_impact(correlation),
            })
            .collect()
    }

    fn feature_importance(&self) -> Vec<FeatureImportance> {
        FEATURE_IMPORTANCE
            .iter()
            .map(|&(factor, importance, description)| FeatureImportance {
                factor: factor.to_string(),
                importance,
                percentage: fraction_percentage(importance),
                description: description.to_string(),
            })
            .collect()
    }

    fn model_summary(&self) -> ModelSummary {
        ModelSummary {
            algorithm: MODEL_ALGORITHM.to_string(),
            accuracy: MODEL_ACCURACY,
            accuracy_percentage: fraction_percentage(MODEL_ACCURACY),
            training_samples: SURVEYED_STUDENTS,
            cross_validation_folds: CROSS_VALIDATION_FOLDS,
        }
    }

    fn headline_facts(&self) -> Vec<HeadlineFact> {
        HEADLINE_FACTS
            .iter()
            .map(|&(share, statement)| HeadlineFact {
                percentage: percentage(share, 100),
                statement: statement.to_string(),
            })
            .collect()
    }

    fn gpa_by_level(&self) -> Vec<GpaBreakdown> {
        GPA_BAND_COUNTS
            .iter()
            .map(|&(level, counts)| {
                let total: usize = counts.iter().sum();
                let bands: Vec<GpaBand> = GPA_BANDS
                    .iter()
                    .zip(counts.iter())
                    .map(|(range, &count)| GpaBand {
                        range: range.to_string(),
                        count,
                        percentage: percentage(count, total),
                    })
                    .collect();
                let dominant_band = bands
                    .iter()
                    .max_by_key(|band| band.count)
                    .map(|band| band.range.clone())
                    .unwrap_or_default();

                GpaBreakdown {
                    level,
                    bands,
                    total,
                    dominant_band,
                }
            })
            .collect()
    }

    fn key_findings(&self, distribution: &[LevelShare], gpa_by_level: &[GpaBreakdown]) -> Vec<String> {
        let mut findings = Vec::new();

        if let Some(high) = distribution.iter().find(|share| share.level == StressLevel::High) {
            findings.push(format!(
                "{:.1}% of {} surveyed students report high stress",
                high.percentage, SURVEYED_STUDENTS
            ));
        }

        for breakdown in gpa_by_level {
            if let Some(band) = breakdown.bands.iter().find(|b| b.range == breakdown.dominant_band) {
                findings.push(format!(
                    "{} stress: {:.1}% of students hold a GPA of {}",
                    breakdown.level, band.percentage, band.range
                ));
            }
        }

        findings
    }

    fn chart_data(&self, distribution: &[LevelShare], correlations: &[FactorCorrelation]) -> InsightChartData {
        InsightChartData {
            levels: distribution.iter().map(|s| s.level.to_string()).collect(),
            level_percentages: distribution.iter().map(|s| s.percentage).collect(),
            factors: correlations.iter().map(|c| c.factor.clone()).collect(),
            correlations: correlations.iter().map(|c| c.correlation).collect(),
        }
    }
}

impl Default for InsightsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_matches_survey() {
        let insights = InsightsBuilder::new().build();
        let total: usize = insights.distribution.iter().map(|s| s.count).sum();
        assert_eq!(total, SURVEYED_STUDENTS);
        assert_eq!(insights.distribution[2].percentage, 51.5);
        assert_eq!(insights.distribution[0].percentage, 24.25);
    }

    #[test]
    fn test_correlation_labels() {
        assert_eq!(correlation_impact(0.72), "Positive strong");
        assert_eq!(correlation_impact(-0.58), "Negative moderate");
        assert_eq!(correlation_impact(-0.33), "Negative weak");
    }

    #[test]
    fn test_gpa_breakdown_totals() {
        let insights = InsightsBuilder::new().build();
        let totals: Vec<usize> = insights.gpa_by_level.iter().map(|b| b.total).collect();
        assert_eq!(totals, vec![297, 682, 1029]);
        assert_eq!(insights.gpa_by_level[0].dominant_band, "2.5-3.0");
        assert_eq!(insights.gpa_by_level[1].dominant_band, "3.0-3.5");
        assert_eq!(insights.gpa_by_level[1].bands[2].percentage, 51.61);
    }

    #[test]
    fn test_feature_importance_sums_to_whole() {
        let insights = InsightsBuilder::new().build();
        let factors: Vec<&str> = insights.feature_importance.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(factors, vec!["Study hours", "Sleep hours", "GPA", "Physical activity", "Social activity"]);
        assert_eq!(insights.feature_importance[0].percentage, 28.0);
        assert_eq!(insights.feature_importance[4].percentage, 13.0);
        let total: f64 = insights.feature_importance.iter().map(|f| f.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_model_summary_and_headlines() {
        let insights = InsightsBuilder::new().build();
        assert_eq!(insights.model_summary.accuracy_percentage, 87.3);
        assert_eq!(insights.model_summary.training_samples, 2000);
        assert_eq!(insights.model_summary.cross_validation_folds, 5);
        let shares: Vec<f64> = insights.headline_facts.iter().map(|f| f.percentage).collect();
        assert_eq!(shares, vec![75.0, 60.0, 45.0]);
    }

    #[test]
    fn test_chart_data_aligned() {
        let insights = InsightsBuilder::new().build();
        assert_eq!(insights.chart_data.levels, vec!["Low", "Moderate", "High"]);
        assert_eq!(insights.chart_data.factors.len(), insights.chart_data.correlations.len());
        assert_eq!(insights.key_findings.len(), 4);
    }
}
