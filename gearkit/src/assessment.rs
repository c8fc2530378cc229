// Derived metrics for the predictive maintenance panels.

use crate::types::{ComponentRecord, ComponentStatus, MaintenanceEvent, RiskFactor};

pub const REPLACEMENT_WEAR_LEVEL: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            RiskBand::High
        } else if score >= 60 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Medium => "MEDIUM",
            RiskBand::High => "HIGH",
        }
    }
}

/// Coloring of a current/threshold gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeTone {
    Nominal,
    Warning,
    Critical,
}

impl GaugeTone {
    pub fn from_ratio(current: f64, threshold: f64) -> Self {
        if threshold <= 0.0 {
            return GaugeTone::Nominal;
        }
        let ratio = current / threshold;
        if ratio >= 1.0 {
            GaugeTone::Critical
        } else if ratio >= 0.8 {
            GaugeTone::Warning
        } else {
            GaugeTone::Nominal
        }
    }
}

/// Coloring band for a component wear level. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WearBand {
    Nominal,
    Moderate,
    Elevated,
    Critical,
}

impl WearBand {
    pub fn from_wear(wear_level: u8) -> Self {
        match wear_level {
            90.. => WearBand::Critical,
            70..=89 => WearBand::Elevated,
            40..=69 => WearBand::Moderate,
            _ => WearBand::Nominal,
        }
    }
}

/// current / threshold * 100, uncapped. A non-positive threshold yields 0.
pub fn factor_ratio(factor: &RiskFactor) -> f64 {
    if factor.threshold <= 0.0 {
        return 0.0;
    }
    factor.current / factor.threshold * 100.0
}

pub fn is_over_threshold(factor: &RiskFactor) -> bool {
    factor_ratio(factor) > 100.0
}

/// Mean of the per-factor ratios, rounded half away from zero.
pub fn overall_risk(factors: &[RiskFactor]) -> u32 {
    if factors.is_empty() {
        return 0;
    }
    let sum: f64 = factors.iter().map(factor_ratio).sum();
    (sum / factors.len() as f64).round().max(0.0) as u32
}

pub fn needs_replacement(component: &ComponentRecord) -> bool {
    component.wear_level >= REPLACEMENT_WEAR_LEVEL
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentSummary {
    pub critical: usize,
    pub monitor: usize,
    /// Good and excellent components together.
    pub good: usize,
}

pub fn summarize_components(components: &[ComponentRecord]) -> ComponentSummary {
    components
        .iter()
        .fold(ComponentSummary::default(), |mut summary, c| {
            match c.status {
                ComponentStatus::Critical => summary.critical += 1,
                ComponentStatus::Monitor => summary.monitor += 1,
                ComponentStatus::Good | ComponentStatus::Excellent => summary.good += 1,
            }
            summary
        })
}

/// Sum of estimated costs for events due within `horizon_days` (inclusive).
pub fn maintenance_cost_within(events: &[MaintenanceEvent], horizon_days: u32) -> u64 {
    events
        .iter()
        .filter(|e| e.days_until <= horizon_days)
        .map(|e| e.estimated_cost as u64)
        .sum()
}

/// Signed percentage with one decimal, e.g. `+1.7%` or `-2.0%`.
pub fn format_change(change_percent: f64) -> String {
    if change_percent > 0.0 {
        format!("+{:.1}%", change_percent)
    } else {
        format!("{:.1}%", change_percent)
    }
}

/// Thousands separators for currency figures.
pub fn format_cost(amount: u64) -> String {
    let s = amount.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    format!("${}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::{Severity, Trend};

    fn factor(current: f64, threshold: f64) -> RiskFactor {
        RiskFactor {
            category: "test".to_string(),
            current,
            threshold,
            trend: Trend::Stable,
            severity: Severity::Low,
            description: String::new(),
        }
    }

    #[test]
    fn test_overall_risk_of_catalog_factors() {
        let factors = vec![
            factor(78.0, 85.0),
            factor(65.0, 75.0),
            factor(92.0, 90.0),
            factor(68.0, 80.0),
        ];
        assert_eq!(overall_risk(&factors), 91);
        assert_eq!(overall_risk(&catalog::risk_factors()), 91);
        assert_eq!(RiskBand::from_score(91), RiskBand::High);
    }

    #[test]
    fn test_overall_risk_rounds_half_up() {
        // 150 and 25 average to 87.5
        let factors = vec![factor(3.0, 2.0), factor(1.0, 4.0)];
        assert_eq!(overall_risk(&factors), 88);
        assert_eq!(overall_risk(&[]), 0);
    }

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(RiskBand::from_score(59), RiskBand::Low);
        assert_eq!(RiskBand::from_score(60), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(79), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(80), RiskBand::High);
    }

    #[test]
    fn test_factor_ratio_is_uncapped() {
        let load = factor(92.0, 90.0);
        assert!(factor_ratio(&load) > 102.0);
        assert!(is_over_threshold(&load));
        assert!(!is_over_threshold(&factor(90.0, 90.0)));
        assert_eq!(factor_ratio(&factor(10.0, 0.0)), 0.0);
    }

    #[test]
    fn test_gauge_tone() {
        assert_eq!(GaugeTone::from_ratio(92.0, 90.0), GaugeTone::Critical);
        assert_eq!(GaugeTone::from_ratio(80.0, 100.0), GaugeTone::Warning);
        assert_eq!(GaugeTone::from_ratio(79.0, 100.0), GaugeTone::Nominal);
    }

    #[test]
    fn test_wear_band_boundaries() {
        let levels = [39, 40, 69, 70, 89, 90];
        let bands: Vec<WearBand> = levels.iter().map(|w| WearBand::from_wear(*w)).collect();
        assert_eq!(
            bands,
            vec![
                WearBand::Nominal,
                WearBand::Moderate,
                WearBand::Moderate,
                WearBand::Elevated,
                WearBand::Elevated,
                WearBand::Critical,
            ]
        );
        assert_eq!(WearBand::from_wear(100), WearBand::Critical);
        assert_eq!(WearBand::from_wear(0), WearBand::Nominal);
    }

    #[test]
    fn test_component_summary() {
        let components = catalog::components();
        let summary = summarize_components(&components);
        assert_eq!(summary, ComponentSummary { critical: 1, monitor: 2, good: 2 });

        let urgent: Vec<&str> = components
            .iter()
            .filter(|c| needs_replacement(c))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(urgent, vec!["Output Shaft Coupling"]);
    }

    #[test]
    fn test_maintenance_cost_horizon() {
        let events = catalog::maintenance_events();
        assert_eq!(maintenance_cost_within(&events, 180), 3600);
        assert_eq!(maintenance_cost_within(&events, 28), 800);
        assert_eq!(maintenance_cost_within(&events, 0), 0);
        assert_eq!(format_cost(3600), "$3,600");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(1.67), "+1.7%");
        assert_eq!(format_change(-2.0), "-2.0%");
        assert_eq!(format_change(0.0), "0.0%");
    }
}
