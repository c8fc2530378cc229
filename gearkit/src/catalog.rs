// Hand-authored fixtures backing the dashboard panels.

use crate::types::{
    ComponentRecord, ComponentStatus, DegradationFactor, FaultFinding, FaultVerdict,
    HealthStatus, KpiMetric, KpiStatus, LoadSummary, MaintenanceEvent, MaintenanceKind,
    MaintenanceStatus, PerformanceSample, Priority, RiskFactor, SensorChannel, Severity,
    StatusItem, Trend,
};

fn status_item(
    title: &str,
    status: HealthStatus,
    value: &str,
    unit: &str,
    description: &str,
) -> StatusItem {
    StatusItem {
        title: title.to_string(),
        status,
        value: value.to_string(),
        unit: Some(unit.to_string()),
        description: Some(description.to_string()),
    }
}

/// Status tiles shown at the top of the dashboard view.
pub fn status_items() -> Vec<StatusItem> {
    vec![
        status_item("Overall Health", HealthStatus::Healthy, "98.5", "%", "All systems operational"),
        status_item("Vibration Level", HealthStatus::Healthy, "2.1", "mm/s RMS", "Within normal limits"),
        status_item("Load Condition", HealthStatus::Healthy, "75", "%", "Optimal operating range"),
        status_item("Temperature", HealthStatus::Warning, "65", "°C", "Slightly elevated"),
    ]
}

pub fn components() -> Vec<ComponentRecord> {
    let table = [
        ("Input Shaft Bearing", 75, "18 months", "4.5 months", ComponentStatus::Monitor, "2022-06-15"),
        ("Gear Teeth (Primary)", 45, "24 months", "13.2 months", ComponentStatus::Good, "2023-01-20"),
        ("Output Shaft Coupling", 92, "15 months", "1.2 months", ComponentStatus::Critical, "2023-03-10"),
        ("Lubrication System", 35, "36 months", "23.4 months", ComponentStatus::Excellent, "2023-05-01"),
        ("Seals & Gaskets", 68, "12 months", "3.8 months", ComponentStatus::Monitor, "2023-11-15"),
    ];

    table
        .iter()
        .map(|(name, wear, expected, remaining, status, replaced)| ComponentRecord {
            name: name.to_string(),
            wear_level: *wear,
            expected_life: expected.to_string(),
            remaining_life: remaining.to_string(),
            status: *status,
            last_replaced: replaced.to_string(),
        })
        .collect()
}

pub fn maintenance_events() -> Vec<MaintenanceEvent> {
    let table = [
        (MaintenanceKind::Routine, "Oil Change & Filter Replacement", 3, Priority::High, 450, "2 hours", MaintenanceStatus::Upcoming),
        (MaintenanceKind::Predictive, "Bearing Lubrication", 15, Priority::Medium, 200, "1 hour", MaintenanceStatus::Scheduled),
        (MaintenanceKind::Preventive, "Gear Teeth Inspection", 28, Priority::Low, 150, "30 minutes", MaintenanceStatus::Planned),
        (MaintenanceKind::ConditionBased, "Vibration Sensor Calibration", 45, Priority::Medium, 300, "1.5 hours", MaintenanceStatus::Scheduled),
        (MaintenanceKind::MajorOverhaul, "Complete Gearbox Overhaul", 120, Priority::Critical, 2500, "8 hours", MaintenanceStatus::Projected),
    ];

    table
        .iter()
        .enumerate()
        .map(|(i, (kind, title, days, priority, cost, duration, status))| MaintenanceEvent {
            id: i as u32 + 1,
            kind: *kind,
            title: title.to_string(),
            days_until: *days,
            priority: *priority,
            estimated_cost: *cost,
            duration: duration.to_string(),
            status: *status,
        })
        .collect()
}

pub fn risk_factors() -> Vec<RiskFactor> {
    let table = [
        ("Vibration Levels", 78.0, 85.0, Trend::Increasing, Severity::Medium, "Elevated but within acceptable range"),
        ("Temperature", 65.0, 75.0, Trend::Stable, Severity::Low, "Normal operating temperature"),
        ("Load Stress", 92.0, 90.0, Trend::Increasing, Severity::High, "Exceeding recommended load limits"),
        ("Component Age", 68.0, 80.0, Trend::Stable, Severity::Medium, "Components showing signs of wear"),
    ];

    table
        .iter()
        .map(|(category, current, threshold, trend, severity, description)| RiskFactor {
            category: category.to_string(),
            current: *current,
            threshold: *threshold,
            trend: *trend,
            severity: *severity,
            description: description.to_string(),
        })
        .collect()
}

pub fn kpis() -> Vec<KpiMetric> {
    let table = [
        ("Overall Efficiency", 96.5, 98.5, -2.0, Trend::Decreasing, "%", KpiStatus::Warning),
        ("Energy Consumption", 127.5, 120.0, 6.25, Trend::Increasing, "kW", KpiStatus::Warning),
        ("Output Torque", 385.0, 400.0, -3.75, Trend::Decreasing, "Nm", KpiStatus::Monitor),
        ("Operational Speed", 1475.0, 1500.0, -1.67, Trend::Decreasing, "RPM", KpiStatus::Monitor),
    ];

    table
        .iter()
        .map(|(metric, current, baseline, change, trend, unit, status)| KpiMetric {
            metric: metric.to_string(),
            current: *current,
            baseline: *baseline,
            change_percent: *change,
            trend: *trend,
            unit: unit.to_string(),
            status: *status,
        })
        .collect()
}

/// Six months of performance samples, oldest first.
pub fn performance_history() -> Vec<PerformanceSample> {
    let table = [
        ("Jan", 98.5, 2.1, 58.0, 72.0),
        ("Feb", 98.2, 2.3, 60.0, 75.0),
        ("Mar", 97.8, 2.5, 62.0, 78.0),
        ("Apr", 97.5, 2.8, 64.0, 80.0),
        ("May", 97.0, 3.1, 65.0, 82.0),
        ("Jun", 96.5, 3.4, 67.0, 85.0),
    ];

    table
        .iter()
        .map(|(month, efficiency, vibration, temperature, load)| PerformanceSample {
            month: month.to_string(),
            efficiency: *efficiency,
            vibration: *vibration,
            temperature: *temperature,
            load: *load,
        })
        .collect()
}

pub fn degradation_factors() -> Vec<DegradationFactor> {
    vec![
        DegradationFactor {
            name: "Mechanical Wear Impact".to_string(),
            impact: "-1.8% efficiency".to_string(),
            weight: 72,
            note: "Primary contributor to performance loss".to_string(),
        },
        DegradationFactor {
            name: "Lubrication Degradation".to_string(),
            impact: "-0.8% efficiency".to_string(),
            weight: 45,
            note: "Moderate impact, increasing over time".to_string(),
        },
        DegradationFactor {
            name: "Thermal Effects".to_string(),
            impact: "-0.2% efficiency".to_string(),
            weight: 18,
            note: "Minor impact, well controlled".to_string(),
        },
    ]
}

pub fn fault_findings() -> Vec<FaultFinding> {
    [
        ("Tooth Damage", FaultVerdict::Healthy),
        ("Bearing Wear", FaultVerdict::Monitor),
        ("Misalignment", FaultVerdict::Detected),
        ("Oil Quality", FaultVerdict::Optimal),
    ]
    .iter()
    .map(|(check, verdict)| FaultFinding {
        check: check.to_string(),
        verdict: *verdict,
    })
    .collect()
}

pub fn load_summary() -> LoadSummary {
    LoadSummary {
        current_percent: 75.0,
        peak_24h_percent: 89.0,
        average_24h_percent: 62.0,
        efficiency_percent: 96.5,
    }
}

pub fn sensor_channels() -> Vec<SensorChannel> {
    [("Sensor 1", "X-Axis"), ("Sensor 2", "Y-Axis"), ("Sensor 3", "Z-Axis"), ("Sensor 4", "Axial")]
        .iter()
        .map(|(label, axis)| SensorChannel {
            label: label.to_string(),
            axis: axis.to_string(),
        })
        .collect()
}

pub const RISK_RECOMMENDATIONS: [&str; 4] = [
    "Reduce operating load to below 90% capacity",
    "Schedule bearing inspection within 7 days",
    "Monitor temperature sensors more frequently",
    "Consider early maintenance intervention",
];

pub const MAINTENANCE_WINDOW: [(&str, &str); 3] = [
    ("Critical", "Output Shaft Coupling - Replace within 1-2 months"),
    ("Monitor", "Input Shaft Bearing - Inspect monthly"),
    ("Scheduled", "Seals & Gaskets - Plan replacement in 3-4 months"),
];

pub const PERFORMANCE_FORECAST: [(&str, &str); 3] = [
    ("3 Months", "Efficiency may drop to 95.2% without intervention"),
    ("6 Months", "Critical threshold (94%) likely reached"),
    ("Recommendation", "Schedule maintenance within 60 days"),
];

pub const SUPPORTED_FORMATS: [&str; 3] = [
    "CSV files with sensor data columns",
    "Excel files (.xlsx) with structured data",
    "JSON files with time-series data",
];

pub const DATASET_REQUIREMENTS: [&str; 3] = [
    "4 sensor channels (X, Y, Z, Axial directions)",
    "Load conditions from 0% to 90%",
    "Healthy and faulty condition labels",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes() {
        assert_eq!(status_items().len(), 4);
        assert_eq!(sensor_channels().len(), 4);
        assert_eq!(performance_history().len(), 6);

        let ids: Vec<u32> = maintenance_events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_wear_levels_within_range() {
        assert!(components().iter().all(|c| c.wear_level <= 100));
    }
}
