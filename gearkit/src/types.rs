use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Critical => "CRITICAL",
        }
    }
}

/// A dashboard status tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusItem {
    pub title: String,
    pub status: HealthStatus,
    pub value: String,
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Excellent,
    Good,
    Monitor,
    Critical,
}

impl ComponentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentStatus::Excellent => "EXCELLENT",
            ComponentStatus::Good => "GOOD",
            ComponentStatus::Monitor => "MONITOR",
            ComponentStatus::Critical => "CRITICAL",
        }
    }
}

/// Wear record for a single gearbox component.
///
/// `status` is authored independently of `wear_level`; nothing derives one
/// from the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub wear_level: u8,
    pub expected_life: String,
    pub remaining_life: String,
    pub status: ComponentStatus,
    pub last_replaced: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceKind {
    Routine,
    Predictive,
    Preventive,
    ConditionBased,
    MajorOverhaul,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Upcoming,
    Scheduled,
    Planned,
    Projected,
}

impl MaintenanceStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            MaintenanceStatus::Upcoming => "!",
            MaintenanceStatus::Scheduled => "#",
            MaintenanceStatus::Planned => "~",
            MaintenanceStatus::Projected => "*",
        }
    }
}

/// A scheduled maintenance action. `days_until` is a literal, not computed
/// from a clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    pub id: u32,
    pub kind: MaintenanceKind,
    pub title: String,
    pub days_until: u32,
    pub priority: Priority,
    pub estimated_cost: u32,
    pub duration: String,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Increasing => "↗",
            Trend::Decreasing => "↘",
            Trend::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: String,
    pub current: f64,
    pub threshold: f64,
    pub trend: Trend,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Good,
    Monitor,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub metric: String,
    pub current: f64,
    pub baseline: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub unit: String,
    pub status: KpiStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    pub month: String,
    pub efficiency: f64,
    pub vibration: f64,
    pub temperature: f64,
    pub load: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationFactor {
    pub name: String,
    pub impact: String,
    pub weight: u16,
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultVerdict {
    Healthy,
    Monitor,
    Detected,
    Optimal,
}

impl FaultVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            FaultVerdict::Healthy => "HEALTHY",
            FaultVerdict::Monitor => "MONITOR",
            FaultVerdict::Detected => "DETECTED",
            FaultVerdict::Optimal => "OPTIMAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultFinding {
    pub check: String,
    pub verdict: FaultVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub current_percent: f64,
    pub peak_24h_percent: f64,
    pub average_24h_percent: f64,
    pub efficiency_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorChannel {
    pub label: String,
    pub axis: String,
}

/// Per-subset summary attached to a fabricated analysis verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsetSummary {
    pub files: usize,
    pub avg_vibration: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub healthy: SubsetSummary,
    pub faulty: SubsetSummary,
    pub total_files: usize,
}

/// Payload handed to the parent view once an analysis completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub total_files: usize,
    pub healthy_files: usize,
    pub faulty_files: usize,
    pub sensors: u8,
    pub analysis_results: AnalysisResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationVariant {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}
