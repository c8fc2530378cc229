// services/gear-dash/src/state.rs
//
// Dashboard state management

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use gearkit::catalog;
use gearkit::config::DashboardConfig;
use gearkit::simulator::{AnalysisSimulator, Phase, SimEvent};
use gearkit::types::{
    AnalysisPayload, ComponentRecord, DegradationFactor, FaultFinding, KpiMetric, LoadSummary,
    MaintenanceEvent, Notification, PerformanceSample, RiskFactor, SensorChannel, StatusItem,
};
use gearkit::{FileSelection, GearError, VibrationSeries};
use tracing::{info, warn};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Predictive,
    Upload,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::Predictive, View::Upload];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Predictive => "AI Insights",
            View::Upload => "Data Upload",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Predictive => 1,
            View::Upload => 2,
        }
    }

    pub fn next(&self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn previous(&self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone)]
pub struct SensorReading {
    pub channel: SensorChannel,
    pub availability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub raised_at: Instant,
}

pub struct DashboardState {
    pub config: DashboardConfig,

    // Shell
    pub view: View,
    pub input_mode: InputMode,
    pub path_input: String,

    // Upload/analysis
    pub simulator: AnalysisSimulator,
    pub last_payload: Option<AnalysisPayload>,

    // Panels
    pub status_items: Vec<StatusItem>,
    pub components: Vec<ComponentRecord>,
    pub maintenance: Vec<MaintenanceEvent>,
    pub risk_factors: Vec<RiskFactor>,
    pub kpis: Vec<KpiMetric>,
    pub performance: Vec<PerformanceSample>,
    pub degradation: Vec<DegradationFactor>,
    pub findings: Vec<FaultFinding>,
    pub load: LoadSummary,
    pub sensors: Vec<SensorReading>,

    // Charts
    pub realtime_chart: Option<VibrationSeries>,
    pub spectrum_chart: Option<VibrationSeries>,

    // Feedback
    pub toasts: Vec<Toast>,
    pub activity_log: Vec<LogEntry>,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        let simulator = AnalysisSimulator::new(config.simulator.clone(), config.analysis.clone());
        let sensors = catalog::sensor_channels()
            .into_iter()
            .map(|channel| SensorReading {
                channel,
                availability: 100.0,
            })
            .collect();

        Self {
            config,
            view: View::Dashboard,
            input_mode: InputMode::Normal,
            path_input: String::new(),
            simulator,
            last_payload: None,
            status_items: catalog::status_items(),
            components: catalog::components(),
            maintenance: catalog::maintenance_events(),
            risk_factors: catalog::risk_factors(),
            kpis: catalog::kpis(),
            performance: catalog::performance_history(),
            degradation: catalog::degradation_factors(),
            findings: catalog::fault_findings(),
            load: catalog::load_summary(),
            sensors,
            realtime_chart: None,
            spectrum_chart: None,
            toasts: Vec::new(),
            activity_log: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.simulator.phase()
    }

    /// The upload input is disabled while a session is running.
    pub fn input_enabled(&self) -> bool {
        !self.simulator.is_busy()
    }

    pub fn select_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn begin_edit(&mut self) {
        if self.view != View::Upload {
            return;
        }
        if !self.input_enabled() {
            self.add_log(LogLevel::Warn, "Dataset input is disabled while an analysis is running");
            return;
        }
        self.input_mode = InputMode::Editing;
    }

    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn push_char(&mut self, c: char) {
        if self.input_mode == InputMode::Editing {
            self.path_input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.input_mode == InputMode::Editing {
            self.path_input.pop();
        }
    }

    /// Submit the whitespace-separated paths typed into the upload input.
    pub fn submit_input(&mut self, now: Instant) {
        self.input_mode = InputMode::Normal;
        let paths: Vec<PathBuf> = self.path_input.split_whitespace().map(PathBuf::from).collect();
        if paths.is_empty() {
            return;
        }
        self.select_paths(&paths, now);
    }

    pub fn select_paths(&mut self, paths: &[PathBuf], now: Instant) {
        match FileSelection::from_paths(paths, &self.config.dataset.accepted_extensions) {
            Ok(selection) => {
                let flagged: Vec<String> = selection
                    .unrecognized()
                    .map(|f| f.path.display().to_string())
                    .collect();
                for path in flagged {
                    self.add_log(LogLevel::Warn, &format!("{} is not a CSV, XLSX or JSON file", path));
                }
                self.start_analysis(selection, now);
            }
            Err(e) => {
                warn!("Rejected dataset selection: {}", e);
                self.add_log(LogLevel::Error, &e.to_string());
            }
        }
    }

    pub fn start_analysis(&mut self, selection: FileSelection, now: Instant) {
        let count = selection.len();
        match self.simulator.select(selection, now) {
            Ok(events) if events.is_empty() => {
                self.add_log(LogLevel::Warn, "Selection contained no files");
            }
            Ok(events) => {
                self.add_log(LogLevel::Info, &format!("Processing {} files...", count));
                self.apply_events(events, now);
            }
            Err(GearError::SessionBusy(phase)) => {
                self.add_log(LogLevel::Warn, &format!("Upload refused: analysis already {}", phase.to_lowercase()));
            }
            Err(e) => self.add_log(LogLevel::Error, &e.to_string()),
        }
    }

    /// Advance the simulator and expire stale notifications.
    pub fn tick(&mut self, now: Instant) {
        let events = self.simulator.advance(now);
        self.apply_events(events, now);

        let ttl = Duration::from_secs(self.config.ui.notification_secs);
        self.toasts.retain(|t| now.saturating_duration_since(t.raised_at) < ttl);
    }

    fn apply_events(&mut self, events: Vec<SimEvent>, now: Instant) {
        for event in events {
            match event {
                SimEvent::PhaseChanged { from, to } => {
                    let level = if to == Phase::Failed { LogLevel::Error } else { LogLevel::Info };
                    self.add_log(level, &format!("Phase {} -> {}", from, to));
                    if to == Phase::Analyzing {
                        self.add_log(LogLevel::Info, "Analyzing vibration patterns...");
                    }
                }
                SimEvent::Progress(_) => {}
                SimEvent::Notify(notification) => {
                    self.toasts.push(Toast {
                        notification,
                        raised_at: now,
                    });
                }
                SimEvent::Completed(payload) => self.on_analysis_complete(payload),
            }
        }
    }

    /// Completion handler: record the payload and return to the dashboard.
    fn on_analysis_complete(&mut self, payload: AnalysisPayload) {
        match serde_json::to_string(&payload) {
            Ok(json) => info!("Data uploaded: {}", json),
            Err(e) => warn!("Could not encode analysis payload: {}", e),
        }
        self.add_log(
            LogLevel::Info,
            &format!(
                "Analysis complete: {} healthy, {} faulty of {} files",
                payload.healthy_files, payload.faulty_files, payload.total_files
            ),
        );
        self.last_payload = Some(payload);
        self.select_view(View::Dashboard);
    }

    pub fn add_log(&mut self, level: LogLevel, message: &str) {
        self.activity_log.push(LogEntry {
            timestamp: Local::now(),
            level,
            message: message.to_string(),
        });

        if self.activity_log.len() > MAX_LOG_ENTRIES {
            self.activity_log.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Dashboard.next(), View::Predictive);
        assert_eq!(View::Upload.next(), View::Dashboard);
        assert_eq!(View::Dashboard.previous(), View::Upload);
    }

    #[test]
    fn test_completion_switches_to_dashboard() {
        let mut state = DashboardState::new(DashboardConfig::default());
        state.select_view(View::Upload);
        let t0 = Instant::now();

        state.start_analysis(FileSelection::synthetic(10), t0);
        assert_eq!(state.phase(), Phase::Uploading);
        assert!(!state.input_enabled());

        state.tick(t0 + ms(5_000));
        assert_eq!(state.phase(), Phase::Complete);
        assert_eq!(state.view, View::Dashboard);

        let payload = state.last_payload.as_ref().unwrap();
        assert_eq!((payload.healthy_files, payload.faulty_files), (6, 4));
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].notification.title, "Dataset Analysis Complete");

        // Toast expires after the configured display time.
        state.tick(t0 + ms(5_000) + Duration::from_secs(5));
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_input_disabled_while_busy() {
        let mut state = DashboardState::new(DashboardConfig::default());
        state.select_view(View::Upload);
        let t0 = Instant::now();
        state.start_analysis(FileSelection::synthetic(3), t0);

        state.begin_edit();
        assert_eq!(state.input_mode, InputMode::Normal);

        state.start_analysis(FileSelection::synthetic(5), t0 + ms(100));
        assert_eq!(state.simulator.session().unwrap().selection().len(), 3);
        assert!(state.activity_log.iter().any(|l| l.message.starts_with("Upload refused")));
    }

    #[test]
    fn test_submit_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["h30hz10.csv", "b30hz10.csv"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let mut state = DashboardState::new(DashboardConfig::default());
        state.select_view(View::Upload);
        state.begin_edit();
        for c in dir.path().display().to_string().chars() {
            state.push_char(c);
        }
        state.submit_input(Instant::now());

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.phase(), Phase::Uploading);
        assert_eq!(state.simulator.session().unwrap().selection().len(), 2);
    }

    #[test]
    fn test_missing_path_logs_error_and_stays_idle() {
        let mut state = DashboardState::new(DashboardConfig::default());
        state.select_paths(&[PathBuf::from("/definitely/not/here.csv")], Instant::now());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.activity_log.last().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_unrecognized_file_is_flagged_as_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        File::create(&path).unwrap();

        let mut state = DashboardState::new(DashboardConfig::default());
        state.select_paths(&[path], Instant::now());

        assert_eq!(state.phase(), Phase::Uploading);
        assert!(state
            .activity_log
            .iter()
            .any(|l| l.level == LogLevel::Warn && l.message.contains("notes.txt")));
    }

    #[test]
    fn test_activity_log_is_bounded() {
        let mut state = DashboardState::new(DashboardConfig::default());
        for i in 0..150 {
            state.add_log(LogLevel::Info, &format!("entry {}", i));
        }
        assert_eq!(state.activity_log.len(), MAX_LOG_ENTRIES);
        assert_eq!(state.activity_log[0].message, "entry 50");
    }
}
