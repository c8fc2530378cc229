// Upload/analysis simulator
//
// Fakes the processing of an uploaded dataset as an explicit state machine:
//
//   Idle -> Uploading -> Analyzing -> Complete
//              \            \
//               +------------+----> Failed
//
// The caller owns the clock. Every method takes the current `Instant`, so the
// UI loop passes real time while tests pass manufactured instants and never
// sleep.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, SimulatorConfig};
use crate::errors::{GearError, GearResult};
use crate::selection::FileSelection;
use crate::types::{AnalysisPayload, AnalysisResults, Notification, SubsetSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Uploading,
    Analyzing,
    Complete,
    Failed,
}

impl Phase {
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Uploading | Phase::Analyzing)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Uploading => "UPLOADING",
            Phase::Analyzing => "ANALYZING",
            Phase::Complete => "COMPLETE",
            Phase::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observable outcome of a selection or a clock advance.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    PhaseChanged { from: Phase, to: Phase },
    Progress(u8),
    Notify(Notification),
    Completed(AnalysisPayload),
}

/// Turns a file count into the fabricated healthy/faulty verdict.
#[derive(Debug, Clone)]
pub struct ResultModel {
    config: AnalysisConfig,
}

impl ResultModel {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// healthy = floor(total * healthy_percent / 100), faulty = the rest.
    pub fn synthesize(&self, total: usize) -> GearResult<AnalysisResults> {
        let percent = self.config.healthy_percent;
        if percent > 100 {
            return Err(GearError::AnalysisFailure(format!(
                "healthy share of {}% exceeds 100%",
                percent
            )));
        }
        let healthy = total
            .checked_mul(percent as usize)
            .ok_or_else(|| GearError::AnalysisFailure(format!("file count {} overflows", total)))?
            / 100;

        Ok(AnalysisResults {
            healthy: SubsetSummary {
                files: healthy,
                avg_vibration: self.config.healthy_avg_vibration,
                status: self.config.healthy_status.clone(),
            },
            faulty: SubsetSummary {
                files: total - healthy,
                avg_vibration: self.config.faulty_avg_vibration,
                status: self.config.faulty_status.clone(),
            },
            total_files: total,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UploadSession {
    selection: FileSelection,
    phase: Phase,
    progress: u8,
    result: Option<AnalysisResults>,
    phase_started: Instant,
    next_tick: Option<Instant>,
}

impl UploadSession {
    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn result(&self) -> Option<&AnalysisResults> {
        self.result.as_ref()
    }
}

pub struct AnalysisSimulator {
    timings: SimulatorConfig,
    model: ResultModel,
    sensors: u8,
    session: Option<UploadSession>,
}

impl AnalysisSimulator {
    pub fn new(timings: SimulatorConfig, analysis: AnalysisConfig) -> Self {
        let sensors = analysis.sensor_channels;
        Self {
            timings,
            model: ResultModel::new(analysis),
            sensors,
            session: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map(|s| s.phase).unwrap_or(Phase::Idle)
    }

    pub fn progress(&self) -> u8 {
        self.session.as_ref().map(|s| s.progress).unwrap_or(0)
    }

    pub fn session(&self) -> Option<&UploadSession> {
        self.session.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.phase().is_active()
    }

    /// Start a session for `selection`.
    ///
    /// An empty selection is ignored. A selection made while a session is
    /// uploading or analyzing is refused; a finished or failed session is
    /// replaced.
    pub fn select(&mut self, selection: FileSelection, now: Instant) -> GearResult<Vec<SimEvent>> {
        if selection.is_empty() {
            debug!("Ignoring empty selection");
            return Ok(Vec::new());
        }
        let from = self.phase();
        if from.is_active() {
            return Err(GearError::SessionBusy(from.to_string()));
        }

        info!("Starting upload of {} files", selection.len());
        let next_tick = if self.timings.tick_interval().is_zero() {
            None
        } else {
            Some(now + self.timings.tick_interval())
        };
        self.session = Some(UploadSession {
            selection,
            phase: Phase::Uploading,
            progress: 0,
            result: None,
            phase_started: now,
            next_tick,
        });

        Ok(vec![
            SimEvent::PhaseChanged { from, to: Phase::Uploading },
            SimEvent::Progress(0),
        ])
    }

    /// Run every tick and phase deadline due at or before `now`.
    pub fn advance(&mut self, now: Instant) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if let Err(err) = self.step(now, &mut events) {
            events.extend(self.fail(err));
        }
        events
    }

    fn step(&mut self, now: Instant, events: &mut Vec<SimEvent>) -> GearResult<()> {
        let timings = &self.timings;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        loop {
            match session.phase {
                Phase::Uploading => {
                    let deadline = session.phase_started + timings.upload_delay();
                    let cap = timings.progress_cap.min(100);

                    // Ticks landing on the deadline are cancelled with it.
                    while let Some(tick_at) = session.next_tick {
                        if tick_at >= deadline || tick_at > now {
                            break;
                        }
                        let next = session.progress.saturating_add(timings.progress_step).min(cap);
                        if next != session.progress {
                            session.progress = next;
                            events.push(SimEvent::Progress(next));
                        }
                        session.next_tick = Some(tick_at + timings.tick_interval());
                    }

                    if now < deadline {
                        return Ok(());
                    }

                    session.next_tick = None;
                    session.progress = 100;
                    events.push(SimEvent::Progress(100));
                    session.phase = Phase::Analyzing;
                    session.phase_started = deadline;
                    events.push(SimEvent::PhaseChanged {
                        from: Phase::Uploading,
                        to: Phase::Analyzing,
                    });
                    debug!("Upload phase finished, analyzing");
                }
                Phase::Analyzing => {
                    let deadline = session.phase_started + timings.analysis_delay();
                    if now < deadline {
                        return Ok(());
                    }

                    let results = self.model.synthesize(session.selection.len())?;
                    let payload = AnalysisPayload {
                        total_files: results.total_files,
                        healthy_files: results.healthy.files,
                        faulty_files: results.faulty.files,
                        sensors: self.sensors,
                        analysis_results: results.clone(),
                    };

                    session.phase = Phase::Complete;
                    session.result = Some(results);
                    info!(
                        "Analysis complete: {} files, {} healthy, {} faulty",
                        payload.total_files, payload.healthy_files, payload.faulty_files
                    );

                    events.push(SimEvent::PhaseChanged {
                        from: Phase::Analyzing,
                        to: Phase::Complete,
                    });
                    events.push(SimEvent::Notify(Notification::info(
                        "Dataset Analysis Complete",
                        format!(
                            "Analyzed {} files. Found {} with broken teeth conditions.",
                            payload.total_files, payload.faulty_files
                        ),
                    )));
                    events.push(SimEvent::Completed(payload));
                    return Ok(());
                }
                Phase::Idle | Phase::Complete | Phase::Failed => return Ok(()),
            }
        }
    }

    fn fail(&mut self, err: GearError) -> Vec<SimEvent> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        warn!("Analysis sequence failed during {}: {}", session.phase, err);

        let from = session.phase;
        session.phase = Phase::Failed;
        session.progress = 0;
        session.next_tick = None;
        session.result = None;

        vec![
            SimEvent::PhaseChanged { from, to: Phase::Failed },
            SimEvent::Notify(Notification::destructive(
                "Analysis Failed",
                "There was an error analyzing your dataset. Please try again.",
            )),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NotificationVariant;
    use std::time::Duration;

    fn simulator() -> AnalysisSimulator {
        AnalysisSimulator::new(SimulatorConfig::default(), AnalysisConfig::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Advance a virtual clock in `step` increments until `until`.
    fn run(sim: &mut AnalysisSimulator, t0: Instant, step: u64, until: u64) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let mut t = 0;
        while t <= until {
            events.extend(sim.advance(t0 + ms(t)));
            t += step;
        }
        events
    }

    fn progress_values(events: &[SimEvent]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Progress(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn phase_targets(events: &[SimEvent]) -> Vec<Phase> {
        events
            .iter()
            .filter_map(|e| match e {
                SimEvent::PhaseChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_selection_stays_idle() {
        let mut sim = simulator();
        let events = sim.select(FileSelection::default(), Instant::now()).unwrap();
        assert!(events.is_empty());
        assert_eq!(sim.phase(), Phase::Idle);
        assert!(sim.session().is_none());
    }

    #[test]
    fn test_end_to_end_ten_files() {
        let mut sim = simulator();
        let t0 = Instant::now();

        let mut events = sim.select(FileSelection::synthetic(10), t0).unwrap();
        events.extend(run(&mut sim, t0, 100, 6_000));

        assert_eq!(
            progress_values(&events),
            vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
        );
        assert_eq!(
            phase_targets(&events),
            vec![Phase::Uploading, Phase::Analyzing, Phase::Complete]
        );

        let payload = events
            .iter()
            .find_map(|e| match e {
                SimEvent::Completed(p) => Some(p.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(payload.total_files, 10);
        assert_eq!(payload.healthy_files, 6);
        assert_eq!(payload.faulty_files, 4);
        assert_eq!(payload.sensors, 4);
        assert_eq!(payload.analysis_results.healthy.avg_vibration, 2.1);
        assert_eq!(payload.analysis_results.faulty.status, "Broken Tooth Detected");

        let notice = events
            .iter()
            .find_map(|e| match e {
                SimEvent::Notify(n) => Some(n.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(notice.title, "Dataset Analysis Complete");
        assert_eq!(
            notice.description,
            "Analyzed 10 files. Found 4 with broken teeth conditions."
        );
        assert_eq!(sim.phase(), Phase::Complete);
        assert_eq!(sim.session().unwrap().result().unwrap().total_files, 10);
    }

    #[test]
    fn test_progress_hits_100_before_analyzing() {
        let mut sim = simulator();
        let t0 = Instant::now();
        sim.select(FileSelection::synthetic(3), t0).unwrap();
        let events = run(&mut sim, t0, 50, 6_000);

        let full = events
            .iter()
            .position(|e| *e == SimEvent::Progress(100))
            .unwrap();
        let analyzing = events
            .iter()
            .position(|e| {
                *e == SimEvent::PhaseChanged {
                    from: Phase::Uploading,
                    to: Phase::Analyzing,
                }
            })
            .unwrap();
        assert!(full < analyzing);
        assert!(progress_values(&events).iter().all(|p| *p <= 100));
    }

    #[test]
    fn test_tick_is_clamped_until_deadline() {
        let mut sim = simulator();
        let t0 = Instant::now();
        sim.select(FileSelection::synthetic(1), t0).unwrap();

        sim.advance(t0 + ms(1_000));
        assert_eq!(sim.progress(), 50);

        sim.advance(t0 + ms(2_999));
        assert_eq!(sim.progress(), 90);
        assert_eq!(sim.phase(), Phase::Uploading);

        sim.advance(t0 + ms(3_000));
        assert_eq!(sim.progress(), 100);
        assert_eq!(sim.phase(), Phase::Analyzing);

        // Analyzing is indeterminate: no progress change until it completes.
        assert!(progress_values(&sim.advance(t0 + ms(4_500))).is_empty());
        assert_eq!(sim.phase(), Phase::Analyzing);

        sim.advance(t0 + ms(5_000));
        assert_eq!(sim.phase(), Phase::Complete);
    }

    #[test]
    fn test_single_late_advance_catches_up() {
        let mut sim = simulator();
        let t0 = Instant::now();
        sim.select(FileSelection::synthetic(5), t0).unwrap();

        let events = sim.advance(t0 + ms(60_000));
        assert_eq!(
            progress_values(&events),
            vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
        );
        assert_eq!(phase_targets(&events), vec![Phase::Analyzing, Phase::Complete]);
    }

    #[test]
    fn test_healthy_split_for_all_counts() {
        let model = ResultModel::new(AnalysisConfig::default());
        for n in 1..=1_000usize {
            let results = model.synthesize(n).unwrap();
            assert_eq!(results.healthy.files + results.faulty.files, n);
            assert_eq!(results.healthy.files, n * 6 / 10);
            assert_eq!(results.total_files, n);
        }
    }

    #[test]
    fn test_selection_while_busy_is_refused() {
        let mut sim = simulator();
        let t0 = Instant::now();
        sim.select(FileSelection::synthetic(2), t0).unwrap();

        let err = sim.select(FileSelection::synthetic(8), t0 + ms(500)).unwrap_err();
        assert!(matches!(err, GearError::SessionBusy(_)));
        assert_eq!(sim.session().unwrap().selection().len(), 2);

        sim.advance(t0 + ms(3_100));
        assert!(sim.is_busy());
        assert!(sim.select(FileSelection::synthetic(8), t0 + ms(3_200)).is_err());
    }

    #[test]
    fn test_reselect_after_complete_starts_fresh() {
        let mut sim = simulator();
        let t0 = Instant::now();
        sim.select(FileSelection::synthetic(2), t0).unwrap();
        sim.advance(t0 + ms(5_000));
        assert_eq!(sim.phase(), Phase::Complete);

        let t1 = t0 + ms(10_000);
        let events = sim.select(FileSelection::synthetic(7), t1).unwrap();
        assert_eq!(
            events[0],
            SimEvent::PhaseChanged {
                from: Phase::Complete,
                to: Phase::Uploading
            }
        );
        assert_eq!(sim.progress(), 0);
        assert!(sim.session().unwrap().result().is_none());
    }

    #[test]
    fn test_synthesis_error_moves_to_failed() {
        let analysis = AnalysisConfig {
            healthy_percent: 150,
            ..AnalysisConfig::default()
        };
        let mut sim = AnalysisSimulator::new(SimulatorConfig::default(), analysis);
        let t0 = Instant::now();
        sim.select(FileSelection::synthetic(4), t0).unwrap();

        sim.advance(t0 + ms(3_000));
        assert_eq!(sim.progress(), 100);

        let events = sim.advance(t0 + ms(5_000));
        assert_eq!(sim.phase(), Phase::Failed);
        assert_eq!(sim.progress(), 0);
        assert!(!events.iter().any(|e| matches!(e, SimEvent::Completed(_))));

        let notice = events
            .iter()
            .find_map(|e| match e {
                SimEvent::Notify(n) => Some(n.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(notice.title, "Analysis Failed");
        assert_eq!(notice.variant, NotificationVariant::Destructive);

        // A failed session can be replaced.
        assert!(sim.select(FileSelection::synthetic(1), t0 + ms(6_000)).is_ok());
    }

    #[test]
    fn test_advance_without_session_is_noop() {
        let mut sim = simulator();
        assert!(sim.advance(Instant::now()).is_empty());
    }
}
