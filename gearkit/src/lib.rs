pub mod assessment;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod selection;
pub mod simulator;
pub mod types;
pub mod vibration;

pub use errors::{GearError, GearResult};
pub use selection::FileSelection;
pub use simulator::{AnalysisSimulator, Phase, SimEvent};
pub use vibration::{SeriesSource, VibrationSeries};
