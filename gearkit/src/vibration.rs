// Multi-channel vibration series for the chart panels.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};

pub const CHANNELS: usize = 4;
pub const SYNTHETIC_POINTS: usize = 50;

/// Where a series came from. Synthetic series must never be presented as
/// analysis output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesSource {
    Uploaded,
    Synthetic,
}

impl SeriesSource {
    pub fn tag(&self) -> &'static str {
        match self {
            SeriesSource::Uploaded => "UPLOADED",
            SeriesSource::Synthetic => "SYNTHETIC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationSample {
    pub time: f64,
    pub channels: [f64; CHANNELS],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationSeries {
    source: SeriesSource,
    samples: Vec<VibrationSample>,
}

/// (frequency, amplitude, jitter) per channel; odd channels use cosine.
const WAVEFORMS: [(f64, f64, f64); CHANNELS] = [
    (0.2, 2.0, 0.5),
    (0.15, 1.5, 0.3),
    (0.25, 1.8, 0.4),
    (0.3, 2.2, 0.6),
];

impl VibrationSeries {
    /// Series built from real samples. Rejects an empty sample set.
    pub fn from_samples(samples: Vec<VibrationSample>) -> GearResult<Self> {
        if samples.is_empty() {
            return Err(GearError::Selection("vibration series has no samples".to_string()));
        }
        Ok(Self {
            source: SeriesSource::Uploaded,
            samples,
        })
    }

    /// Placeholder waveform so a chart is never empty.
    pub fn synthetic<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let samples = (0..SYNTHETIC_POINTS)
            .map(|i| {
                let t = i as f64;
                let mut channels = [0.0; CHANNELS];
                for (ch, (freq, amplitude, jitter)) in WAVEFORMS.iter().enumerate() {
                    let wave = if ch % 2 == 0 {
                        (t * freq).sin()
                    } else {
                        (t * freq).cos()
                    };
                    channels[ch] = wave * amplitude + rng.gen_range(0.0..*jitter);
                }
                VibrationSample { time: t, channels }
            })
            .collect();

        Self {
            source: SeriesSource::Synthetic,
            samples,
        }
    }

    /// Uses `samples` when present, otherwise falls back to the generator.
    pub fn or_synthetic<R: Rng + ?Sized>(samples: Vec<VibrationSample>, rng: &mut R) -> Self {
        if samples.is_empty() {
            Self::synthetic(rng)
        } else {
            Self {
                source: SeriesSource::Uploaded,
                samples,
            }
        }
    }

    pub fn source(&self) -> SeriesSource {
        self.source
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == SeriesSource::Synthetic
    }

    pub fn samples(&self) -> &[VibrationSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// (time, value) pairs for one channel, ready for plotting.
    pub fn channel_points(&self, channel: usize) -> Vec<(f64, f64)> {
        if channel >= CHANNELS {
            return Vec::new();
        }
        self.samples
            .iter()
            .map(|s| (s.time, s.channels[channel]))
            .collect()
    }

    /// (min time, max time) and (min value, max value) across all channels.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut x = [f64::MAX, f64::MIN];
        let mut y = [f64::MAX, f64::MIN];
        for s in &self.samples {
            x[0] = x[0].min(s.time);
            x[1] = x[1].max(s.time);
            for v in s.channels {
                y[0] = y[0].min(v);
                y[1] = y[1].max(v);
            }
        }
        if self.samples.is_empty() {
            return ([0.0, 1.0], [0.0, 1.0]);
        }
        (x, y)
    }
}
