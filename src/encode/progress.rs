use std::time::Duration;

use crate::encode::EncodeJob;

/// One progress notification from a running encode.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeProgress {
    /// Media time written so far.
    pub out_time: Duration,
    /// `0.0..=100.0` when the audio duration is known.
    pub percent: Option<f64>,
}

/// Receives encode notifications. Completion is reported through the encoder's return value;
/// `finish` only tells the sink to tear down whatever it displays.
pub trait ProgressSink {
    /// An encode is about to start. `total` is the probed audio duration, if any.
    fn begin(&mut self, _job: &EncodeJob, _total: Option<Duration>) {}

    /// Progress was reported.
    fn progress(&mut self, progress: &EncodeProgress);

    /// The encode ended, successfully or not.
    fn finish(&mut self, _job: &EncodeJob, _ok: bool) {}
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&mut self, _progress: &EncodeProgress) {}
}

/// Incremental parser for `ffmpeg -progress` key/value output.
///
/// `ffmpeg` prints a block of `key=value` lines and terminates every block with
/// `progress=continue` or `progress=end`; one [`EncodeProgress`] is produced per block.
#[derive(Clone, Debug, Default)]
pub struct ProgressParser {
    total: Option<Duration>,
    out_time: Option<Duration>,
}

impl ProgressParser {
    /// Parser that computes percentages against `total`.
    pub fn new(total: Option<Duration>) -> Self {
        Self {
            total: total.filter(|t| !t.is_zero()),
            out_time: None,
        }
    }

    /// Feed one output line. Returns a notification at the end of each block.
    pub fn feed(&mut self, line: &str) -> Option<EncodeProgress> {
        let (key, value) = line.trim().split_once('=')?;
        match key.trim() {
            // Both keys carry microseconds; `out_time_ms` is misnamed upstream.
            "out_time_us" | "out_time_ms" => {
                if let Ok(us) = value.trim().parse::<u64>() {
                    self.out_time = Some(Duration::from_micros(us));
                }
                None
            }
            "progress" => {
                let out_time = self.out_time.unwrap_or_default();
                let percent = if value.trim() == "end" {
                    self.total.map(|_| 100.0)
                } else {
                    self.total.map(|total| {
                        (out_time.as_secs_f64() / total.as_secs_f64() * 100.0).clamp(0.0, 100.0)
                    })
                };
                Some(EncodeProgress { out_time, percent })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/progress.rs"]
mod tests;
