//! Conversion of metric series into timestamped events and JSONL files.
//!
//! All series serialized together share one [`TimestampAxis`]: element `i`
//! of every series carries the same timestamp, so parallel metrics can be
//! cross-referenced at playback time.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use vidsonic_common::clock::TimestampAxis;
use vidsonic_common::error::{VidsonicError, VidsonicResult};
use vidsonic_metric_model::{MetricEvent, MetricSeries};

/// Pair raw sequences with their feature labels.
pub fn label_series(sequences: Vec<Vec<f64>>, labels: &[&str]) -> VidsonicResult<Vec<MetricSeries>> {
    if sequences.len() != labels.len() {
        return Err(VidsonicError::degenerate(
            "serialize",
            format!(
                "{} sequences but {} feature labels",
                sequences.len(),
                labels.len()
            ),
        ));
    }
    Ok(sequences
        .into_iter()
        .zip(labels)
        .map(|(values, label)| MetricSeries::new(*label, values))
        .collect())
}

/// One event per `(series, index)`, series-major then index-minor.
/// Each series restarts at the axis base.
pub fn to_events(series: &[MetricSeries], axis: TimestampAxis, system: &str) -> Vec<MetricEvent> {
    series
        .iter()
        .flat_map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(move |(i, &value)| MetricEvent::new(axis.at(i), s.feature.as_str(), value, system))
        })
        .collect()
}

/// Writes events to a JSONL file.
///
/// Lines go to a hidden sibling file that is renamed over the target on
/// [`EventWriter::finish`]. A writer dropped before `finish` removes its
/// temporary file and leaves any existing target untouched.
pub struct EventWriter {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    temp_path: PathBuf,
    events_written: u64,
}

impl EventWriter {
    pub fn create(path: impl Into<PathBuf>) -> VidsonicResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| VidsonicError::write(parent, e))?;
        }

        let temp_path = temp_path_for(&path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| VidsonicError::write(&temp_path, e))?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
            temp_path,
            events_written: 0,
        })
    }

    /// Write a single event as a JSONL line.
    pub fn write_event(&mut self, event: &MetricEvent) -> VidsonicResult<()> {
        let json = serde_json::to_string(event)?;
        let Some(writer) = self.writer.as_mut() else {
            return Err(VidsonicError::unsupported("event writer already finished"));
        };
        writeln!(writer, "{json}").map_err(|e| VidsonicError::write(&self.temp_path, e))?;
        self.events_written += 1;
        Ok(())
    }

    /// Flush, sync and move the file into place.
    pub fn finish(mut self) -> VidsonicResult<u64> {
        let Some(writer) = self.writer.take() else {
            return Err(VidsonicError::unsupported("event writer already finished"));
        };
        let file = writer
            .into_inner()
            .map_err(|e| VidsonicError::write(&self.temp_path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| VidsonicError::write(&self.temp_path, e))?;
        drop(file);

        std::fs::rename(&self.temp_path, &self.path)
            .map_err(|e| VidsonicError::write(&self.path, e))?;

        tracing::info!(
            path = %self.path.display(),
            events = self.events_written,
            "Event stream written"
        );
        Ok(self.events_written)
    }

    /// Final path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = std::fs::remove_file(&self.temp_path);
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "events".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Serialize `series` on a shared axis and write them to `path`.
pub fn write_events(
    path: impl Into<PathBuf>,
    series: &[MetricSeries],
    axis: TimestampAxis,
    system: &str,
) -> VidsonicResult<u64> {
    let mut writer = EventWriter::create(path)?;
    for event in to_events(series, axis, system) {
        writer.write_event(&event)?;
    }
    writer.finish()
}
