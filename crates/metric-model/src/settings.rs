//! Typed per-track sonification settings.
//!
//! One entry per metric track chosen by the user: which feature drives the
//! track, which instrument plays it, what the data controls, and the scale.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::feature::Feature;

/// Instruments understood by the downstream tool, in its index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Piano,
    Guitar,
    Cello,
    Flute,
    Vibraphone,
    Marimba,
    Strings,
    Drums,
}

impl Instrument {
    pub const ALL: [Instrument; 8] = [
        Instrument::Piano,
        Instrument::Guitar,
        Instrument::Cello,
        Instrument::Flute,
        Instrument::Vibraphone,
        Instrument::Marimba,
        Instrument::Strings,
        Instrument::Drums,
    ];

    /// Position in the downstream instrument table.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// What aspect of the generated music the metric drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Notes,
    Pitch,
    Volume,
    Rhythm,
}

/// Musical scale for note mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scale {
    CMinor,
    CMajor,
    Blues,
}

/// Settings for one sonified track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSettings {
    pub feature: Feature,
    #[serde(deserialize_with = "instrument_name_or_index")]
    pub instrument: Instrument,
    pub controls: Control,
    pub scale: Scale,
    /// Muted tracks are kept in the file but not sent downstream.
    #[serde(default, deserialize_with = "bool_or_flag")]
    pub muted: bool,
}

/// Accepts `true`/`false` as well as the `0`/`1` flags older files carry.
fn bool_or_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u8),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(serde::de::Error::custom(format!(
            "muted flag must be 0 or 1, got {other}"
        ))),
    }
}

/// Accepts an instrument name, or its index as a number or a numeric string.
fn instrument_name_or_index<'de, D>(deserializer: D) -> Result<Instrument, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Named(Instrument),
        Index(usize),
        Text(String),
    }

    let index = match Raw::deserialize(deserializer)? {
        Raw::Named(instrument) => return Ok(instrument),
        Raw::Index(index) => index,
        Raw::Text(text) => text.trim().parse::<usize>().map_err(|_| {
            serde::de::Error::custom(format!("unknown instrument '{text}'"))
        })?,
    };
    Instrument::from_index(index).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "instrument index {index} out of range (0..{})",
            Instrument::ALL.len()
        ))
    })
}

/// Errors loading a track settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load a JSON array of track settings.
pub fn load_track_settings(path: impl AsRef<Path>) -> Result<Vec<TrackSettings>, SettingsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| SettingsError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Tracks that should be sent downstream (muted ones skipped).
pub fn active_tracks(tracks: &[TrackSettings]) -> Vec<&TrackSettings> {
    tracks.iter().filter(|t| !t.muted).collect()
}
