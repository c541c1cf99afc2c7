use crate::error::{ConvertError, ConvertResult};
use crate::model::chart::ChartDocument;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Input file name without its extension.
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
}

/// `<chart_dir>/<input stem>.json`
pub fn default_output_path(input: &Path, chart_dir: &Path) -> PathBuf {
    let stem = file_stem(input).unwrap_or_else(|| "chart".into());
    chart_dir.join(format!("{}.json", stem))
}

pub fn chart_to_json(chart: &ChartDocument) -> ConvertResult<String> {
    Ok(serde_json::to_string_pretty(chart)?)
}

/// Serializes the chart and writes it, creating parent directories as needed.
pub fn write_chart(chart: &ChartDocument, path: &Path) -> ConvertResult<()> {
    let json = chart_to_json(chart)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ConvertError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} chart note(s) to {}", chart.notes.len(), path.display());
    Ok(())
}

/// Event shorthand for building synthetic MIDI files in tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum TestEvent {
    /// channel, note, velocity
    NoteOn(u8, u8, u8),
    /// channel, note
    NoteOff(u8, u8),
    /// microseconds per beat
    Tempo(u32),
    TrackName(String),
    /// Track name bytes exactly as stored.
    RawTrackName(Vec<u8>),
}

/// Encodes tracks of `(absolute tick, event)` pairs as a standard MIDI file.
#[cfg(test)]
pub fn midi_bytes(ticks_per_beat: u16, tracks: &[Vec<(u32, TestEvent)>]) -> Vec<u8> {
    use midly::{
        Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
    };

    let format = if tracks.len() == 1 {
        Format::SingleTrack
    } else {
        Format::Parallel
    };
    let mut smf = Smf::new(Header::new(format, Timing::Metrical(ticks_per_beat.into())));

    for events in tracks {
        let mut track = Vec::new();
        let mut last_tick = 0u32;

        for (tick, event) in events {
            let kind = match event {
                TestEvent::NoteOn(channel, note, velocity) => TrackEventKind::Midi {
                    channel: (*channel).into(),
                    message: MidiMessage::NoteOn {
                        key: (*note).into(),
                        vel: (*velocity).into(),
                    },
                },
                TestEvent::NoteOff(channel, note) => TrackEventKind::Midi {
                    channel: (*channel).into(),
                    message: MidiMessage::NoteOff {
                        key: (*note).into(),
                        vel: 0u8.into(),
                    },
                },
                TestEvent::Tempo(mpqn) => TrackEventKind::Meta(MetaMessage::Tempo((*mpqn).into())),
                TestEvent::TrackName(name) => {
                    TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes()))
                }
                TestEvent::RawTrackName(bytes) => {
                    TrackEventKind::Meta(MetaMessage::TrackName(bytes.as_slice()))
                }
            };

            track.push(TrackEvent {
                delta: tick.saturating_sub(last_tick).into(),
                kind,
            });
            last_tick = *tick;
        }

        track.push(TrackEvent {
            delta: 0u32.into(),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
    }

    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).unwrap();
    bytes
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::chart::{ChartAudio, ChartMetadata, HitEvent};

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.49999, 3), 0.5);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.0, 3), 2.0);
    }

    #[test]
    fn output_path_from_input_stem() {
        assert_eq!(
            default_output_path(Path::new("songs/Back In Black.mid"), Path::new("assets/charts")),
            PathBuf::from("assets/charts/Back In Black.json")
        );
        assert_eq!(file_stem(Path::new("/tmp/groove.midi")), Some("groove".into()));
        assert_eq!(file_stem(Path::new("")), None);
    }

    #[test]
    fn writes_pretty_json_into_new_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/charts/song.json");
        let chart = ChartDocument {
            metadata: ChartMetadata {
                title: "Ação".into(),
                artist: None,
                bpm: 90,
                duration: 0.0,
                difficulty: None,
            },
            audio: ChartAudio::default(),
            notes: vec![HitEvent {
                time: 0.25,
                lane: 0,
                midi_note: 36,
                velocity: 127,
            }],
        };

        write_chart(&chart, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"metadata\": {\n    \"title\": \"Ação\""));
        let parsed: ChartDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, chart);
    }
}
