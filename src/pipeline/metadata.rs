use crate::decoder::{DecodedMidi, RawEventKind};
use crate::error::{ConvertError, ConvertResult};
use crate::model::chart::ChartMetadata;
use crate::model::config::ConvertConfig;
use crate::util::{file_stem, round_to};
use std::path::Path;

const MICROSECONDS_PER_MINUTE: f64 = 60_000_000.0;

/// Microseconds per beat of the first tempo event, scanning tracks in order.
/// A zero first tempo has no BPM and fails the conversion.
pub fn first_tempo(decoded: &DecodedMidi) -> ConvertResult<Option<u32>> {
    let tempo = decoded.events().find_map(|event| match event.kind {
        RawEventKind::Tempo { micros_per_beat } => Some((event.track_index, micros_per_beat)),
        _ => None,
    });

    match tempo {
        Some((track, 0)) => Err(ConvertError::ZeroTempo { track }),
        Some((_, micros_per_beat)) => Ok(Some(micros_per_beat)),
        None => Ok(None),
    }
}

pub fn bpm_from_tempo(micros_per_beat: u32) -> u32 {
    (MICROSECONDS_PER_MINUTE / micros_per_beat as f64).round() as u32
}

/// First track name that is not blank, exactly as stored.
pub fn first_track_name(decoded: &DecodedMidi) -> Option<String> {
    decoded.events().find_map(|event| match &event.kind {
        RawEventKind::TrackName(name) if !name.trim().is_empty() => Some(name.clone()),
        _ => None,
    })
}

pub fn extract_metadata(
    decoded: &DecodedMidi,
    source_path: &Path,
    config: &ConvertConfig,
) -> ConvertResult<ChartMetadata> {
    let bpm = first_tempo(decoded)?
        .map(bpm_from_tempo)
        .unwrap_or(config.default_bpm);

    let title = first_track_name(decoded)
        .or_else(|| file_stem(source_path))
        .unwrap_or_else(|| "Untitled".into());

    Ok(ChartMetadata {
        title,
        artist: None,
        bpm,
        duration: round_to(decoded.length_secs, 2),
        difficulty: None,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decoder::decode_midi;
    use crate::util::{TestEvent, midi_bytes};

    fn decode(tracks: &[Vec<(u32, TestEvent)>]) -> DecodedMidi {
        decode_midi(&midi_bytes(480, tracks)).unwrap()
    }

    #[test]
    fn first_tempo_wins() {
        let decoded = decode(&[
            vec![(0, TestEvent::TrackName("  ".into()))],
            vec![(0, TestEvent::Tempo(400_000)), (960, TestEvent::Tempo(600_000))],
            vec![(0, TestEvent::Tempo(1_000_000))],
        ]);

        assert_eq!(first_tempo(&decoded).unwrap(), Some(400_000));
        let metadata =
            extract_metadata(&decoded, Path::new("x.mid"), &ConvertConfig::default()).unwrap();
        assert_eq!(metadata.bpm, 150);
    }

    #[test]
    fn bpm_rounding() {
        assert_eq!(bpm_from_tempo(500_000), 120);
        assert_eq!(bpm_from_tempo(461_538), 130);
        assert_eq!(bpm_from_tempo(1_000_000), 60);
    }

    #[test]
    fn defaults_without_meta_events() {
        let decoded = decode(&[vec![(480, TestEvent::NoteOn(9, 36, 100))]]);
        let metadata = extract_metadata(
            &decoded,
            Path::new("charts/in/My Groove.mid"),
            &ConvertConfig::default(),
        )
        .unwrap();

        assert_eq!(metadata.bpm, 120);
        assert_eq!(metadata.title, "My Groove");
        assert_eq!(metadata.duration, 0.5);
        assert_eq!(metadata.artist, None);
        assert_eq!(metadata.difficulty, None);
    }

    #[test]
    fn title_skips_blank_names() {
        let decoded = decode(&[
            vec![(0, TestEvent::TrackName("   ".into()))],
            vec![(0, TestEvent::TrackName(" Test Song ".into()))],
            vec![(0, TestEvent::TrackName("Drums".into()))],
        ]);

        assert_eq!(first_track_name(&decoded), Some(" Test Song ".into()));
    }

    #[test]
    fn padded_title_is_kept_verbatim() {
        let decoded = decode(&[vec![(0, TestEvent::TrackName("  Test Song \t".into()))]]);
        let metadata =
            extract_metadata(&decoded, Path::new("x.mid"), &ConvertConfig::default()).unwrap();

        assert_eq!(metadata.title, "  Test Song \t");
    }

    #[test]
    fn zero_first_tempo_is_an_error() {
        let decoded = decode(&[
            vec![(0, TestEvent::Tempo(0)), (480, TestEvent::Tempo(500_000))],
        ]);

        assert!(matches!(
            first_tempo(&decoded),
            Err(ConvertError::ZeroTempo { track: 0 })
        ));
        assert!(extract_metadata(&decoded, Path::new("x.mid"), &ConvertConfig::default()).is_err());
    }

    #[test]
    fn later_zero_tempo_is_ignored() {
        let decoded = decode(&[vec![(0, TestEvent::Tempo(500_000)), (480, TestEvent::Tempo(0))]]);

        assert_eq!(first_tempo(&decoded).unwrap(), Some(500_000));
    }

    #[test]
    fn configured_default_bpm() {
        let decoded = decode(&[vec![(0, TestEvent::NoteOn(9, 36, 100))]]);
        let config = ConvertConfig {
            default_bpm: 90,
            ..ConvertConfig::default()
        };

        assert_eq!(
            extract_metadata(&decoded, Path::new("a.mid"), &config).unwrap().bpm,
            90
        );
    }
}
