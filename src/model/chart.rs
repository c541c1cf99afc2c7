use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HitEvent {
    /// Seconds from the start of the song, millisecond precision.
    pub time: f64,
    pub lane: u8,
    /// Canonical (alias-resolved) note number.
    pub midi_note: u8,
    pub velocity: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub title: String,
    pub artist: Option<String>,
    pub bpm: u32,
    pub duration: f64,
    pub difficulty: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartAudio {
    pub backing_track: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartDocument {
    pub metadata: ChartMetadata,
    pub audio: ChartAudio,
    pub notes: Vec<HitEvent>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn document_shape() {
        let chart = ChartDocument {
            metadata: ChartMetadata {
                title: "Test Song".into(),
                artist: None,
                bpm: 120,
                duration: 1.5,
                difficulty: None,
            },
            audio: ChartAudio::default(),
            notes: vec![HitEvent {
                time: 0.5,
                lane: 1,
                midi_note: 38,
                velocity: 100,
            }],
        };

        let json = serde_json::to_string(&chart).unwrap();
        assert_eq!(
            json,
            r#"{"metadata":{"title":"Test Song","artist":null,"bpm":120,"duration":1.5,"difficulty":null},"audio":{"backingTrack":null},"notes":[{"time":0.5,"lane":1,"midiNote":38,"velocity":100}]}"#
        );
    }
}
