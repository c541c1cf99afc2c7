use crate::decoder::{DecodedMidi, RawEvent, RawEventKind};
use crate::model::chart::HitEvent;
use crate::model::vocabulary::voice_for_midi;
use crate::util::round_to;
use std::collections::BTreeSet;

/// Hits for one drum channel plus what was seen on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    /// In track order, then event order. Not yet globally sorted.
    pub hits: Vec<HitEvent>,
    /// Sounding note-ons on the drum channel, mapped or not.
    pub total_notes: usize,
    pub unmapped_notes: BTreeSet<u8>,
}

/// Walks every track on its own clock. Each track starts at zero and the
/// clock advances with every event, whatever its kind or channel.
pub fn build_timeline(decoded: &DecodedMidi, drum_channel: u8, seconds_per_tick: f64) -> Timeline {
    let mut timeline = Timeline::default();

    for track in &decoded.tracks {
        track.iter().fold(0u64, |abs_tick, event| {
            let abs_tick = abs_tick + event.delta_ticks as u64;
            timeline.record(event, drum_channel, abs_tick as f64 * seconds_per_tick);
            abs_tick
        });
    }

    timeline
}

impl Timeline {
    fn record(&mut self, event: &RawEvent, drum_channel: u8, time_secs: f64) {
        let RawEventKind::NoteOn {
            channel,
            note,
            velocity,
        } = event.kind
        else {
            return;
        };

        // Velocity 0 is a note-off.
        if channel != drum_channel || velocity == 0 {
            return;
        }

        self.total_notes += 1;
        match voice_for_midi(note) {
            Some(voice) => self.hits.push(HitEvent {
                time: round_to(time_secs, 3),
                lane: voice.lane,
                midi_note: voice.canonical_note,
                velocity,
            }),
            None => {
                self.unmapped_notes.insert(note);
            }
        }
    }
}
