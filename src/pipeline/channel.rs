use crate::decoder::{DecodedMidi, RawEventKind};
use crate::model::config::ConvertConfig;
use crate::model::vocabulary::voice_for_midi;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelSource {
    /// Supplied by the caller; detection never ran.
    Forced,
    /// Channel with the most recognised drum notes.
    Detected,
    /// Nothing matched the vocabulary.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelChoice {
    pub channel: u8,
    pub source: ChannelSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTally {
    pub channel: u8,
    pub note_ons: usize,
    /// Note-ons with a vocabulary entry.
    pub mapped: usize,
}

/// Per-channel note-on counts, in the order channels first appear.
pub fn tally_channels(decoded: &DecodedMidi) -> Vec<ChannelTally> {
    let mut tallies: Vec<ChannelTally> = Vec::new();

    for event in decoded.events() {
        if let RawEventKind::NoteOn {
            channel,
            note,
            velocity,
        } = event.kind
            && velocity > 0
        {
            let idx = match tallies.iter().position(|t| t.channel == channel) {
                Some(idx) => idx,
                None => {
                    tallies.push(ChannelTally {
                        channel,
                        note_ons: 0,
                        mapped: 0,
                    });
                    tallies.len() - 1
                }
            };

            tallies[idx].note_ons += 1;
            if voice_for_midi(note).is_some() {
                tallies[idx].mapped += 1;
            }
        }
    }

    tallies
}

pub fn detect_drum_channel(decoded: &DecodedMidi, default_channel: u8) -> ChannelChoice {
    let mut best: Option<ChannelTally> = None;

    for tally in tally_channels(decoded) {
        debug!(
            "Channel {}: {} note-on(s), {} mapped",
            tally.channel, tally.note_ons, tally.mapped
        );

        // Strictly greater, so the earliest channel keeps a tie.
        if tally.mapped > best.map_or(0, |b| b.mapped) {
            best = Some(tally);
        }
    }

    match best {
        Some(tally) => ChannelChoice {
            channel: tally.channel,
            source: ChannelSource::Detected,
        },
        None => ChannelChoice {
            channel: default_channel,
            source: ChannelSource::Default,
        },
    }
}

/// The forced channel when configured, otherwise the detected one.
pub fn select_drum_channel(decoded: &DecodedMidi, config: &ConvertConfig) -> ChannelChoice {
    match config.force_channel {
        Some(channel) => ChannelChoice {
            channel,
            source: ChannelSource::Forced,
        },
        None => detect_drum_channel(decoded, config.default_channel),
    }
}
