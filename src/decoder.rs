use crate::error::ConvertResult;
use log::debug;
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

/// 120 BPM, the MIDI default until a tempo meta appears.
pub const DEFAULT_MPQN: u32 = 500_000;
const MICROSECONDS_PER_SECOND: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEventKind {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    Tempo { micros_per_beat: u32 },
    TrackName(String),
    Other,
}

/// One track event with its delta from the previous event in the same track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub track_index: usize,
    pub delta_ticks: u32,
    pub kind: RawEventKind,
}

/// How ticks turn into wall-clock time for this file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickClock {
    /// Ticks are fractions of a beat; the tempo decides their length.
    Metrical { ticks_per_beat: u16 },
    /// SMPTE timing: ticks are fixed fractions of a second, tempo is irrelevant.
    Timecode { ticks_per_second: f64 },
}

impl TickClock {
    pub fn seconds_per_tick(&self, micros_per_beat: u32) -> f64 {
        match *self {
            TickClock::Metrical { ticks_per_beat } => {
                micros_per_beat as f64 / ticks_per_beat.max(1) as f64 / MICROSECONDS_PER_SECOND
            }
            TickClock::Timecode { ticks_per_second } => 1.0 / ticks_per_second,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecodedMidi {
    pub clock: TickClock,
    pub tracks: Vec<Vec<RawEvent>>,
    /// Total playback length in seconds, honoring every tempo event.
    pub length_secs: f64,
}

impl DecodedMidi {
    pub fn events(&self) -> impl Iterator<Item = &RawEvent> {
        self.tracks.iter().flatten()
    }
}

#[derive(Debug, Clone)]
struct TempoSegment {
    pub mpqn: u32,
    pub start_tick: u64,
    pub secs_at_start: f64,
}

pub fn decode_midi(bytes: &[u8]) -> ConvertResult<DecodedMidi> {
    let smf = Smf::parse(bytes)?;

    let clock = match smf.header.timing {
        Timing::Metrical(t) => TickClock::Metrical {
            ticks_per_beat: t.as_int(),
        },
        Timing::Timecode(fps, subframe) => TickClock::Timecode {
            ticks_per_second: (fps.as_f32() as f64 * subframe as f64).max(1.0),
        },
    };

    debug!("Tick clock: {:?}", clock);
    debug!(
        "MIDI format: {:?}, tracks: {}",
        smf.header.format,
        smf.tracks.len()
    );

    let mut tempo_changes: Vec<(u64, u32)> = Vec::new();
    let mut end_tick: u64 = 0;
    let mut tracks: Vec<Vec<RawEvent>> = Vec::with_capacity(smf.tracks.len());

    for (track_idx, track) in smf.tracks.iter().enumerate() {
        let mut abs_tick: u64 = 0;
        let mut events = Vec::with_capacity(track.len());

        for event in track.iter() {
            let delta_ticks = event.delta.as_int();
            abs_tick = abs_tick.saturating_add(delta_ticks as u64);

            let kind = match event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(micro)) => {
                    let mpqn = micro.as_int();
                    tempo_changes.push((abs_tick, mpqn));
                    debug!(
                        "Tempo change at tick {} -> {} us/qn (track {})",
                        abs_tick, mpqn, track_idx
                    );
                    RawEventKind::Tempo {
                        micros_per_beat: mpqn,
                    }
                }
                TrackEventKind::Meta(MetaMessage::TrackName(name)) => {
                    RawEventKind::TrackName(meta_text(name))
                }
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn { key, vel },
                } => RawEventKind::NoteOn {
                    channel: channel.as_int(),
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                _ => RawEventKind::Other,
            };

            events.push(RawEvent {
                track_index: track_idx,
                delta_ticks,
                kind,
            });
        }

        end_tick = end_tick.max(abs_tick);
        tracks.push(events);
    }

    let length_secs = playback_length(clock, tempo_changes, end_tick);
    debug!("Playback length: {:.3}s ({} ticks)", length_secs, end_tick);

    Ok(DecodedMidi {
        clock,
        tracks,
        length_secs,
    })
}

/// Meta text is UTF-8 when it parses as such, latin-1 otherwise.
fn meta_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Seconds from tick 0 to `end_tick`, following the file's tempo map.
fn playback_length(clock: TickClock, mut tempo_changes: Vec<(u64, u32)>, end_tick: u64) -> f64 {
    if let TickClock::Timecode { .. } = clock {
        return end_tick as f64 * clock.seconds_per_tick(DEFAULT_MPQN);
    }

    // Stable, so simultaneous changes keep track order and the last one wins.
    tempo_changes.sort_by_key(|(tick, _)| *tick);

    let mut last_tick: u64 = 0;
    let mut secs_accum: f64 = 0.0;
    let mut last_mpqn: u32 = DEFAULT_MPQN;
    let mut tempo_segments: Vec<TempoSegment> = vec![TempoSegment {
        mpqn: DEFAULT_MPQN,
        start_tick: 0,
        secs_at_start: 0.0,
    }];

    for (tick, mpqn) in tempo_changes.into_iter() {
        if tick > last_tick {
            secs_accum += (tick - last_tick) as f64 * clock.seconds_per_tick(last_mpqn);
        }

        tempo_segments.push(TempoSegment {
            start_tick: tick,
            mpqn,
            secs_at_start: secs_accum,
        });

        last_tick = tick;
        last_mpqn = mpqn;
    }

    let segment = match tempo_segments.iter().rfind(|seg| seg.start_tick <= end_tick) {
        Some(s) => s,
        None => &tempo_segments[0],
    };

    let delta_ticks = end_tick.saturating_sub(segment.start_tick) as f64;
    segment.secs_at_start + delta_ticks * clock.seconds_per_tick(segment.mpqn)
}
