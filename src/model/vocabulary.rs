/// The drum a MIDI percussion note resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrumVoice {
    /// Game lane (input column) for this drum.
    pub lane: u8,
    /// Primary note number for the drum; aliases carry their primary's number here.
    pub canonical_note: u8,
    /// Instrument name as the game knows it.
    pub label: &'static str,
}

pub const LANE_COUNT: u8 = 9;

const KICK: DrumVoice = DrumVoice {
    lane: 0,
    canonical_note: 36,
    label: "kick",
};
const SNARE: DrumVoice = DrumVoice {
    lane: 1,
    canonical_note: 38,
    label: "snare",
};
const HI_HAT_CLOSED: DrumVoice = DrumVoice {
    lane: 2,
    canonical_note: 42,
    label: "hiHatClosed",
};
const HI_HAT_OPEN: DrumVoice = DrumVoice {
    lane: 3,
    canonical_note: 46,
    label: "hiHatOpen",
};
const CRASH: DrumVoice = DrumVoice {
    lane: 4,
    canonical_note: 49,
    label: "crashCymbal",
};
const RIDE: DrumVoice = DrumVoice {
    lane: 5,
    canonical_note: 51,
    label: "rideCymbal",
};
const HIGH_TOM: DrumVoice = DrumVoice {
    lane: 6,
    canonical_note: 48,
    label: "highTom",
};
const MID_TOM: DrumVoice = DrumVoice {
    lane: 7,
    canonical_note: 45,
    label: "midTom",
};
const FLOOR_TOM: DrumVoice = DrumVoice {
    lane: 8,
    canonical_note: 43,
    label: "floorTom",
};

// Lane order. Index == lane.
const LANES: [DrumVoice; LANE_COUNT as usize] = [
    KICK,
    SNARE,
    HI_HAT_CLOSED,
    HI_HAT_OPEN,
    CRASH,
    RIDE,
    HIGH_TOM,
    MID_TOM,
    FLOOR_TOM,
];

/// Every recognised percussion note, primaries and aliases alike.
pub const VOCABULARY: &[(u8, DrumVoice)] = &[
    (35, KICK),
    (36, KICK),
    (38, SNARE),
    (40, SNARE),
    (41, HI_HAT_CLOSED),
    (42, HI_HAT_CLOSED),
    (46, HI_HAT_OPEN),
    (49, CRASH),
    (51, RIDE),
    (48, HIGH_TOM),
    (45, MID_TOM),
    (43, FLOOR_TOM),
    (44, FLOOR_TOM),
];

pub fn voice_for_midi(midi: u8) -> Option<&'static DrumVoice> {
    VOCABULARY
        .iter()
        .find(|(m, _)| *m == midi)
        .map(|(_, voice)| voice)
}

pub fn lane_label(lane: u8) -> Option<&'static str> {
    LANES.get(lane as usize).map(|voice| voice.label)
}

pub fn canonical_notes() -> impl Iterator<Item = u8> {
    LANES.iter().map(|voice| voice.canonical_note)
}
