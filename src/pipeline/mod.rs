use crate::decoder::{DEFAULT_MPQN, decode_midi};
use crate::error::{ConvertError, ConvertResult};
use crate::model::config::ConvertConfig;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

mod assembler;
mod channel;
mod metadata;
mod timeline;

pub use assembler::*;
pub use channel::*;
pub use metadata::*;
pub use timeline::*;

pub fn convert_midi_file<P: AsRef<Path>>(path: P, config: &ConvertConfig) -> ConvertResult<Conversion> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConvertError::FileNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    convert_midi_bytes(&bytes, path, config)
}

/// Runs the whole pipeline over an in-memory MIDI file. `source_path` only
/// supplies the fallback title.
pub fn convert_midi_bytes(
    bytes: &[u8],
    source_path: &Path,
    config: &ConvertConfig,
) -> ConvertResult<Conversion> {
    let decoded = decode_midi(bytes)?;

    let channel = select_drum_channel(&decoded, config);
    match channel.source {
        ChannelSource::Forced => info!("Using forced drum channel: {}", channel.channel),
        ChannelSource::Detected => info!("Detected drum channel: {}", channel.channel),
        ChannelSource::Default => info!(
            "No mapped drum notes found, defaulting to channel {}..!",
            channel.channel
        ),
    }

    let metadata = extract_metadata(&decoded, source_path, config)?;
    info!("Title: {}", metadata.title);
    info!("BPM: {}", metadata.bpm);
    info!("Duration: {}s", metadata.duration);

    // Hits are timed at the first tempo only; later tempo changes are ignored.
    let seconds_per_tick = decoded
        .clock
        .seconds_per_tick(first_tempo(&decoded)?.unwrap_or(DEFAULT_MPQN));
    debug!("Seconds per tick: {}", seconds_per_tick);

    let timeline = build_timeline(&decoded, channel.channel, seconds_per_tick);
    let conversion = assemble(metadata, timeline, channel);

    let report = &conversion.report;
    info!("Total notes: {}", report.total_notes);
    info!("Mapped notes: {}", report.mapped_notes);
    if !report.unmapped_notes.is_empty() {
        warn!(
            "Ignored unmapped notes: {:?}",
            report.unmapped_notes.iter().collect::<Vec<_>>()
        );
    }

    Ok(conversion)
}
