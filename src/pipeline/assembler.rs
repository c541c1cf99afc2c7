use crate::model::chart::{ChartAudio, ChartDocument, ChartMetadata};
use crate::pipeline::channel::{ChannelChoice, ChannelSource};
use crate::pipeline::timeline::Timeline;
use serde::Serialize;
use std::collections::BTreeSet;

/// Diagnostics that travel alongside the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub drum_channel: u8,
    pub channel_source: ChannelSource,
    pub total_notes: usize,
    pub mapped_notes: usize,
    pub unmapped_notes: BTreeSet<u8>,
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub chart: ChartDocument,
    pub report: ConversionReport,
}

pub fn assemble(metadata: ChartMetadata, timeline: Timeline, channel: ChannelChoice) -> Conversion {
    let Timeline {
        mut hits,
        total_notes,
        unmapped_notes,
    } = timeline;

    // Stable, so simultaneous hits keep their encounter order.
    hits.sort_by(|a, b| a.time.total_cmp(&b.time));

    let report = ConversionReport {
        drum_channel: channel.channel,
        channel_source: channel.source,
        total_notes,
        mapped_notes: hits.len(),
        unmapped_notes,
    };

    Conversion {
        chart: ChartDocument {
            metadata,
            audio: ChartAudio::default(),
            notes: hits,
        },
        report,
    }
}
