use DRUM_CHART::{Args, chart_to_json, convert_midi_file, default_output_path, lane_label, write_chart};
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = args.to_config();

    info!("Reading MIDI file: '{}'...", args.input.display());
    let conversion = convert_midi_file(&args.input, &config)
        .with_context(|| format!("Failed to convert '{}'", args.input.display()))?;
    debug!("Report: {}", serde_json::to_string(&conversion.report)?);

    let chart = &conversion.chart;

    if args.dry_run {
        info!("Previewing at most {} hits..!", args.dry_run_max);
        for (i, hit) in chart.notes.iter().take(args.dry_run_max).enumerate() {
            info!(
                "Hit {}: time={:.3}s lane={} ({}) midi={} velocity={}",
                i,
                hit.time,
                hit.lane,
                lane_label(hit.lane).unwrap_or("<unknown>"),
                hit.midi_note,
                hit.velocity
            );
        }
        return Ok(());
    }

    if args.stdout {
        println!("{}", chart_to_json(chart)?);
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &config.chart_dir));
    write_chart(chart, &output)?;

    let shown = std::path::absolute(&output).unwrap_or(output);
    info!("Saved to: {}", shown.display());
    info!("Summary: {} notes converted..!", chart.notes.len());

    Ok(())
}
