use clap::Parser;
use std::path::PathBuf;

/// General MIDI percussion channel (channel 10, zero-based).
pub const DEFAULT_DRUM_CHANNEL: u8 = 9;
pub const DEFAULT_BPM: u32 = 120;
pub const DEFAULT_CHART_DIR: &str = "assets/charts";

#[derive(Parser, Debug)]
#[command(
    name = "convert",
    about = "Convert a MIDI drum performance into a rhythm-game chart!"
)]
pub struct Args {
    /// Path to the input MIDI file.
    pub input: PathBuf,

    /// Where to write the chart JSON. Defaults to `assets/charts/<input name>.json`.
    pub output: Option<PathBuf>,

    /// Force the drum channel (0-15) instead of detecting it.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=15))]
    pub channel: Option<u8>,

    /// Dry run (preview the first dry_run_max hits and exit without writing).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Maximum hits to print in dry run.
    #[arg(long, default_value_t = 80)]
    pub dry_run_max: usize,

    /// Print the chart JSON to stdout instead of writing a file.
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Prints extra information to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            force_channel: self.channel,
            ..ConvertConfig::default()
        }
    }
}

/// Knobs for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Skips channel detection entirely when set.
    pub force_channel: Option<u8>,
    /// Used when no channel carries a recognised drum note.
    pub default_channel: u8,
    /// Used when the file has no tempo event.
    pub default_bpm: u32,
    /// Directory for charts when no output path is given.
    pub chart_dir: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            force_channel: None,
            default_channel: DEFAULT_DRUM_CHANNEL,
            default_bpm: DEFAULT_BPM,
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn output_path_and_channel_are_distinct() {
        let args = Args::try_parse_from(["convert", "song.mid", "--channel", "3", "out.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("song.mid"));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.channel, Some(3));

        // An output file literally named like the channel value is still an output path.
        let args = Args::try_parse_from(["convert", "song.mid", "3", "--channel", "3"]).unwrap();
        assert_eq!(args.output, Some(PathBuf::from("3")));
        assert_eq!(args.to_config().force_channel, Some(3));
    }

    #[test]
    fn channel_out_of_range() {
        assert!(Args::try_parse_from(["convert", "song.mid", "--channel", "16"]).is_err());
        assert!(Args::try_parse_from(["convert", "song.mid", "--channel", "x"]).is_err());
    }

    #[test]
    fn input_is_required() {
        assert!(Args::try_parse_from(["convert"]).is_err());
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["convert", "song.mid"]).unwrap();
        let config = args.to_config();
        assert_eq!(config, ConvertConfig::default());
        assert_eq!(config.default_channel, 9);
        assert_eq!(config.default_bpm, 120);
        assert_eq!(config.chart_dir, PathBuf::from("assets/charts"));
    }
}
