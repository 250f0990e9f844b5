// crates/actionscope-ui/src/cli.rs
//
// Command-line surface. Flags override the config file, which overrides the
// built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use actionscope_core::config::DashboardConfig;
use actionscope_core::histogram::{HistogramMode, DEFAULT_BINS, DEFAULT_WIDTH};

use crate::paths::DEFAULT_CONFIG_FILE;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Equal-count bins, one bar per recording side by side.
    Grouped,
    /// Fixed-width buckets, recordings stacked.
    Stacked,
}

#[derive(Debug, Parser)]
#[command(name = "actionscope", version, about = "Histogram dashboard for recorded action data")]
pub struct Cli {
    /// TOML config file [default: ./actionscope.toml when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Action catalog CSV (id,action)
    #[arg(long, value_name = "FILE")]
    pub actions: Option<PathBuf>,

    /// Directory of recording CSVs
    #[arg(long, value_name = "DIR")]
    pub recordings: Option<PathBuf>,

    /// Sample clip played for bucket clicks
    #[arg(long, value_name = "FILE")]
    pub video: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Bin count for --mode grouped
    #[arg(long, requires = "mode")]
    pub bins: Option<usize>,

    /// Bucket width for --mode stacked
    #[arg(long, requires = "mode")]
    pub width: Option<f64>,

    /// Hide the selection panel and disable bar clicks
    #[arg(long)]
    pub no_click: bool,
}

impl Cli {
    /// Resolve the final config: file (explicit, or the default one when it
    /// exists) then flag overrides, then validation.
    pub fn into_config(self) -> anyhow::Result<DashboardConfig> {
        let mut cfg = match &self.config {
            Some(path) => load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load(Path::new(DEFAULT_CONFIG_FILE))?,
            None => DashboardConfig::default(),
        };
        self.apply(&mut cfg);
        cfg.validate().context("invalid command-line options")?;
        Ok(cfg)
    }

    fn apply(self, cfg: &mut DashboardConfig) {
        if let Some(p) = self.actions    { cfg.actions_path   = p; }
        if let Some(p) = self.recordings { cfg.recordings_dir = p; }
        if let Some(p) = self.video      { cfg.video_path     = p; }
        match self.mode {
            Some(ModeArg::Grouped) => {
                cfg.histogram = HistogramMode::GroupedCount { bins: self.bins.unwrap_or(DEFAULT_BINS) };
            }
            Some(ModeArg::Stacked) => {
                cfg.histogram = HistogramMode::StackedWidth { width: self.width.unwrap_or(DEFAULT_WIDTH) };
            }
            None => {}
        }
        if self.no_click {
            cfg.click_select = false;
        }
    }
}

fn load(path: &Path) -> anyhow::Result<DashboardConfig> {
    DashboardConfig::load(path).with_context(|| format!("reading config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("actionscope").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let mut cfg = DashboardConfig::default();
        parse(&["--recordings", "data", "--mode", "grouped", "--bins", "8", "--no-click"]).apply(&mut cfg);
        assert_eq!(cfg.recordings_dir, PathBuf::from("data"));
        assert_eq!(cfg.histogram, HistogramMode::GroupedCount { bins: 8 });
        assert!(!cfg.click_select);
        assert_eq!(cfg.actions_path, PathBuf::from("actions.csv"));
    }

    #[test]
    fn stacked_without_width_uses_default() {
        let mut cfg = DashboardConfig { histogram: HistogramMode::grouped(), ..Default::default() };
        parse(&["--mode", "stacked"]).apply(&mut cfg);
        assert_eq!(cfg.histogram, HistogramMode::StackedWidth { width: DEFAULT_WIDTH });
    }

    #[test]
    fn bins_requires_mode() {
        assert!(Cli::try_parse_from(["actionscope", "--bins", "3"]).is_err());
    }

    #[test]
    fn explicit_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scope.toml");
        std::fs::write(&path, "video_path = \"clip.mp4\"\nclick_select = false\n").unwrap();

        let cfg = parse(&["--config", path.to_str().unwrap(), "--video", "other.mp4"])
            .into_config()
            .unwrap();
        assert_eq!(cfg.video_path, PathBuf::from("other.mp4"));
        assert!(!cfg.click_select);
    }

    #[test]
    fn zero_width_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();
        let err = parse(&["--config", path.to_str().unwrap(), "--mode", "stacked", "--width", "0"])
            .into_config();
        assert!(err.is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(parse(&["--config", "/nonexistent/actionscope.toml"]).into_config().is_err());
    }
}
