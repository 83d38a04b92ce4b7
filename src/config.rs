use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::digit_font::{DEFAULT_DIGIT_HEIGHT, DEFAULT_DIGIT_WIDTH};
use crate::display::framebuffer::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::timefmt::ClockStyle;

/// Config loading/validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub clock: Option<ClockConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClockConfig {
    pub style: Option<ClockStyle>,  // "12h" | "24h"
    pub show_date: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub invert: Option<bool>,
    pub digit_width: Option<u32>,   // one digit cell, a quarter of the grid
    pub digit_height: Option<u32>,
}

impl Config {
    pub fn style(&self) -> ClockStyle {
        self.clock.as_ref().and_then(|c| c.style).unwrap_or_default()
    }

    pub fn show_date(&self) -> bool {
        self.clock.as_ref().and_then(|c| c.show_date).unwrap_or(true)
    }

    pub fn display_size(&self) -> (u32, u32) {
        let d = self.display.as_ref();
        (
            d.and_then(|d| d.width).unwrap_or(DEFAULT_WIDTH),
            d.and_then(|d| d.height).unwrap_or(DEFAULT_HEIGHT),
        )
    }

    pub fn digit_size(&self) -> (u32, u32) {
        let d = self.display.as_ref();
        (
            d.and_then(|d| d.digit_width).unwrap_or(DEFAULT_DIGIT_WIDTH),
            d.and_then(|d| d.digit_height).unwrap_or(DEFAULT_DIGIT_HEIGHT),
        )
    }

    pub fn invert(&self) -> bool {
        self.display.as_ref().and_then(|d| d.invert).unwrap_or(false)
    }
}

/// CLI overrides. Config fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "bigtime", version, about = "Large digit clock face")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(short = 'c', long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Enable debug log level
    #[arg(short = 'v', long = "debug", alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    /// Hour style
    #[arg(short = 's', long, value_enum)]
    pub style: Option<ClockStyle>,
    /// Hide the date label
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_date: bool,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long, action = ArgAction::Set)]
    pub display_invert: Option<bool>,
    /// Exit after this many minute ticks
    #[arg(long)]
    pub ticks: Option<u64>,
    /// Rewrite a PBM snapshot after every render
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,
    /// Print each frame to stdout
    #[arg(long, action = ArgAction::SetTrue)]
    pub ascii: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Read YAML (explicit path or search), layer CLI overrides, validate.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of the effective config
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/bigtime/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/bigtime/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/bigtime.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["bigtime.yaml", "config.yaml", "config/bigtime.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.clock, src.clock) {
        (None, Some(c)) => dst.clock = Some(c),
        (Some(d), Some(s)) => merge_clock(d, s),
        _ => {}
    }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_clock(dst: &mut ClockConfig, src: ClockConfig) {
    if src.style.is_some()      { dst.style = src.style; }
    if src.show_date.is_some()  { dst.show_date = src.show_date; }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()        { dst.width = src.width; }
    if src.height.is_some()       { dst.height = src.height; }
    if src.invert.is_some()       { dst.invert = src.invert; }
    if src.digit_width.is_some()  { dst.digit_width = src.digit_width; }
    if src.digit_height.is_some() { dst.digit_height = src.digit_height; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.debug { cfg.log_level = Some("debug".into()); }

    if cli.style.is_some() || cli.no_date {
        let clock = cfg.clock.get_or_insert_with(ClockConfig::default);
        if cli.style.is_some() { clock.style = cli.style; }
        if cli.no_date         { clock.show_date = Some(false); }
    }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_invert.is_some();
    if any_display {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.display_width.is_some()  { display.width = cli.display_width; }
        if cli.display_height.is_some() { display.height = cli.display_height; }
        if cli.display_invert.is_some() { display.invert = cli.display_invert; }
    }
}

/// Sizes must leave room for the 2x2 digit grid
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let (w, h) = cfg.display_size();
    if w == 0 || h == 0 {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    let (dw, dh) = cfg.digit_size();
    if dw < 8 || dh < 8 {
        return Err(ConfigError::Validation("digit_width/digit_height must be >= 8".into()));
    }
    if dw.saturating_mul(2) > w || dh.saturating_mul(2) > h {
        return Err(ConfigError::Validation(format!(
            "2x2 grid of {}x{} digits does not fit a {}x{} display", dw, dh, w, h
        )));
    }
    if let Some(level) = cfg.log_level.as_deref() {
        if level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!("unknown log_level '{}'", level)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.style(), ClockStyle::TwelveHour);
        assert!(cfg.show_date());
        assert_eq!(cfg.display_size(), (144, 168));
        assert_eq!(cfg.digit_size(), (72, 84));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_yaml_then_cli_precedence() {
        let mut cfg = Config::default();
        let yaml = parse_yaml(
            "log_level: warn\nclock:\n  style: 24h\ndisplay:\n  width: 200\n  height: 200\n",
        ).unwrap();
        merge(&mut cfg, yaml);
        assert_eq!(cfg.style(), ClockStyle::TwentyFourHour);
        assert_eq!(cfg.display_size(), (200, 200));

        let cli = Cli {
            style: Some(ClockStyle::TwelveHour),
            no_date: true,
            display_width: Some(150),
            debug: true,
            ..Default::default()
        };
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.style(), ClockStyle::TwelveHour);
        assert!(!cfg.show_date());
        assert_eq!(cfg.display_size(), (150, 200));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_grid_must_fit() {
        let cfg = parse_yaml("display:\n  width: 100\n").unwrap();
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_bad_log_level() {
        let cfg = parse_yaml("log_level: loud\n").unwrap();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_unknown_style_is_yaml_error() {
        assert!(matches!(parse_yaml("clock:\n  style: 13h\n"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/bigtime.yaml")),
            ..Default::default()
        };
        assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));
    }
}
