use serde::{Deserialize, Serialize};
use clap::{builder::BoolishValueParser, ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::weather::ambient::Barometer;

pub const DEFAULT_REFRESH_MINS: u64 = 15;
pub const DEFAULT_FORECAST_DAYS: u32 = 5;
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_IMAGE: &str = "display.png";
pub const DEFAULT_ASSETS: &str = "assets/icons";

const LOG_LEVELS: [&str; 5] = ["critical", "error", "warn", "info", "debug"];

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Top-level app configuration.
///
/// Every field is optional so a YAML file, the environment and the command
/// line can each be layered over the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// critical | error | warn | info | debug
    pub log_level: Option<String>,
    /// keep refreshing until signalled, else one cycle and exit
    pub daemon: Option<bool>,
    pub refresh_mins: Option<u64>,
    pub forecast_days: Option<u32>,
    /// fetch outdoor PM2.5 for the primary source's coordinates
    pub air_quality: Option<bool>,
    /// shown in the header and QR link instead of the detected address
    pub host_address: Option<String>,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    pub ambient: Option<AmbientConfig>,
    pub display: Option<DisplayConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: Some("info".to_string()),
            daemon: Some(false),
            refresh_mins: Some(DEFAULT_REFRESH_MINS),
            forecast_days: Some(DEFAULT_FORECAST_DAYS),
            air_quality: Some(false),
            host_address: None,
            openweathermap: Some(OpenWeatherMapConfig::default()),
            ambient: None,
            display: Some(DisplayConfig::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpenWeatherMapConfig {
    pub api_key: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Default for OpenWeatherMapConfig {
    fn default() -> Self {
        OpenWeatherMapConfig { api_key: None, zip_code: None, country: Some("us".to_string()) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AmbientConfig {
    pub api_key: Option<String>,
    pub app_key: Option<String>,
    pub device_mac: Option<String>,
    pub barometer: Option<Barometer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub driver: Option<DriverKind>, // <- strongly-typed driver selection
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub invert: Option<bool>,
    /// PNG written after every refresh, also the target of the `file` driver
    pub image_path: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub font_file: Option<PathBuf>,
    pub bus: Option<SpiConfig>,     // <- panel wiring
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            driver: Some(DriverKind::File),
            width: Some(DEFAULT_WIDTH),
            height: Some(DEFAULT_HEIGHT),
            invert: Some(false),
            image_path: Some(PathBuf::from(DEFAULT_IMAGE)),
            assets_dir: Some(PathBuf::from(DEFAULT_ASSETS)),
            font_file: None,
            bus: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpiConfig {
    pub bus: String,        // e.g. "/dev/spidev0.0"
    pub speed_hz: Option<u32>,
    pub dc_pin: u64,        // sysfs GPIO numbers
    pub rst_pin: u64,
    pub busy_pin: u64,
}

impl Default for SpiConfig {
    /// Waveshare e-Paper HAT wiring on a Raspberry Pi
    fn default() -> Self {
        SpiConfig {
            bus: "/dev/spidev0.0".to_string(),
            speed_hz: Some(4_000_000),
            dc_pin: 25,
            rst_pin: 17,
            busy_pin: 24,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// PNG only
    File,
    /// Waveshare 7.5" V2, 800x480
    Epd7in5,
}

impl std::str::FromStr for DriverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(DriverKind::File),
            "epd7in5" => Ok(DriverKind::Epd7in5),
            other => Err(format!("unknown display driver '{other}' (file|epd7in5)")),
        }
    }
}

/// Resolved view used by the rest of the program. Only built from a
/// validated `Config`, so the accessors fall back to defaults silently.
impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// `env_logger` filter for the configured level.
    pub fn log_filter(&self) -> &str {
        match self.log_level() {
            "critical" => "error",
            other => other,
        }
    }

    pub fn daemon(&self) -> bool {
        self.daemon.unwrap_or(false)
    }

    pub fn refresh_mins(&self) -> u64 {
        self.refresh_mins.unwrap_or(DEFAULT_REFRESH_MINS)
    }

    pub fn forecast_days(&self) -> u32 {
        self.forecast_days.unwrap_or(DEFAULT_FORECAST_DAYS)
    }

    pub fn air_quality(&self) -> bool {
        self.air_quality.unwrap_or(false)
    }

    pub fn display(&self) -> DisplayConfig {
        let mut d = DisplayConfig::default();
        if let Some(src) = self.display.clone() {
            merge_display(&mut d, src);
        }
        d
    }
}

impl DisplayConfig {
    pub fn driver(&self) -> DriverKind {
        self.driver.unwrap_or(DriverKind::File)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width.unwrap_or(DEFAULT_WIDTH), self.height.unwrap_or(DEFAULT_HEIGHT))
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS))
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
/// Credentials and schedule are also read from the environment.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "wxpaper", version, about = "Weather forecast on an e-paper display")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long, env = "WXPAPER_LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Keep refreshing on the schedule
    #[arg(long, env = "WXPAPER_DAEMON", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub daemon: Option<bool>,
    #[arg(long, env = "WXPAPER_REFRESH_MINS")]
    pub refresh_mins: Option<u64>,
    #[arg(long)]
    pub forecast_days: Option<u32>,
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub air_quality: Option<bool>,
    #[arg(long)]
    pub host_address: Option<String>,
    #[arg(long, env = "OPEN_WEATHER_MAP_API_KEY", hide_env_values = true)]
    pub owm_api_key: Option<String>,
    #[arg(long, env = "WEATHER_ZIP_CODE")]
    pub zip_code: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long, env = "AMBIENT_API_KEY", hide_env_values = true)]
    pub ambient_api_key: Option<String>,
    #[arg(long, env = "AMBIENT_APP_KEY", hide_env_values = true)]
    pub ambient_app_key: Option<String>,
    #[arg(long, env = "AMBIENT_DEVICE_MAC")]
    pub ambient_device_mac: Option<String>,
    /// file | epd7in5
    #[arg(long)]
    pub display_driver: Option<DriverKind>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub display_invert: Option<bool>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub image_path: Option<PathBuf>,
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub assets_dir: Option<PathBuf>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub font_file: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
///
/// Returns the config and whether `--dump-config` was requested.
pub fn load() -> Result<(Config, bool), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;
    Ok((cfg, cli.dump_config))
}

/// Layer defaults, YAML and `cli` then validate.
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

    // 3) CLI / environment overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Pretty YAML of the effective config, credentials masked.
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    let mut masked = cfg.clone();
    let mask = |v: &mut Option<String>| if v.is_some() { *v = Some("********".to_string()) };
    if let Some(o) = masked.openweathermap.as_mut() {
        mask(&mut o.api_key);
    }
    if let Some(a) = masked.ambient.as_mut() {
        mask(&mut a.api_key);
        mask(&mut a.app_key);
    }
    Ok(serde_yaml::to_string(&masked)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/wxpaper/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/wxpaper/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/wxpaper.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["wxpaper.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

/// Parse a YAML document; absent keys stay unset so they do not mask
/// defaults on merge.
pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Raw {
        log_level: Option<String>,
        daemon: Option<bool>,
        refresh_mins: Option<u64>,
        forecast_days: Option<u32>,
        air_quality: Option<bool>,
        host_address: Option<String>,
        openweathermap: Option<OpenWeatherMapConfig>,
        ambient: Option<AmbientConfig>,
        display: Option<RawDisplay>,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct RawDisplay {
        driver: Option<DriverKind>,
        width: Option<u32>,
        height: Option<u32>,
        invert: Option<bool>,
        image_path: Option<PathBuf>,
        assets_dir: Option<PathBuf>,
        font_file: Option<PathBuf>,
        bus: Option<SpiConfig>,
    }

    let raw: Raw = serde_yaml::from_str(s)?;
    Ok(Config {
        log_level: raw.log_level,
        daemon: raw.daemon,
        refresh_mins: raw.refresh_mins,
        forecast_days: raw.forecast_days,
        air_quality: raw.air_quality,
        host_address: raw.host_address,
        openweathermap: raw.openweathermap,
        ambient: raw.ambient,
        display: raw.display.map(|d| DisplayConfig {
            driver: d.driver,
            width: d.width,
            height: d.height,
            invert: d.invert,
            image_path: d.image_path,
            assets_dir: d.assets_dir,
            font_file: d.font_file,
            bus: d.bus,
        }),
    })
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    if src.daemon.is_some()         { dst.daemon = src.daemon; }
    if src.refresh_mins.is_some()   { dst.refresh_mins = src.refresh_mins; }
    if src.forecast_days.is_some()  { dst.forecast_days = src.forecast_days; }
    if src.air_quality.is_some()    { dst.air_quality = src.air_quality; }
    if src.host_address.is_some()   { dst.host_address = src.host_address; }
    // providers
    match (&mut dst.openweathermap, src.openweathermap) {
        (None, Some(c)) => dst.openweathermap = Some(c),
        (Some(d), Some(s)) => {
            if s.api_key.is_some()  { d.api_key = s.api_key; }
            if s.zip_code.is_some() { d.zip_code = s.zip_code; }
            if s.country.is_some()  { d.country = s.country; }
        }
        _ => {}
    }
    match (&mut dst.ambient, src.ambient) {
        (None, Some(c)) => dst.ambient = Some(c),
        (Some(d), Some(s)) => {
            if s.api_key.is_some()    { d.api_key = s.api_key; }
            if s.app_key.is_some()    { d.app_key = s.app_key; }
            if s.device_mac.is_some() { d.device_mac = s.device_mac; }
            if s.barometer.is_some()  { d.barometer = s.barometer; }
        }
        _ => {}
    }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.driver.is_some()      { dst.driver = src.driver; }
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.invert.is_some()      { dst.invert = src.invert; }
    if src.image_path.is_some()  { dst.image_path = src.image_path; }
    if src.assets_dir.is_some()  { dst.assets_dir = src.assets_dir; }
    if src.font_file.is_some()   { dst.font_file = src.font_file; }
    if src.bus.is_some()         { dst.bus = src.bus; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()     { cfg.log_level = cli.log_level.clone(); }
    if cli.daemon.is_some()        { cfg.daemon = cli.daemon; }
    if cli.refresh_mins.is_some()  { cfg.refresh_mins = cli.refresh_mins; }
    if cli.forecast_days.is_some() { cfg.forecast_days = cli.forecast_days; }
    if cli.air_quality.is_some()   { cfg.air_quality = cli.air_quality; }
    if cli.host_address.is_some()  { cfg.host_address = cli.host_address.clone(); }

    let owm = cfg.openweathermap.get_or_insert_with(OpenWeatherMapConfig::default);
    if cli.owm_api_key.is_some() { owm.api_key = cli.owm_api_key.clone(); }
    if cli.zip_code.is_some()    { owm.zip_code = cli.zip_code.clone(); }
    if cli.country.is_some()     { owm.country = cli.country.clone(); }

    let any_ambient = cli.ambient_api_key.is_some()
        || cli.ambient_app_key.is_some()
        || cli.ambient_device_mac.is_some();
    if any_ambient && cfg.ambient.is_none() {
        cfg.ambient = Some(AmbientConfig::default());
    }
    if let Some(ambient) = cfg.ambient.as_mut() {
        if cli.ambient_api_key.is_some()    { ambient.api_key = cli.ambient_api_key.clone(); }
        if cli.ambient_app_key.is_some()    { ambient.app_key = cli.ambient_app_key.clone(); }
        if cli.ambient_device_mac.is_some() { ambient.device_mac = cli.ambient_device_mac.clone(); }
    }

    let display = cfg.display.get_or_insert_with(DisplayConfig::default);
    if cli.display_driver.is_some() { display.driver = cli.display_driver; }
    if cli.display_width.is_some()  { display.width = cli.display_width; }
    if cli.display_height.is_some() { display.height = cli.display_height; }
    if cli.display_invert.is_some() { display.invert = cli.display_invert; }
    if cli.image_path.is_some()     { display.image_path = cli.image_path.clone(); }
    if cli.assets_dir.is_some()     { display.assets_dir = cli.assets_dir.clone(); }
    if cli.font_file.is_some()      { display.font_file = cli.font_file.clone(); }
}

fn present(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        if !LOG_LEVELS.contains(&level) {
            return Err(ConfigError::Validation(format!(
                "log_level must be one of {}", LOG_LEVELS.join("|")
            )));
        }
    }
    if cfg.refresh_mins == Some(0) {
        return Err(ConfigError::Validation("refresh_mins must be > 0".into()));
    }
    if let Some(days) = cfg.forecast_days {
        if !(1..=5).contains(&days) {
            return Err(ConfigError::Validation("forecast_days must be 1..=5".into()));
        }
    }

    let owm = cfg.openweathermap.as_ref();
    if !owm.is_some_and(|o| present(&o.api_key)) {
        return Err(ConfigError::MissingCredential("OPEN_WEATHER_MAP_API_KEY"));
    }
    if !owm.is_some_and(|o| present(&o.zip_code)) {
        return Err(ConfigError::MissingCredential("WEATHER_ZIP_CODE"));
    }
    if let Some(ambient) = cfg.ambient.as_ref() {
        if !present(&ambient.api_key) {
            return Err(ConfigError::MissingCredential("AMBIENT_API_KEY"));
        }
        if !present(&ambient.app_key) {
            return Err(ConfigError::MissingCredential("AMBIENT_APP_KEY"));
        }
        if !present(&ambient.device_mac) {
            return Err(ConfigError::MissingCredential("AMBIENT_DEVICE_MAC"));
        }
    }

    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if display.driver == Some(DriverKind::File) && display.image_path.is_none() {
            return Err(ConfigError::Validation("file driver needs display.image_path".into()));
        }
        if display.driver == Some(DriverKind::Epd7in5) {
            let (w, h) = (display.width.unwrap_or(DEFAULT_WIDTH), display.height.unwrap_or(DEFAULT_HEIGHT));
            if (w, h) != (DEFAULT_WIDTH, DEFAULT_HEIGHT) {
                return Err(ConfigError::Validation("epd7in5 panel is 800x480".into()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_credentials() -> Config {
        let mut cfg = Config::default();
        cfg.openweathermap = Some(OpenWeatherMapConfig {
            api_key: Some("k".into()),
            zip_code: Some("98223".into()),
            country: Some("us".into()),
        });
        cfg
    }

    #[test]
    fn test_defaults() {
        let cfg = with_credentials();
        validate(&cfg).unwrap();
        assert_eq!(cfg.refresh_mins(), 15);
        assert_eq!(cfg.forecast_days(), 5);
        assert_eq!(cfg.display().dimensions(), (800, 480));
        assert_eq!(cfg.display().driver(), DriverKind::File);
        assert!(!cfg.daemon());
    }

    #[test]
    fn test_missing_api_key() {
        let cfg = Config::default();
        assert!(matches!(validate(&cfg), Err(ConfigError::MissingCredential("OPEN_WEATHER_MAP_API_KEY"))));
    }

    #[test]
    fn test_incomplete_ambient_block() {
        let mut cfg = with_credentials();
        cfg.ambient = Some(AmbientConfig { api_key: Some("a".into()), ..Default::default() });
        assert!(matches!(validate(&cfg), Err(ConfigError::MissingCredential("AMBIENT_APP_KEY"))));
    }

    #[test]
    fn test_log_level_critical_maps_to_error() {
        let mut cfg = with_credentials();
        cfg.log_level = Some("critical".into());
        validate(&cfg).unwrap();
        assert_eq!(cfg.log_filter(), "error");

        cfg.log_level = Some("verbose".into());
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_yaml_merges_over_defaults() {
        let yaml = r#"
refresh_mins: 30
openweathermap:
  api_key: abc
  zip_code: "98223"
ambient:
  api_key: a
  app_key: b
  device_mac: "00:11:22:33:44:55"
  barometer: absolute
display:
  driver: epd7in5
  invert: true
"#;
        let mut cfg = Config::default();
        merge(&mut cfg, parse_yaml(yaml).unwrap());
        validate(&cfg).unwrap();
        assert_eq!(cfg.refresh_mins(), 30);
        assert_eq!(cfg.forecast_days(), 5);
        let d = cfg.display();
        assert_eq!(d.driver(), DriverKind::Epd7in5);
        assert_eq!(d.invert, Some(true));
        assert_eq!(d.image_path, Some(PathBuf::from(DEFAULT_IMAGE)));
        assert_eq!(cfg.openweathermap.unwrap().country.as_deref(), Some("us"));
        assert_eq!(cfg.ambient.unwrap().barometer, Some(Barometer::Absolute));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_yaml("refresh_minutes: 5\n").is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wx.yaml");
        fs::write(&path, "refresh_mins: 30\nopenweathermap:\n  api_key: yaml\n  zip_code: \"10001\"\n").unwrap();

        let cli = Cli {
            config: Some(path),
            refresh_mins: Some(5),
            owm_api_key: Some("cli".into()),
            ..Default::default()
        };
        let cfg = load_from(&cli).unwrap();
        assert_eq!(cfg.refresh_mins(), 5);
        let owm = cfg.openweathermap.unwrap();
        assert_eq!(owm.api_key.as_deref(), Some("cli"));
        assert_eq!(owm.zip_code.as_deref(), Some("10001"));
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli { config: Some(PathBuf::from("/nonexistent/wx.yaml")), ..Default::default() };
        assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_epd_size_fixed() {
        let mut cfg = with_credentials();
        let d = cfg.display.as_mut().unwrap();
        d.driver = Some(DriverKind::Epd7in5);
        d.width = Some(640);
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_dump_masks_keys() {
        let s = dump(&with_credentials()).unwrap();
        assert!(s.contains("********"));
        assert!(!s.contains("api_key: k"));
    }

    #[test]
    fn test_boolish_flags() {
        let cli = Cli::try_parse_from(["wxpaper", "--daemon", "1", "--air-quality", "yes", "--display-invert", "off"]).unwrap();
        assert_eq!(cli.daemon, Some(true));
        assert_eq!(cli.air_quality, Some(true));
        assert_eq!(cli.display_invert, Some(false));

        let cli = Cli::try_parse_from(["wxpaper", "--daemon", "false"]).unwrap();
        assert_eq!(cli.daemon, Some(false));
        assert!(Cli::try_parse_from(["wxpaper", "--daemon", "maybe"]).is_err());
    }

    #[test]
    fn test_driver_from_str() {
        assert_eq!("EPD7in5".parse::<DriverKind>().unwrap(), DriverKind::Epd7in5);
        assert!("ssd1306".parse::<DriverKind>().is_err());
    }
}
