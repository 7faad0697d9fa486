use rotalog::config::parse_duration;
use rotalog::{Config, Level, Period, Stream};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn empty_config_uses_defaults() {
    let config: Config = "".parse().unwrap();
    assert_eq!(config.level().unwrap(), Level::Info);
    assert_eq!(config.internal_level(), Level::Warn);
    assert!(config.file.enabled);
    assert!(!config.stream.enabled);
    assert_eq!(config.period(), Period::Day);
    assert_eq!(config.expire().unwrap(), Duration::from_secs(7 * 24 * 3600));
    assert_eq!(config.mirror().unwrap(), Some(Stream::Stderr));
}

#[test]
fn per_transport_levels_fall_back_to_general() {
    let config: Config = r#"
[general]
level = "debug"

[stream]
enabled = true
target = "stdout"
level = "error"
"#
    .parse()
    .unwrap();

    assert_eq!(config.file_level().unwrap(), Level::Debug);
    assert_eq!(config.stream_level().unwrap(), Level::Error);
    assert_eq!(config.stream.target.parse::<Stream>().unwrap(), Stream::Stdout);
}

#[test]
fn file_options_follow_config() {
    let config: Config = r#"
[file]
dir = "/srv/logs"
name = "api"
extension = "txt"
period = "hour"
expire = "12h"
"#
    .parse()
    .unwrap();

    let options = config.file_options().unwrap();
    assert_eq!(options.dir, std::path::Path::new("/srv/logs"));
    assert_eq!(options.name, "api");
    assert_eq!(options.extension, ".txt");
    assert_eq!(options.period, Period::Hour);
    assert_eq!(options.expire, Duration::from_secs(12 * 3600));
}

#[test]
fn unknown_period_disables_rotation() {
    let config: Config = "[file]\nperiod = \"dialy\"".parse().unwrap();
    assert_eq!(Period::from_name(&config.file.period), None);
    assert_eq!(config.period(), Period::None);

    let config: Config = "[file]\nperiod = \"none\"".parse().unwrap();
    assert_eq!(Period::from_name(&config.file.period), Some(Period::None));
    assert_eq!(config.period(), Period::None);
}

#[test]
fn invalid_values_are_errors() {
    let config: Config = "[general]\nlevel = \"loud\"".parse().unwrap();
    assert!(config.level().is_err());

    let config: Config = "[file]\nexpire = \"soon\"".parse().unwrap();
    assert!(config.expire().is_err());

    let config: Config = "[file]\nmirror = \"printer\"".parse().unwrap();
    assert!(config.mirror().is_err());

    assert!("[general".parse::<Config>().is_err());
}

#[test]
fn mirror_can_be_disabled() {
    let config: Config = "[file]\nmirror = \"none\"".parse().unwrap();
    assert_eq!(config.mirror().unwrap(), None);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.general.level, "info");
}

#[test]
fn load_from_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rotalog.toml");
    std::fs::write(&path, "[general]\nlevel = \"trace\"\n").unwrap();
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.level().unwrap(), Level::Trace);
}

#[test]
fn durations() {
    assert_eq!(parse_duration("").unwrap(), Duration::ZERO);
    assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    assert_eq!(parse_duration("90").unwrap(), Duration::from_secs(90));
    assert_eq!(parse_duration("30m").unwrap(), Duration::from_secs(1800));
    assert_eq!(parse_duration("2H").unwrap(), Duration::from_secs(7200));
    assert_eq!(parse_duration("7d").unwrap(), Duration::from_secs(604_800));
    assert_eq!(parse_duration("1w").unwrap(), Duration::from_secs(604_800));
    assert!(parse_duration("d").is_err());
    assert!(parse_duration("5y").is_err());
}
