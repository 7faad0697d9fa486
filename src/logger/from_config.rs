//! Logger configuration from rotalog config files.

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::internal;

impl LoggerBuilder {
    /// A builder pre-loaded with the transports `config` enables.
    ///
    /// # Errors
    /// Unknown level or stream names and unparseable durations. Directory
    /// problems surface later, from `build`.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        internal::debug("LOGGER", &format!("Log level: {}", config.general.level));

        let mut builder = Self::new()
            .level(config.level()?)
            .report_caller(config.general.report_caller);
        let mut outputs: Vec<&str> = Vec::new();

        if config.file.enabled {
            builder = Self::configure_file(builder, config)?;
            outputs.push("file");
        }

        if config.stream.enabled {
            builder = builder
                .stream(config.stream.target.parse()?)
                .level(config.stream_level()?)
                .timestamp_format(&config.format.timestamp_format)
                .done();
            outputs.push("stream");
        }

        if outputs.is_empty() {
            internal::warn("LOGGER", "No transports enabled");
        } else {
            internal::debug(
                "LOGGER",
                &format!("Transports enabled: [{}]", outputs.join(", ")),
            );
        }

        Ok(builder)
    }

    fn configure_file(builder: Self, config: &Config) -> Result<Self, crate::Error> {
        let options = config.file_options()?;
        internal::debug(
            "FILE",
            &format!(
                "Dir: {}, name: {}, period: {}, expire: {:?}",
                options.dir.display(),
                options.name,
                options.period,
                options.expire
            ),
        );

        let mut file = builder
            .file(options.dir, options.name)
            .extension(&options.extension)
            .period(options.period)
            .expire(options.expire)
            .level(config.file_level()?)
            .timestamp_format(&config.format.timestamp_format);

        if let Some(stream) = config.mirror()? {
            file = file.mirror(stream);
        }

        Ok(file.done())
    }
}

impl Logger {
    /// Builds a logger from the default config file.
    ///
    /// # Errors
    /// Config loading failures and any error from [`Logger::from_config_with`].
    pub fn from_config() -> Result<Self, crate::Error> {
        let config = Config::load()?;
        Self::from_config_with(&config)
    }

    /// Builds a logger from a given config, failing fast on anything invalid.
    ///
    /// # Errors
    /// Invalid levels, streams or durations, and log directories that can't be created.
    pub fn from_config_with(config: &Config) -> Result<Self, crate::Error> {
        LoggerBuilder::from_config(config)?.build()
    }
}
