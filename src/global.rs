//! The process-wide default logger.
//!
//! Lifecycle: the first call to [`logger`] installs a stderr transport at
//! `Info`; [`init`] or [`reset`] swap in configured transports; [`close`]
//! detaches and closes them, after which logging through the default logger
//! is a no-op until the next `reset`. The `Logger` itself is never replaced,
//! so references handed out earlier stay valid.

use crate::config::Config;
use crate::level::Level;
use crate::logger::{Logger, LoggerBuilder};
use crate::mux::Multiplexer;
use crate::transport::{SinkTransport, Stream, StreamSink, Transport};
use std::sync::{Arc, OnceLock};

static DEFAULT: OnceLock<Logger> = OnceLock::new();

/// The single accessor for the default logger.
pub fn logger() -> &'static Logger {
    DEFAULT.get_or_init(|| {
        let stderr: Arc<dyn Transport> =
            Arc::new(SinkTransport::new(StreamSink::new(Stream::Stderr), Level::Info));
        Logger::new(Arc::new(Multiplexer::new(vec![stderr])))
    })
}

/// Replaces the default logger's transports.
pub fn reset(transports: Vec<Arc<dyn Transport>>) {
    logger().reset(transports);
}

/// Builds transports from `config` and installs them on the default logger.
/// On error the current transports stay in place.
///
/// # Errors
/// Anything [`LoggerBuilder::from_config`] or transport construction rejects.
pub fn init(config: &Config) -> Result<(), crate::Error> {
    let transports = LoggerBuilder::from_config(config)?.build_transports()?;
    let logger = logger();
    logger.set_report_caller(config.general.report_caller);
    logger.reset(transports);
    Ok(())
}

/// Closes the default logger's transports.
///
/// # Errors
/// The first transport close failure.
pub fn close() -> Result<(), crate::Error> {
    logger().close()
}

#[track_caller]
pub fn trace(msg: impl Into<String>) {
    logger().trace(msg);
}

#[track_caller]
pub fn debug(msg: impl Into<String>) {
    logger().debug(msg);
}

#[track_caller]
pub fn info(msg: impl Into<String>) {
    logger().info(msg);
}

#[track_caller]
pub fn warn(msg: impl Into<String>) {
    logger().warn(msg);
}

#[track_caller]
pub fn error(msg: impl Into<String>) {
    logger().error(msg);
}

#[track_caller]
pub fn fatal(msg: impl Into<String>) {
    logger().fatal(msg);
}
