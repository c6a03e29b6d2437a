use anyhow::Result;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{Config, General};
use crate::errors::SetupError;
use crate::registry::Registry;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Initializes log4rs with a file appender on the configured log path and,
/// when requested, an stdout appender, both at the configured level
///
/// # Arguments
///
/// * 'general' - the general configuration section
pub fn setup_logger(general: &General) -> Result<()> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut config = log4rs::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        config = config.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    log4rs::init_config(config.build(root.build(general.log_level))?)?;

    Ok(())
}

/// Builds the session registry and brings every configured station up.
///
/// Each station performs its first refresh synchronously inside create, so
/// any station whose initial fetch fails aborts the whole startup. This is
/// the only place a fetch failure is fatal.
///
/// # Arguments
///
/// * 'config' - the loaded configuration
pub fn init(config: &Config) -> Result<Registry, SetupError> {
    let mut registry = Registry::new();

    for station in &config.stations {
        registry.create(station)?;
    }

    Ok(registry)
}
