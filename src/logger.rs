use log::LevelFilter;
use simplelog::{Config, SimpleLogger};

use crate::errors::Result;

/// Installs a global logger writing to stdout. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<()> {
    SimpleLogger::init(level, Config::default())?;
    Ok(())
}

// output goes through print! so the test harness captures it
#[cfg(test)]
pub(crate) fn init_test_logger() {
    // other tests may have installed it already
    let _ = simplelog::TestLogger::init(LevelFilter::Debug, Config::default());
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::*;

    #[test]
    fn test_logger_installs_once() {
        init_test_logger();
        init_test_logger();

        log::debug!("captured by the test harness");
        let meta = log::Metadata::builder().level(log::Level::Warn).build();
        assert!(log::logger().enabled(&meta));
    }

    #[test]
    fn second_init_fails() {
        init_test_logger();
        assert!(init(LevelFilter::Info).is_err());
    }
}
