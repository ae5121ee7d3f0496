use env_logger::WriteStyle;
use log::LevelFilter;

/// Picks the log level from the global flags.
///
/// Dry runs report what they would do, so they log at debug level.
pub fn log_level(verbose: bool, dry_run: bool) -> LevelFilter {
    if dry_run {
        LevelFilter::Debug
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

pub fn init_logger(verbose: bool, no_color: bool, dry_run: bool) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose, dry_run))
        .write_style(if no_color { WriteStyle::Never } else { WriteStyle::Auto })
        .format_timestamp_secs()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false, false), LevelFilter::Warn);
        assert_eq!(log_level(true, false), LevelFilter::Info);
        assert_eq!(log_level(false, true), LevelFilter::Debug);
        assert_eq!(log_level(true, true), LevelFilter::Debug);
    }
}
