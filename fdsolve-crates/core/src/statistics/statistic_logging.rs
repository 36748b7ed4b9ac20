//! Responsible for behaviour related to logging statistics with a specific prefix and closing
//! line.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;
use log::info;

/// The options for statistic logging containing the statistic prefix, the (optional) line which is
/// printed after the statistics, and the (optional) casing of the statistics.
pub struct StatisticOptions<'a> {
    // What is printed before a statistic is printed, the statistics will be printed in the
    // form `{PREFIX} {NAME}={VALUE}`
    statistic_prefix: &'a str,
    // A closing line which is printed after all of the statistics have been printed
    after_statistics: Option<&'a str>,
    // The casing of the name of the statistic
    statistics_casing: Option<Case>,
    // The writer to which the statistics are written
    statistics_writer: Box<dyn Write + Send + Sync>,
}

impl Debug for StatisticOptions<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("statistic_prefix", &self.statistic_prefix)
            .field("after_statistics", &self.after_statistics)
            .field("statistics_casing", &self.statistics_casing)
            .field("statistics_writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions<'static>>> = OnceLock::new();

/// Configures the logging of the statistics.
///
/// It specifies the prefix and an (optional) closing line which is written after all of the
/// statistics have been logged. It also specifies the writer to be used for writing statistics; if
/// no writer is given, stdout is used. Only the first call has an effect.
///
/// Without configuration, statistics are emitted through the `log` facade at the info level.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        RwLock::from(StatisticOptions {
            statistic_prefix: prefix,
            after_statistics: after,
            statistics_casing: casing,
            statistics_writer: writer.unwrap_or(Box::new(stdout())),
        })
    });
}

/// Logs the provided statistic with name `name` and value `value` in the format
/// `STATISTIC_PREFIX NAME=VALUE`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(statistic_options_lock) = STATISTIC_OPTIONS.get() else {
        info!("{name}={value}");
        return;
    };

    if let Ok(mut statistic_options) = statistic_options_lock.write() {
        let name = if let Some(casing) = &statistic_options.statistics_casing {
            name.to_string().to_case(*casing)
        } else {
            name.to_string()
        };
        let prefix = statistic_options.statistic_prefix;
        let _ = writeln!(
            statistic_options.statistics_writer,
            "{prefix} {name}={value}"
        );
    }
}

/// Logs the postfix of the statistics (if it has been set).
pub fn log_statistic_postfix() {
    if let Some(statistic_options_lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut statistic_options) = statistic_options_lock.write() {
            if let Some(post_fix) = statistic_options.after_statistics {
                let _ = writeln!(statistic_options.statistics_writer, "{post_fix}");
            }
        }
    }
}

/// Returns whether statistics are written to a configured writer, which is the case once
/// [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
