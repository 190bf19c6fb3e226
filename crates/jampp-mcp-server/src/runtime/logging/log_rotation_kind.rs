use std::str::FromStr;

use schemars::JsonSchema;
use tracing_appender::rolling::Rotation;

/// How often a new log file is started
#[derive(Debug, Default, JsonSchema, Clone, PartialEq)]
pub enum LogRotationKind {
    Minutely,
    #[default]
    Hourly,
    Daily,
    Never,
}

impl FromStr for LogRotationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ("minutely", Self::Minutely),
            ("hourly", Self::Hourly),
            ("daily", Self::Daily),
            ("never", Self::Never),
        ]
        .into_iter()
        .find_map(|(name, kind)| name.eq_ignore_ascii_case(s).then_some(kind))
        .ok_or_else(|| {
            format!("unknown log rotation `{s}`, expected one of minutely, hourly, daily, never")
        })
    }
}

impl From<LogRotationKind> for Rotation {
    fn from(value: LogRotationKind) -> Self {
        match value {
            LogRotationKind::Minutely => Rotation::MINUTELY,
            LogRotationKind::Hourly => Rotation::HOURLY,
            LogRotationKind::Daily => Rotation::DAILY,
            LogRotationKind::Never => Rotation::NEVER,
        }
    }
}
