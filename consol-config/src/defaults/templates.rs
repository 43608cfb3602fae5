use crate::types::LogLevel;

pub fn log_format() -> String {
    "!{date:%Y/%m/%d %H:%M:%S}! !{level}! !{message}!".to_string()
}

pub fn path_format() -> String {
    "logs/!{date:%Y-%m-%d}!.log".to_string()
}

/// Built-in template for a level with no user configuration.
pub fn level_format(level: LogLevel) -> String {
    let (color, label) = match level {
        LogLevel::Log => ("#a8a8a8", "LOG"),
        LogLevel::Info => ("#a8a8a8", "INFO"),
        LogLevel::Success => ("#79ef77", "SUCCESS"),
        LogLevel::Warning => ("#efe777", "WARNING"),
        LogLevel::Error => ("#ef8d77", "ERROR"),
        LogLevel::Fatal => ("#ef8d77", "FATAL"),
        LogLevel::Debug => ("#a8a8a8", "DEBUG"),
    };
    format!("!{{hex:fg:{color}}}!{label}")
}
