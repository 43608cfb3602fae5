//! Turning log arguments into the message text.

use consol_config::StringifyOptions;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Converts the arguments of one log call into a single message string.
pub trait Stringify: Send + Sync {
    fn stringify(&self, args: &[Value], options: &StringifyOptions) -> String;
}

impl<F> Stringify for F
where
    F: Fn(&[Value], &StringifyOptions) -> String + Send + Sync,
{
    fn stringify(&self, args: &[Value], options: &StringifyOptions) -> String {
        self(args, options)
    }
}

/// Strings are used verbatim, everything else is rendered as JSON indented
/// by `options.indent` spaces (compact when the indent is zero). Parts are
/// joined with a single space and the result is trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStringify;

impl Stringify for JsonStringify {
    fn stringify(&self, args: &[Value], options: &StringifyOptions) -> String {
        let parts: Vec<String> = args
            .iter()
            .map(|arg| match arg {
                Value::String(s) => s.clone(),
                other => to_json(other, options.indent),
            })
            .collect();
        parts.join(" ").trim().to_string()
    }
}

fn to_json(value: &Value, indent: usize) -> String {
    if indent == 0 {
        return value.to_string();
    }
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| value.to_string()),
        Err(e) => {
            log::debug!("Failed to pretty-print log argument: {e}");
            value.to_string()
        }
    }
}
