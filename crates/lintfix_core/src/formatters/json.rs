use super::Formatter;
use crate::diagnostic::Diagnostic;

/// The remaining failures as a JSON array.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, failures: &[Diagnostic], _fixes: &[Diagnostic]) -> String {
        serde_json::to_string(failures).unwrap_or_else(|_| "[]".to_string())
    }
}
