//! Ordered diagnostic lines returned with every calibration result.
//!
//! Each line is mirrored to the `log` facade at the matching level when it
//! is recorded, so a binary with `env_logger` sees the same trace that the
//! caller receives.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn tag(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticLine {
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for DiagnosticLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity.tag(), self.message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticLog {
    lines: Vec<DiagnosticLine>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info => log::info!("{message}"),
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
        self.lines.push(DiagnosticLine { severity, message });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    /// Append lines already mirrored by another log, keeping their order.
    pub fn append(&mut self, other: DiagnosticLog) {
        self.lines.extend(other.lines);
    }

    pub fn lines(&self) -> &[DiagnosticLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lines.iter().filter(|l| l.severity == severity).count()
    }

    /// Lines rendered as `[level] message`.
    pub fn to_strings(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_across_append() {
        let mut a = DiagnosticLog::new();
        a.info("first");
        let mut b = DiagnosticLog::new();
        b.warn("second");
        b.error("third");
        a.append(b);
        assert_eq!(
            a.to_strings(),
            vec!["[info] first", "[warn] second", "[error] third"]
        );
        assert_eq!(a.count(Severity::Warning), 1);
    }
}
