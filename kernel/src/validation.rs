use error_stack::Report;
use serde::Serialize;
use std::fmt::{Display, Formatter};

use crate::KernelError;

/// One rejected form field. Attached to [`KernelError::Validation`] reports
/// so callers can list every problem at once.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FieldViolation {
    field: &'static str,
    message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless `valid` holds.
    pub fn check(&mut self, valid: bool, field: &'static str, message: impl Into<String>) {
        if !valid {
            self.0.push(FieldViolation::new(field, message));
        }
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> error_stack::Result<(), KernelError> {
        let mut violations = self.0.into_iter();
        let Some(first) = violations.next() else {
            return Ok(());
        };
        let report = violations.fold(
            Report::new(KernelError::Validation)
                .attach_printable(first.to_string())
                .attach(first),
            |report, violation| {
                report
                    .attach_printable(violation.to_string())
                    .attach(violation)
            },
        );
        Err(report)
    }
}

/// Every [`FieldViolation`] attached anywhere in `report`.
pub fn violations_of(report: &Report<KernelError>) -> Vec<FieldViolation> {
    let mut found = report
        .frames()
        .filter_map(|frame| frame.downcast_ref::<FieldViolation>())
        .cloned()
        .collect::<Vec<_>>();
    found.reverse();
    found
}
