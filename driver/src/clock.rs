use error_stack::{Report, ResultExt};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use kernel::interface::clock::Clock;
use kernel::KernelError;

const ORGANIZATION_UTC_OFFSET: &str = "ORGANIZATION_UTC_OFFSET";

/// Wall clock shifted into the organization's offset (`+HH:MM`, UTC when unset).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let offset = match dotenvy::var(ORGANIZATION_UTC_OFFSET) {
            Ok(raw) => parse_offset(&raw)?,
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => UtcOffset::UTC,
            Err(error) => {
                return Err(Report::new(error).change_context(KernelError::Internal));
            }
        };
        Ok(Self { offset })
    }

    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

fn parse_offset(raw: &str) -> error_stack::Result<UtcOffset, KernelError> {
    UtcOffset::parse(
        raw.trim(),
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .change_context_lazy(|| KernelError::Internal)
    .attach_printable_lazy(|| format!("Env {ORGANIZATION_UTC_OFFSET} has an invalid value `{raw}`"))
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Always answers the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(OffsetDateTime);

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
