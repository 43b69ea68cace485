use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Free-text status label, typically `completed` or `incomplete`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PaymentStatus(String);

impl PaymentStatus {
    pub const COMPLETED: &'static str = "completed";
    pub const INCOMPLETE: &'static str = "incomplete";

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }
}
