use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct AreaCode(String);

impl AreaCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code with path separators swapped for `_`, safe to embed in a
    /// member identifier.
    pub fn sanitized(&self) -> String {
        self.0.replace(['/', '\\'], "_")
    }
}
