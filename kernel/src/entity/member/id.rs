use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

use crate::entity::{AreaCode, ReferenceNumber};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `<area code>_<reference number>`, with path separators in the area
    /// code replaced by `_`. Same inputs always give the same id.
    pub fn derive(area_code: &AreaCode, ref_no: &ReferenceNumber) -> Self {
        let ref_no: &String = ref_no.as_ref();
        Self(format!("{}_{}", area_code.sanitized(), ref_no))
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
