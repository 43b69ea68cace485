use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct MemberName(String);

impl MemberName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// National identity card number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct IdentityNumber(String);

impl IdentityNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct MemberAddress(String);

impl MemberAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ContactNumber(String);

impl ContactNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }
}

/// Subscription tier label, free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Subscription(String);

impl Subscription {
    pub fn new(tier: impl Into<String>) -> Self {
        Self(tier.into())
    }
}
