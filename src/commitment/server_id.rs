use std::fmt;

/// ServerId identifies a cluster member. It's handed to us by the membership/transport layer and
/// the tracker never looks inside it.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ServerId(String);

impl ServerId {
    pub fn new(id: impl Into<String>) -> Self {
        ServerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for ServerId {
    fn from(id: &str) -> Self {
        ServerId::new(id)
    }
}

impl From<String> for ServerId {
    fn from(id: String) -> Self {
        ServerId(id)
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
