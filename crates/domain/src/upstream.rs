use std::fmt;

/// Which configured resolver an exchange goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamRole {
    /// Default resolver, also used for every non-address query.
    Trusted,
    /// Resolver for domains whose answers feed the routing trigger.
    Policy,
}

impl UpstreamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Policy => "policy",
        }
    }
}

impl fmt::Display for UpstreamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
