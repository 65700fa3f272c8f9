/// Classification of a fetch failure.
///
/// Used by the quote source to decide what to log when it substitutes
/// fallback data. None of the classes trigger an automatic retry; the
/// recovery path is always the next manual or scheduled refresh.
///
/// | Class | Meaning |
/// |-------|---------|
/// | `Transport` | The request never produced a usable body |
/// | `Payload` | A body arrived but could not be turned into quotes |
/// | `Configuration` | The provider cannot be called as configured |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureCategory {
    /// Network failure, timeout, or a script load that errored.
    Transport,

    /// Malformed or insufficient provider payload, including zero parsed records.
    Payload,

    /// Missing credentials or an operation the provider does not offer.
    Configuration,
}

impl FailureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Payload => "payload",
            Self::Configuration => "configuration",
        }
    }
}
