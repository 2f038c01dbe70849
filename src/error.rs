/// The `Blame` enum holds every way a `dawdle` operation can go wrong.
///
/// Lookups into nested maps fail with [`Blame::KeyNotFound`] or [`Blame::EmptyPath`], and the org
/// client adds [`Blame::Shape`] when a field is present but holds the wrong kind of value.
/// Everything that comes from the outside world (the network, the config file, the runtime) is
/// wrapped as-is, so the caller sees the original error through [`std::error::Error::source`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum Blame {
    /// A key in the access path is absent from the level being searched.
    #[display("key not found: '{key}'")]
    KeyNotFound { key: String },
    /// The access path contained no keys.
    #[display("access path is empty")]
    EmptyPath,
    /// A field exists but does not hold the expected kind of value.
    #[display("field '{field}' is not {expected}")]
    Shape {
        field: String,
        expected: &'static str,
    },
    /// A [`crate::CannedFetch`] was asked for a url nobody scripted.
    #[display("no canned response for {url}")]
    Unscripted { url: String },
    #[display("http error: {_0}")]
    #[from]
    Http(reqwest::Error),
    #[display("config error: {_0}")]
    #[from]
    Config(config::ConfigError),
    #[display("task failed: {_0}")]
    #[from]
    Join(tokio::task::JoinError),
}

impl Blame {
    /// Convenience constructor for [`Blame::KeyNotFound`].
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }
}

/// Alias for results that may assign [`Blame`].
pub type Arrive<T> = Result<T, Blame>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_names_the_key() {
        let blame = Blame::key_not_found("a");
        assert_eq!(blame.to_string(), "key not found: 'a'");
        assert!(matches!(blame, Blame::KeyNotFound { key } if key == "a"));
    }

    #[test]
    fn shape_reads_naturally() {
        let blame = Blame::Shape {
            field: "repos_url".to_string(),
            expected: "a string",
        };
        assert_eq!(blame.to_string(), "field 'repos_url' is not a string");
    }
}
