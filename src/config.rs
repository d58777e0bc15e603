//! Load configuration

/// Default suffix appended to a source path to name its sidecar cache
pub const DEFAULT_CACHE_SUFFIX: &str = ".bin";

/// Controls how [`load_graph`](crate::load_graph) uses the sidecar cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Literal suffix appended to the source path (default `.bin`)
    pub cache_suffix: String,

    /// Try the cache before parsing text
    pub read_cache: bool,

    /// Write the cache after a text parse
    pub write_cache: bool,
}

impl LoadConfig {
    /// Default configuration: `.bin` sidecar, read and write enabled
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache_suffix: DEFAULT_CACHE_SUFFIX.to_string(),
            read_cache: true,
            write_cache: true,
        }
    }

    /// Use a different cache suffix
    #[must_use]
    pub fn with_cache_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.cache_suffix = suffix.into();
        self
    }

    /// Always parse text and never touch the sidecar
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.read_cache = false;
        self.write_cache = false;
        self
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self::new()
    }
}
