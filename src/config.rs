use crate::constants;

/// Settings of the upload pipeline which do not come from the request.
///
/// # Examples
///
/// ```
/// use cover_upload::Config;
///
/// let config = Config::new().bucket("covers");
/// assert_eq!(config.bucket_name(), "covers");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) bucket: String,
}

impl Config {
    /// Creates the default configuration, writing to the `bookstore-images-bucket` bucket.
    pub fn new() -> Config {
        Config::default()
    }

    /// Reads the bucket from the `COVER_UPLOAD_BUCKET` environment variable,
    /// keeping the default when it is unset or empty.
    pub fn from_env() -> Config {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Config {
        match lookup(constants::BUCKET_ENV_VAR) {
            Some(bucket) if !bucket.trim().is_empty() => Config::new().bucket(bucket.trim()),
            _ => Config::new(),
        }
    }

    /// Sets the bucket every upload is written to.
    pub fn bucket<N: Into<String>>(mut self, name: N) -> Config {
        self.bucket = name.into();
        self
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bucket: constants::DEFAULT_BUCKET.to_owned(),
        }
    }
}
