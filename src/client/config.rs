//! Client configuration

/// URL of the vendor tracking script injected by the bootstrap
pub const VENDOR_SCRIPT_URL: &str = "https://connect.facebook.net/en_US/fbevents.js";

/// Environment variable carrying the default pixel id
pub const ENV_PIXEL_ID: &str = "META_PIXEL_ID";

/// Environment variable enabling diagnostics when set to `1`
pub const ENV_PIXEL_DEBUG: &str = "META_PIXEL_DEBUG";

/// Build-time client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default pixel id baked into the deployment; lowest resolution
    /// precedence, re-read on every resolution
    pub default_pixel_id: Option<String>,

    /// Enable diagnostics at readiness time
    pub debug: bool,

    /// Vendor script URL to inject
    pub script_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_pixel_id: None,
            debug: false,
            script_url: VENDOR_SCRIPT_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config with a default pixel id
    pub fn with_pixel_id(pixel_id: impl Into<String>) -> Self {
        Self {
            default_pixel_id: Some(pixel_id.into()),
            ..Default::default()
        }
    }

    /// Set the default pixel id
    pub fn pixel_id(mut self, pixel_id: impl Into<String>) -> Self {
        self.default_pixel_id = Some(pixel_id.into());
        self
    }

    /// Set the diagnostic flag
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the vendor script URL
    pub fn script_url(mut self, url: impl Into<String>) -> Self {
        self.script_url = url.into();
        self
    }

    /// Build a config from the process environment
    ///
    /// Reads [`ENV_PIXEL_ID`] for the default pixel id and treats
    /// [`ENV_PIXEL_DEBUG`]`=1` as the diagnostic flag.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            default_pixel_id: lookup(ENV_PIXEL_ID).filter(|v| !v.trim().is_empty()),
            debug: lookup(ENV_PIXEL_DEBUG).as_deref() == Some("1"),
            ..Default::default()
        }
    }
}

/// Options accepted by the readiness entry point
///
/// Both fields are optional; an absent field leaves the corresponding
/// state untouched.
#[derive(Debug, Clone, Default)]
pub struct ReadyOptions {
    /// Runtime pixel id override to apply before resolution
    pub pixel_id: Option<String>,

    /// Diagnostic flag override
    pub debug: Option<bool>,
}

impl ReadyOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime pixel id override
    pub fn pixel_id(mut self, pixel_id: impl Into<String>) -> Self {
        self.pixel_id = Some(pixel_id.into());
        self
    }

    /// Set the diagnostic flag
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}
