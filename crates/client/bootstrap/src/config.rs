//! Client configuration structures and loaders.
use std::env;

/// Configuration required to bootstrap a client session.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Realm to join on connect, if known at startup.
    pub realm_code: Option<String>,
    /// Display name announced when joining.
    pub display_name: Option<String>,
    /// Announce a join intent automatically once the channel reports
    /// `Connected`. Requires `realm_code` and `display_name`.
    pub auto_join: bool,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `REALM_CODE` - Realm to join on connect (default: none)
    /// - `DISPLAY_NAME` - Name announced to the party (default: none)
    /// - `AUTO_JOIN` - Dispatch a join intent on connect (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.realm_code = env::var("REALM_CODE").ok();
        config.display_name = env::var("DISPLAY_NAME").ok();

        if let Some(enable) = read_env::<bool>("AUTO_JOIN") {
            config.auto_join = enable;
        } else if env::var("AUTO_JOIN").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.auto_join = true;
        }

        config
    }

    /// Whether the session can announce itself on connect.
    pub fn can_auto_join(&self) -> bool {
        self.auto_join && self.realm_code.is_some() && self.display_name.is_some()
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.parse().ok())
}
