use crate::config;

/// Load the config, falling back to defaults when it is unreadable or
/// invalid. The second value is a warning to report once logging is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(e) => (
                config::Settings::default(),
                Some(format!("{e}; using defaults")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
