use std::path::PathBuf;

pub const STATE_DIR: &str = "rulecheck";
pub const STATE_FILE_NAME: &str = "client_state.json";

/// `<config_dir>/rulecheck/client_state.json`, when the platform has a
/// config directory.
#[must_use]
pub fn default_state_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(STATE_DIR).join(STATE_FILE_NAME))
}

#[must_use]
pub(crate) fn temp_path_for(path: &std::path::Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
