// src/infra/paths.rs — Path management
//
// All paths respect the SALONCTL_HOME environment variable for isolation.
// When SALONCTL_HOME is set, config and session state live under that
// directory. When unset, everything lives under ~/.salonctl/.

use std::path::PathBuf;

fn salonctl_home() -> Option<PathBuf> {
    std::env::var_os("SALONCTL_HOME").map(PathBuf::from)
}

/// Configuration directory: $SALONCTL_HOME/ or ~/.salonctl/
pub fn config_dir() -> PathBuf {
    if let Some(home) = salonctl_home() {
        return home;
    }
    dirs_home().join(".salonctl")
}

/// Home directory
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Persisted session (bearer token + guest flag)
pub fn session_file_path() -> PathBuf {
    config_dir().join("session.json")
}
