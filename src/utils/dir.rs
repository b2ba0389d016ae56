use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::Result;

/// Resolves (and creates if needed) the per-user application directory that
/// holds the intake log, the settings document and the diagnostic logs.
pub fn create_application_default_path() -> Result<PathBuf> {
    let path = {
        #[cfg(windows)]
        {
            let mut path =
                PathBuf::from(env::var("APPDATA").expect("APPDATA should be present on Windows"));
            path.push("waterlog");
            path
        }
        #[cfg(target_os = "linux")]
        {
            let mut path = env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .expect("Couldn't find neither XDG_STATE_HOME nor HOME");
            path.push("waterlog");
            path
        }
    };

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

/// Directory with one intake log file per calendar day.
pub fn records_dir(app_dir: &Path) -> PathBuf {
    app_dir.join("records")
}

/// The singleton settings document.
pub fn settings_path(app_dir: &Path) -> PathBuf {
    app_dir.join("settings.json")
}
