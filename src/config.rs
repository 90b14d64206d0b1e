use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Rhizome";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the reference tables location.
pub const REFERENCE_TABLES_ENV: &str = "RHIZOME_REFERENCE_TABLES";

const REFERENCE_TABLES_FILE: &str = "reference_tables.json";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "warn,rhizome_lib=info,rhizome=info"
}

/// Get the application data directory
/// ~/Rhizome/ on all platforms; relative to the working directory when no
/// home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join("Rhizome")
}

/// Reference tables file: `$RHIZOME_REFERENCE_TABLES` if set, else
/// ~/Rhizome/reference_tables.json
pub fn reference_tables_path() -> PathBuf {
    match std::env::var_os(REFERENCE_TABLES_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join(REFERENCE_TABLES_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        if let Some(home) = dirs::home_dir() {
            assert!(dir.starts_with(home));
        }
        assert!(dir.ends_with("Rhizome"));
    }

    #[test]
    fn reference_tables_default_location() {
        if std::env::var_os(REFERENCE_TABLES_ENV).is_none() {
            let path = reference_tables_path();
            assert!(path.starts_with(app_data_dir()));
            assert!(path.ends_with("reference_tables.json"));
        }
    }

    #[test]
    fn default_filter_enables_crate_info() {
        assert!(default_log_filter().contains("rhizome_lib=info"));
    }

    #[test]
    fn app_name_is_rhizome() {
        assert_eq!(APP_NAME, "Rhizome");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
