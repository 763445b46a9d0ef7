//! Environment configuration helpers
//!
//! Every process setting in stock-report comes from environment variables,
//! optionally seeded from a `.env` file in the working directory.

use std::path::PathBuf;

/// Load a `.env` file from the current directory (or a parent) if one exists
///
/// Variables already present in the environment win over the file.
/// Returns the path that was loaded, if any. A missing file is not an error;
/// one that exists but cannot be read or parsed is returned to the caller,
/// which usually runs before logging is set up.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    found_or_missing(dotenvy::dotenv())
}

fn found_or_missing(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Read a variable, treating an empty value the same as an unset one
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Read a boolean toggle; only the exact value `true` enables it
pub fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "true")
}
