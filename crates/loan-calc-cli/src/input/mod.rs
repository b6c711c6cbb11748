pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Structured input from `--input <file>` or, failing that, piped stdin.
/// Returns None when neither is present so the caller can fall back to flags.
pub fn file_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_structured(path)?));
    }
    if let Some(data) = stdin::read_stdin()? {
        return Ok(Some(serde_json::from_value(data)?));
    }
    Ok(None)
}
