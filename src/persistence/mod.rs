use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::BinderError;

const APP_NAME: &str = "binder-layout";

/// Where binder files live; the working directory when the platform has no data dir.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join(APP_NAME))
}

pub fn data_file(filename: &str) -> PathBuf {
    data_dir().join(filename)
}

/// Writes `data` to `filename` in the data dir and returns the path written.
pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<PathBuf, BinderError> {
    let path = data_file(filename);
    save_json_at(data, &path)?;
    Ok(path)
}

/// Writes `data` as pretty JSON, creating missing parent directories.
pub fn save_json_at<T: Serialize>(data: &T, file_path: &Path) -> Result<(), BinderError> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    tracing::debug!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> Result<T, BinderError> {
    load_json_at(&data_file(filename))
}

/// Reads `file_path` as JSON, returning `T::default()` when the file does not exist.
pub fn load_json_at<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, BinderError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}
