use std::{
    fs,
    path::PathBuf,
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use crate::core::errors::DishSwipeError;

const APP_NAME: &str = "dishswipe";

pub fn get_app_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => {
            let app_dir = data_dir.join(APP_NAME);
            if let Err(e) = fs::create_dir_all(&app_dir) {
                warn!("Could not create {}: {e}", app_dir.display());
            }
            app_dir
        }
        None => PathBuf::from("."),
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), DishSwipeError> {
    let file_path = get_data_file_path(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    info!("Saved {}", file_path.display());
    Ok(())
}

/// Reads `filename` from the data directory; a missing file yields `T::default()`.
pub fn load_json<T: DeserializeOwned + Default>(filename: &str) -> Result<T, DishSwipeError> {
    let file_path = get_data_file_path(filename);

    if !file_path.exists() {
        debug!("{} not found, using defaults", file_path.display());
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!("Loaded {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {filename}: {e}. Using defaults.");
            T::default()
        }
    }
}
