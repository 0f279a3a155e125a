use crate::error::UtilError;
use colored_json::{Color, ColorMode, ColoredFormatter, PrettyFormatter, Styler};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

pub fn scorewatch_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub struct HelperFuncs {}

impl HelperFuncs {
    /// Colored, pretty-printed JSON for terminal output
    pub fn __str__<T: Serialize>(object: T) -> String {
        match ColoredFormatter::with_styler(
            PrettyFormatter::default(),
            Styler {
                key: Color::Rgb(245, 77, 85).bold(),
                string_value: Color::Rgb(249, 179, 93).foreground(),
                float_value: Color::Rgb(249, 179, 93).foreground(),
                integer_value: Color::Rgb(249, 179, 93).foreground(),
                bool_value: Color::Rgb(249, 179, 93).foreground(),
                nil_value: Color::Rgb(249, 179, 93).foreground(),
                ..Default::default()
            },
        )
        .to_colored_json(&object, ColorMode::On)
        {
            Ok(json) => json,
            Err(e) => format!("Failed to serialize to json: {e}"),
        }
    }

    pub fn __json__<T: Serialize>(object: T) -> String {
        match serde_json::to_string_pretty(&object) {
            Ok(json) => json,
            Err(e) => format!("Failed to serialize to json: {e}"),
        }
    }

    pub fn save_to_json<T>(
        model: T,
        path: Option<PathBuf>,
        filename: &str,
    ) -> Result<PathBuf, UtilError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string_pretty(&model).map_err(UtilError::traced_serialize_error)?;

        let write_path = match path {
            Some(mut new_path) => {
                new_path.set_extension("json");

                if !new_path.exists() {
                    let parent_path = new_path.parent().ok_or(UtilError::GetParentPathError)?;

                    std::fs::create_dir_all(parent_path)
                        .map_err(|_| UtilError::CreateDirectoryError)?;
                }

                new_path
            }
            None => PathBuf::from(filename),
        };

        std::fs::write(&write_path, json)?;

        Ok(write_path)
    }

    pub fn load_from_json<T>(path: &PathBuf) -> Result<T, UtilError>
    where
        T: DeserializeOwned,
    {
        let file = std::fs::read_to_string(path)?;
        serde_json::from_str(&file).map_err(UtilError::traced_deserialize_error)
    }
}
