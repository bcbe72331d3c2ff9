use super::{ConvertError, Converter, file_name, parse_core_metadata, parse_requires_txt, read_to_string};
use crate::model::Root;
use std::path::Path;

/// Loads `<name>.egg-info` folders, or a bare `PKG-INFO` file.
///
/// Dependencies come from `requires.txt` next to `PKG-INFO` when present, otherwise from any
/// `Requires-Dist` headers. A `.egg-info` that is a plain file is read as `PKG-INFO` itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct EggInfoConverter;

impl Converter for EggInfoConverter {
    fn format(&self) -> &'static str {
        "egginfo"
    }

    fn can_parse(&self, path: &Path) -> bool {
        let name = file_name(path);
        name.ends_with(".egg-info") || name == "PKG-INFO"
    }

    fn load(&self, path: &Path) -> Result<Root, ConvertError> {
        let (pkg_info, folder) = if path.is_dir() {
            (path.join("PKG-INFO"), Some(path))
        } else {
            (path.to_path_buf(), path.parent().filter(|_| file_name(path) == "PKG-INFO"))
        };

        let content = read_to_string(&pkg_info)?;
        let mut root = parse_core_metadata(&content).ok_or_else(|| ConvertError::MissingMetadata { path: path.to_path_buf() })?;

        if let Some(folder) = folder {
            let requires = folder.join("requires.txt");
            if requires.is_file() {
                root.dependencies = parse_requires_txt(&read_to_string(&requires)?);
            }
        }

        Ok(root)
    }
}
