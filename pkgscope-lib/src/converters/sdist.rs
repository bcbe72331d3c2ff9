use super::{ConvertError, Converter, file_name, parse_core_metadata, parse_requires_txt};
use crate::model::Root;
use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tar::Archive;

const LOG_TARGET: &str = "     sdist";

/// Loads gzip-compressed source distributions (`*.tar.gz`, `*.tgz`).
///
/// Metadata comes from the shallowest `PKG-INFO` in the archive. Older distributions list their
/// requirements only in `<name>.egg-info/requires.txt`, which is used when `PKG-INFO` has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdistConverter;

/// Content of a matching archive member together with its depth.
type Member = Option<(usize, String)>;

impl Converter for SdistConverter {
    fn format(&self) -> &'static str {
        "sdist"
    }

    fn can_parse(&self, path: &Path) -> bool {
        let name = file_name(path);
        name.ends_with(".tar.gz") || name.ends_with(".tgz")
    }

    fn load(&self, path: &Path) -> Result<Root, ConvertError> {
        let io_err = |e| ConvertError::io(path, e);

        let file = File::open(path).map_err(io_err)?;
        let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

        let mut pkg_info: Member = None;
        let mut requires: Member = None;

        for entry in archive.entries().map_err(io_err)? {
            let mut entry = entry.map_err(io_err)?;
            let entry_path = entry.path().map_err(io_err)?.into_owned();
            let depth = entry_path.components().count();

            let slot = if entry_path.file_name().is_some_and(|n| n == "PKG-INFO") {
                &mut pkg_info
            } else if entry_path.ends_with("requires.txt")
                && entry_path
                    .parent()
                    .and_then(Path::file_name)
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".egg-info"))
            {
                &mut requires
            } else {
                continue;
            };

            if slot.as_ref().is_some_and(|(best, _)| *best <= depth) {
                continue;
            }

            log::trace!(target: LOG_TARGET, "Reading '{}' from '{}'", entry_path.display(), path.display());
            let mut content = String::new();
            let _ = entry.read_to_string(&mut content).map_err(io_err)?;
            *slot = Some((depth, content));
        }

        let Some((_, pkg_info)) = pkg_info else {
            return Err(ConvertError::MissingMetadata { path: path.to_path_buf() });
        };

        let mut root = parse_core_metadata(&pkg_info).ok_or_else(|| ConvertError::MissingMetadata { path: path.to_path_buf() })?;
        if root.dependencies.is_empty()
            && let Some((_, requires)) = requires
        {
            root.dependencies = parse_requires_txt(&requires);
        }

        Ok(root)
    }
}
