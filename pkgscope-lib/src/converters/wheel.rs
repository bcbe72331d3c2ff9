use super::{ConvertError, Converter, file_name, parse_core_metadata};
use crate::model::Root;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

const LOG_TARGET: &str = "     wheel";

/// Loads built wheels (`*.whl`) from the `METADATA` file of their `.dist-info` folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelConverter;

impl Converter for WheelConverter {
    fn format(&self) -> &'static str {
        "wheel"
    }

    fn can_parse(&self, path: &Path) -> bool {
        file_name(path).ends_with(".whl")
    }

    fn load(&self, path: &Path) -> Result<Root, ConvertError> {
        let zip_err = |source| ConvertError::Zip {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(zip_err)?;

        let Some(entry_name) = archive
            .file_names()
            .find(|name| is_dist_info_metadata(name))
            .map(ToString::to_string)
        else {
            return Err(ConvertError::MissingMetadata { path: path.to_path_buf() });
        };

        log::debug!(target: LOG_TARGET, "Reading '{entry_name}' from '{}'", path.display());

        let mut content = String::new();
        let _ = archive
            .by_name(&entry_name)
            .map_err(zip_err)?
            .read_to_string(&mut content)
            .map_err(|e| ConvertError::io(path, e))?;

        parse_core_metadata(&content).ok_or_else(|| ConvertError::MissingMetadata { path: path.to_path_buf() })
    }
}

/// `<dist>.dist-info/METADATA` at the top level of the archive.
fn is_dist_info_metadata(name: &str) -> bool {
    name.split_once('/')
        .is_some_and(|(dir, rest)| dir.ends_with(".dist-info") && rest == "METADATA")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_wheel(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let _ = writer.finish().unwrap();
    }

    #[test]
    fn test_can_parse() {
        assert!(WheelConverter.can_parse(Path::new("dist/demo-1.0-py3-none-any.whl")));
        assert!(!WheelConverter.can_parse(Path::new("dist/demo-1.0.tar.gz")));
    }

    #[test]
    fn test_is_dist_info_metadata() {
        assert!(is_dist_info_metadata("demo-1.0.dist-info/METADATA"));
        assert!(!is_dist_info_metadata("demo/METADATA"));
        assert!(!is_dist_info_metadata("demo-1.0.dist-info/RECORD"));
        assert!(!is_dist_info_metadata("vendor/x.dist-info/METADATA/extra"));
    }

    #[test]
    fn test_load_wheel() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo-1.0-py3-none-any.whl");
        write_wheel(
            &path,
            &[
                ("demo/__init__.py", ""),
                (
                    "demo-1.0.dist-info/METADATA",
                    "Metadata-Version: 2.1\nName: demo\nVersion: 1.0\nRequires-Dist: attrs>=20\n",
                ),
            ],
        );

        let root = WheelConverter.load(&path).unwrap();
        assert_eq!(root.raw_name, "demo");
        assert_eq!(root.version, "1.0");
        assert_eq!(root.dependencies.len(), 1);
        assert_eq!(root.dependencies[0].name, "attrs");
    }

    #[test]
    fn test_load_wheel_without_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo-1.0-py3-none-any.whl");
        write_wheel(&path, &[("demo/__init__.py", "")]);

        let err = WheelConverter.load(&path).unwrap_err();
        assert!(matches!(err, ConvertError::MissingMetadata { .. }));
    }

    #[test]
    fn test_load_not_a_zip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken-1.0-py3-none-any.whl");
        std::fs::write(&path, "not a zip").unwrap();

        let err = WheelConverter.load(&path).unwrap_err();
        assert!(matches!(err, ConvertError::Zip { .. }));
    }
}
