use super::{ConvertError, Converter, UNKNOWN_VERSION, file_name, manifest_root_name, parse_requirement, read_to_string};
use crate::model::{Dependency, Root};
use std::path::Path;

const LOG_TARGET: &str = "       pip";

/// Loads pip requirement files such as `requirements.txt` or `requirements-dev.in`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipConverter;

impl Converter for PipConverter {
    fn format(&self) -> &'static str {
        "pip"
    }

    fn can_parse(&self, path: &Path) -> bool {
        let name = file_name(path);
        name.contains("requirements") && (name.ends_with(".txt") || name.ends_with(".in"))
    }

    fn load(&self, path: &Path) -> Result<Root, ConvertError> {
        let content = read_to_string(path)?;

        let mut root = Root::new(manifest_root_name(path), UNKNOWN_VERSION);
        root.dependencies = parse_requirements_file(&content);
        log::debug!(target: LOG_TARGET, "Found {} requirements in '{}'", root.dependencies.len(), path.display());

        Ok(root)
    }
}

/// Parse requirement lines, skipping comments and pip options.
fn parse_requirements_file(content: &str) -> Vec<Dependency> {
    let joined = content.replace("\\\r\n", "").replace("\\\n", "");

    joined
        .lines()
        .map(|line| line.split_once(" #").map_or(line, |(before, _)| before).trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| {
            let dep = parse_requirement(line);
            if dep.is_none() {
                log::trace!(target: LOG_TARGET, "Skipping unrecognized requirement line '{line}'");
            }
            dep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAIN_ENV;

    #[test]
    fn test_can_parse() {
        assert!(PipConverter.can_parse(Path::new("requirements.txt")));
        assert!(PipConverter.can_parse(Path::new("requirements.in")));
        assert!(PipConverter.can_parse(Path::new("dev-requirements.txt")));
        assert!(!PipConverter.can_parse(Path::new("constraints.txt")));
        assert!(!PipConverter.can_parse(Path::new("requirements.toml")));
    }

    #[test]
    fn test_parse_requirements_file() {
        let content = "\
# pinned deps
--index-url https://pypi.org/simple
-r base.txt
requests==2.31.0  # http
flask>=2 \\
    ; python_version >= '3.8'

attrs
";
        let deps = parse_requirements_file(content);
        let names: Vec<_> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["requests", "flask", "attrs"]);
        assert_eq!(deps[0].constraint, "==2.31.0");
        assert_eq!(deps[1].marker.as_deref(), Some("python_version >= '3.8'"));
        assert!(deps.iter().all(|d| d.envs.contains(MAIN_ENV)));
    }

    #[test]
    fn test_load_names_root_after_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("webapp");
        std::fs::create_dir(&project).unwrap();
        let path = project.join("requirements.txt");
        std::fs::write(&path, "django\n").unwrap();

        let root = PipConverter.load(&path).unwrap();
        assert_eq!(root.raw_name, "webapp");
        assert_eq!(root.version, UNKNOWN_VERSION);
        assert_eq!(root.dependencies.len(), 1);
    }
}
