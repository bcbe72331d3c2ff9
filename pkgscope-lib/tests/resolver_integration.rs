//! Integration tests for local root resolution against realistic project layouts.

use flate2::Compression;
use flate2::write::GzEncoder;
use pkgscope_lib::converters::ConverterRegistry;
use pkgscope_lib::local::{LocalRepo, ResolveError};
use pkgscope_lib::model::Dependency;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

fn repo(path: &Path) -> LocalRepo {
    LocalRepo::new(path, ConverterRegistry::standard())
}

fn write_wheel(path: &Path, metadata: &str) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    writer.start_file("demo/__init__.py", SimpleFileOptions::default()).unwrap();
    writer.start_file("demo-1.0.dist-info/METADATA", SimpleFileOptions::default()).unwrap();
    writer.write_all(metadata.as_bytes()).unwrap();
    let _ = writer.finish().unwrap();
}

fn write_sdist(path: &Path, top: &str, pkg_info: &str) {
    let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut header = tar::Header::new_gnu();
    header.set_size(pkg_info.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append_data(&mut header, format!("{top}/PKG-INFO"), pkg_info.as_bytes()).unwrap();

    let _ = builder.into_inner().unwrap().finish().unwrap();
}

#[test]
fn test_lone_wheel_resolves_through_wheel_converter() {
    let tmp = tempfile::tempdir().unwrap();
    let pkg = tmp.path().join("pkg");
    fs::create_dir(&pkg).unwrap();
    write_wheel(
        &pkg.join("demo-1.0-py3-none-any.whl"),
        "Metadata-Version: 2.1\nName: demo\nVersion: 1.0\nSummary: A demo\nRequires-Dist: attrs>=20\n",
    );

    let root = repo(&pkg).resolve_root("demo", "1.0").unwrap();
    assert_eq!(root.raw_name, "demo");
    assert_eq!(root.version, "1.0");
    assert_eq!(root.metadata.description.as_deref(), Some("A demo"));
    assert_eq!(root.dependencies.len(), 1);
}

#[test]
fn test_sdist_found_in_dist() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("dist")).unwrap();
    write_sdist(
        &tmp.path().join("dist/my_tool-0.4.2.tar.gz"),
        "my_tool-0.4.2",
        "Metadata-Version: 2.1\nName: my-tool\nVersion: 0.4.2\nRequires-Dist: click\n",
    );

    let root = repo(tmp.path()).resolve_root("my-tool", "0.4.2").unwrap();
    assert_eq!(root.raw_name, "my-tool");
    assert_eq!(root.dependencies[0].name, "click");
}

#[test]
fn test_egg_info_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let egg = tmp.path().join("demo.egg-info");
    fs::create_dir(&egg).unwrap();
    fs::write(egg.join("PKG-INFO"), "Metadata-Version: 1.2\nName: demo\nVersion: 0.1\n").unwrap();
    fs::write(egg.join("requires.txt"), "six\n\n[test]\npytest\n").unwrap();

    let root = repo(tmp.path()).resolve_root("demo", "0.1").unwrap();
    assert_eq!(root.version, "0.1");
    assert_eq!(root.dependencies.len(), 2);
    assert!(root.dependencies[1].envs.contains("test"));
}

#[test]
fn test_embedded_config_points_at_pipfile() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("pyproject.toml"),
        "[tool.pkgscope.main]\nfrom = { format = \"pipfile\", path = \"deps/Pipfile\" }\n",
    )
    .unwrap();
    fs::create_dir(tmp.path().join("deps")).unwrap();
    fs::write(tmp.path().join("deps/Pipfile"), "[packages]\nflask = \">=3\"\n").unwrap();
    fs::write(tmp.path().join("requirements.txt"), "django\n").unwrap();

    let root = repo(tmp.path()).resolve_root("demo", "1.0").unwrap();
    assert_eq!(root.dependencies.len(), 1);
    assert_eq!(root.dependencies[0].name, "flask");
}

#[test]
fn test_conventional_files_priority() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("requirements.txt"), "django\n").unwrap();
    fs::write(
        tmp.path().join("Pipfile.lock"),
        r#"{"_meta": {}, "default": {"requests": {"version": "==2.31.0"}}, "develop": {}}"#,
    )
    .unwrap();

    let root = repo(tmp.path()).resolve_root("demo", "1.0").unwrap();
    assert_eq!(root.dependencies.len(), 1);
    assert_eq!(root.dependencies[0].name, "requests");
}

#[test]
fn test_pyproject_project_table() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("pyproject.toml"),
        "[project]\nname = \"demo\"\nversion = \"3.1\"\ndependencies = [\"httpx\"]\n",
    )
    .unwrap();

    let root = repo(tmp.path()).resolve_root("demo", "3.1").unwrap();
    assert_eq!(root.version, "3.1");
    assert_eq!(root.dependencies[0].name, "httpx");
}

#[test]
fn test_unresolvable_directory() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("README.md"), "# demo\n").unwrap();

    let err = repo(tmp.path()).resolve_root("demo", "1.0").unwrap_err();
    assert!(matches!(err, ResolveError::NotFound { .. }));
}

#[test]
fn test_releases_newest_first() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("dist")).unwrap();
    write_sdist(
        &tmp.path().join("dist/demo-1.0.tar.gz"),
        "demo-1.0",
        "Metadata-Version: 2.1\nName: demo\nVersion: 1.0\nLicense: MIT\n",
    );
    fs::write(tmp.path().join("dist/demo-0.9.zip"), "").unwrap();

    let mut dep = Dependency::new("demo", "==1.0");
    let releases = repo(tmp.path()).list_releases(&mut dep).unwrap();

    let versions: Vec<_> = releases.iter().map(|r| r.version.as_str()).collect();
    assert_eq!(versions, ["1.0", "1.0", "0.9"]);
    assert_eq!(dep.metadata.license.as_deref(), Some("MIT"));
}
