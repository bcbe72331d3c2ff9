use crate::model::{Dependency, Root};

/// Copy descriptive metadata from `root` into `dep` wherever `dep` has none.
///
/// Existing values are never overwritten and lists are never merged element-wise.
pub fn merge_metadata_from_root(dep: &mut Dependency, root: &Root) {
    let target = &mut dep.metadata;
    let source = &root.metadata;

    if target.description.as_ref().is_none_or(String::is_empty) {
        target.description.clone_from(&source.description);
    }
    if target.authors.is_empty() {
        target.authors.clone_from(&source.authors);
    }
    if target.links.is_empty() {
        target.links.clone_from(&source.links);
    }
    if target.classifiers.is_empty() {
        target.classifiers.clone_from(&source.classifiers);
    }
    if target.license.as_ref().is_none_or(String::is_empty) {
        target.license.clone_from(&source.license);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Root {
        let mut root = Root::new("demo", "1.0");
        root.metadata.description = Some("from root".to_string());
        root.metadata.authors = vec!["Root Author".to_string()];
        root.metadata.classifiers = vec!["Topic :: Utilities".to_string()];
        root.metadata.license = Some("Apache-2.0".to_string());
        let _ = root.metadata.links.insert("homepage".to_string(), "https://root.example".to_string());
        root
    }

    #[test]
    fn test_existing_license_is_kept() {
        let mut dep = Dependency::new("demo", "");
        dep.metadata.license = Some("MIT".to_string());

        merge_metadata_from_root(&mut dep, &root());
        assert_eq!(dep.metadata.license.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_missing_authors_are_filled() {
        let mut dep = Dependency::new("demo", "");

        merge_metadata_from_root(&mut dep, &root());
        assert_eq!(dep.metadata.authors, ["Root Author"]);
        assert_eq!(dep.metadata.description.as_deref(), Some("from root"));
        assert_eq!(dep.metadata.classifiers, ["Topic :: Utilities"]);
        assert_eq!(dep.metadata.links.len(), 1);
        assert_eq!(dep.metadata.license.as_deref(), Some("Apache-2.0"));
    }

    #[test]
    fn test_lists_are_not_merged() {
        let mut dep = Dependency::new("demo", "");
        dep.metadata.classifiers = vec!["Mine".to_string()];

        merge_metadata_from_root(&mut dep, &root());
        assert_eq!(dep.metadata.classifiers, ["Mine"]);
    }

    #[test]
    fn test_empty_description_counts_as_missing() {
        let mut dep = Dependency::new("demo", "");
        dep.metadata.description = Some(String::new());

        merge_metadata_from_root(&mut dep, &root());
        assert_eq!(dep.metadata.description.as_deref(), Some("from root"));
    }
}
