use mdtemplate::engine::{Namespace, TemplateSet};
use mdtemplate::error::Error;
use mdtemplate::preprocessor::Preprocessor;
use mdtemplate::source::{base_name, expand_glob, unit_name, FsReader, SourceReader};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn pattern(dir: &TempDir, glob: &str) -> String {
    format!("{}/{}", dir.path().display(), glob)
}

#[test]
fn test_unit_name_derivation() {
    assert_eq!(unit_name(&base_name(Path::new("site/pages/home.mod.md")), ".mod.md"), "home");
    assert_eq!(unit_name("home.page.md", ".page.md"), "home");
    assert_eq!(unit_name("README.md", ".mod.md"), "README.md");
}

#[test]
fn test_expand_glob_sorted_and_files_only() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.mod.md", "b");
    write(dir.path(), "a.mod.md", "a");
    write(dir.path(), "notes.txt", "n");
    fs::create_dir(dir.path().join("c.mod.md")).unwrap();

    let paths = expand_glob(&pattern(&dir, "*.mod.md")).unwrap();
    assert_eq!(paths, vec![dir.path().join("a.mod.md"), dir.path().join("b.mod.md")]);
}

#[test]
fn test_star_does_not_cross_directories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "top.mod.md", "t");
    write(dir.path(), "nested/deep.mod.md", "d");

    let paths = expand_glob(&pattern(&dir, "*.mod.md")).unwrap();
    assert_eq!(paths, vec![dir.path().join("top.mod.md")]);

    let paths = expand_glob(&pattern(&dir, "**/*.mod.md")).unwrap();
    assert_eq!(paths.len(), 2);
}

#[test]
fn test_expand_glob_errors() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        expand_glob(&pattern(&dir, "*.mod.md")),
        Err(Error::NoMatchError { .. })
    ));
    assert!(matches!(
        expand_glob(&pattern(&dir, "missing/*.mod.md")),
        Err(Error::NoMatchError { .. })
    ));
    assert!(matches!(expand_glob("pages/[a.mod.md"), Err(Error::PatternError { .. })));
}

#[test]
fn test_fs_reader() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "page.mod.md", "# Page");
    let (name, bytes) = FsReader.read(&dir.path().join("page.mod.md")).unwrap();
    assert_eq!(name, "page.mod.md");
    assert_eq!(bytes, b"# Page");
    assert!(FsReader.read(&dir.path().join("nope.md")).is_err());
}

#[test]
fn test_glob_new_roots_at_first_unit() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "layout.mod.md", "{{ template \"nav\" . }}\n\n{{ template \"body\" . }}");
    write(dir.path(), "nav.mod.md", "* [Home](/)");
    write(dir.path(), "body.mod.md", "Body");

    let namespace: TemplateSet =
        Preprocessor::default().glob_new(&pattern(&dir, "*.mod.md")).unwrap();
    assert_eq!(namespace.name(), "body");
    assert_eq!(namespace.defined_templates(), r#""body", "layout", "nav""#);
    assert!(namespace.unresolved_references().is_empty());
}

#[test]
fn test_parse_glob_without_matches_leaves_namespace() {
    let dir = TempDir::new().unwrap();
    let preprocessor = Preprocessor::default();
    let mut namespace = TemplateSet::new("site");
    preprocessor.parse_str(&mut namespace, "site", "existing").unwrap();

    let err = preprocessor.parse_glob(&mut namespace, &pattern(&dir, "*.mod.md")).unwrap_err();
    assert!(matches!(err, Error::NoMatchError { .. }));
    assert_eq!(namespace.len(), 1);
    assert!(namespace.contains("site"));
}

#[test]
fn test_parse_glob_into_named_root() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "site.mod.md", "root content");
    write(dir.path(), "about.mod.md", "about");

    let preprocessor = Preprocessor::builder()
        .converter(mdtemplate::markup::ComrakConverter::default())
        .build()
        .unwrap();
    let mut namespace = TemplateSet::new("site");
    preprocessor.parse_glob(&mut namespace, &pattern(&dir, "*.mod.md")).unwrap();

    assert!(namespace.lookup("site").unwrap().source().contains("root content"));
    assert!(namespace.contains("about"));
}
