// tests/config_test.rs
use bump_version::config::{load_config, Config, REPO_CONFIG_FILE};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.manifest_path, "pyproject.toml");
    assert_eq!(config.source_prefixes, vec!["src/".to_string()]);
    assert!(config.stage);
}

#[test]
fn test_load_from_explicit_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
manifest_path = "python/pyproject.toml"
source_prefixes = ["python/src/", "python/scripts/"]
stage = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let root = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), root.path()).unwrap();
    assert_eq!(config.manifest_path, "python/pyproject.toml");
    assert_eq!(
        config.source_prefixes,
        vec!["python/src/".to_string(), "python/scripts/".to_string()]
    );
    assert!(!config.stage);
}

#[test]
fn test_repo_config_file_is_picked_up() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(REPO_CONFIG_FILE),
        "source_prefixes = [\"lib/\"]\n",
    )
    .unwrap();

    let config = load_config(None, root.path()).unwrap();
    assert_eq!(config.source_prefixes, vec!["lib/".to_string()]);
    assert_eq!(config.manifest_path, "pyproject.toml");
}

#[test]
fn test_explicit_path_wins_over_repo_config() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(REPO_CONFIG_FILE),
        "manifest_path = \"repo.toml\"\n",
    )
    .unwrap();
    let explicit = root.path().join("custom.toml");
    fs::write(&explicit, "manifest_path = \"custom-manifest.toml\"\n").unwrap();

    let config = load_config(Some(&explicit), root.path()).unwrap();
    assert_eq!(config.manifest_path, "custom-manifest.toml");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");

    let err = load_config(Some(&missing), root.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_malformed_repo_config_is_error() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(REPO_CONFIG_FILE), "stage = \n").unwrap();

    assert!(load_config(None, root.path()).is_err());
}
