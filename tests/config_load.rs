//! config.toml parsing: candidates, policy, overrides.

mod common;

use hostpin::candidates::CandidateList;
use hostpin::config::{load_config, Config, DEFAULT_HELP_URL, DEFAULT_TARGET_HOST};
use hostpin::hosts::MalformedLinePolicy;
use std::fs;

#[test]
fn missing_file_gives_defaults() {
    let dir = common::temp_hostpin_home();
    let cfg = Config::load(&dir.path().join("config.toml")).unwrap();
    assert_eq!(cfg.target_host, DEFAULT_TARGET_HOST);
    assert_eq!(cfg.help_url, DEFAULT_HELP_URL);
    assert_eq!(cfg.malformed_lines, MalformedLinePolicy::Preserve);
    assert_eq!(cfg.candidate_list().unwrap(), CandidateList::builtin());
}

#[test]
fn configured_candidates_replace_builtin() {
    let dir = common::temp_hostpin_home();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
target_host = "gitlab.com"
malformed_lines = "fail"

[[candidates]]
address = "172.65.251.78"
priority = 10

[[candidates]]
address = "172.65.251.79"
priority = 20
"#,
    )
    .unwrap();

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.target_host, "gitlab.com");
    assert_eq!(cfg.malformed_lines, MalformedLinePolicy::Fail);
    let list = cfg.candidate_list().unwrap();
    assert_eq!(list.list_all().len(), 2);
    assert_eq!(list.select_by_priority("20").unwrap(), "172.65.251.79");
}

#[test]
fn duplicate_priorities_are_rejected() {
    let dir = common::temp_hostpin_home();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[[candidates]]\naddress = \"1.1.1.1\"\npriority = 1\n[[candidates]]\naddress = \"2.2.2.2\"\npriority = 1\n",
    )
    .unwrap();

    let cfg = Config::load(&path).unwrap();
    let err = cfg.candidate_list().unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn unknown_keys_are_errors() {
    let dir = common::temp_hostpin_home();
    let path = dir.path().join("config.toml");
    fs::write(&path, "target = \"github.com\"\n").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn empty_target_host_is_rejected() {
    let dir = common::temp_hostpin_home();
    let path = dir.path().join("config.toml");
    fs::write(&path, "target_host = \"  \"\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("target_host"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = common::temp_hostpin_home();
    let typo = dir.path().join("typo.toml");
    let err = load_config(Some(typo.as_path())).unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(err.to_string().contains("typo.toml"));
}

#[test]
fn explicit_config_is_loaded() {
    let dir = common::temp_hostpin_home();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "hosts_file = \"/tmp/test-hosts\"\n").unwrap();
    let cfg = load_config(Some(path.as_path())).unwrap();
    assert_eq!(cfg.hosts_file, Some(std::path::PathBuf::from("/tmp/test-hosts")));
}
