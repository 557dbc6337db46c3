//! Backup is created once and never overwritten.

mod common;

use hostpin::backup::{self, BackupOutcome};
use std::fs;

#[test]
fn first_backup_is_byte_exact() {
    let dir = common::temp_hostpin_home();
    let content = "127.0.0.1\tlocalhost\r\n# tabs\tand \u{e9}\n";
    let hosts = common::write_hosts(dir.path(), content);

    let outcome = backup::backup(&hosts).unwrap();

    let bak = dir.path().join("hosts.bak");
    assert_eq!(
        outcome,
        BackupOutcome::Created {
            path: bak.clone(),
            bytes: content.len() as u64
        }
    );
    assert_eq!(fs::read(&bak).unwrap(), content.as_bytes());
}

#[test]
fn second_backup_keeps_first_content() {
    let dir = common::temp_hostpin_home();
    let hosts = common::write_hosts(dir.path(), "1.1.1.1 original.test\n");

    backup::backup(&hosts).unwrap();
    fs::write(&hosts, "2.2.2.2 changed.test\n").unwrap();
    let outcome = backup::backup(&hosts).unwrap();

    assert!(matches!(outcome, BackupOutcome::AlreadyPresent { .. }));
    assert_eq!(common::read(&dir.path().join("hosts.bak")), "1.1.1.1 original.test\n");
}

#[test]
fn preexisting_backup_is_respected() {
    let dir = common::temp_hostpin_home();
    let hosts = common::write_hosts(dir.path(), "new\n");
    fs::write(dir.path().join("hosts.bak"), "known good\n").unwrap();

    backup::backup(&hosts).unwrap();

    assert_eq!(common::read(&dir.path().join("hosts.bak")), "known good\n");
}
