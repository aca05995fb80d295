// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{session_for, user};
use exptrack::storage::{clear_session, load_session, save_session};

#[test]
fn session_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("session.json");
    assert!(load_session(&path).unwrap().is_none());

    let session = session_for(user("u-1"));
    save_session(&path, &session).unwrap();
    assert_eq!(load_session(&path).unwrap(), Some(session));

    clear_session(&path).unwrap();
    assert!(load_session(&path).unwrap().is_none());
    // Clearing twice is fine.
    clear_session(&path).unwrap();
}

#[test]
fn corrupt_session_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = load_session(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Corrupt session file"));
}

#[cfg(unix)]
#[test]
fn session_file_is_private_to_the_owner() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let path = data.join("session.json");
    save_session(&path, &session_for(user("u-1"))).unwrap();
    let mode = |p: &std::path::Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&path), 0o600);
    assert_eq!(mode(&data), 0o700);

    // An existing world-readable file is tightened on the next save.
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
    save_session(&path, &session_for(user("u-2"))).unwrap();
    assert_eq!(mode(&path), 0o600);
}
