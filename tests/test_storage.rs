//! On-disk store behaviour: scores survive reopening the database file.

use dice_duel::storage::{ScoreStore, SqliteStore};
use tempfile::TempDir;

#[test]
fn scores_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.register("alice", "al1ce#").unwrap();
        store.register("bob", "b0b#bob").unwrap();
        store.set_score("alice", 70).unwrap();
        store.set_score("bob", 80).unwrap();
        store.close().unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get_score("alice").unwrap(), 70);
    assert_eq!(store.get_score("bob").unwrap(), 80);
    assert!(store.credentials_match("bob", "b0b#bob").unwrap());

    let top = store.top_n(5).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].username, "bob");
    assert_eq!(top[1].username, "alice");
}

#[test]
fn fresh_file_has_empty_leaderboard() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(dir.path().join("new.db")).unwrap();
    assert!(store.top_n(5).unwrap().is_empty());
    assert!(!store.username_exists("anyone").unwrap());
}

#[test]
fn leaderboard_serialises_to_json() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.register("alice", "al1ce#").unwrap();
    store.set_score("alice", 12).unwrap();

    let json = serde_json::to_value(store.top_n(5).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "rank": 1, "username": "alice", "score": 12 }])
    );
}
