//! Snapshot round-trip and file store tests.

use scorekeeper::persistence::{load_tolerant, FileStore, MemoryStore, Snapshot, SnapshotFormat, SnapshotStore};
use scorekeeper::{Color, ColorScheme, GameId, Ledger, LedgerError, PlayerId};

fn three_players_two_games() -> Ledger {
    let mut ledger = Ledger::new();
    let a = ledger.add_player("Ann", Color::rgb(0xff, 0x6b, 0x6b)).unwrap().id;
    let b = ledger.add_player("Ben", Color::rgb(0x4e, 0xcd, 0xc4)).unwrap().id;
    let c = ledger.add_player("Cat", Color::rgb(0x45, 0xb7, 0xd1)).unwrap().id;

    let g1 = ledger.add_game().unwrap().id;
    let g2 = ledger.add_game().unwrap().id;
    ledger.update_score(g1, a, "10");
    ledger.update_score(g1, b, "7.5");
    ledger.update_score(g2, c, "-2");
    ledger.update_score(g2, a, "1");
    ledger
}

#[test]
fn test_json_round_trip() {
    let ledger = three_players_two_games();
    let snapshot = Snapshot::capture(&ledger, ColorScheme::Dark);

    let bytes = SnapshotFormat::Json.encode(&snapshot).unwrap();
    let decoded = SnapshotFormat::Json.decode(&bytes).unwrap();
    assert_eq!(decoded.color_scheme, ColorScheme::Dark);

    let restored = decoded.into_ledger().unwrap();
    assert_eq!(restored, ledger);
    assert_eq!(restored.next_player_id(), PlayerId::new(4));
    assert_eq!(restored.next_game_id(), GameId::new(3));
}

#[test]
fn test_counters_follow_max_id_not_count() {
    let mut ledger = three_players_two_games();
    ledger.remove_player(PlayerId::new(1));
    ledger.remove_player(PlayerId::new(2));

    let restored = Snapshot::capture(&ledger, ColorScheme::Light).into_ledger().unwrap();
    assert_eq!(restored.players().len(), 1);
    assert_eq!(restored.next_player_id(), PlayerId::new(4));

    let mut restored = restored;
    assert_eq!(restored.add_player("Dan", Color::DEFAULT).unwrap().id, PlayerId::new(4));
}

#[test]
fn test_hand_written_json_is_accepted() {
    let json = r##"{
        "players": [
            {"id": 3, "name": "X", "color": "#112233"},
            {"id": 5, "name": "Y", "color": "#ABC"}
        ],
        "games": [
            {"id": 9, "scores": {"3": 4, "5": 2.5, "8": 100}}
        ]
    }"##;

    let snapshot = SnapshotFormat::Json.decode(json.as_bytes()).unwrap();
    assert_eq!(snapshot.color_scheme, ColorScheme::Light);
    assert_eq!(snapshot.players[1].color, Color::rgb(0xaa, 0xbb, 0xcc));

    let ledger = snapshot.into_ledger().unwrap();
    assert_eq!(ledger.next_player_id(), PlayerId::new(6));
    assert_eq!(ledger.next_game_id(), GameId::new(10));

    // Scores for player 8, who does not exist, are dropped on restore.
    let game = ledger.game(GameId::new(9)).unwrap();
    assert_eq!(game.scores.len(), 2);
    assert_eq!(game.score(PlayerId::new(3)), 4.0);
    assert_eq!(game.score(PlayerId::new(5)), 2.5);
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = three_players_two_games();

    for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
        let mut store = FileStore::new(dir.path().join("nested"), format);
        assert!(store.load().unwrap().is_none());

        let snapshot = Snapshot::capture(&ledger, ColorScheme::Dark);
        store.save(&snapshot).unwrap();
        assert!(store.path().is_file());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.into_ledger().unwrap(), ledger);
    }
}

#[test]
fn test_file_store_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path(), SnapshotFormat::Json);

    let mut ledger = three_players_two_games();
    store.save(&Snapshot::capture(&ledger, ColorScheme::Light)).unwrap();

    ledger.reset_games();
    store.save(&Snapshot::capture(&ledger, ColorScheme::Light)).unwrap();

    let loaded = store.load().unwrap().unwrap().into_ledger().unwrap();
    assert_eq!(loaded.games().len(), 1);

    // No temporary files are left behind.
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_corrupt_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path(), SnapshotFormat::Json);
    std::fs::write(store.path(), b"{\"players\": [oops").unwrap();

    assert!(store.load().is_err());
    assert!(load_tolerant(&store).is_none());
}

#[test]
fn test_missing_snapshot_loads_as_none() {
    let store = MemoryStore::new(SnapshotFormat::Binary);
    assert!(load_tolerant(&store).is_none());
}

#[test]
fn test_max_id_snapshot_is_rejected() {
    let snapshot = SnapshotFormat::Json
        .decode(br##"{"players":[{"id":4294967295,"name":"X","color":"#112233"}],"games":[]}"##)
        .unwrap();
    assert_eq!(snapshot.into_ledger(), Err(LedgerError::PlayerIdsExhausted));

    let snapshot = SnapshotFormat::Json
        .decode(
            br##"{"players":[{"id":1,"name":"X","color":"#112233"}],
                  "games":[{"id":4294967295,"scores":{"1":2}}]}"##,
        )
        .unwrap();
    assert_eq!(snapshot.into_ledger(), Err(LedgerError::GameIdsExhausted));
}

#[test]
fn test_ids_below_max_still_allocate() {
    let snapshot = SnapshotFormat::Json
        .decode(br##"{"players":[{"id":1,"name":"A","color":"#112233"},{"id":4294967294,"name":"B","color":"#445566"}]}"##)
        .unwrap();
    let mut ledger = snapshot.into_ledger().unwrap();

    assert_eq!(ledger.next_player_id(), PlayerId::new(u32::MAX));
    assert_eq!(
        ledger.add_player("C", Color::DEFAULT),
        Err(LedgerError::PlayerIdsExhausted)
    );
    assert_eq!(ledger.players().len(), 2);
}
