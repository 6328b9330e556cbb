use super::*;
use events::GroupInfo;

fn player(id: &str, nickname: &str) -> Player {
    Player { id: id.to_owned(), nickname: nickname.to_owned(), group: None }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_session_starts_disconnected_on_start_activity() {
    let state = SessionState::default();
    assert_eq!(state.current_activity, Activity::Start);
    assert!(!state.connected);
    assert!(state.players.is_empty());
    assert!(state.groups.is_none());
}

// =============================================================
// Roster
// =============================================================

#[test]
fn upsert_inserts_new_player() {
    let mut state = SessionState::default();
    state.upsert_player(player("p1", "Alex"));
    assert_eq!(state.players.len(), 1);
    assert_eq!(state.players["p1"].nickname, "Alex");
}

#[test]
fn upsert_replaces_existing_player_by_id() {
    let mut state = SessionState::default();
    state.upsert_player(player("p1", "Alex"));
    state.upsert_player(player("p1", "Alexandra"));
    assert_eq!(state.players.len(), 1);
    assert_eq!(state.players["p1"].nickname, "Alexandra");
}

#[test]
fn remove_deletes_player_and_ignores_unknown_ids() {
    let mut state = SessionState::default();
    state.upsert_player(player("p1", "Alex"));
    state.remove_player("p1");
    state.remove_player("ghost");
    assert!(state.players.is_empty());
}

#[test]
fn roster_after_replay_equals_joins_minus_leaves() {
    let mut state = SessionState::default();
    for (id, nickname) in [("p1", "Alex"), ("p2", "Sam"), ("p3", "Kim")] {
        state.upsert_player(player(id, nickname));
    }
    state.remove_player("p2");
    state.upsert_player(player("p4", "Noor"));
    state.remove_player("p1");

    let mut ids: Vec<&str> = state.players.keys().map(String::as_str).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["p3", "p4"]);
}

// =============================================================
// Activity and groups
// =============================================================

#[test]
fn set_activity_only_touches_activity() {
    let mut state = SessionState::default();
    state.upsert_player(player("p1", "Alex"));
    state.set_activity(Activity::Beats);
    assert_eq!(state.current_activity, Activity::Beats);
    assert_eq!(state.players.len(), 1);
}

#[test]
fn replace_groups_is_wholesale() {
    let mut state = SessionState::default();
    let mut first = GroupDefinitions::new();
    first.insert("g1".to_owned(), GroupInfo { name: "Red".to_owned(), members: vec![] });
    state.replace_groups(first);

    let mut second = GroupDefinitions::new();
    second.insert("g2".to_owned(), GroupInfo { name: "Blue".to_owned(), members: vec![] });
    state.replace_groups(second);

    let groups = state.groups.expect("groups set");
    assert!(!groups.contains_key("g1"));
    assert_eq!(groups["g2"].name, "Blue");
}

// =============================================================
// Snapshot and reset
// =============================================================

#[test]
fn snapshot_replaces_roster_wholesale() {
    let mut state = SessionState::default();
    state.upsert_player(player("stale", "Old"));

    state.apply_snapshot(StateSnapshot {
        activity: Activity::Lobby,
        players: vec![player("p1", "Alex"), player("p2", "Sam")],
        groups: None,
    });

    assert_eq!(state.current_activity, Activity::Lobby);
    assert_eq!(state.players.len(), 2);
    assert!(!state.players.contains_key("stale"));
}

#[test]
fn reset_preserves_transport_flag() {
    let mut state = SessionState::default();
    state.set_connected(true);
    state.set_activity(Activity::Energizer);
    state.upsert_player(player("p1", "Alex"));

    state.reset();

    assert!(state.connected);
    assert_eq!(state.current_activity, Activity::Start);
    assert!(state.players.is_empty());
}
