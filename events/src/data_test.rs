use super::*;

// =============================================================
// Activity
// =============================================================

#[test]
fn activity_default_is_start() {
    assert_eq!(Activity::default(), Activity::Start);
}

#[test]
fn activity_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Activity::Start).expect("serialize"), "\"start\"");
    assert_eq!(serde_json::to_string(&Activity::Ar).expect("serialize"), "\"ar\"");
    assert_eq!(
        serde_json::to_string(&Activity::Energizer).expect("serialize"),
        "\"energizer\""
    );
}

#[test]
fn activity_deserializes_from_wire_spelling() {
    assert_eq!(
        serde_json::from_str::<Activity>("\"instruments\"").expect("deserialize"),
        Activity::Instruments
    );
    assert_eq!(
        serde_json::from_str::<Activity>("\"beats\"").expect("deserialize"),
        Activity::Beats
    );
}

#[test]
fn activity_rejects_unknown_id() {
    assert!(serde_json::from_str::<Activity>("\"karaoke\"").is_err());
}

#[test]
fn activity_display_matches_wire_spelling() {
    assert_eq!(Activity::Lobby.to_string(), "lobby");
    assert_eq!(Activity::Ar.to_string(), "ar");
}

// =============================================================
// Phase enums
// =============================================================

#[test]
fn beat_phase_default_is_instructions() {
    assert_eq!(BeatPhase::default(), BeatPhase::Instructions);
}

#[test]
fn beat_phase_uses_snake_case_spellings() {
    assert_eq!(serde_json::to_string(&BeatPhase::BeatOn).expect("serialize"), "\"beat_on\"");
    assert_eq!(
        serde_json::from_str::<BeatPhase>("\"beat_off\"").expect("deserialize"),
        BeatPhase::BeatOff
    );
}

#[test]
fn ar_phase_default_is_anchoring() {
    assert_eq!(ArPhase::default(), ArPhase::Anchoring);
}

#[test]
fn ar_phase_round_trips_all_variants() {
    let phases = [
        ArPhase::Instructions,
        ArPhase::Anchoring,
        ArPhase::Hunting,
        ArPhase::Boss,
        ArPhase::Results,
    ];
    for phase in phases {
        let json = serde_json::to_string(&phase).expect("serialize");
        assert_eq!(serde_json::from_str::<ArPhase>(&json).expect("deserialize"), phase);
    }
}

#[test]
fn instruments_phase_default_is_demo() {
    assert_eq!(InstrumentsPhase::default(), InstrumentsPhase::Demo);
}

#[test]
fn energizer_phase_default_is_first_instructions() {
    assert_eq!(EnergizerPhase::default(), EnergizerPhase::Instructions1);
}

#[test]
fn energizer_phase_uses_snake_case_spellings() {
    assert_eq!(
        serde_json::to_string(&EnergizerPhase::SendEnergy).expect("serialize"),
        "\"send_energy\""
    );
    assert_eq!(
        serde_json::to_string(&EnergizerPhase::Instructions1).expect("serialize"),
        "\"instructions1\""
    );
    assert_eq!(
        serde_json::from_str::<EnergizerPhase>("\"sequence_input\"").expect("deserialize"),
        EnergizerPhase::SequenceInput
    );
}

// =============================================================
// Payload structs
// =============================================================

#[test]
fn player_group_is_optional_on_the_wire() {
    let bare: Player =
        serde_json::from_str(r#"{"id":"p1","nickname":"Alex"}"#).expect("deserialize");
    assert_eq!(bare.group, None);

    let grouped: Player =
        serde_json::from_str(r#"{"id":"p2","nickname":"Sam","group":"g1"}"#).expect("deserialize");
    assert_eq!(grouped.group.as_deref(), Some("g1"));
}

#[test]
fn player_without_group_omits_the_field() {
    let player = Player { id: "p1".to_owned(), nickname: "Alex".to_owned(), group: None };
    let json = serde_json::to_string(&player).expect("serialize");
    assert!(!json.contains("group"));
}

#[test]
fn group_accuracy_fields_are_camel_case() {
    let json = serde_json::to_string(&GroupAccuracy {
        group_id: "g1".to_owned(),
        accuracy: 0.75,
        tap_count: 12,
    })
    .expect("serialize");
    assert!(json.contains("\"groupId\""));
    assert!(json.contains("\"tapCount\""));
}

#[test]
fn sequence_result_fields_are_camel_case() {
    let json = serde_json::to_string(&SequenceResult {
        success: true,
        correct_count: 7,
        total_participants: 9,
    })
    .expect("serialize");
    assert!(json.contains("\"correctCount\""));
    assert!(json.contains("\"totalParticipants\""));
}

#[test]
fn sequence_pattern_cells_default_empty() {
    let pattern: SequencePattern =
        serde_json::from_str(r#"{"rows":3,"cols":3}"#).expect("deserialize");
    assert!(pattern.cells.is_empty());
}

#[test]
fn state_snapshot_players_default_empty() {
    let snapshot: StateSnapshot =
        serde_json::from_str(r#"{"activity":"lobby"}"#).expect("deserialize");
    assert_eq!(snapshot.activity, Activity::Lobby);
    assert!(snapshot.players.is_empty());
    assert!(snapshot.groups.is_none());
}

// =============================================================
// ClientEvent
// =============================================================

#[test]
fn register_entertainer_carries_fixed_role() {
    let ClientEvent::Register { role } = ClientEvent::register_entertainer() else {
        panic!("expected register variant");
    };
    assert_eq!(role, ENTERTAINER_ROLE);
}
