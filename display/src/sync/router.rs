//! Inbound event dispatch.
//!
//! DESIGN
//! ======
//! Every decoded server message passes through [`apply`], the only code
//! path that writes to the domain stores. Dispatch is an exhaustive match
//! on the event union; adding a wire event without routing it is a compile
//! error. Unrecognized tags mutate nothing, so replaying a stream with
//! unknown events interleaved leaves the stores bit-for-bit identical.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use std::time::Instant;

use events::{Activity, EnergizerPhase, Inbound, SequenceResult, ServerEvent, Slide, StateSnapshot};

use crate::state::energizer::carries_ambient_loop;
use crate::state::{Cue, Stores, owning_store};

/// Apply one inbound message to the stores and bump the revision counter.
pub async fn apply(stores: &Stores, inbound: Inbound) {
    match inbound {
        Inbound::Event(event) => {
            dispatch(stores, event).await;
            stores.mark_changed();
        }
        Inbound::Unrecognized { tag } => {
            tracing::debug!(tag, "dropping unrecognized server event");
        }
    }
}

async fn dispatch(stores: &Stores, event: ServerEvent) {
    match event {
        ServerEvent::PlayerJoined { player } => {
            stores.session.write().await.upsert_player(player);
        }
        ServerEvent::PlayerLeft { player_id } => {
            stores.session.write().await.remove_player(&player_id);
        }
        ServerEvent::ActivityStarted { activity } => {
            apply_activity(stores, activity).await;
        }
        ServerEvent::GroupsUpdated { groups } => {
            stores.session.write().await.replace_groups(groups);
        }
        ServerEvent::Reaction { emoji } => {
            stores.lobby.write().await.add_reaction(&emoji, Instant::now());
        }
        ServerEvent::BeatPhaseChange { phase, round, bpm } => {
            stores.beats.write().await.set_phase(phase, round, bpm);
        }
        ServerEvent::BeatTeamSyncUpdate { group_accuracies } => {
            stores.beats.write().await.replace_accuracies(group_accuracies);
        }
        ServerEvent::BeatResults { winner, group_accuracies, mvp } => {
            stores.beats.write().await.set_results(winner, group_accuracies, mvp);
        }
        ServerEvent::ArPhaseChange { phase } => {
            stores.ar.write().await.set_phase(phase);
        }
        ServerEvent::ArBossHealth { health, max_health } => {
            stores.ar.write().await.set_boss_health(health, max_health);
        }
        ServerEvent::ArItemCollected { item_id, tap_count, taps_needed } => {
            stores.ar.write().await.set_item_collected(&item_id, tap_count, taps_needed);
        }
        ServerEvent::ArResults { total_taps, participating_players } => {
            stores.ar.write().await.set_results(total_taps, participating_players);
        }
        ServerEvent::InstrumentsPhase { phase } => {
            stores.instruments.write().await.set_phase(phase);
        }
        ServerEvent::InstrumentsDemoStep { instrument } => {
            stores.instruments.write().await.set_demo_instrument(instrument);
        }
        ServerEvent::InstrumentsEnergy { level } => {
            stores.instruments.write().await.set_energy_level(level);
        }
        ServerEvent::InstrumentsSpotlight { active, instrument } => {
            stores.instruments.write().await.set_spotlight(active, instrument);
        }
        ServerEvent::EnergizerPhaseChange { phase } => {
            apply_energizer_phase(stores, phase).await;
        }
        ServerEvent::EnergizerInstruction { text, index, total } => {
            stores.energizer.write().await.set_slide(Slide { text, index, total });
        }
        ServerEvent::EnergizerSpotlight { active } => {
            stores.energizer.write().await.set_spotlight(active);
        }
        ServerEvent::EnergizerEntertainerUpdate { players } => {
            stores.energizer.write().await.replace_players(players);
        }
        ServerEvent::EnergizerSequenceShow { pattern } => {
            stores.energizer.write().await.show_pattern(pattern);
        }
        ServerEvent::EnergizerSequenceHide => {
            stores.energizer.write().await.hide_pattern();
        }
        ServerEvent::EnergizerSequenceResult { success, correct_count, total_participants } => {
            stores
                .energizer
                .write()
                .await
                .set_sequence_result(SequenceResult { success, correct_count, total_participants });
        }
        ServerEvent::StateUpdate { state } => {
            apply_snapshot(stores, state).await;
        }
    }
}

/// Move `current_activity` and reset the store being entered, unless the
/// previous activity already owned it. Re-announcing the current activity
/// resets nothing.
async fn apply_activity(stores: &Stores, activity: Activity) {
    let previous = {
        let mut session = stores.session.write().await;
        let previous = session.current_activity;
        session.set_activity(activity);
        previous
    };

    let entered = owning_store(activity);
    if owning_store(previous) != entered {
        stores.reset_store(entered).await;
    }
}

/// Full-state push. Activity moves through the same reset-on-entry rule as
/// `activity_started`.
async fn apply_snapshot(stores: &Stores, snapshot: StateSnapshot) {
    let activity = snapshot.activity;
    let previous = {
        let mut session = stores.session.write().await;
        let previous = session.current_activity;
        session.apply_snapshot(snapshot);
        previous
    };

    let entered = owning_store(activity);
    if owning_store(previous) != entered {
        stores.reset_store(entered).await;
    }
}

/// Energizer phase moves double as ambient-audio edges: entering the loop
/// set raises a start cue, leaving it raises a stop cue.
async fn apply_energizer_phase(stores: &Stores, phase: EnergizerPhase) {
    let was_ambient = {
        let mut energizer = stores.energizer.write().await;
        let was_ambient = carries_ambient_loop(energizer.phase);
        energizer.set_phase(phase);
        was_ambient
    };

    match (was_ambient, carries_ambient_loop(phase)) {
        (false, true) => stores.publish_cue(Cue::EnergizerAmbientStarted),
        (true, false) => stores.publish_cue(Cue::EnergizerAmbientStopped),
        _ => {}
    }
}
