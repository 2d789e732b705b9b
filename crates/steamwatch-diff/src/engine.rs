//! Transition rules.
//!
//! `decide` compares the last observation held in a [`ServerState`] with the
//! current one. Rules are evaluated in order and the first match wins; see
//! the crate docs for the table.

use std::cmp::Ordering;

use tracing::trace;

use steamwatch_state::{Observation, ServerState, Snapshot};

use crate::decision::{Decision, Notification, Severity};

/// Decide what to show for one server given its previous state and the
/// latest observation. Pure and deterministic.
pub fn decide(previous: &ServerState, current: &Observation) -> Decision {
    let Some(last) = &previous.last else {
        // First sight establishes the baseline silently.
        return Decision::NoChange;
    };

    let decision = match (last, current) {
        (Observation::Reachable(old), Observation::Unreachable) => {
            Decision::Notify(went_offline(alias(None, Some(old))))
        }
        (Observation::Unreachable, Observation::Reachable(new)) => {
            Decision::Notify(came_online(alias(Some(new), None)))
        }
        (Observation::Unreachable, Observation::Unreachable) => Decision::NoChange,
        (Observation::Reachable(old), Observation::Reachable(new)) => compare(old, new),
    };

    trace!(kind = decision.kind(), "diff evaluated");
    decision
}

/// Rules 4–6: both observations reachable.
fn compare(old: &Snapshot, new: &Snapshot) -> Decision {
    let footer = Some(alias(Some(new), Some(old)));

    match new.players.cmp(&old.players) {
        Ordering::Equal => {}
        direction => {
            let (verb, severity) = if direction == Ordering::Greater {
                ("joined", Severity::PlayerJoined)
            } else {
                ("left", Severity::PlayerLeft)
            };
            let notification = Notification {
                title: format!(
                    "{}/{} : A player has {verb} the server",
                    new.players, new.max_players
                ),
                body: format!("Playing `{}`", new.map),
                severity,
                footer,
            };
            return if new.players == 0 {
                Decision::NotifyAndClear(notification)
            } else {
                Decision::Notify(notification)
            };
        }
    }

    // A map rotation on an empty server is noise.
    if new.map != old.map && new.players > 0 {
        return Decision::Notify(Notification {
            title: "The server has changed map".to_string(),
            body: format!("Now playing: `{}`", new.map),
            severity: Severity::MapChanged,
            footer,
        });
    }

    Decision::NoChange
}

fn came_online(alias: String) -> Notification {
    Notification {
        title: "The server has come online!".to_string(),
        body: alias,
        severity: Severity::Online,
        footer: None,
    }
}

fn went_offline(alias: String) -> Notification {
    Notification {
        title: "The server has gone offline!".to_string(),
        body: alias,
        severity: Severity::Offline,
        footer: None,
    }
}

/// Display alias: current name, then previous name, then the address.
fn alias(current: Option<&Snapshot>, previous: Option<&Snapshot>) -> String {
    current
        .and_then(Snapshot::display_name)
        .or_else(|| previous.and_then(Snapshot::display_name))
        .map(str::to_string)
        .or_else(|| current.or(previous).map(|s| s.address.clone()))
        .unwrap_or_default()
}
