//! End-to-end session scenarios: mock channel → driver → store → handle.

use std::time::Duration;

use client_bootstrap::{ClientConfig, SessionBuilder};
use client_channel_core::{
    ChannelFault, ChannelTransport, ClientIntent, ConnectionEvent, ConnectionStatus, FaultKind,
    MemberMessage, MockChannel, RosterMessage, SnapshotMessage,
};
use client_store::{StoreEvent, Topic};
use realm_core::{RealmCode, Revision};
use tokio::sync::broadcast;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(1);

async fn next_event(rx: &mut broadcast::Receiver<StoreEvent>) -> StoreEvent {
    timeout(WAIT, rx.recv())
        .await
        .expect("store notification should arrive")
        .expect("store bus should stay open")
}

fn roster_message(realm: &str, revision: u64, names: &[&str]) -> SnapshotMessage {
    let mut message = SnapshotMessage::bare(realm).with_revision(revision);
    message.party_roster = RosterMessage {
        members: names
            .iter()
            .map(|name| MemberMessage {
                id: format!("id-{name}"),
                name: name.to_string(),
                spectator: false,
            })
            .collect(),
    };
    message
}

#[tokio::test]
async fn ordered_session_converges_to_the_latest_push() {
    client_bootstrap::telemetry::init();

    let channel = MockChannel::new();
    let setup = SessionBuilder::new(ClientConfig::default())
        .transport(channel.clone())
        .build()
        .unwrap();
    let handle = setup.handle;
    tokio::spawn(setup.driver.run());

    let mut snapshots = handle.subscribe(Topic::Snapshot);
    let mut connection = handle.subscribe(Topic::Connection);

    channel.open().await.unwrap();
    channel.push_snapshot(roster_message("ABCD", 1, &["Aria"]));
    channel.push_snapshot(roster_message("ABCD", 2, &["Aria", "Bram"]));

    // Connecting, then Connected.
    next_event(&mut connection).await;
    assert_eq!(
        next_event(&mut connection).await,
        StoreEvent::ConnectionChanged(ConnectionStatus::Connected)
    );
    next_event(&mut snapshots).await;
    next_event(&mut snapshots).await;

    assert_eq!(handle.connection_status(), ConnectionStatus::Connected);
    assert_eq!(handle.server_revision(), Some(Revision(2)));
    assert_eq!(handle.presence().unwrap().len(), 2);

    channel.close().await.unwrap();
    assert_eq!(
        next_event(&mut connection).await,
        StoreEvent::ConnectionChanged(ConnectionStatus::Disconnected)
    );
}

#[tokio::test]
async fn reconnect_replay_cannot_roll_the_view_backward() {
    let channel = MockChannel::new();
    let setup = SessionBuilder::new(ClientConfig::default())
        .transport(channel.clone())
        .build()
        .unwrap();
    let handle = setup.handle;
    tokio::spawn(setup.driver.run());

    let mut snapshots = handle.subscribe(Topic::Snapshot);

    channel.open().await.unwrap();
    channel.push_snapshot(roster_message("ABCD", 5, &["Aria", "Bram"]));
    next_event(&mut snapshots).await;

    // Drop and replay: the server re-sends an old snapshot and a duplicate
    // of the current one around the reconnect.
    channel.emit_lifecycle(ConnectionEvent::Reconnecting);
    channel.emit_lifecycle(ConnectionEvent::Connected);
    channel.push_snapshot(roster_message("ABCD", 3, &["Aria"]));
    channel.push_snapshot(roster_message("ABCD", 5, &["Aria", "Bram"]));
    channel.push_snapshot(roster_message("ABCD", 6, &["Aria", "Bram", "Cole"]));

    // Stale revision 3 produces no snapshot event; the duplicate 5 and the
    // new 6 each do.
    assert_eq!(
        next_event(&mut snapshots).await,
        StoreEvent::SnapshotReplaced {
            revision: Some(Revision(5))
        }
    );
    assert_eq!(
        next_event(&mut snapshots).await,
        StoreEvent::SnapshotReplaced {
            revision: Some(Revision(6))
        }
    );

    assert_eq!(handle.server_revision(), Some(Revision(6)));
    assert_eq!(handle.presence().unwrap().len(), 3);
}

#[tokio::test]
async fn fault_keeps_the_last_good_snapshot_until_recovery() {
    let channel = MockChannel::new();
    let setup = SessionBuilder::new(ClientConfig::default())
        .transport(channel.clone())
        .build()
        .unwrap();
    let handle = setup.handle;
    tokio::spawn(setup.driver.run());

    let mut faults = handle.subscribe(Topic::Fault);
    let mut snapshots = handle.subscribe(Topic::Snapshot);

    channel.open().await.unwrap();
    channel.push_snapshot(roster_message("ABCD", 4, &["Aria"]));
    next_event(&mut snapshots).await;

    channel.emit_lifecycle(ConnectionEvent::Faulted(ChannelFault::new(
        FaultKind::ConnectionLost,
        "keepalive timed out",
    )));

    assert!(matches!(
        next_event(&mut faults).await,
        StoreEvent::FaultRecorded(_)
    ));
    assert_eq!(handle.connection_status(), ConnectionStatus::Errored);
    assert!(handle.last_error().is_some());
    // Degraded, not blanked: the view still shows the last good state.
    assert_eq!(handle.server_revision(), Some(Revision(4)));
    assert_eq!(handle.presence().unwrap().len(), 1);

    // Recovery: a fresh accepted push clears the fault.
    channel.emit_lifecycle(ConnectionEvent::Reconnecting);
    channel.emit_lifecycle(ConnectionEvent::Connected);
    channel.push_snapshot(roster_message("ABCD", 5, &["Aria"]));

    assert_eq!(next_event(&mut faults).await, StoreEvent::FaultCleared);
    assert_eq!(handle.last_error(), None);
    assert_eq!(handle.connection_status(), ConnectionStatus::Connected);
}

#[tokio::test]
async fn connect_announces_join_when_configured() {
    let channel = MockChannel::new();
    let config = ClientConfig {
        realm_code: Some("ABCD".into()),
        display_name: Some("Aria".into()),
        auto_join: true,
    };
    let setup = SessionBuilder::new(config)
        .transport(channel.clone())
        .build()
        .unwrap();
    let handle = setup.handle;
    tokio::spawn(setup.driver.run());

    let mut snapshots = handle.subscribe(Topic::Snapshot);
    channel.open().await.unwrap();

    // The join dispatch completes inside the driver's handling of the
    // `Connected` event, so once a later snapshot has been processed the
    // intent is guaranteed to be recorded.
    channel.push_snapshot(roster_message("ABCD", 1, &["Aria"]));
    next_event(&mut snapshots).await;

    assert_eq!(
        channel.sent_intents(),
        vec![ClientIntent::JoinRealm {
            realm_code: "ABCD".into(),
            name: "Aria".into(),
        }]
    );
}

#[tokio::test]
async fn switching_realms_resets_the_revision_baseline() {
    let channel = MockChannel::new();
    let setup = SessionBuilder::new(ClientConfig::default())
        .transport(channel.clone())
        .build()
        .unwrap();
    let handle = setup.handle;
    tokio::spawn(setup.driver.run());

    let mut snapshots = handle.subscribe(Topic::Snapshot);

    channel.open().await.unwrap();
    channel.push_snapshot(roster_message("OLDR", 40, &["Aria"]));
    next_event(&mut snapshots).await;

    handle
        .switch_realm(RealmCode::parse("NEWR").unwrap(), "Aria".into())
        .await
        .unwrap();
    assert_eq!(next_event(&mut snapshots).await, StoreEvent::Reset);

    assert_eq!(handle.snapshot(), None);
    assert_eq!(handle.server_revision(), None);
    assert!(
        channel
            .sent_intents()
            .iter()
            .any(|intent| matches!(intent, ClientIntent::JoinRealm { realm_code, .. } if realm_code == "NEWR"))
    );

    // The new realm starts over at a low revision; without the reset the old
    // baseline of 40 would gate it out.
    channel.push_snapshot(roster_message("NEWR", 1, &["Aria"]));
    assert_eq!(
        next_event(&mut snapshots).await,
        StoreEvent::SnapshotReplaced {
            revision: Some(Revision(1))
        }
    );
    assert_eq!(handle.snapshot().unwrap().realm_code.as_str(), "NEWR");
}

#[tokio::test]
async fn json_frames_flow_end_to_end() {
    let channel = MockChannel::new();
    let setup = SessionBuilder::new(ClientConfig::default())
        .transport(channel.clone())
        .build()
        .unwrap();
    let handle = setup.handle;
    tokio::spawn(setup.driver.run());

    let mut encounters = handle.subscribe(Topic::Encounter);

    channel.open().await.unwrap();
    channel
        .push_json(
            r#"{
                "realmCode": "abcd",
                "themeKey": "dungeon",
                "settings": { "deckType": "fibonacci", "autoReveal": true },
                "partyRoster": { "members": [ { "id": "m1", "name": "Aria" } ] },
                "questLog": { "quests": [] },
                "encounter": { "votes": { "m1": { "kind": "card", "card": "5" } } },
                "revision": 9
            }"#,
        )
        .unwrap();

    next_event(&mut encounters).await;

    let snapshot = handle.snapshot().unwrap();
    assert_eq!(snapshot.realm_code.as_str(), "ABCD");
    assert!(snapshot.settings.auto_reveal);

    let encounter = handle.encounter().unwrap().expect("round should be active");
    assert_eq!(encounter.votes.len(), 1);
}
