//! Quest authoring through host events.

use std::time::Duration;

use questline_domain::{ActorId, RewardItem};
use questline_shared::{ChatDisposition, HeldItemData, HostEvent, OutboundMessage};
use uuid::Uuid;

use super::*;

#[tokio::test]
async fn dragon_quest_is_authored_and_stored() {
    let mut engine = TestEngine::start().await;
    let actor = Uuid::new_v4();

    engine.command(actor, &["create"]).await;
    for text in ["Defeat the Dragon", "Slay the ancient dragon", "500", "false"] {
        assert_eq!(
            engine.chat(actor, text).await,
            Some(ChatDisposition::Intercepted)
        );
    }

    assert_eq!(engine.texts_for(actor), AUTHORING_TRANSCRIPT);

    let quest = engine
        .app
        .persistence
        .quests
        .get("Defeat the Dragon")
        .await
        .expect("quest stored");
    assert_eq!(quest.description, "Slay the ancient dragon");
    assert_eq!(quest.reward_coins.amount(), 500);
    assert!(quest.reward_item.is_none());
    assert!(!engine.app.authoring.has_session(ActorId::from_uuid(actor)));

    // The command created the actor's profile on the fly.
    let profile = engine
        .app
        .persistence
        .users
        .get(ActorId::from_uuid(actor))
        .await
        .expect("profile created");
    assert_eq!(profile.balance, 0);
    assert_eq!(profile.locale, "en_US");
}

#[tokio::test]
async fn held_item_becomes_reward() {
    let engine = TestEngine::start().await;
    let actor = Uuid::new_v4();
    let payload = vec![0x0a, 0x00, 0x0e, b'd', b'i', b'a', b'm', b'o', b'n', b'd'];

    engine.command(actor, &["create"]).await;
    engine.chat(actor, "Shiny").await;
    engine.chat(actor, "Bring gems").await;
    engine.chat(actor, "25").await;
    engine
        .send(chat_event(
            actor,
            "TRUE",
            Some(HeldItemData {
                material: "diamond".into(),
                amount: 1,
                payload: payload.clone(),
            }),
        ))
        .await;

    let quest = engine.app.persistence.quests.get("Shiny").await.unwrap();
    assert_eq!(quest.reward_item, Some(RewardItem::from_bytes(payload)));
}

#[tokio::test]
async fn duplicate_name_reports_failure() {
    let mut engine = TestEngine::start().await;
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    for actor in [first, second] {
        engine.command(actor, &["create"]).await;
        for text in ["Same Name", "Whoever comes first", "1", "no"] {
            engine.chat(actor, text).await;
        }
    }

    let messages = engine.drain();
    assert_eq!(
        notify_texts(&messages, first).last().map(String::as_str),
        Some("Successfully created the quest!")
    );
    assert_eq!(
        notify_texts(&messages, second).last().map(String::as_str),
        Some("The quest could not be saved. A quest with that name may already exist.")
    );
    assert_eq!(engine.app.persistence.quests.list().await.len(), 1);
}

#[tokio::test]
async fn interleaved_authors_stay_isolated_on_lanes() {
    let mut engine = TestEngine::start().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let mut lanes = engine.lanes();

    let command = |actor_id| HostEvent::Command {
        actor_id,
        args: vec!["create".into()],
    };
    lanes.submit(command(alice));
    lanes.submit(command(bob));
    for (a, b) in [
        ("Alice's Errand", "Bob's Errand"),
        ("Fetch water", "Chop wood"),
        ("10", "20"),
        ("false", "false"),
    ] {
        lanes.submit(chat_event(alice, a, None));
        lanes.submit(chat_event(bob, b, None));
    }
    assert_eq!(lanes.active(), 2);
    lanes.shutdown().await;

    let messages = engine.drain();
    assert_eq!(notify_texts(&messages, alice), AUTHORING_TRANSCRIPT);
    assert_eq!(notify_texts(&messages, bob), AUTHORING_TRANSCRIPT);

    let routed = messages
        .iter()
        .filter(|m| {
            matches!(
                m,
                OutboundMessage::ChatRouted {
                    disposition: ChatDisposition::Intercepted,
                    ..
                }
            )
        })
        .count();
    assert_eq!(routed, 8);

    let quests = &engine.app.persistence.quests;
    let alice_quest = quests.get("Alice's Errand").await.unwrap();
    let bob_quest = quests.get("Bob's Errand").await.unwrap();
    assert_eq!(alice_quest.description, "Fetch water");
    assert_eq!(bob_quest.reward_coins.amount(), 20);
}

#[tokio::test]
async fn idle_lanes_are_retired_without_a_leave() {
    let mut engine = TestEngine::start().await;
    let actor = Uuid::new_v4();
    let mut lanes = engine.lanes();

    lanes.submit(HostEvent::ActorJoined { actor_id: actor });
    assert_eq!(lanes.retire_idle(Duration::from_secs(3600)), 0);
    assert_eq!(lanes.active(), 1);

    assert_eq!(lanes.retire_idle(Duration::ZERO), 1);
    assert_eq!(lanes.active(), 0);

    // A later event starts a fresh lane.
    lanes.submit(chat_event(actor, "hello", None));
    assert_eq!(lanes.active(), 1);
    lanes.shutdown().await;

    let routed = engine
        .drain()
        .into_iter()
        .filter(|m| matches!(m, OutboundMessage::ChatRouted { actor_id, .. } if *actor_id == actor))
        .count();
    assert_eq!(routed, 1);
    assert!(engine
        .app
        .persistence
        .users
        .get(ActorId::from_uuid(actor))
        .await
        .is_some());
}

#[tokio::test]
async fn leaving_discards_the_draft() {
    let mut engine = TestEngine::start().await;
    let actor = Uuid::new_v4();

    engine.command(actor, &["create"]).await;
    engine.chat(actor, "Abandoned").await;
    engine.send(HostEvent::ActorLeft { actor_id: actor }).await;

    assert_eq!(
        engine.chat(actor, "back again").await,
        Some(ChatDisposition::PassThrough)
    );
    assert!(engine.app.persistence.quests.list().await.is_empty());
    assert_eq!(engine.texts_for(actor).len(), 2);
}

#[tokio::test]
async fn prompts_follow_profile_locale() {
    let locales = tempfile::tempdir().unwrap();
    std::fs::write(
        locales.path().join("de_DE.json"),
        r#"{"input_quest_name": "Gib den Questnamen ein:"}"#,
    )
    .unwrap();
    let mut engine = TestEngine::start_with(2, Some(locales.path().to_path_buf())).await;
    let actor = Uuid::new_v4();

    engine.send(HostEvent::ActorJoined { actor_id: actor }).await;
    let users = &engine.app.persistence.users;
    let mut profile = users.get(ActorId::from_uuid(actor)).await.unwrap();
    profile.locale = "de_DE".into();
    assert!(users.update(&profile).await);

    engine.command(actor, &["create"]).await;
    engine.chat(actor, "Drachentöter").await;

    // Keys missing from de_DE fall back to the default locale.
    assert_eq!(
        engine.texts_for(actor),
        vec!["Gib den Questnamen ein:", "Input the Quest description:"]
    );
}
