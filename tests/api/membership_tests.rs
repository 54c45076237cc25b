//! Leaving and kicking

use guild_server::application::services::CreateGuildDto;
use guild_server::domain::services::MembershipStore;
use guild_server::infrastructure::database::UnitOfWork;
use guild_server::shared::error::AppError;
use guild_server::startup::AppState;

use crate::common::{assert_invariants, test_settings, MemoryUnitOfWork};

/// Ravens owned by Thorin with Balin and Dwalin (account 2) as members
async fn populated() -> (MemoryUnitOfWork, AppState) {
    let store = MemoryUnitOfWork::seeded();
    let state = AppState::new(store.clone(), test_settings());
    state
        .guilds
        .create_guild(
            1,
            CreateGuildDto {
                name: "Ravens".to_string(),
                character_name: "Thorin".to_string(),
                motd: None,
            },
        )
        .await
        .unwrap();

    for name in ["Balin", "Dwalin"] {
        state.invites.invite_player(1, "Ravens", name).await.unwrap();
        state
            .invites
            .accept_invite(2, "Ravens", Some(name))
            .await
            .unwrap();
    }
    (store, state)
}

#[tokio::test]
async fn test_owner_cannot_be_kicked() {
    let (store, state) = populated().await;

    let err = state.membership.kick_player(1, "Ravens", "Thorin").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(store.snapshot().membership_of("Thorin").is_some());
}

#[tokio::test]
async fn test_owner_kicks_member() {
    let (store, state) = populated().await;

    state.membership.kick_player(1, "Ravens", "balin").await.unwrap();

    let snapshot = store.snapshot();
    assert!(snapshot.membership_of("Balin").is_none());
    assert!(snapshot.membership_of("Dwalin").is_some());
    assert_invariants(&snapshot);
}

#[tokio::test]
async fn test_plain_member_cannot_kick() {
    let (_store, state) = populated().await;

    let err = state.membership.kick_player(2, "Ravens", "Thorin").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = state.membership.kick_player(3, "Ravens", "Balin").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_kick_unknown_or_outsider_not_found() {
    let (_store, state) = populated().await;

    let err = state.membership.kick_player(1, "Ravens", "Nobody").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = state.membership.kick_player(1, "Ravens", "Gloin").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = state.membership.kick_player(1, "Nowhere", "Balin").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_owner_cannot_leave() {
    let (store, state) = populated().await;

    let err = state.membership.leave_guild(1, "Ravens", None).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = state
        .membership
        .leave_guild(1, "Ravens", Some("Thorin"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(store.snapshot().membership_of("Thorin").is_some());
}

#[tokio::test]
async fn test_non_member_cannot_leave() {
    let (_store, state) = populated().await;

    let err = state.membership.leave_guild(4, "Ravens", None).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_leave_requires_choice_between_several_characters() {
    let (store, state) = populated().await;

    let err = state.membership.leave_guild(2, "Ravens", None).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    state
        .membership
        .leave_guild(2, "Ravens", Some("Dwalin"))
        .await
        .unwrap();
    let snapshot = store.snapshot();
    assert!(snapshot.membership_of("Dwalin").is_none());
    assert!(snapshot.membership_of("Balin").is_some());

    state.membership.leave_guild(2, "Ravens", None).await.unwrap();
    let snapshot = store.snapshot();
    assert!(snapshot.membership_of("Balin").is_none());
    assert_eq!(snapshot.memberships.len(), 1);
    assert_invariants(&snapshot);
}

#[tokio::test]
async fn test_left_character_can_be_invited_again() {
    let (store, state) = populated().await;

    state
        .membership
        .leave_guild(2, "Ravens", Some("Balin"))
        .await
        .unwrap();
    state.invites.invite_player(1, "Ravens", "Balin").await.unwrap();
    state
        .invites
        .accept_invite(2, "Ravens", Some("Balin"))
        .await
        .unwrap();

    assert!(store.snapshot().membership_of("Balin").is_some());
    assert_invariants(&store.snapshot());
}

#[tokio::test]
async fn test_rank_level_of_member_and_outsider() {
    let (store, _state) = populated().await;

    let (guild_id, balin, gloin) = store.with_state(|s| {
        let guild_id = s.guild("Ravens").unwrap().id;
        let vice = s
            .ranks
            .iter()
            .find(|r| r.guild_id == guild_id && r.level == 2)
            .unwrap()
            .id;
        let balin = s.character("Balin").id;
        for m in s.memberships.iter_mut().filter(|m| m.character_id == balin) {
            m.rank_id = vice;
        }
        (guild_id, balin, s.character("Gloin").id)
    });
    let thorin = store.snapshot().character("Thorin").id;
    let dwalin = store.snapshot().character("Dwalin").id;

    let mut session = store.connect().await.unwrap();
    assert_eq!(MembershipStore::rank_level_of(&mut session, thorin, guild_id).await.unwrap(), 3);
    assert_eq!(MembershipStore::rank_level_of(&mut session, balin, guild_id).await.unwrap(), 2);
    assert_eq!(MembershipStore::rank_level_of(&mut session, dwalin, guild_id).await.unwrap(), 1);
    assert_eq!(MembershipStore::rank_level_of(&mut session, gloin, guild_id).await.unwrap(), 0);
    assert_eq!(MembershipStore::rank_level_of(&mut session, balin, guild_id + 100).await.unwrap(), 0);
}
