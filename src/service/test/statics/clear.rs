use super::*;

fn static_with_messages(fixture: &Fixture, count: usize) -> ChannelId {
    let channel = fixture.static_channel("static-friday", &[]);
    for i in 0..count {
        fixture
            .platform
            .post_message(channel, UserId::new(10), "hello", at(1_700_000_000 + i as i64));
    }
    channel
}

/// Tests clearing a given number of recent messages.
///
/// Expected: Ok with exactly `limit` messages removed
#[tokio::test]
async fn clears_requested_number_of_messages() {
    let fixture = Fixture::new();
    let root = fixture.admin(20, "root");
    let channel = static_with_messages(&fixture, 5);
    let service = StaticService::new(&fixture.platform, &fixture.config);

    let reply = service
        .clear(&fixture.ctx(&root, channel), Some(3))
        .await
        .unwrap();

    assert_eq!(reply, Reply::ephemeral("Deleted 3 messages"));
    assert_eq!(fixture.platform.message_count(channel), 2);
}

/// Tests clearing without a limit.
///
/// Expected: Ok with every message (up to 100) removed
#[tokio::test]
async fn defaults_to_one_hundred() {
    let fixture = Fixture::new();
    let root = fixture.admin(20, "root");
    let channel = static_with_messages(&fixture, 4);
    let service = StaticService::new(&fixture.platform, &fixture.config);

    service
        .clear(&fixture.ctx(&root, channel), None)
        .await
        .unwrap();

    assert_eq!(fixture.platform.mutations(), vec![Mutation::Purged(channel, 4)]);
}

/// Tests limits outside the platform's bulk range.
///
/// Expected: Err(InvalidLimit) with zero mutations
#[tokio::test]
async fn rejects_out_of_range_limits() {
    let fixture = Fixture::new();
    let root = fixture.admin(20, "root");
    let channel = static_with_messages(&fixture, 2);
    let service = StaticService::new(&fixture.platform, &fixture.config);
    let ctx = fixture.ctx(&root, channel);

    for limit in [0, -5, 101, 1_000] {
        assert_eq!(
            check_failure(service.clear(&ctx, Some(limit)).await),
            CheckFailure::InvalidLimit(limit)
        );
    }
    assert!(fixture.platform.mutations().is_empty());
}

/// Tests clearing from outside the statics category.
///
/// Expected: Err(WrongCategory)
#[tokio::test]
async fn only_inside_statics_category() {
    let fixture = Fixture::new();
    let root = fixture.admin(20, "root");
    let service = StaticService::new(&fixture.platform, &fixture.config);

    assert_eq!(
        check_failure(service.clear(&fixture.ctx(&root, fixture.general), Some(1)).await),
        CheckFailure::WrongCategory
    );
}

/// Tests that only admins may clear.
///
/// Expected: Err(NotAdmin)
#[tokio::test]
async fn only_for_admins() {
    let fixture = Fixture::new();
    let alice = fixture.member(10, "alice");
    let channel = static_with_messages(&fixture, 2);
    let service = StaticService::new(&fixture.platform, &fixture.config);

    assert_eq!(
        check_failure(service.clear(&fixture.ctx(&alice, channel), Some(1)).await),
        CheckFailure::NotAdmin
    );
    assert_eq!(fixture.platform.message_count(channel), 2);
}
