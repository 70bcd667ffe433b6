use super::*;

/// Tests pinning and unpinning a message.
///
/// Expected: Ok with public replies and the pin state toggled
#[tokio::test]
async fn pins_and_unpins_target_message() {
    let fixture = Fixture::new();
    let alice = fixture.member(10, "alice");
    let channel = fixture.static_channel("static-friday", &[&alice]);
    let message = fixture
        .platform
        .post_message(channel, alice.user_id, "schedule", at(1_700_000_000));
    let service = CommunicationService::new(&fixture.platform, &fixture.config);
    let mut ctx = fixture.ctx(&alice, channel);
    ctx.target_message = Some(message);

    assert_eq!(service.pin(&ctx).await.unwrap(), Reply::public("pinned it :)"));
    assert!(fixture.platform.is_pinned(message));

    assert_eq!(
        service.unpin(&ctx).await.unwrap(),
        Reply::public("unpinned it :)")
    );
    assert!(!fixture.platform.is_pinned(message));
    assert_eq!(
        fixture.platform.mutations(),
        vec![Mutation::Pinned(message), Mutation::Unpinned(message)]
    );
}

/// Tests that pinning works outside the statics category too.
///
/// Expected: Ok
#[tokio::test]
async fn pin_has_no_category_restriction() {
    let fixture = Fixture::new();
    let alice = fixture.member(10, "alice");
    let mut ctx = fixture.ctx(&alice, fixture.general);
    ctx.target_message = Some(MessageId::new(5));
    let service = CommunicationService::new(&fixture.platform, &fixture.config);

    assert!(service.pin(&ctx).await.is_ok());
}

/// Tests pinning without a target message.
///
/// Expected: Err(MissingMessage)
#[tokio::test]
async fn requires_target_message() {
    let fixture = Fixture::new();
    let alice = fixture.member(10, "alice");
    let service = CommunicationService::new(&fixture.platform, &fixture.config);

    assert_eq!(
        check_failure(service.pin(&fixture.ctx(&alice, fixture.general)).await),
        CheckFailure::MissingMessage
    );
}
