use super::*;

/// Tests the report on a correctly configured guild.
///
/// Expected: Ok with no problems
#[tokio::test]
async fn healthy_guild_has_no_problems() {
    let fixture = Fixture::with_one_channel_policy();
    let root = fixture.admin(20, "root");
    fixture.static_channel("static-friday", &[]);
    let service = DiagnosticService::new(&fixture.platform, &fixture.config);

    let reply = service
        .check_config(&fixture.ctx(&root, fixture.general))
        .await
        .unwrap();

    assert!(reply.ephemeral);
    assert!(!reply.content.contains("[PROBLEM]"), "{}", reply.content);
    assert!(reply.content.ends_with("Everything looks fine."));
    assert!(reply.content.contains("[OK] Deny role is not configured"));
    assert!(reply.content.contains("[OK] 1 statics, no duplicate names"));
}

/// Tests that missing roles, invisible categories and duplicates are found.
///
/// Expected: Ok with one finding per problem
#[tokio::test]
async fn reports_every_problem() {
    let mut config = config(false);
    config.blacklist_role_id = Some(RoleId::new(66));
    let fixture = Fixture::build(config);
    let root = fixture.admin(20, "root");
    fixture.platform.hide_from_bot(ChannelId::new(CATEGORY));
    let service = DiagnosticService::new(&fixture.platform, &fixture.config);

    let findings = service.findings().await.unwrap();
    let problems: Vec<&str> = findings
        .iter()
        .filter(|f| !f.ok)
        .map(|f| f.text.as_str())
        .collect();

    assert_eq!(
        problems,
        vec![
            "The bot needs explicit view_channel permissions on the statics category",
            "Deny role 66 does not exist on the server",
        ]
    );

    let reply = service
        .check_config(&fixture.ctx(&root, fixture.general))
        .await
        .unwrap();
    assert!(reply.content.ends_with("Found 2 problems."));
}

/// Tests duplicate static names showing up as problems.
///
/// Expected: Ok with a duplicate finding
#[tokio::test]
async fn reports_duplicate_statics() {
    let fixture = Fixture::new();
    fixture.static_channel("static-friday", &[]);
    fixture.static_channel("static-friday", &[]);
    let service = DiagnosticService::new(&fixture.platform, &fixture.config);

    let findings = service.findings().await.unwrap();

    assert!(findings.iter().any(|f| !f.ok
        && f.text == "Found 2 channels named static-friday, expected at most one"));
}

/// Tests a category id that points at a text channel.
///
/// Expected: Ok with a finding naming the wrong channel
#[tokio::test]
async fn reports_category_that_is_not_a_category() {
    let mut config = config(false);
    config.category_id = ChannelId::new(1001);
    let fixture = Fixture::build(config);
    let service = DiagnosticService::new(&fixture.platform, &fixture.config);

    let findings = service.findings().await.unwrap();

    assert!(findings.iter().any(|f| !f.ok
        && f.text
            == "Channel general (1001) is configured as the statics category but is not a category"));
}

/// Tests an unavailable guild.
///
/// Expected: Ok with a single problem and no further checks
#[tokio::test]
async fn stops_when_guild_is_unavailable() {
    let fixture = Fixture::new();
    fixture.platform.set_unavailable();
    let service = DiagnosticService::new(&fixture.platform, &fixture.config);

    let findings = service.findings().await.unwrap();

    assert_eq!(findings.len(), 1);
    assert!(!findings[0].ok);
}

/// Tests that the report is admin only.
///
/// Expected: Err(NotAdmin)
#[tokio::test]
async fn only_for_admins() {
    let fixture = Fixture::new();
    let alice = fixture.member(10, "alice");
    let service = DiagnosticService::new(&fixture.platform, &fixture.config);

    assert_eq!(
        check_failure(service.check_config(&fixture.ctx(&alice, fixture.general)).await),
        CheckFailure::NotAdmin
    );
}
