use super::*;

/// Tests listing a member's warnings in issue order.
///
/// Expected: Ok with both warnings, oldest first
#[tokio::test]
async fn returns_warnings_oldest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::warning::WarningFactory::new(db, 1, 2)
        .reason("First")
        .build()
        .await?;
    factory::warning::WarningFactory::new(db, 1, 2)
        .reason("Second")
        .build()
        .await?;

    let warnings = WarningRepository::new(db).get_by_user(1, 2).await?;

    let reasons: Vec<_> = warnings.iter().map(|w| w.reason.as_str()).collect();
    assert_eq!(reasons, vec!["First", "Second"]);

    Ok(())
}

/// Tests that warnings of other members and other guilds are excluded.
///
/// Expected: Ok with only the matching member's warning
#[tokio::test]
async fn scopes_to_guild_and_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::warning::create_warning(db, 1, 2).await?;
    factory::warning::create_warning(db, 1, 3).await?;
    factory::warning::create_warning(db, 9, 2).await?;

    let warnings = WarningRepository::new(db).get_by_user(1, 2).await?;

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].guild_id, "1");
    assert_eq!(warnings[0].user_id, "2");

    Ok(())
}

/// Tests listing a member with no warnings.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_for_clean_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let warnings = WarningRepository::new(db).get_by_user(1, 2).await?;

    assert!(warnings.is_empty());

    Ok(())
}
