use super::*;

/// Tests storing a new warning.
///
/// Expected: Ok with the warning stored and its snowflakes kept as strings
#[tokio::test]
async fn stores_warning() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WarningRepository::new(db);
    let warning = repo
        .create(CreateWarningParam {
            guild_id: 1,
            user_id: 2,
            moderator_id: 3,
            reason: "Spamming".to_string(),
        })
        .await?;

    assert_eq!(warning.guild_id, "1");
    assert_eq!(warning.user_id, "2");
    assert_eq!(warning.moderator_id, "3");
    assert_eq!(warning.reason, "Spamming");

    let stored = entity::prelude::Warning::find_by_id(warning.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.reason, "Spamming");

    Ok(())
}

/// Tests that successive warnings receive increasing IDs.
///
/// Expected: second ID greater than the first
#[tokio::test]
async fn assigns_increasing_ids() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WarningRepository::new(db);
    let param = CreateWarningParam {
        guild_id: 1,
        user_id: 2,
        moderator_id: 3,
        reason: "First".to_string(),
    };
    let first = repo.create(param.clone()).await?;
    let second = repo
        .create(CreateWarningParam {
            reason: "Second".to_string(),
            ..param
        })
        .await?;

    assert!(second.id > first.id);
    assert_eq!(entity::prelude::Warning::find().count(db).await?, 2);

    Ok(())
}
