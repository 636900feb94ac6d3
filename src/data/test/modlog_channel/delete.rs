use super::*;

/// Tests disabling logging for a configured guild.
///
/// Expected: Ok(true) and the record is gone
#[tokio::test]
async fn removes_configured_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModlogChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::modlog_channel::create_modlog_channel(db, 10, 20).await?;

    let removed = ModlogChannelRepository::new(db).delete(10).await?;

    assert!(removed);
    assert!(entity::prelude::ModlogChannel::find_by_id("10".to_string())
        .one(db)
        .await?
        .is_none());

    Ok(())
}

/// Tests disabling logging that was never enabled.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_nothing_removed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModlogChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let removed = ModlogChannelRepository::new(db).delete(10).await?;

    assert!(!removed);

    Ok(())
}
