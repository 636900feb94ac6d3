use super::*;

/// Tests fetching a configured modlog channel.
///
/// Expected: Ok(Some) with the guild's channel
#[tokio::test]
async fn returns_configured_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModlogChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::modlog_channel::create_modlog_channel(db, 10, 20).await?;
    factory::modlog_channel::create_modlog_channel(db, 11, 21).await?;

    let modlog = ModlogChannelRepository::new(db).get_by_guild(11).await?;

    assert_eq!(modlog.unwrap().channel_id, "21");

    Ok(())
}

/// Tests fetching for a guild without logging.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_disabled() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModlogChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let modlog = ModlogChannelRepository::new(db).get_by_guild(10).await?;

    assert!(modlog.is_none());

    Ok(())
}
