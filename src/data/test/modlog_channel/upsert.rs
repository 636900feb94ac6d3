use super::*;

/// Tests configuring a modlog channel for the first time.
///
/// Expected: Ok with record created
#[tokio::test]
async fn creates_new_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModlogChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let modlog = ModlogChannelRepository::new(db)
        .upsert(UpsertModlogChannelParam {
            guild_id: 10,
            channel_id: 20,
        })
        .await?;

    assert_eq!(modlog.guild_id, "10");
    assert_eq!(modlog.channel_id, "20");

    let stored = entity::prelude::ModlogChannel::find_by_id("10".to_string())
        .one(db)
        .await?;
    assert_eq!(stored.unwrap().channel_id, "20");

    Ok(())
}

/// Tests replacing an existing modlog channel.
///
/// Expected: Ok with the channel replaced and a single record left
#[tokio::test]
async fn replaces_existing_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModlogChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::modlog_channel::create_modlog_channel(db, 10, 20).await?;

    let modlog = ModlogChannelRepository::new(db)
        .upsert(UpsertModlogChannelParam {
            guild_id: 10,
            channel_id: 30,
        })
        .await?;

    assert_eq!(modlog.channel_id, "30");
    assert!(modlog.updated_at >= original.updated_at);
    assert_eq!(entity::prelude::ModlogChannel::find().all(db).await?.len(), 1);

    Ok(())
}
