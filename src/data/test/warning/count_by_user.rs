use super::*;

/// Tests counting a member's warnings within one guild.
///
/// Expected: Ok(2) ignoring the warning from another guild
#[tokio::test]
async fn counts_only_matching_warnings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::warning::create_warning(db, 1, 2).await?;
    factory::warning::create_warning(db, 1, 2).await?;
    factory::warning::create_warning(db, 5, 2).await?;

    let count = WarningRepository::new(db).count_by_user(1, 2).await?;

    assert_eq!(count, 2);

    Ok(())
}
