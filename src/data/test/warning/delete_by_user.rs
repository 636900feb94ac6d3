use super::*;

/// Tests clearing a member's warnings.
///
/// Expected: Ok(2) and only the other member's warning remains
#[tokio::test]
async fn deletes_member_warnings_and_reports_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::warning::create_warning(db, 1, 2).await?;
    factory::warning::create_warning(db, 1, 2).await?;
    let other = factory::warning::create_warning(db, 1, 3).await?;

    let removed = WarningRepository::new(db).delete_by_user(1, 2).await?;

    assert_eq!(removed, 2);
    let remaining = entity::prelude::Warning::find().all(db).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, other.id);

    Ok(())
}

/// Tests clearing a member with no warnings.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_when_nothing_to_clear() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Warning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let removed = WarningRepository::new(db).delete_by_user(1, 2).await?;

    assert_eq!(removed, 0);

    Ok(())
}
