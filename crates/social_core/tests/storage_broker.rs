use chrono::{TimeDelta, TimeZone, Utc};
use social_core::db::open_db_in_memory;
use social_core::{
    Gender, Post, PostReport, Profile, SqliteStorageBroker, StorageBroker, StorageError,
};
use uuid::Uuid;

#[test]
fn timestamps_keep_nanosecond_precision() {
    let conn = open_db_in_memory().unwrap();
    let broker = SqliteStorageBroker::new(&conn);
    let stamped = Utc
        .with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
        .unwrap()
        + TimeDelta::nanoseconds(123_456_789);
    let post = Post::new("precise", "ada", stamped);

    broker.insert(&post).unwrap();
    let loaded: Option<Post> = broker.select_by_id(post.id).unwrap();

    assert_eq!(loaded.unwrap().created_date, stamped);
}

#[test]
fn select_all_orders_by_creation_date() {
    let conn = open_db_in_memory().unwrap();
    let broker = SqliteStorageBroker::new(&conn);
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    let later = Post::new("later", "ada", base + TimeDelta::seconds(5));
    let earlier = Post::new("earlier", "ada", base);

    broker.insert(&later).unwrap();
    broker.insert(&earlier).unwrap();

    let all: Vec<Post> = broker.select_all().unwrap();
    assert_eq!(all, vec![earlier, later]);
}

#[test]
fn unknown_key_selects_nothing() {
    let conn = open_db_in_memory().unwrap();
    let broker = SqliteStorageBroker::new(&conn);

    let loaded: Option<Profile> = broker.select_by_id(Uuid::new_v4()).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn update_and_delete_of_missing_row_are_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let broker = SqliteStorageBroker::new(&conn);
    let post = Post::new("ghost", "ada", Utc::now());

    let update = broker.update(&post).unwrap_err();
    assert!(matches!(update, StorageError::ConcurrencyConflict(_)));

    let delete = broker.delete(&post).unwrap_err();
    assert!(matches!(delete, StorageError::ConcurrencyConflict(_)));
}

#[test]
fn primary_key_collision_is_duplicate_key() {
    let conn = open_db_in_memory().unwrap();
    let broker = SqliteStorageBroker::new(&conn);
    let profile = Profile::new("Ada", "Lovelace", Gender::Female, Utc::now());

    broker.insert(&profile).unwrap();
    let err = broker.insert(&profile).unwrap_err();

    assert!(matches!(err, StorageError::DuplicateKey(_)), "{err:?}");
}

#[test]
fn missing_reference_is_foreign_key_violation() {
    let conn = open_db_in_memory().unwrap();
    let broker = SqliteStorageBroker::new(&conn);
    let report = PostReport::new(Uuid::new_v4(), Uuid::new_v4(), "spam", Utc::now());

    let err = broker.insert(&report).unwrap_err();

    assert!(matches!(err, StorageError::ForeignKeyViolation(_)), "{err:?}");
}

#[test]
fn corrupt_row_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let broker = SqliteStorageBroker::new(&conn);
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO posts (id, content, author, created_date, updated_date)
         VALUES (?1, 'text', 'ada', 'yesterday', 'yesterday');",
        [id.to_string()],
    )
    .unwrap();

    let err = StorageBroker::<Post>::select_by_id(&broker, id).unwrap_err();

    assert!(matches!(err, StorageError::InvalidData(_)), "{err:?}");
    assert!(err.to_string().contains("posts.created_date"));
}
