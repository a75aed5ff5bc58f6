//! Integration tests for the persistence layer.
//!
//! Exercises the repositories against a real database:
//! - User creation and unique email constraint
//! - Slot CRUD, ordering, and marketplace listing
//! - Schema backstops (status CHECK, time window CHECK)
//! - Swap request FK behaviour (ON DELETE SET NULL)

use chrono::{Duration, Utc};
use slotswap_db::models::slot::{CreateSlot, UpdateSlot};
use slotswap_db::models::user::CreateUser;
use slotswap_db::repositories::{SlotRepo, SwapRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$test-hash".to_string(),
    }
}

fn new_slot(title: &str, start_offset_hours: i64) -> CreateSlot {
    let start = Utc::now() + Duration::hours(start_offset_hours);
    CreateSlot {
        title: title.to_string(),
        start_time: start,
        end_time: start + Duration::hours(1),
        status: None,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Alice", "alice@example.com"))
        .await
        .unwrap();
    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "alice@example.com");

    let found = UserRepo::find_by_email(&pool, "alice@example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found.id, user.id);

    let summary = UserRepo::resolve_summary(&pool, user.id)
        .await
        .unwrap()
        .expect("summary should resolve");
    assert_eq!(summary.name, "Alice");
    assert_eq!(summary.email, "alice@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("Alice", "alice@example.com"))
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &new_user("Other Alice", "alice@example.com"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_slot_crud_and_ordering(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Alice", "alice@example.com"))
        .await
        .unwrap();

    let later = SlotRepo::create(&pool, user.id, &new_slot("Afternoon", 4), "BUSY")
        .await
        .unwrap();
    let earlier = SlotRepo::create(&pool, user.id, &new_slot("Morning", 1), "SWAPPABLE")
        .await
        .unwrap();
    assert_eq!(later.status, "BUSY");
    assert_eq!(earlier.status, "SWAPPABLE");

    // list_for_user orders by start time, not creation order.
    let slots = SlotRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].id, earlier.id);
    assert_eq!(slots[1].id, later.id);

    // Partial update keeps absent fields.
    let updated = SlotRepo::update(
        &pool,
        later.id,
        &UpdateSlot {
            title: Some("Late afternoon".to_string()),
            start_time: None,
            end_time: None,
            status: None,
        },
    )
    .await
    .unwrap()
    .expect("slot should exist");
    assert_eq!(updated.title, "Late afternoon");
    assert_eq!(updated.status, "BUSY");
    assert_eq!(updated.start_time, later.start_time);

    assert!(SlotRepo::delete(&pool, later.id).await.unwrap());
    assert!(SlotRepo::find_by_id(&pool, later.id)
        .await
        .unwrap()
        .is_none());
    assert!(!SlotRepo::delete(&pool, later.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_time_window_check_is_backstopped(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Alice", "alice@example.com"))
        .await
        .unwrap();

    let start = Utc::now();
    let input = CreateSlot {
        title: "Backwards".to_string(),
        start_time: start,
        end_time: start - Duration::hours(1),
        status: None,
    };
    let err = SlotRepo::create(&pool, user.id, &input, "BUSY")
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("ck_slots_time_window"));
        }
        other => panic!("expected check violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_marketplace_excludes_caller_and_non_swappable(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("Alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = UserRepo::create(&pool, &new_user("Bob", "bob@example.com"))
        .await
        .unwrap();

    SlotRepo::create(&pool, alice.id, &new_slot("Alice swappable", 1), "SWAPPABLE")
        .await
        .unwrap();
    SlotRepo::create(&pool, bob.id, &new_slot("Bob busy", 2), "BUSY")
        .await
        .unwrap();
    let bob_open = SlotRepo::create(&pool, bob.id, &new_slot("Bob swappable", 3), "SWAPPABLE")
        .await
        .unwrap();

    let listing = SlotRepo::list_swappable_excluding(&pool, alice.id)
        .await
        .unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, bob_open.id);
    assert_eq!(listing[0].owner_name, "Bob");
    assert_eq!(listing[0].owner_email, "bob@example.com");
}

// ---------------------------------------------------------------------------
// Swap requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_terminal_request_survives_slot_deletion(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("Alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = UserRepo::create(&pool, &new_user("Bob", "bob@example.com"))
        .await
        .unwrap();
    let s1 = SlotRepo::create(&pool, alice.id, &new_slot("S1", 1), "SWAPPABLE")
        .await
        .unwrap();
    let s2 = SlotRepo::create(&pool, bob.id, &new_slot("S2", 2), "SWAPPABLE")
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let request = SwapRepo::create_locked(&mut tx, s1.id, s2.id, alice.id, bob.id)
        .await
        .unwrap();
    SwapRepo::set_status_locked(&mut tx, request.id, "REJECTED")
        .await
        .unwrap();
    tx.commit().await.unwrap();

    // Deleting a referenced slot nulls the FK instead of cascading.
    assert!(SlotRepo::delete(&pool, s1.id).await.unwrap());

    let detail = SwapRepo::find_detail_by_id(&pool, request.id)
        .await
        .unwrap()
        .expect("request should survive slot deletion");
    assert_eq!(detail.status, "REJECTED");
    assert!(detail.rs_id.is_none());
    assert_eq!(detail.ts_id, Some(s2.id));
    assert_eq!(detail.requester_name, "Alice");
    assert_eq!(detail.target_name, "Bob");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_swap_rejected_by_schema(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("Alice", "alice@example.com"))
        .await
        .unwrap();
    let s1 = SlotRepo::create(&pool, alice.id, &new_slot("S1", 1), "SWAPPABLE")
        .await
        .unwrap();
    let s2 = SlotRepo::create(&pool, alice.id, &new_slot("S2", 2), "SWAPPABLE")
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let err = SwapRepo::create_locked(&mut tx, s1.id, s2.id, alice.id, alice.id)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("ck_swap_requests_distinct_users"));
        }
        other => panic!("expected check violation, got {other:?}"),
    }
}
