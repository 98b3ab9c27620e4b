//! Integration tests for the in-memory repository: catalog seeding, lookup,
//! user storage, schedule persistence, and concurrent access.

use std::sync::Arc;

use planner_rust::api::{Course, CourseId};
use planner_rust::db::repository::{CourseRepository, RepositoryError, UserRepository};
use planner_rust::db::LocalRepository;

fn course(id: Option<i64>, code: &str) -> Course {
    Course {
        id: id.map(CourseId::new),
        code: code.to_string(),
        name: format!("{} lecture", code),
        credit: 3,
        time: "Mo09:00-10:00".to_string(),
    }
}

#[tokio::test]
async fn test_replace_catalog_and_list() {
    let repo = LocalRepository::new();

    let count = repo
        .replace_catalog(vec![course(Some(1), "CS101"), course(Some(2), "MA201")])
        .await
        .unwrap();
    assert_eq!(count, 2);

    let courses = repo.list_courses().await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].code, "CS101");
    assert_eq!(courses[1].code, "MA201");
}

#[tokio::test]
async fn test_catalog_entries_without_ids_are_assigned_fresh_ones() {
    let repo = LocalRepository::new();
    repo.replace_catalog(vec![course(Some(5), "CS101"), course(None, "MA201")])
        .await
        .unwrap();

    let courses = repo.list_courses().await.unwrap();
    let assigned = courses[1].id.unwrap();
    assert!(assigned.value() > 5, "fresh ids stay above seeded ids");
    assert!(repo.get_course(assigned).await.is_ok());
}

#[tokio::test]
async fn test_get_course_not_found() {
    let repo = LocalRepository::new();
    let err = repo.get_course(CourseId::new(42)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_reseeding_replaces_the_catalog_wholesale() {
    let repo = LocalRepository::with_catalog(vec![course(Some(1), "CS101")]);
    repo.replace_catalog(vec![course(Some(2), "MA201")])
        .await
        .unwrap();

    let courses = repo.list_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code, "MA201");
    assert!(repo.get_course(CourseId::new(1)).await.is_err());
}

#[tokio::test]
async fn test_create_user_rejects_duplicate_username() {
    let repo = LocalRepository::new();
    repo.create_user("alice", "digest").await.unwrap();

    let err = repo.create_user("alice", "digest").await.unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists { .. }));
}

#[tokio::test]
async fn test_find_user_by_username() {
    let repo = LocalRepository::new();
    let created = repo.create_user("alice", "digest").await.unwrap();

    let found = repo.find_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(found.schedule.is_empty());

    assert!(repo.find_user_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_schedule_round_trip() {
    let repo = LocalRepository::new();
    let user = repo.create_user("alice", "digest").await.unwrap();

    let cart = vec![course(Some(1), "CS101"), course(Some(2), "MA201")];
    repo.save_schedule(user.id, cart.clone()).await.unwrap();

    let stored = repo.fetch_schedule(user.id).await.unwrap();
    assert_eq!(stored, cart);
}

#[tokio::test]
async fn test_update_schedule_commits_the_closure_result() {
    let repo = LocalRepository::new();
    let user = repo.create_user("alice", "digest").await.unwrap();

    let committed = repo
        .update_schedule(
            user.id,
            Box::new(|mut cart| {
                cart.push(course(Some(1), "CS101"));
                Some(cart)
            }),
        )
        .await
        .unwrap();

    assert_eq!(committed.map(|c| c.len()), Some(1));
    assert_eq!(repo.fetch_schedule(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_schedule_abort_writes_nothing() {
    let repo = LocalRepository::new();
    let user = repo.create_user("alice", "digest").await.unwrap();
    repo.save_schedule(user.id, vec![course(Some(1), "CS101")])
        .await
        .unwrap();

    let committed = repo
        .update_schedule(user.id, Box::new(|_| None))
        .await
        .unwrap();

    assert!(committed.is_none());
    assert_eq!(repo.fetch_schedule(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_schedule_requires_an_existing_user() {
    let repo = LocalRepository::new();
    let err = repo
        .update_schedule(uuid::Uuid::new_v4(), Box::new(|cart| Some(cart)))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_schedule_operations_require_an_existing_user() {
    let repo = LocalRepository::new();
    let ghost = uuid::Uuid::new_v4();

    let err = repo.save_schedule(ghost, Vec::new()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let err = repo.fetch_schedule(ghost).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_concurrent_registrations_admit_exactly_one_per_username() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = Vec::new();
    for i in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            // Half the tasks fight over the same name.
            let name = if i % 2 == 0 { "shared".to_string() } else { format!("user{}", i) };
            repo.create_user(&name, "digest").await
        }));
    }

    let mut shared_wins = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            shared_wins += 1;
        }
    }
    // 4 unique names plus exactly one winner for "shared".
    assert_eq!(shared_wins, 5);
}

#[tokio::test]
async fn test_concurrent_catalog_reads_see_a_consistent_snapshot() {
    let repo = Arc::new(LocalRepository::with_catalog(vec![
        course(Some(1), "CS101"),
        course(Some(2), "MA201"),
    ]));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.list_courses().await.map(|c| c.len())
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 2);
    }
}
