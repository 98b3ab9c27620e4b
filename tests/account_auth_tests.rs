//! End-to-end account flow tests: register, login, token verification, and
//! schedule persistence through the service layer.

use std::sync::Arc;

use planner_rust::api::{Course, CourseId};
use planner_rust::db::LocalRepository;
use planner_rust::services::{account, auth, AccountError, CartPolicy};

const SECRET: &str = "integration-test-secret";

fn course(id: i64, code: &str) -> Course {
    Course {
        id: Some(CourseId::new(id)),
        code: code.to_string(),
        name: format!("{} lecture", code),
        credit: 3,
        time: "Mo09:00-10:00".to_string(),
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let repo = LocalRepository::new();

    let record = account::register(&repo, "alice", "s3cret").await.unwrap();
    assert_eq!(record.username, "alice");
    assert!(record.schedule.is_empty());
    // The stored hash never contains the raw password.
    assert!(!record.password_hash.contains("s3cret"));

    let outcome = account::login(&repo, SECRET, "alice", "s3cret").await.unwrap();
    assert_eq!(outcome.user.id, record.id);

    let claims = auth::verify_token(SECRET, &outcome.token).unwrap();
    assert_eq!(claims.sub, record.id.to_string());
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn test_register_trims_the_username() {
    let repo = LocalRepository::new();
    let record = account::register(&repo, "  alice  ", "pw").await.unwrap();
    assert_eq!(record.username, "alice");

    assert!(account::login(&repo, SECRET, "alice", "pw").await.is_ok());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let repo = LocalRepository::new();
    account::register(&repo, "alice", "pw").await.unwrap();

    let err = account::register(&repo, "alice", "other").await.unwrap_err();
    assert!(matches!(err, AccountError::UsernameTaken));
}

#[tokio::test]
async fn test_login_failures_are_distinct() {
    let repo = LocalRepository::new();
    account::register(&repo, "alice", "pw").await.unwrap();

    let err = account::login(&repo, SECRET, "bob", "pw").await.unwrap_err();
    assert!(matches!(err, AccountError::UnknownUsername));

    let err = account::login(&repo, SECRET, "alice", "wrong").await.unwrap_err();
    assert!(matches!(err, AccountError::WrongPassword));
}

#[tokio::test]
async fn test_empty_credentials_are_rejected_before_storage() {
    let repo = LocalRepository::new();

    let err = account::register(&repo, "   ", "pw").await.unwrap_err();
    assert!(matches!(err, AccountError::InvalidInput(_)));

    let err = account::register(&repo, "alice", "").await.unwrap_err();
    assert!(matches!(err, AccountError::InvalidInput(_)));
}

#[tokio::test]
async fn test_token_from_one_secret_fails_under_another() {
    let repo = LocalRepository::new();
    account::register(&repo, "alice", "pw").await.unwrap();
    let outcome = account::login(&repo, SECRET, "alice", "pw").await.unwrap();

    assert!(auth::verify_token("some-other-secret", &outcome.token).is_err());
}

#[tokio::test]
async fn test_gated_add_rejection_leaves_the_schedule_unmodified() {
    let repo = LocalRepository::new();
    let policy = CartPolicy::default();
    let record = account::register(&repo, "alice", "pw").await.unwrap();

    let first = Course {
        id: Some(CourseId::new(1)),
        code: "CS101".to_string(),
        name: "Intro".to_string(),
        credit: 3,
        time: "Mo09:00-10:00".to_string(),
    };
    let clashing = Course {
        id: Some(CourseId::new(2)),
        code: "MA201".to_string(),
        name: "Linear Algebra".to_string(),
        credit: 3,
        time: "Mo09:30-10:30".to_string(),
    };

    account::add_course(&repo, &policy, record.id, &first).await.unwrap();

    let err = account::add_course(&repo, &policy, record.id, &clashing)
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Admission(_)));

    let stored = account::fetch_schedule(&repo, record.id).await.unwrap();
    assert_eq!(stored, vec![first]);
}

#[tokio::test]
async fn test_concurrent_adds_keep_every_admitted_course() {
    let repo = Arc::new(LocalRepository::new());
    let policy = CartPolicy::default();
    let record = account::register(repo.as_ref(), "alice", "pw").await.unwrap();

    // Four non-conflicting courses added concurrently: none may be lost to a
    // stale-cart overwrite.
    let mut handles = Vec::new();
    for (i, day) in ["Mo", "Tu", "We", "Th"].into_iter().enumerate() {
        let repo = Arc::clone(&repo);
        let user_id = record.id;
        let candidate = Course {
            id: Some(CourseId::new(i as i64 + 1)),
            code: format!("CS10{}", i + 1),
            name: format!("Course {}", i + 1),
            credit: 3,
            time: format!("{}09:00-10:00", day),
        };
        handles.push(tokio::spawn(async move {
            account::add_course(repo.as_ref(), &policy, user_id, &candidate).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = account::fetch_schedule(repo.as_ref(), record.id).await.unwrap();
    assert_eq!(stored.len(), 4);
}

#[tokio::test]
async fn test_concurrent_conflicting_adds_admit_exactly_one() {
    let repo = Arc::new(LocalRepository::new());
    let policy = CartPolicy::default();
    let record = account::register(repo.as_ref(), "alice", "pw").await.unwrap();

    let mut handles = Vec::new();
    for i in 0..2i64 {
        let repo = Arc::clone(&repo);
        let user_id = record.id;
        let candidate = Course {
            id: Some(CourseId::new(i + 1)),
            code: format!("PH11{}", i),
            name: "Overlapping slot".to_string(),
            credit: 3,
            time: "Mo09:00-10:00".to_string(),
        };
        handles.push(tokio::spawn(async move {
            account::add_course(repo.as_ref(), &policy, user_id, &candidate).await
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(AccountError::Admission(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }
    assert_eq!(admitted, 1);

    let stored = account::fetch_schedule(repo.as_ref(), record.id).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_saved_schedule_survives_to_the_next_login() {
    let repo = LocalRepository::new();
    let record = account::register(&repo, "alice", "pw").await.unwrap();

    let cart = vec![course(1, "CS101"), course(2, "MA201")];
    account::save_schedule(&repo, record.id, cart.clone()).await.unwrap();

    let outcome = account::login(&repo, SECRET, "alice", "pw").await.unwrap();
    assert_eq!(outcome.user.schedule, cart);

    let fetched = account::fetch_schedule(&repo, record.id).await.unwrap();
    assert_eq!(fetched, cart);
}
