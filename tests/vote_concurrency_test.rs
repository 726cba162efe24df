use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use jobboard_backend::dto::listing_dto::CreateListingPayload;
use jobboard_backend::error::Error;
use jobboard_backend::models::listing::StickyDuration;
use jobboard_backend::services::listing_service::ListingService;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

fn payload(company: &str) -> CreateListingPayload {
    CreateListingPayload {
        company: company.to_string(),
        offer: "Backend Engineer".to_string(),
        location: "remote".to_string(),
        link: "https://acme.example/jobs/1".to_string(),
        tags: vec!["Rust".to_string()],
        min_salary: None,
        max_salary: None,
        sticky_duration: StickyDuration::NoSticky,
        image: None,
    }
}

#[tokio::test]
async fn concurrent_votes_are_all_counted() {
    let service = ListingService::new(test_pool().await);
    let listing = service.create(payload("Acme")).await.expect("create");
    assert_eq!(listing.vote_count(), 0);

    let n = 32;
    let mut handles = Vec::with_capacity(n);
    for _ in 0..n {
        let service = service.clone();
        let id = listing.id;
        handles.push(tokio::spawn(
            async move { service.increment_vote(id).await },
        ));
    }
    for handle in handles {
        handle.await.expect("join").expect("increment");
    }

    let after = service.get_by_id(listing.id).await.expect("get");
    assert_eq!(after.vote_count(), n as i64);
    assert!(after.updated_at >= listing.updated_at);
}

#[tokio::test]
async fn vote_returns_the_post_increment_record() {
    let service = ListingService::new(test_pool().await);
    let listing = service.create(payload("Acme")).await.expect("create");

    let first = service.increment_vote(listing.id).await.expect("vote");
    assert_eq!(first.vote_count(), 1);
    let second = service.increment_vote(listing.id).await.expect("vote");
    assert_eq!(second.vote_count(), 2);
}

#[tokio::test]
async fn unknown_id_is_not_found_and_nothing_changes() {
    let service = ListingService::new(test_pool().await);
    let listing = service.create(payload("Acme")).await.expect("create");

    let err = service.increment_vote(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let snapshot = service.list().await.expect("list");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].vote_count(), 0);
    assert_eq!(snapshot[0].updated_at, listing.updated_at);
}
