//! Integration-style tests for the listings module.
//!
//! Key points:
//! - Each test runs on a fresh in-memory SQLite DB with the schema applied.
//! - The Service is constructed with SeaORM-backed repositories (Domain Port
//!   + Adapter) and the local blob store.
//! - The local client gateway is tested against the same Service.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use listings::config::ListingsConfig;
use listings::contract::client::ListingsApi;
use listings::contract::error::ListingsError;
use listings::contract::model::{
    Condition, ContactMethod, Listing, ListingPatch, ListingStatus, NewListing,
};
use listings::domain::error::DomainError;
use listings::domain::ports::BlobStore;
use listings::domain::repo::ListingsRepository;
use listings::domain::service::Service;
use listings::gateways::local::ListingsLocalClient;
use listings::infra::blobs::LocalBlobStore;
use listings::infra::storage::entity::{category, listing, profile, user_account};
use listings::infra::storage::schema;
use listings::infra::storage::sea_orm_repo::{SeaOrmDirectoryRepository, SeaOrmListingsRepository};

struct TestEnv {
    db: DatabaseConnection,
    service: Arc<Service>,
    blobs: Arc<LocalBlobStore>,
    category_id: Uuid,
    alice: Uuid,
    bob: Uuid,
}

/// Fresh in-memory SQLite per test. A single pooled connection keeps every
/// statement on the same in-memory database.
async fn setup() -> TestEnv {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");
    schema::create_tables(&db)
        .await
        .expect("Failed to create tables");

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let category_id = Uuid::new_v4();

    user_account::ActiveModel {
        id: Set(alice),
        email: Set("alice@campus.edu".to_string()),
        auth_token: Set(Some("alice-token".to_string())),
    }
    .insert(&db)
    .await
    .expect("seed alice");

    user_account::ActiveModel {
        id: Set(bob),
        email: Set("bob@campus.edu".to_string()),
        auth_token: Set(Some("bob-token".to_string())),
    }
    .insert(&db)
    .await
    .expect("seed bob");

    // Alice has a profile; Bob deliberately has none.
    profile::ActiveModel {
        user_id: Set(alice),
        first_name: Set(Some("Alice".to_string())),
        last_name: Set(Some("Anders".to_string())),
    }
    .insert(&db)
    .await
    .expect("seed alice profile");

    category::ActiveModel {
        id: Set(category_id),
        name: Set("Electronics".to_string()),
    }
    .insert(&db)
    .await
    .expect("seed category");

    let blobs = Arc::new(LocalBlobStore::new("http://files.test"));
    let service = Arc::new(Service::new(
        Arc::new(SeaOrmListingsRepository::new(db.clone())),
        Arc::new(SeaOrmDirectoryRepository::new(db.clone())),
        blobs.clone(),
        ListingsConfig::default(),
    ));

    TestEnv {
        db,
        service,
        blobs,
        category_id,
        alice,
        bob,
    }
}

fn new_listing(category_id: Uuid, title: &str, price: f64) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: "A fine item".to_string(),
        price,
        category_id,
        condition: Condition::Good,
        images: Vec::new(),
        contact_method: ContactMethod::Email,
        contact_info: None,
    }
}

#[tokio::test]
async fn create_forces_status_views_and_featured() {
    let env = setup().await;

    let id = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "Lamp", 10.0))
        .await
        .expect("create");

    let row = listing::Entity::find_by_id(id)
        .one(&env.db)
        .await
        .expect("query")
        .expect("row exists");
    assert_eq!(row.status, "active");
    assert_eq!(row.views, 0);
    assert!(!row.is_featured);
    assert_eq!(row.seller_id, env.alice);
}

#[tokio::test]
async fn create_requires_authentication() {
    let env = setup().await;

    let err = env
        .service
        .create_listing(None, new_listing(env.category_id, "Lamp", 10.0))
        .await
        .expect_err("anonymous create must fail");
    assert!(matches!(err, DomainError::AuthenticationRequired));
}

#[tokio::test]
async fn create_validates_price_title_and_category() {
    let env = setup().await;

    let err = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "Lamp", -1.0))
        .await
        .expect_err("negative price");
    assert!(matches!(err, DomainError::InvalidPrice { .. }));

    let err = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "   ", 1.0))
        .await
        .expect_err("blank title");
    assert!(matches!(err, DomainError::EmptyTitle));

    let err = env
        .service
        .create_listing(Some(env.alice), new_listing(Uuid::new_v4(), "Lamp", 1.0))
        .await
        .expect_err("unknown category");
    assert!(matches!(err, DomainError::CategoryNotFound { .. }));
}

#[tokio::test]
async fn create_rejects_unissued_image_references() {
    let env = setup().await;

    let mut new = new_listing(env.category_id, "Lamp", 10.0);
    new.images = vec![Uuid::new_v4()];
    let err = env
        .service
        .create_listing(Some(env.alice), new)
        .await
        .expect_err("unissued image");
    assert!(matches!(err, DomainError::UnknownImage { .. }));
}

#[tokio::test]
async fn update_is_a_true_partial_patch() {
    let env = setup().await;

    let id = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "A", 10.0))
        .await
        .expect("create");

    env.service
        .update_listing(
            Some(env.alice),
            id,
            ListingPatch {
                price: Some(20.0),
                ..Default::default()
            },
        )
        .await
        .expect("patch");

    let row = listing::Entity::find_by_id(id)
        .one(&env.db)
        .await
        .expect("query")
        .expect("row exists");
    assert_eq!(row.title, "A");
    assert_eq!(row.price, 20.0);
}

#[tokio::test]
async fn non_owner_mutations_are_rejected_and_leave_record_unmodified() {
    let env = setup().await;

    let id = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "A", 10.0))
        .await
        .expect("create");

    let err = env
        .service
        .update_listing(
            Some(env.bob),
            id,
            ListingPatch {
                price: Some(99.0),
                ..Default::default()
            },
        )
        .await
        .expect_err("non-owner update");
    assert!(matches!(err, DomainError::NotOwner { .. }));

    let err = env
        .service
        .delete_listing(Some(env.bob), id)
        .await
        .expect_err("non-owner delete");
    assert!(matches!(err, DomainError::NotOwner { .. }));

    let row = listing::Entity::find_by_id(id)
        .one(&env.db)
        .await
        .expect("query")
        .expect("still exists");
    assert_eq!(row.price, 10.0);
    assert_eq!(row.title, "A");
}

#[tokio::test]
async fn mutations_on_unknown_ids_fail_with_not_found() {
    let env = setup().await;

    let err = env
        .service
        .update_listing(Some(env.alice), Uuid::new_v4(), ListingPatch::default())
        .await
        .expect_err("unknown id");
    assert!(matches!(err, DomainError::ListingNotFound { .. }));

    let err = env
        .service
        .delete_listing(Some(env.alice), Uuid::new_v4())
        .await
        .expect_err("unknown id");
    assert!(matches!(err, DomainError::ListingNotFound { .. }));
}

#[tokio::test]
async fn increment_views_is_silent_for_missing_listings() {
    let env = setup().await;

    // Never existed.
    env.service
        .increment_views(Uuid::new_v4())
        .await
        .expect("must not raise");

    let id = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "A", 10.0))
        .await
        .expect("create");
    env.service.increment_views(id).await.expect("bump");

    let row = listing::Entity::find_by_id(id)
        .one(&env.db)
        .await
        .expect("query")
        .expect("row exists");
    assert_eq!(row.views, 1);

    // Deleted between page load and the view ping.
    env.service
        .delete_listing(Some(env.alice), id)
        .await
        .expect("delete");
    env.service
        .increment_views(id)
        .await
        .expect("must not raise after deletion");
}

#[tokio::test]
async fn inactive_listings_are_hidden_from_browse_and_search() {
    let env = setup().await;

    let stand = env
        .service
        .create_listing(
            Some(env.alice),
            new_listing(env.category_id, "Laptop stand", 15.0),
        )
        .await
        .expect("create");
    env.service
        .create_listing(Some(env.alice), new_listing(env.category_id, "Desk", 40.0))
        .await
        .expect("create");
    let charger = env
        .service
        .create_listing(
            Some(env.alice),
            new_listing(env.category_id, "Laptop charger", 8.0),
        )
        .await
        .expect("create");
    env.service
        .update_listing(
            Some(env.alice),
            charger,
            ListingPatch {
                status: Some(ListingStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .expect("deactivate");

    let browsed = env
        .service
        .get_listings(None, None, false)
        .await
        .expect("browse");
    let titles: Vec<&str> = browsed.iter().map(|l| l.listing.title.as_str()).collect();
    assert!(titles.contains(&"Laptop stand"));
    assert!(titles.contains(&"Desk"));
    assert!(!titles.contains(&"Laptop charger"));

    let found = env
        .service
        .search_listings("laptop", None)
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].listing.id, stand);
    assert_eq!(found[0].listing.title, "Laptop stand");

    // Owner-scoped listing is unfiltered by status.
    let mine = env
        .service
        .get_user_listings(Some(env.alice), None)
        .await
        .expect("mine");
    assert_eq!(mine.len(), 3);
    // Seller join is omitted for owner-scoped reads.
    assert!(mine.iter().all(|l| l.seller.is_none()));
}

#[tokio::test]
async fn get_listing_by_id_ignores_status() {
    let env = setup().await;

    let id = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "Sofa", 60.0))
        .await
        .expect("create");
    env.service
        .update_listing(
            Some(env.alice),
            id,
            ListingPatch {
                status: Some(ListingStatus::Sold),
                ..Default::default()
            },
        )
        .await
        .expect("mark sold");

    let fetched = env
        .service
        .get_listing(id)
        .await
        .expect("fetch")
        .expect("direct id fetch returns sold listings");
    assert_eq!(fetched.listing.status, ListingStatus::Sold);

    // Unknown ids are None, not an error.
    assert!(env
        .service
        .get_listing(Uuid::new_v4())
        .await
        .expect("fetch")
        .is_none());
}

#[tokio::test]
async fn browse_defaults_to_twenty_newest_first() {
    let env = setup().await;

    let mut last_title = String::new();
    for i in 0..25 {
        let title = format!("item-{i}");
        env.service
            .create_listing(Some(env.alice), new_listing(env.category_id, &title, 1.0))
            .await
            .expect("create");
        last_title = title;
        // Distinct creation timestamps for a deterministic newest-first order.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let browsed = env
        .service
        .get_listings(None, None, false)
        .await
        .expect("browse");
    assert_eq!(browsed.len(), 20);
    assert_eq!(browsed[0].listing.title, last_title);
    assert_eq!(browsed[19].listing.title, "item-5");
}

#[tokio::test]
async fn category_and_featured_filters() {
    let env = setup().await;

    let other_category = Uuid::new_v4();
    category::ActiveModel {
        id: Set(other_category),
        name: Set("Books".to_string()),
    }
    .insert(&env.db)
    .await
    .expect("seed category");

    let lamp = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "Lamp", 5.0))
        .await
        .expect("create");
    let novel = env
        .service
        .create_listing(Some(env.alice), new_listing(other_category, "Novel", 3.0))
        .await
        .expect("create");

    let electronics = env
        .service
        .get_listings(Some(env.category_id), None, false)
        .await
        .expect("browse");
    assert_eq!(electronics.len(), 1);
    assert_eq!(electronics[0].listing.id, lamp);

    // Featured flag is not settable through the service; flip it in the store.
    listing::ActiveModel {
        id: Set(novel),
        is_featured: Set(true),
        ..Default::default()
    }
    .update(&env.db)
    .await
    .expect("feature");

    let featured = env
        .service
        .get_listings(None, None, true)
        .await
        .expect("browse featured");
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].listing.id, novel);
}

#[tokio::test]
async fn enrichment_joins_seller_profile_and_category() {
    let env = setup().await;

    let id = env
        .service
        .create_listing(Some(env.alice), new_listing(env.category_id, "Lamp", 5.0))
        .await
        .expect("create");
    let fetched = env
        .service
        .get_listing(id)
        .await
        .expect("fetch")
        .expect("exists");

    let seller = fetched.seller.expect("seller join present");
    assert_eq!(seller.email.as_deref(), Some("alice@campus.edu"));
    assert_eq!(seller.first_name.as_deref(), Some("Alice"));
    assert_eq!(seller.last_name.as_deref(), Some("Anders"));
    assert_eq!(fetched.category.as_deref(), Some("Electronics"));

    // Bob has no profile: partial sub-fields, not a failure.
    let id = env
        .service
        .create_listing(Some(env.bob), new_listing(env.category_id, "Desk", 9.0))
        .await
        .expect("create");
    let fetched = env
        .service
        .get_listing(id)
        .await
        .expect("fetch")
        .expect("exists");
    let seller = fetched.seller.expect("seller join present");
    assert_eq!(seller.email.as_deref(), Some("bob@campus.edu"));
    assert_eq!(seller.first_name, None);
    assert_eq!(seller.last_name, None);
}

#[tokio::test]
async fn image_urls_contain_only_resolved_urls() {
    let env = setup().await;

    let first = env.blobs.issue_upload_url().await.expect("ticket");
    let second = env.blobs.issue_upload_url().await.expect("ticket");
    let bogus = Uuid::new_v4();

    // Inject the unknown reference below the service to simulate a blob the
    // store no longer resolves.
    let repo = SeaOrmListingsRepository::new(env.db.clone());
    let now = chrono::Utc::now();
    let id = Uuid::new_v4();
    repo.insert(Listing {
        id,
        seller_id: env.alice,
        title: "Camera".to_string(),
        description: "With photos".to_string(),
        price: 30.0,
        category_id: env.category_id,
        condition: Condition::LikeNew,
        images: vec![first.blob_id, bogus, second.blob_id],
        status: ListingStatus::Active,
        contact_method: ContactMethod::Message,
        contact_info: None,
        is_featured: false,
        views: 0,
        created_at: now,
        updated_at: now,
    })
    .await
    .expect("insert");

    let fetched = env
        .service
        .get_listing(id)
        .await
        .expect("fetch")
        .expect("exists");
    assert_eq!(fetched.image_urls.len(), 2);
    for url in &fetched.image_urls {
        assert!(url.starts_with("http://files.test/files/"));
        assert!(!url.contains(&bogus.to_string()));
    }
}

#[tokio::test]
async fn user_listings_fail_closed_without_identity() {
    let env = setup().await;

    env.service
        .create_listing(Some(env.alice), new_listing(env.category_id, "Lamp", 5.0))
        .await
        .expect("create");

    let anonymous = env
        .service
        .get_user_listings(None, None)
        .await
        .expect("anonymous");
    assert!(anonymous.is_empty());

    // Explicit user id works without a caller.
    let named = env
        .service
        .get_user_listings(None, Some(env.alice))
        .await
        .expect("by user id");
    assert_eq!(named.len(), 1);
}

#[tokio::test]
async fn local_client_maps_domain_errors_to_contract_errors() {
    let env = setup().await;
    let client = ListingsLocalClient::new(env.service.clone());

    let err = client
        .create_listing(None, new_listing(env.category_id, "Lamp", 5.0))
        .await
        .expect_err("anonymous create");
    let contract_err = err
        .downcast_ref::<ListingsError>()
        .expect("contract error type");
    assert!(matches!(
        contract_err,
        ListingsError::AuthenticationRequired
    ));

    let id = client
        .create_listing(
            Some(env.alice),
            new_listing(env.category_id, "Lamp", 5.0),
        )
        .await
        .expect("create through client");
    let err = client
        .delete_listing(Some(env.bob), id)
        .await
        .expect_err("non-owner delete");
    let contract_err = err
        .downcast_ref::<ListingsError>()
        .expect("contract error type");
    assert!(matches!(contract_err, ListingsError::NotAuthorized { .. }));

    let ticket = client.generate_upload_url().await.expect("ticket");
    assert!(ticket.upload_url.contains(&ticket.blob_id.to_string()));

    let categories = client.list_categories().await.expect("categories");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Electronics");
}
