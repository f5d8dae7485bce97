//! Integration tests for the dog repository and its overrides.

mod helpers;

use repokit_core::error::ErrorKind;
use repokit_core::types::{Criteria, FindOptions, Partial, SaveOptions};
use repokit_database::{CrudRepository, DogRepository};

use helpers::{dog, manager};

#[tokio::test]
async fn test_create_returns_persisted_dog() {
    let repo = DogRepository::new(manager().await);

    let fiddo = repo
        .create(dog("fiddo", 3), SaveOptions::default())
        .await
        .unwrap();
    assert!(fiddo.id > 0);
    assert_eq!(fiddo.name, "fiddo");

    let all = repo.find_many(FindOptions::new()).await.unwrap();
    assert_eq!(all, vec![fiddo]);
}

#[tokio::test]
async fn test_find_one_missing_is_not_found() {
    let repo = DogRepository::new(manager().await);

    let err = repo
        .find_one(Criteria::new().eq("name", "ghost").into())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_find_one_present_is_some() {
    let repo = DogRepository::new(manager().await);
    repo.create(dog("rex", 4), SaveOptions::default())
        .await
        .unwrap();

    let rex = repo
        .find_one(Criteria::new().eq("name", "rex").into())
        .await
        .unwrap();
    assert_eq!(rex.map(|d| d.age), Some(4));
}

#[tokio::test]
async fn test_inherited_operations_map_store_errors() {
    let repo = DogRepository::new(manager().await);

    let err = repo
        .update(dog("rex", 4), SaveOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = repo.hard_delete(Criteria::new()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = repo
        .create(Partial::new().set("age", 1), SaveOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_inherited_operations_delegate() {
    let repo = DogRepository::new(manager().await);
    repo.create_many(
        vec![dog("rex", 4), dog("bella", 2)],
        SaveOptions::default(),
    )
    .await
    .unwrap();

    let updated = repo
        .update_many(
            Criteria::new().eq("name", "bella"),
            Partial::new().set("age", 3),
        )
        .await
        .unwrap();
    assert_eq!(updated.affected, 1);

    let deleted = repo
        .delete(Criteria::new().eq("name", "rex"))
        .await
        .unwrap();
    assert_eq!(deleted.affected, 1);

    let (items, total) = repo
        .find_many_and_count(FindOptions::new())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].age, 3);
    assert_eq!(repo.count(None).await.unwrap().count, 1);

    let rows = repo
        .raw_query("SELECT COUNT(*) AS total FROM dogs", Vec::new())
        .await
        .unwrap();
    assert_eq!(rows[0]["total"], 2);

    assert!(repo.manager().health_check().await.unwrap());
}
