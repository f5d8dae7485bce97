//! Integration tests for the generic repository over SQLite.

mod helpers;

use repokit_core::error::StoreError;
use repokit_core::types::{
    Criteria, FindOptions, PageRequest, Partial, SaveOptions, SortField, Value,
};
use repokit_entity::Dog;

use helpers::{dog, dogs, seed};

fn by_name(name: &str) -> Criteria {
    Criteria::new().eq("name", name)
}

#[tokio::test]
async fn test_fiddo_round_trip() {
    let repo = dogs().await;

    let created = repo
        .create(dog("fiddo", 3), SaveOptions::default())
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "fiddo");
    assert_eq!(created.age, 3);
    assert!(!created.is_deleted());

    let found = repo
        .find_one(by_name("fiddo").into())
        .await
        .unwrap()
        .expect("fiddo should exist");
    assert_eq!(found, created);

    let all = repo.find_many(FindOptions::new()).await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn test_find_by_identity() {
    let repo = dogs().await;
    let pack = seed(&repo, &[("rex", 4), ("bella", 2)]).await;

    let found = repo
        .find_one(Criteria::new().eq("id", pack[1].id).into())
        .await
        .unwrap();
    assert_eq!(found, Some(pack[1].clone()));
}

#[tokio::test]
async fn test_create_applies_defaults_and_drops_unknown_keys() {
    let repo = dogs().await;
    let created = repo
        .create(
            Partial::new().set("name", "pip").set("colour", "brown"),
            SaveOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(created.name, "pip");
    assert_eq!(created.age, 0);
}

#[tokio::test]
async fn test_zero_matches() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4)]).await;

    let none = repo.find_many(by_name("ghost").into()).await.unwrap();
    assert!(none.is_empty());

    let (items, total) = repo
        .find_many_and_count(by_name("ghost").into())
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 0);

    assert!(repo.find_one(by_name("ghost").into()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_count_matches_find_many() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4), ("bella", 2), ("max", 7)]).await;

    let all = repo.find_many(FindOptions::new()).await.unwrap();
    let count = repo.count(None).await.unwrap();
    assert_eq!(count.count, all.len() as u64);
    assert_eq!(count.count, 3);

    let older = repo
        .count(Some(Criteria::new().gt("age", 3).into()))
        .await
        .unwrap();
    assert_eq!(older.count, 2);
}

#[tokio::test]
async fn test_soft_delete_hides_rows() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4), ("bella", 2)]).await;

    let result = repo.delete(by_name("rex")).await.unwrap();
    assert_eq!(result.affected, 1);

    let visible = repo.find_many(FindOptions::new()).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "bella");
    assert!(repo.find_one(by_name("rex").into()).await.unwrap().is_none());
    assert_eq!(repo.count(None).await.unwrap().count, 1);

    let everything = repo
        .find_many(FindOptions::new().with_deleted())
        .await
        .unwrap();
    assert_eq!(everything.len(), 2);
    let rex = everything.iter().find(|d| d.name == "rex").unwrap();
    assert!(rex.is_deleted());

    let again = repo.delete(by_name("rex")).await.unwrap();
    assert_eq!(again.affected, 0);
}

#[tokio::test]
async fn test_hard_delete_leaves_no_trace() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4), ("bella", 2)]).await;

    let result = repo.hard_delete(by_name("rex")).await.unwrap();
    assert_eq!(result.affected, 1);

    let everything = repo
        .find_many(FindOptions::new().with_deleted())
        .await
        .unwrap();
    assert_eq!(everything.len(), 1);
    assert_eq!(everything[0].name, "bella");

    let again = repo.hard_delete(by_name("rex")).await.unwrap();
    assert_eq!(again.affected, 0);
}

#[tokio::test]
async fn test_hard_delete_removes_soft_deleted_rows() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4)]).await;

    repo.delete(by_name("rex")).await.unwrap();
    let result = repo.hard_delete(by_name("rex")).await.unwrap();
    assert_eq!(result.affected, 1);
    assert_eq!(
        repo.count(Some(FindOptions::new().with_deleted()))
            .await
            .unwrap()
            .count,
        0
    );
}

#[tokio::test]
async fn test_update_many_reports_matches() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4), ("bella", 2), ("max", 7)]).await;

    let criteria = Criteria::new().gte("age", 4);
    let before = repo.count(Some(criteria.clone().into())).await.unwrap();

    let result = repo
        .update_many(criteria, Partial::new().set("age", 10))
        .await
        .unwrap();
    assert_eq!(result.affected, before.count);

    let updated = repo
        .find_many(Criteria::new().eq("age", 10).into())
        .await
        .unwrap();
    let names: Vec<_> = updated.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["rex", "max"]);
}

#[tokio::test]
async fn test_update_by_identity() {
    let repo = dogs().await;
    let rex = seed(&repo, &[("rex", 4)]).await.remove(0);

    let updated = repo
        .update(
            Partial::new().set("id", rex.id).set("age", 5),
            SaveOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(updated.id, rex.id);
    assert_eq!(updated.name, "rex");
    assert_eq!(updated.age, 5);
    assert_eq!(repo.count(None).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_update_with_unknown_identity_inserts() {
    let repo = dogs().await;

    let saved = repo
        .update(
            dog("ghost", 1).set("id", 42),
            SaveOptions::default().without_transaction(),
        )
        .await
        .unwrap();
    assert_eq!(saved.id, 42);
    assert_eq!(repo.count(None).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_update_without_identity_is_rejected() {
    let repo = dogs().await;

    let err = repo
        .update(dog("rex", 4), SaveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::MissingIdentity {
            entity: "Dog",
            key: "id"
        }
    ));
    assert_eq!(repo.count(None).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_unscoped_writes_are_rejected() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4)]).await;

    let err = repo
        .update_many(Criteria::new(), Partial::new().set("age", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::EmptyCriteria { .. }));

    let err = repo.delete(Criteria::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::EmptyCriteria { .. }));

    let err = repo.hard_delete(Criteria::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::EmptyCriteria { .. }));

    let err = repo
        .update_many(by_name("rex"), Partial::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::EmptyPatch { .. }));

    assert_eq!(repo.count(None).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_unknown_column_is_rejected() {
    let repo = dogs().await;

    let err = repo
        .find_many(Criteria::new().eq("owner", "sam").into())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownColumn { ref column, .. } if column == "owner"));

    let err = repo
        .find_many(FindOptions::new().order_by(SortField::asc("name; DROP TABLE dogs")))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownColumn { .. }));
}

#[tokio::test]
async fn test_missing_required_column_is_constraint_violation() {
    let repo = dogs().await;

    let err = repo
        .create(Partial::new().set("age", 2), SaveOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn test_filter_operators() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4), ("bella", 2), ("max", 7), ("bruno", 1)]).await;

    let names = |dogs: Vec<Dog>| dogs.into_iter().map(|d| d.name).collect::<Vec<_>>();

    let found = repo
        .find_many(Criteria::new().like("name", "b%").into())
        .await
        .unwrap();
    assert_eq!(names(found), ["bella", "bruno"]);

    let found = repo
        .find_many(Criteria::new().is_in("name", ["rex", "max", "nobody"]).into())
        .await
        .unwrap();
    assert_eq!(names(found), ["rex", "max"]);

    let found = repo
        .find_many(Criteria::new().is_in("name", Vec::<String>::new()).into())
        .await
        .unwrap();
    assert!(found.is_empty());

    let found = repo
        .find_many(Criteria::new().gt("age", 1).lt("age", 7).into())
        .await
        .unwrap();
    assert_eq!(names(found), ["rex", "bella"]);

    let found = repo
        .find_many(
            FindOptions::new()
                .filter(by_name("rex"))
                .filter(by_name("bruno")),
        )
        .await
        .unwrap();
    assert_eq!(names(found), ["rex", "bruno"]);
}

#[tokio::test]
async fn test_ordering_and_paging() {
    let repo = dogs().await;
    seed(
        &repo,
        &[("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)],
    )
    .await;

    let page = repo
        .find_many(
            FindOptions::new()
                .order_by(SortField::desc("age"))
                .skip(1)
                .take(2),
        )
        .await
        .unwrap();
    let ages: Vec<_> = page.iter().map(|d| d.age).collect();
    assert_eq!(ages, [4, 3]);

    let tail = repo
        .find_many(FindOptions::new().skip(3))
        .await
        .unwrap();
    assert_eq!(tail.len(), 2);

    let (items, total) = repo
        .find_many_and_count(FindOptions::new().take(2))
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(total, 5);

    let paged = repo
        .find_page(FindOptions::new(), &PageRequest::new(3, 2))
        .await
        .unwrap();
    assert_eq!(paged.items.len(), 1);
    assert_eq!(paged.items[0].name, "e");
    assert_eq!(paged.total_items, 5);
    assert_eq!(paged.total_pages, 3);
    assert!(!paged.has_next);
    assert!(paged.has_previous);
}

#[tokio::test]
async fn test_projection_fills_defaults() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4)]).await;

    let dogs = repo
        .find_many(FindOptions::new().select(["name"]))
        .await
        .unwrap();
    assert_eq!(dogs.len(), 1);
    assert!(dogs[0].id > 0);
    assert_eq!(dogs[0].name, "rex");
    assert_eq!(dogs[0].age, 0);
}

#[tokio::test]
async fn test_create_many_in_chunks() {
    let repo = dogs().await;

    let created = repo
        .create_many(
            vec![dog("a", 1), dog("b", 2), dog("c", 3)],
            SaveOptions::default().chunk(2),
        )
        .await
        .unwrap();
    let names: Vec<_> = created.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(created.windows(2).all(|w| w[0].id < w[1].id));

    let created = repo
        .create_many(vec![dog("d", 4)], SaveOptions::default().without_transaction())
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(repo.count(None).await.unwrap().count, 4);
}

#[tokio::test]
async fn test_failed_chunk_rolls_back() {
    let repo = dogs().await;

    let err = repo
        .create_many(
            vec![dog("a", 1), Partial::new().set("age", 2)],
            SaveOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation());
    assert_eq!(repo.count(None).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_committed_chunks_survive_a_later_failure() {
    let repo = dogs().await;

    let err = repo
        .create_many(
            vec![dog("a", 1), dog("b", 2), Partial::new().set("age", 3)],
            SaveOptions::default().chunk(1),
        )
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation());

    let kept = repo.find_many(FindOptions::new()).await.unwrap();
    let names: Vec<_> = kept.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[tokio::test]
async fn test_raw_query() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4), ("bella", 2)]).await;

    let rows = repo
        .raw_query(
            "SELECT name, age, deleted_at FROM dogs WHERE age > ? ORDER BY id",
            vec![Value::Integer(3)],
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "rex");
    assert_eq!(rows[0]["age"], 4);
    assert!(rows[0]["deleted_at"].is_null());

    let rows = repo
        .raw_query("SELECT COUNT(*) AS total, 1.5 AS ratio FROM dogs", Vec::new())
        .await
        .unwrap();
    assert_eq!(rows[0]["total"], 2);
    assert_eq!(rows[0]["ratio"], 1.5);
}

#[tokio::test]
async fn test_manager_is_shared() {
    let repo = dogs().await;
    seed(&repo, &[("rex", 4)]).await;

    let healthy = repo.manager().health_check().await.unwrap();
    assert!(healthy);

    let other: repokit_database::GenericRepository<Dog> =
        repokit_database::GenericRepository::from_manager(repo.manager().clone());
    assert_eq!(other.count(None).await.unwrap().count, 1);
}
