//! Dog demo handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use repokit_core::error::AppError;
use repokit_core::types::{Criteria, FindOptions, PageResponse, Partial, SaveOptions};
use repokit_database::CrudRepository;
use repokit_entity::Dog;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /create
///
/// Inserts the sample dog `{name: "fiddo", age: 3}` and returns it.
pub async fn create_dog(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Dog>>> {
    let data = Partial::new().set("name", "fiddo").set("age", 3);
    let dog = state.dogs.create(data, SaveOptions::default()).await?;
    Ok(Json(ApiResponse::ok(dog)))
}

/// GET /
pub async fn list_dogs(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<Dog>>>> {
    let dogs = state.dogs.find_many(FindOptions::new()).await?;
    Ok(Json(ApiResponse::ok(dogs)))
}

/// GET /dogs
pub async fn list_dogs_paged(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<Dog>>>> {
    let mut options = FindOptions::new();
    if let Some(field) = params.sort_field() {
        options = options.order_by(field);
    }
    let page = state
        .dogs
        .base()
        .find_page(options, &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /dogs/{name}
pub async fn get_dog_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ApiResponse<Dog>>> {
    let options = FindOptions::from(Criteria::new().eq("name", name.as_str()));
    let dog = state
        .dogs
        .find_one(options)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Dog '{name}' not found")))?;
    Ok(Json(ApiResponse::ok(dog)))
}
