//! Place handlers. Reads are public, mutations require an owner.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use waypost_core::error::AppError;
use waypost_service::place as place_service;

use crate::dto::request::{self, CreatePlaceRequest, UpdatePlaceRequest};
use crate::error::ApiError;
use crate::dto::response::{MessageResponse, PlaceResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/places/{id}
pub async fn get_place(
    State(state): State<AppState>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<PlaceResponse>, ApiError> {
    let place = state.place_service.get_place(place_id).await?;
    Ok(Json(place.into()))
}

/// GET /api/places/user/{uid}
pub async fn get_places_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PlaceResponse>>, ApiError> {
    let places = state.place_service.list_by_user(user_id).await?;

    // The API contract treats "no places yet" as 404, not an empty
    // list.
    if places.is_empty() {
        return Err(AppError::not_found(
            "Could not find places for the provided user id",
        )
        .into());
    }

    Ok(Json(places.into_iter().map(Into::into).collect()))
}

/// POST /api/places
pub async fn create_place(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<PlaceResponse>), ApiError> {
    request::check(&body)?;

    let place = state
        .place_service
        .create_place(
            auth.user_id,
            place_service::CreatePlaceRequest {
                title: body.title,
                description: body.description,
                address: body.address,
                image: body.image,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(place.into())))
}

/// PATCH /api/places/{id}
pub async fn update_place(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(place_id): Path<Uuid>,
    Json(body): Json<UpdatePlaceRequest>,
) -> Result<Json<PlaceResponse>, ApiError> {
    request::check(&body)?;

    let place = state
        .place_service
        .update_place(
            auth.user_id,
            place_id,
            place_service::UpdatePlaceRequest {
                title: body.title,
                description: body.description,
            },
        )
        .await?;

    Ok(Json(place.into()))
}

/// DELETE /api/places/{id}
pub async fn delete_place(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(place_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.place_service.delete_place(auth.user_id, place_id).await?;

    Ok(Json(MessageResponse {
        message: "Place deleted successfully".to_string(),
    }))
}
