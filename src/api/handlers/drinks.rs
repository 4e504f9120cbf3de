/*
 * Responsibility
 * - /drinks CRUD handlers
 * - protected handlers take Authorized<P> first: the guard runs before anything else
 * - body/path rejections are turned into AppError (JSON error body)
 */
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    api::{
        dto::drinks::{
            CreateDrinkRequest, DeleteDrinkResponse, DrinkLong, DrinkShort, DrinksResponse,
            UpdateDrinkRequest,
        },
        extractors::authorized::{Authorized, DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks},
    },
    error::AppError,
    state::AppState,
};

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        // Well-formed JSON with the wrong shape
        JsonRejection::JsonDataError(_) => AppError::unprocessable(rejection.body_text()),
        JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType,
        _ if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => {
            tracing::debug!(error = %rejection, "unreadable request body");
            AppError::BadRequest
        }
    }
}

// A non-numeric id never names a drink.
fn drink_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|_| AppError::NotFound)
}

pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkShort>>, AppError> {
    let rows = state.drinks.list().await?;

    Ok(Json(DrinksResponse::ok(
        rows.into_iter().map(DrinkShort::from).collect(),
    )))
}

pub async fn list_drinks_detail(
    _auth: Authorized<GetDrinksDetail>,
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    let rows = state.drinks.list().await?;

    Ok(Json(DrinksResponse::ok(
        rows.into_iter().map(DrinkLong::from).collect(),
    )))
}

pub async fn create_drink(
    auth: Authorized<PostDrinks>,
    State(state): State<AppState>,
    payload: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    let Json(req) = payload.map_err(json_rejection)?;
    let (title, recipe) = req.into_parts().map_err(AppError::unprocessable)?;

    let row = state.drinks.create(&title, &recipe).await?;
    tracing::info!(sub = %auth.claims.sub, drink_id = row.id, "drink created");

    Ok(Json(DrinksResponse::ok(vec![row.into()])))
}

pub async fn update_drink(
    auth: Authorized<PatchDrinks>,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, AppError> {
    let id = drink_id(path)?;
    // An unknown id is 404 whatever the body holds.
    if state.drinks.get(id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let Json(req) = payload.map_err(json_rejection)?;
    let (title, recipe) = req.into_parts().map_err(AppError::unprocessable)?;

    let row = state
        .drinks
        .update(id, title.as_deref(), recipe.as_deref())
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(sub = %auth.claims.sub, drink_id = row.id, "drink updated");

    Ok(Json(DrinksResponse::ok(vec![row.into()])))
}

pub async fn delete_drink(
    auth: Authorized<DeleteDrinks>,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteDrinkResponse>, AppError> {
    let id = drink_id(path)?;

    if !state.drinks.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(sub = %auth.claims.sub, drink_id = id, "drink deleted");

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: id,
    }))
}
