use crate::calendar::{self, CalendarEvent};
use crate::configuration::Configuration;
use crate::engine::AvailabilityEngine;
use crate::error::Error;
use crate::store::Store;
use crate::types::{Booking, Slot, SlotFilter, SlotKey, SlotStatus};
use axum::body::Body;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_valid::Valid;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{4,19}$").unwrap();
}

pub struct AppState<S, C> {
    engine: Arc<AvailabilityEngine<S>>,
    configuration: C,
}

impl<S, C: Clone> Clone for AppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            configuration: self.configuration.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct BookRequest {
    date: NaiveDate,
    location: String,
    time_range: String,
    #[validate(length(min = 1, message = "customer name must not be empty"))]
    customer_name: String,
    #[validate(regex(path = *PHONE_RE, message = "phone number has an unexpected shape"))]
    phone: Option<String>,
    note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct AddSlotRequest {
    date: NaiveDate,
    #[validate(length(min = 1, message = "location must not be empty"))]
    location: String,
    #[validate(length(min = 1, message = "time range must not be empty"))]
    time_range: String,
    note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CancelBookingRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PriceText {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ListQuery {
    date: Option<NaiveDate>,
    location: Option<String>,
}

impl From<ListQuery> for SlotFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            date: query.date,
            location: query.location,
        }
    }
}

struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::SlotNotFound | Error::BookingNotFound => StatusCode::NOT_FOUND,
            Error::DuplicateSlot | Error::SlotAlreadyBooked => StatusCode::CONFLICT,
            Error::Store(err) => {
                error!(%err, "persistence failure");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage failure".to_string(),
                )
                    .into_response();
            }
        };
        (status, self.0.to_string()).into_response()
    }
}

pub fn create_app<S: Store, C: Configuration>(
    engine: AvailabilityEngine<S>,
    configuration: C,
) -> Router {
    let state = AppState {
        engine: Arc::new(engine),
        configuration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/slots", get(list_slots))
        .route("/calendar", get(calendar_feed))
        .route("/price", get(get_price_text))
        .route("/book", post(book_slot));

    let admin = Router::new()
        .route("/add_slot", post(add_slot))
        .route("/remove_slot", post(remove_slot))
        .route("/clear_slots", post(clear_slots))
        .route("/bookings", get(list_bookings))
        .route("/cancel_booking", post(cancel_booking))
        .route("/update_price", post(set_price_text))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<S, C>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match request.headers().get("x-admin-password") {
        Some(header) => {
            if header.to_str().unwrap_or("") != state.configuration.password() {
                return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
            }
        }
        None => return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
    Ok(next.run(request).await)
}

async fn list_slots<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SlotStatus>>, ApiError> {
    Ok(Json(state.engine.list_slots(&query.into())?))
}

async fn calendar_feed<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CalendarEvent>>, ApiError> {
    let statuses = state.engine.list_slots(&query.into())?;
    Ok(Json(calendar::events(&statuses)))
}

async fn book_slot<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Valid(Json(request)): Valid<Json<BookRequest>>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let key = SlotKey {
        date: request.date,
        location: request.location,
        time_range: request.time_range,
    };
    let booking =
        state
            .engine
            .book_slot(&key, &request.customer_name, request.phone, request.note)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn add_slot<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Valid(Json(request)): Valid<Json<AddSlotRequest>>,
) -> Result<(StatusCode, String), ApiError> {
    state.engine.add_slot(Slot {
        date: request.date,
        location: request.location,
        time_range: request.time_range,
        note: request.note,
    })?;
    Ok((StatusCode::OK, "Slot added successfully".to_string()))
}

async fn remove_slot<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Json(key): Json<SlotKey>,
) -> Result<(StatusCode, String), ApiError> {
    state.engine.remove_slot(&key)?;
    Ok((StatusCode::OK, "Slot removed successfully".to_string()))
}

async fn clear_slots<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
) -> Result<(StatusCode, String), ApiError> {
    state.engine.clear_all_slots()?;
    Ok((StatusCode::OK, "All slots removed successfully".to_string()))
}

async fn list_bookings<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.engine.list_bookings(&query.into())?))
}

async fn cancel_booking<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<CancelBookingRequest>,
) -> Result<(StatusCode, String), ApiError> {
    state.engine.cancel_booking(request.id)?;
    Ok((StatusCode::OK, "Booking cancelled successfully".to_string()))
}

async fn get_price_text<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
) -> Result<Json<PriceText>, ApiError> {
    Ok(Json(PriceText {
        text: state.engine.price_text()?,
    }))
}

async fn set_price_text<S: Store, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<PriceText>,
) -> Result<(StatusCode, String), ApiError> {
    state.engine.set_price_text(&request.text)?;
    Ok((StatusCode::OK, "Price text updated successfully".to_string()))
}
