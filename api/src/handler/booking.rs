use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingsResponse, CreateBookingRequest, CreateBookingRequestWithUserId,
        CreatedBookingResponse,
    },
};

pub async fn register_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreatedBookingResponse>)> {
    req.validate(&())?;

    let event = CreateBookingRequestWithUserId::new(user.id(), req).try_into()?;
    registry
        .booking_repository()
        .create(event)
        .await
        .map(|booking| {
            (
                StatusCode::CREATED,
                Json(CreatedBookingResponse {
                    booking: booking.into(),
                }),
            )
        })
}

pub async fn show_booking_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_all_by_user_id(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}
