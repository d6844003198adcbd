use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{event::CreateBooking, Booking},
    id::UserId,
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Admits the booking against all existing bookings for the workspace.
    /// The check and the insert are atomic: the storage layer enforces
    /// uniqueness of (workspace, date, time), so concurrent calls for the
    /// same slot yield exactly one success.
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
}
