use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    booking::{Booking, BookingWorkspace},
    id::{BookingId, UserId, WorkspaceId},
};
use sqlx::FromRow;

// A booking joined with its workspace; the workspace name and location are
// denormalized into every booking returned to the caller.
#[derive(FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub booked_on: NaiveDate,
    pub slot_time: NaiveTime,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
    pub workspace_name: String,
    pub workspace_location: String,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            workspace_id,
            user_id,
            booked_on,
            slot_time,
            contact_name,
            contact_phone,
            contact_email,
            created_at,
            workspace_name,
            workspace_location,
        } = value;
        Booking {
            booking_id,
            booked_by: user_id,
            booked_on,
            slot_time,
            contact_name,
            contact_phone,
            contact_email,
            created_at,
            workspace: BookingWorkspace {
                workspace_id,
                name: workspace_name,
                location: workspace_location,
            },
        }
    }
}
