pub mod event;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::model::id::{BookingId, UserId, WorkspaceId};

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub booked_on: NaiveDate,
    pub slot_time: NaiveTime,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
    pub workspace: BookingWorkspace,
}

#[derive(Debug)]
pub struct BookingWorkspace {
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub location: String,
}
