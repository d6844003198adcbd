use chrono::{NaiveDate, NaiveTime};
use derive_new::new;

use crate::model::id::{UserId, WorkspaceId};

/// A fully validated booking intent. Contact fields are already
/// normalized: the name is trimmed and the phone is bare digits.
#[derive(new)]
pub struct CreateBooking {
    pub workspace_id: WorkspaceId,
    pub booked_by: UserId,
    pub booked_on: NaiveDate,
    pub slot_time: NaiveTime,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
}
