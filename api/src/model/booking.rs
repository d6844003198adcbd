use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    booking::{event::CreateBooking, Booking},
    id::{BookingId, UserId, WorkspaceId},
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use uuid::Uuid;

/// A raw booking request as received over the wire. All fields arrive as
/// strings and every rule is checked independently, so one `validate` call
/// reports the full set of violations instead of the first one.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingRequest {
    #[garde(custom(valid_workspace_id))]
    pub workspace_id: String,
    #[garde(custom(bookable_date))]
    pub date: String,
    #[garde(custom(hour_aligned_time))]
    pub time: String,
    #[garde(custom(contact_name_length))]
    pub contact_name: String,
    #[garde(custom(ten_digit_phone))]
    pub contact_phone: String,
    #[garde(email, custom(dotted_email_domain))]
    pub contact_email: String,
}

// Existence of the workspace is checked at admission; this only guards the
// identifier's shape so the request stays side-effect free.
fn valid_workspace_id(value: &str, _: &()) -> garde::Result {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| garde::Error::new("must be a valid workspace identifier"))
}

fn bookable_date(value: &str, _: &()) -> garde::Result {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| garde::Error::new("must be a calendar date in YYYY-MM-DD format"))?;
    if date < Local::now().date_naive() {
        return Err(garde::Error::new("cannot be in the past"));
    }
    Ok(())
}

fn hour_aligned_time(value: &str, _: &()) -> garde::Result {
    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| garde::Error::new("must be a 24-hour time in HH:MM format"))?;
    if time.minute() != 0 {
        return Err(garde::Error::new("must be on the hour (e.g. 14:00)"));
    }
    Ok(())
}

fn contact_name_length(value: &str, _: &()) -> garde::Result {
    let len = value.trim().chars().count();
    if !(3..=100).contains(&len) {
        return Err(garde::Error::new("must be between 3 and 100 characters"));
    }
    Ok(())
}

fn ten_digit_phone(value: &str, _: &()) -> garde::Result {
    let digits = normalize_phone(value);
    if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(garde::Error::new("must contain exactly 10 digits"));
    }
    Ok(())
}

fn dotted_email_domain(value: &str, _: &()) -> garde::Result {
    match value.split_once('@') {
        Some((_, domain)) if domain.contains('.') => Ok(()),
        _ => Err(garde::Error::new(
            "must include a dotted domain (e.g. name@example.com)",
        )),
    }
}

/// Strips the usual phone punctuation; "(123) 456-7890" becomes
/// "1234567890".
pub fn normalize_phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

#[derive(new)]
pub struct CreateBookingRequestWithUserId(UserId, CreateBookingRequest);

impl TryFrom<CreateBookingRequestWithUserId> for CreateBooking {
    type Error = AppError;

    fn try_from(value: CreateBookingRequestWithUserId) -> Result<Self, Self::Error> {
        let CreateBookingRequestWithUserId(user_id, req) = value;
        let workspace_id = Uuid::parse_str(&req.workspace_id)
            .map(WorkspaceId::from)
            .map_err(|e| AppError::ConversionEntityError(anyhow::Error::from(e)))?;
        let booked_on = NaiveDate::parse_from_str(&req.date, "%Y-%m-%d")
            .map_err(|e| AppError::ConversionEntityError(anyhow::Error::from(e)))?;
        let slot_time = NaiveTime::parse_from_str(&req.time, "%H:%M")
            .map_err(|e| AppError::ConversionEntityError(anyhow::Error::from(e)))?;
        Ok(CreateBooking::new(
            workspace_id,
            user_id,
            booked_on,
            slot_time,
            req.contact_name.trim().to_owned(),
            normalize_phone(&req.contact_phone),
            req.contact_email.trim().to_owned(),
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub workspace_id: WorkspaceId,
    pub workspace_name: String,
    pub workspace_location: String,
    pub date: NaiveDate,
    pub time: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            booked_by: _,
            booked_on,
            slot_time,
            contact_name,
            contact_phone,
            contact_email,
            created_at,
            workspace,
        } = value;
        Self {
            id: booking_id,
            workspace_id: workspace.workspace_id,
            workspace_name: workspace.name,
            workspace_location: workspace.location,
            date: booked_on,
            time: slot_time.format("%H:%M").to_string(),
            contact_name,
            contact_phone,
            contact_email,
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub bookings: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            bookings: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingResponse {
    pub booking: BookingResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateBookingRequest {
        CreateBookingRequest {
            workspace_id: Uuid::new_v4().to_string(),
            date: "2030-01-01".into(),
            time: "14:00".into(),
            contact_name: "Taro Yamada".into(),
            contact_phone: "(123) 456-7890".into(),
            contact_email: "taro@example.com".into(),
        }
    }

    fn violated_fields(req: &CreateBookingRequest) -> Vec<String> {
        let report = req.validate(&()).unwrap_err();
        report.iter().map(|(path, _)| path.to_string()).collect()
    }

    #[test]
    fn accepts_a_well_formed_request() {
        assert!(base_request().validate(&()).is_ok());
    }

    #[test]
    fn rejects_a_half_hour_slot() {
        let req = CreateBookingRequest {
            time: "14:30".into(),
            ..base_request()
        };
        assert!(violated_fields(&req).contains(&"time".to_string()));
    }

    #[test]
    fn rejects_a_malformed_time() {
        let req = CreateBookingRequest {
            time: "25:00".into(),
            ..base_request()
        };
        assert!(violated_fields(&req).contains(&"time".to_string()));
    }

    #[test]
    fn rejects_a_past_date() {
        let req = CreateBookingRequest {
            date: "2020-01-01".into(),
            ..base_request()
        };
        assert!(violated_fields(&req).contains(&"date".to_string()));
    }

    #[test]
    fn accepts_today() {
        let req = CreateBookingRequest {
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            ..base_request()
        };
        assert!(req.validate(&()).is_ok());
    }

    #[test]
    fn normalizes_formatted_phone_numbers() {
        assert_eq!(normalize_phone("(123) 456-7890"), "1234567890");
        assert!(base_request().validate(&()).is_ok());
    }

    #[test]
    fn rejects_a_short_phone_number() {
        let req = CreateBookingRequest {
            contact_phone: "12345".into(),
            ..base_request()
        };
        assert!(violated_fields(&req).contains(&"contact_phone".to_string()));
    }

    #[test]
    fn rejects_a_too_short_contact_name() {
        let req = CreateBookingRequest {
            contact_name: "  ab  ".into(),
            ..base_request()
        };
        assert!(violated_fields(&req).contains(&"contact_name".to_string()));
    }

    #[test]
    fn rejects_an_email_without_a_dotted_domain() {
        let req = CreateBookingRequest {
            contact_email: "taro@localhost".into(),
            ..base_request()
        };
        assert!(violated_fields(&req).contains(&"contact_email".to_string()));
    }

    #[test]
    fn rejects_a_malformed_workspace_identifier() {
        let req = CreateBookingRequest {
            workspace_id: "not-a-uuid".into(),
            ..base_request()
        };
        assert!(violated_fields(&req).contains(&"workspace_id".to_string()));
    }

    // Violations are collected, not short-circuited, so a caller sees
    // every broken field at once.
    #[test]
    fn reports_every_violation_together() {
        let req = CreateBookingRequest {
            time: "14:30".into(),
            contact_phone: "12345".into(),
            contact_name: "ab".into(),
            ..base_request()
        };
        let fields = violated_fields(&req);
        assert!(fields.contains(&"time".to_string()));
        assert!(fields.contains(&"contact_phone".to_string()));
        assert!(fields.contains(&"contact_name".to_string()));
    }

    #[test]
    fn conversion_trims_the_name_and_normalizes_the_phone() -> anyhow::Result<()> {
        let req = CreateBookingRequest {
            contact_name: "  Taro Yamada  ".into(),
            ..base_request()
        };
        let user_id = UserId::new();
        let event: CreateBooking = CreateBookingRequestWithUserId::new(user_id, req).try_into()?;

        assert_eq!(event.booked_by, user_id);
        assert_eq!(event.contact_name, "Taro Yamada");
        assert_eq!(event.contact_phone, "1234567890");
        assert_eq!(event.booked_on, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert_eq!(event.slot_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        Ok(())
    }
}
