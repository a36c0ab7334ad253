use serde::Serialize;

use crate::error::AppError;
use crate::models::dress_rentals;

/// Group whose members manage every rental.
pub const MODERATORS_GROUP: &str = "moderators";
/// Group whose members moderate reviews and the catalog.
pub const STAFF_GROUP: &str = "staff";

/// What an account may do beyond its own records, resolved once per request
/// from its group memberships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub moderator: bool,
    pub staff: bool,
}

impl Capabilities {
    pub fn from_group_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(Capabilities::default(), |mut caps, name| {
                match name.as_ref() {
                    MODERATORS_GROUP => caps.moderator = true,
                    STAFF_GROUP => caps.staff = true,
                    _ => {}
                }
                caps
            })
    }

    pub fn require_moderator(&self) -> Result<(), AppError> {
        if self.moderator {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only moderators can manage rentals".to_string(),
            ))
        }
    }

    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.staff {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only staff members can do this".to_string(),
            ))
        }
    }
}

/// The self-service rental paths are open to the renting account only.
pub fn verify_rental_owner(rental: &dress_rentals::Model, user_id: i32) -> Result<(), AppError> {
    if rental.user_id == Some(user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You can only change your own rentals".to_string(),
        ))
    }
}
