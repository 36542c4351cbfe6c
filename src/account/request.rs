use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Account;

/// Body of `POST /account`.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[validate(
        required(message = "firstName is required"),
        length(
            min = 3,
            max = 50,
            message = "firstName must contain between 3 and 50 characters"
        )
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "lastName is required"),
        length(
            min = 3,
            max = 50,
            message = "lastName must contain between 3 and 50 characters"
        )
    )]
    pub last_name: Option<String>,
}

impl CreateAccountRequest {
    /// Build the [`Account`] described by this request.
    ///
    /// Call it once the request has been validated.
    pub fn into_account(self) -> Account {
        Account::new(
            self.first_name.unwrap_or_default(),
            self.last_name.unwrap_or_default(),
        )
    }
}
