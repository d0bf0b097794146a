use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageUrl, UserEmail, UserId, UserName};

/// The signed-in merchant as remembered by the session storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: UserId,
    pub name: UserName,
    pub email: UserEmail,
    pub avatar: Option<ImageUrl>,
}
