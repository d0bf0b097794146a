use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{TypeConstraintError, UserEmail, UserName};

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub email: UserEmail,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LoginFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: UserEmail::new(value.email)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterFormPayload {
    pub name: UserName,
    pub email: UserEmail,
}

#[derive(Debug, Error)]
pub enum RegisterFormError {
    #[error("Register form validation failed: {0}")]
    Validation(String),
    #[error("Register form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RegisterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RegisterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RegisterForm> for RegisterFormPayload {
    type Error = RegisterFormError;

    fn try_from(value: RegisterForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: UserName::new(value.name)?,
            email: UserEmail::new(value.email)?,
        })
    }
}

/// One-time-password sign in by phone number.
#[derive(Deserialize, Validate)]
pub struct OtpForm {
    #[validate(length(min = 1))]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtpFormPayload {
    /// Digits and a leading `+`, spaces removed.
    pub phone: String,
}

#[derive(Debug, Error)]
pub enum OtpFormError {
    #[error("OTP form validation failed: {0}")]
    Validation(String),
    #[error("Phone number is invalid")]
    InvalidPhone,
}

impl From<ValidationErrors> for OtpFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<OtpForm> for OtpFormPayload {
    type Error = OtpFormError;

    fn try_from(value: OtpForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let phone: String = value
            .phone
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let digits = phone.strip_prefix('+').unwrap_or(&phone);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpFormError::InvalidPhone);
        }

        Ok(Self { phone })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_email_and_password() {
        let payload = LoginFormPayload::try_from(LoginForm {
            email: "awa@example.com".into(),
            password: "secret".into(),
        })
        .unwrap();
        assert_eq!(payload.email.as_str(), "awa@example.com");

        let err = LoginFormPayload::try_from(LoginForm {
            email: "awa".into(),
            password: "secret".into(),
        })
        .unwrap_err();
        assert!(matches!(err, LoginFormError::Validation(_)));
    }

    #[test]
    fn register_rejects_short_passwords() {
        let err = RegisterFormPayload::try_from(RegisterForm {
            name: "Awa".into(),
            email: "awa@example.com".into(),
            password: "123".into(),
        })
        .unwrap_err();
        assert!(matches!(err, RegisterFormError::Validation(_)));
    }

    #[test]
    fn otp_normalizes_phone_numbers() {
        let payload = OtpFormPayload::try_from(OtpForm {
            phone: "+221 77 123 45 67".into(),
        })
        .unwrap();
        assert_eq!(payload.phone, "+221771234567");

        let err = OtpFormPayload::try_from(OtpForm {
            phone: "77-12".into(),
        })
        .unwrap_err();
        assert!(matches!(err, OtpFormError::InvalidPhone));
    }
}
