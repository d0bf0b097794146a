//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls live here instead of next to the error enums.

use crate::domain::types::TypeConstraintError;
use crate::forms::auth::{LoginFormError, OtpFormError, RegisterFormError};
use crate::forms::products::ProductFormError;
use crate::forms::stores::CreateStoreFormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(val: ProductFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CreateStoreFormError> for ServiceError {
    fn from(val: CreateStoreFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<LoginFormError> for ServiceError {
    fn from(val: LoginFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<RegisterFormError> for ServiceError {
    fn from(val: RegisterFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<OtpFormError> for ServiceError {
    fn from(val: OtpFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
