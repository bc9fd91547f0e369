use std::borrow::Cow;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

pub const MSG_EMAIL_REQUIRED: &str = "El correo electrónico es obligatorio";
pub const MSG_EMAIL_INVALID: &str = "El correo electrónico no es válido";
pub const MSG_PASSWORD_REQUIRED: &str = "La contraseña es obligatoria";
pub const MSG_PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 8 caracteres";
pub const MSG_NAME_REQUIRED: &str = "El nombre es obligatorio";
pub const MSG_PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", field_error("required", MSG_EMAIL_REQUIRED));
    } else if !email.validate_email() {
        errors.add("email", field_error("email", MSG_EMAIL_INVALID));
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.is_empty() {
        errors.add("password", field_error("required", MSG_PASSWORD_REQUIRED));
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", field_error("length", MSG_PASSWORD_TOO_SHORT));
    }
}

/// Local format checks run before the Login mutation. A failure here never
/// reaches the network.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", field_error("required", MSG_NAME_REQUIRED));
    }
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    if password != confirm_password {
        errors.add(
            "confirmPassword",
            field_error("must_match", MSG_PASSWORD_MISMATCH),
        );
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// First message recorded for a field, for rendering and assertions.
pub fn field_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|errs| errs.first())
        .and_then(|err| err.message.as_ref())
        .map(|m| m.to_string())
}
