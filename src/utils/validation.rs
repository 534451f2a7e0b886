use std::borrow::Cow;
use url::Url;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::{FieldError, FieldErrorKind, FieldErrors};
use crate::models::employee::{EmployeeDraft, EmployeeForm, Field, Gender};

pub fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if let Err(err) = gender.parse::<Gender>() {
        let mut error = ValidationError::new("invalid_enum");
        error.message = Some(Cow::from(err.to_string()));
        return Err(error);
    }
    Ok(())
}

pub fn validate_image_url(image_url: &str) -> Result<(), FieldError> {
    Url::parse(image_url)
        .map(|_| ())
        .map_err(|_| FieldError::new(FieldErrorKind::Format, "Invalid url"))
}

fn error_kind(code: &str) -> FieldErrorKind {
    match code {
        "required" | "length" => FieldErrorKind::RequiredField,
        "invalid_enum" => FieldErrorKind::InvalidEnum,
        _ => FieldErrorKind::Format,
    }
}

/// Flattens `validator` output to one error per form field.
pub fn map_validation_errors(err: &ValidationErrors) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (key, errs) in err.field_errors() {
        let (Some(field), Some(first)) = (Field::from_validation_key(key), errs.first()) else {
            continue;
        };
        let message = first
            .message
            .as_deref()
            .map(str::to_string)
            .unwrap_or_else(|| first.code.to_string());
        errors.insert(field, FieldError::new(error_kind(&first.code), message));
    }
    errors
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), FieldErrors> {
    payload.validate().map_err(|err| map_validation_errors(&err))
}

/// Runs the form schema and, on success, produces a typed draft.
pub fn validate_form(form: &EmployeeForm, strict_image_url: bool) -> Result<EmployeeDraft, FieldErrors> {
    let mut errors = match validate_payload(form) {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors,
    };

    if strict_image_url {
        if let Err(err) = validate_image_url(&form.image_url) {
            errors.insert(Field::ImageUrl, err);
        }
    }

    let gender = match form.gender.parse::<Gender>() {
        Ok(gender) if errors.is_empty() => gender,
        _ => return Err(errors),
    };

    Ok(EmployeeDraft {
        id: form.id.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        gender,
        image_url: form.image_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> EmployeeForm {
        EmployeeForm {
            id: None,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            gender: "Female".to_string(),
            image_url: "http://x/1.png".to_string(),
        }
    }

    #[test]
    fn accepts_valid_form() {
        let draft = validate_form(&valid_form(), true).unwrap();
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(draft.id, None);
    }

    #[test]
    fn empty_names_are_required_field_errors() {
        let mut form = valid_form();
        form.first_name.clear();
        form.last_name.clear();
        let errors = validate_form(&form, false).unwrap_err();
        let first = errors.get(Field::FirstName).unwrap();
        assert_eq!(first.kind, FieldErrorKind::RequiredField);
        assert_eq!(first.message, "The First name is required");
        assert_eq!(
            errors.get(Field::LastName).unwrap().message,
            "The Last name is required"
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn malformed_email_is_format_error_only() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        let errors = validate_form(&form, false).unwrap_err();
        assert_eq!(errors.len(), 1);
        let email = errors.get(Field::Email).unwrap();
        assert_eq!(email.kind, FieldErrorKind::Format);
        assert_eq!(email.message, "Invalid email");
    }

    #[test]
    fn gender_outside_the_set_is_invalid_enum() {
        let mut form = valid_form();
        form.gender = "Other".to_string();
        let errors = validate_form(&form, false).unwrap_err();
        assert_eq!(errors.get(Field::Gender).unwrap().kind, FieldErrorKind::InvalidEnum);

        for gender in ["Male", "Female"] {
            form.gender = gender.to_string();
            assert!(validate_form(&form, false).is_ok());
        }
    }

    #[test]
    fn image_url_is_opaque_unless_strict() {
        let mut form = valid_form();
        form.image_url = "not a url".to_string();
        assert!(validate_form(&form, false).is_ok());

        let errors = validate_form(&form, true).unwrap_err();
        let image = errors.get(Field::ImageUrl).unwrap();
        assert_eq!(image.kind, FieldErrorKind::Format);
        assert_eq!(image.message, "Invalid url");
    }
}
