//! Reporting `validator` failures as field-level [`AppError`]s.

use validator::Validate;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;

/// A trimmed field as `(name, label, value)`.
pub(crate) type Field<'a> = (&'static str, &'a str, &'a str);

/// Check `fields` in order: an empty value fails as `{label} is required`,
/// otherwise the first derived rule that failed for it is reported.
pub(crate) fn check<T: Validate>(value: &T, fields: &[Field<'_>]) -> AppResult<()> {
    let result = value.validate();
    let field_errors = result.as_ref().err().map(|errors| errors.field_errors());

    for (field, label, raw) in fields {
        if raw.is_empty() {
            return Err(AppError::validation(*field, format!("{label} is required")));
        }
        let failed = field_errors
            .as_ref()
            .and_then(|errors| errors.get(*field))
            .and_then(|errs| errs.first());
        if let Some(err) = failed {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {field}"));
            return Err(AppError::validation(*field, message));
        }
    }

    match result {
        Ok(()) => Ok(()),
        Err(_) => Err(AppError::validation("body", "Invalid request")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Venue {
        #[validate(length(min = 2, message = "Name is too short"))]
        name: String,
        #[validate(length(max = 4))]
        code: String,
    }

    fn venue(name: &str, code: &str) -> Venue {
        Venue {
            name: name.into(),
            code: code.into(),
        }
    }

    fn fields(v: &Venue) -> [Field<'_>; 2] {
        [
            ("name", "Name", v.name.as_str()),
            ("code", "Code", v.code.as_str()),
        ]
    }

    #[test]
    fn test_reports_first_field_in_order() {
        let v = venue("x", "too long");
        let err = check(&v, &fields(&v)).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("name"));
        assert_eq!(err.message, "Name is too short");

        let v = venue("Harbour", "too long");
        let err = check(&v, &fields(&v)).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("code"));
        assert_eq!(err.message, "Invalid code");
    }

    #[test]
    fn test_empty_value_is_required() {
        let v = venue("x", "");
        let reversed = [("code", "Code", v.code.as_str()), ("name", "Name", v.name.as_str())];
        let err = check(&v, &reversed).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("code"));
        assert_eq!(err.message, "Code is required");
        assert!(check(&venue("Harbour", "HB"), &[]).is_ok());
    }
}
