use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

lazy_static! {
    /// Asset condition values accepted by the asset form
    /// - Valid: "Baik", "Rusak"
    /// - Invalid: "baik", "Layak", ""
    pub static ref KONDISI_REGEX: Regex = Regex::new(r"^(Baik|Rusak)$").unwrap();

    /// Role values accepted by the user form
    /// - Valid: "admin", "pegawai", "atasan"
    /// - Invalid: "Admin", "supervisor", ""
    pub static ref ROLE_REGEX: Regex = Regex::new(r"^(admin|pegawai|atasan)$").unwrap();

    /// Damage history values accepted by the report form
    /// - Valid: "sangat-sering", "pernah", "tidak-sering", "tidak-pernah"
    /// - Invalid: "Pernah", "kadang-kadang", ""
    pub static ref RIWAYAT_REGEX: Regex =
        Regex::new(r"^(sangat-sering|pernah|tidak-sering|tidak-pernah)$").unwrap();
}

/// Reject strings that are empty once trimmed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten validator errors into "field: message" lines for inline display.
/// Nested fields are prefixed with their path, e.g. `evidence[0].name`.
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.sort();
    messages
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| match &e.message {
                    Some(msg) => format!("{}: {}", path, msg),
                    None => format!("{}: {}", path, e.code),
                }))
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_kondisi_regex() {
        assert!(KONDISI_REGEX.is_match("Baik"));
        assert!(KONDISI_REGEX.is_match("Rusak"));
        assert!(!KONDISI_REGEX.is_match("baik"));
        assert!(!KONDISI_REGEX.is_match("Layak"));
        assert!(!KONDISI_REGEX.is_match(""));
    }

    #[test]
    fn test_role_regex() {
        assert!(ROLE_REGEX.is_match("admin"));
        assert!(ROLE_REGEX.is_match("pegawai"));
        assert!(ROLE_REGEX.is_match("atasan"));
        assert!(!ROLE_REGEX.is_match("Admin"));
        assert!(!ROLE_REGEX.is_match("supervisor"));
    }

    #[derive(Validate)]
    struct Form {
        #[validate(custom(function = "not_blank", message = "Masukkan nama barang"))]
        nama: String,
        #[validate(email(message = "Format email tidak valid"))]
        email: String,
    }

    #[test]
    fn test_field_messages_one_line_per_field() {
        let form = Form {
            nama: "   ".to_string(),
            email: "bukan-email".to_string(),
        };
        let errors = form.validate().unwrap_err();
        let messages = field_messages(&errors);
        assert_eq!(
            messages,
            vec![
                "email: Format email tidak valid".to_string(),
                "nama: Masukkan nama barang".to_string(),
            ]
        );
    }

    #[derive(Validate)]
    struct Item {
        #[validate(custom(function = "not_blank", message = "Nama file wajib diisi"))]
        name: String,
    }

    #[derive(Validate)]
    struct Parent {
        #[validate(nested)]
        items: Vec<Item>,
    }

    #[test]
    fn test_field_messages_include_nested_paths() {
        let parent = Parent {
            items: vec![
                Item {
                    name: "foto.jpg".to_string(),
                },
                Item {
                    name: String::new(),
                },
            ],
        };
        let errors = parent.validate().unwrap_err();
        assert_eq!(
            field_messages(&errors),
            vec!["items[1].name: Nama file wajib diisi".to_string()]
        );
    }
}
