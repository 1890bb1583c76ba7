use crate::utils::error::{AppError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension) {
                return Err(AppError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(AppError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 以字元 (非位元組) 計算長度
pub fn validate_max_chars(field_name: &str, value: &str, max: usize) -> Result<()> {
    let count = value.chars().count();
    if count > max {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at most {} characters (got {})", max, count),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 收集多個欄位錯誤，最後合併成一個 `ValidationError`
#[derive(Debug, Default)]
pub struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, outcome: Result<()>) {
        if let Err(e) = outcome {
            let message = match e {
                AppError::InvalidConfigValueError { field, reason, .. } => {
                    format!("{}: {}", field, reason)
                }
                other => other.to_string(),
            };
            self.messages.push(message);
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.messages.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("pokeapi.base_url", "https://example.com").is_ok());
        assert!(validate_url("pokeapi.base_url", "http://example.com").is_ok());
        assert!(validate_url("pokeapi.base_url", "").is_err());
        assert!(validate_url("pokeapi.base_url", "invalid-url").is_err());
        assert!(validate_url("pokeapi.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("cards.max_per_page", 5, 1).is_ok());
        assert!(validate_positive_number("cards.max_per_page", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["cart.csv".to_string()];
        assert!(validate_file_extensions("cart", &files, &["csv"]).is_ok());

        let invalid_files = vec!["cart.txt".to_string()];
        assert!(validate_file_extensions("cart", &invalid_files, &["csv"]).is_err());
    }

    #[test]
    fn test_validate_max_chars_counts_characters() {
        // 4 個字元, 12 個位元組
        assert!(validate_max_chars("name", "皮卡丘丘", 4).is_ok());
        assert!(validate_max_chars("name", "皮卡丘丘", 3).is_err());
    }

    #[test]
    fn test_field_errors_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.check(validate_non_empty_string("name", "  "));
        errors.check(validate_url("url", "nope"));
        errors.check(validate_range("per_page", 5, 1, 10));

        let err = errors.into_result().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("name: Value cannot be empty"));
        assert!(message.contains("; url: Invalid URL format"));
    }
}
