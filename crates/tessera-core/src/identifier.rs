//! Dataset identifier generation.
//!
//! CKAN caps package names at 100 characters. A row's name is slugged, cut
//! down so that the unique suffix still fits, and joined to the suffix.

use uuid::Uuid;

/// Maximum length of a CKAN package name.
pub const MAX_IDENTIFIER_LEN: usize = 100;

/// Source of the unique suffix appended to every identifier.
pub trait TokenSource {
    fn next_token(&mut self) -> String;
}

/// Random UUID v4 tokens in hyphenated form (36 characters).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn next_token(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Lowercases `name` and turns underscores into hyphens.
pub fn slug_base(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

/// Builds `<base>-<token>`, truncating the base so the result never exceeds
/// [`MAX_IDENTIFIER_LEN`] characters.
///
/// Lengths are counted in `char`s.
///
/// # Examples
///
/// ```
/// use tessera_core::identifier::build_identifier;
///
/// let token = "123e4567-e89b-12d3-a456-426614174000";
/// assert_eq!(
///     build_identifier("Air_Quality", token),
///     "air-quality-123e4567-e89b-12d3-a456-426614174000"
/// );
///
/// let long = "x".repeat(250);
/// assert_eq!(build_identifier(&long, token).chars().count(), 100);
/// ```
pub fn build_identifier(name: &str, token: &str) -> String {
    let base = slug_base(name);
    let max_len = MAX_IDENTIFIER_LEN.saturating_sub(token.chars().count() + 1);

    let base: String = if base.chars().count() > max_len {
        base.chars().take(max_len).collect()
    } else {
        base
    };

    format!("{}-{}", base, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_uuid_tokens_are_36_chars_and_distinct() {
        let mut tokens = UuidTokens;
        let a = tokens.next_token();
        let b = tokens.next_token();
        assert_eq!(a.len(), 36);
        assert_ne!(a, b);
    }

    #[test]
    fn test_slug_base() {
        assert_eq!(slug_base("My_Data_Set"), "my-data-set");
        assert_eq!(slug_base("already-fine"), "already-fine");
    }

    #[test]
    fn test_short_name_kept_whole() {
        let id = build_identifier("Rainfall_2023", TOKEN);
        assert_eq!(id, format!("rainfall-2023-{}", TOKEN));
    }

    #[test]
    fn test_base_truncated_at_boundary() {
        // 63 + 1 + 36 = 100: exactly fits
        let fits = "a".repeat(63);
        assert_eq!(build_identifier(&fits, TOKEN).len(), 100);
        assert!(build_identifier(&fits, TOKEN).starts_with(&fits));

        let over = "b".repeat(64);
        let id = build_identifier(&over, TOKEN);
        assert_eq!(id.len(), 100);
        assert_eq!(id, format!("{}-{}", "b".repeat(63), TOKEN));
    }

    #[test]
    fn test_length_bound_holds_for_many_names() {
        let names = [
            String::new(),
            "x".to_string(),
            "Name_With_Underscores".repeat(10),
            "ÄÖÜ_ñandú_".repeat(20),
            "日本語のデータセット".repeat(15),
        ];
        for name in &names {
            let id = build_identifier(name, TOKEN);
            assert!(id.chars().count() <= MAX_IDENTIFIER_LEN, "{} too long", id);

            let base = id.strip_suffix(&format!("-{}", TOKEN)).unwrap();
            assert!(slug_base(name).starts_with(base));
        }
    }

    #[test]
    fn test_truncation_does_not_split_chars() {
        let id = build_identifier(&"é".repeat(80), TOKEN);
        assert_eq!(id.chars().count(), 100);
        assert!(id.starts_with(&"é".repeat(63)));
    }
}
