//! Pure input checks shared by all operations

use url::Url;

use crate::domain::ValidationError;

/// True when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn require_non_blank(param: &str, value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::Blank {
            param: param.to_string(),
        });
    }
    Ok(())
}

/// Accept only absolute `http`/`https` URLs with a host.
pub fn require_http_url(param: &str, value: &str) -> Result<(), ValidationError> {
    require_non_blank(param, value)?;

    let invalid = || ValidationError::InvalidUrl {
        param: param.to_string(),
        value: value.to_string(),
    };

    // Url::parse tolerates surrounding whitespace; an embedded value must not.
    if value.trim() != value {
        return Err(invalid());
    }
    let url = Url::parse(value).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("\t\n")]
    fn given_blank_when_require_non_blank_then_rejects(#[case] value: &str) {
        let err = require_non_blank("token", value).unwrap_err();
        assert_eq!(err.to_string(), "token cannot be empty or whitespace");
    }

    #[rstest]
    #[case("http://localhost:5000")]
    #[case("https://sso.globodain.com")]
    #[case("https://api.example.com/v1?x=\"q\"")]
    fn given_http_url_when_validating_then_accepts(#[case] value: &str) {
        assert!(require_http_url("url", value).is_ok());
    }

    #[rstest]
    #[case("ftp://example.com")]
    #[case("file:///etc/passwd")]
    #[case("mailto:a@b.c")]
    #[case("example.com")]
    #[case("/relative/path")]
    #[case("http//missing-colon")]
    #[case("http://")]
    #[case(" https://example.com")]
    fn given_non_http_or_malformed_when_validating_then_invalid_url(#[case] value: &str) {
        let err = require_http_url("url", value).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidUrl { .. }),
            "{value}: {err:?}"
        );
        assert!(err.to_string().contains("invalid URL format"));
    }

    #[test]
    fn given_blank_url_when_validating_then_blank_error() {
        let err = require_http_url("url", "  ").unwrap_err();
        assert!(matches!(err, ValidationError::Blank { .. }));
    }
}
