// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Conversion of gateway variable names to HTTP header names.
//!
//! A gateway (CGI, FastCGI, an embedded interpreter, ...) hands the request
//! header fields over as meta-variables named `HTTP_<NAME>`, where `<NAME>`
//! is the field name upper-cased with every `-` replaced by `_`.
//!
//! # References
//! * [RFC 3875 Section 4.1.18](https://www.rfc-editor.org/rfc/rfc3875#section-4.1.18)

/// The prefix of the meta-variables carrying a request header field.
pub const HTTP_VARIABLE_PREFIX: &str = "HTTP_";

/// Returns whether or not the variable carries a header field. The prefix is
/// matched case-sensitively.
#[must_use]
pub fn is_http_variable(name: &str) -> bool {
    name.len() > HTTP_VARIABLE_PREFIX.len() && name.starts_with(HTTP_VARIABLE_PREFIX)
}

/// Converts a meta-variable name to the `Title-Case-With-Hyphens` form of the
/// header name, e.g. `HTTP_CONTENT_TYPE` to `Content-Type`.
///
/// Returns `None` for variables that aren't header carriers, which includes
/// names shorter than the prefix and the bare prefix itself.
#[must_use]
pub fn canonicalize_transport_name(name: &str) -> Option<String> {
    if !is_http_variable(name) {
        return None;
    }

    let remainder = &name[HTTP_VARIABLE_PREFIX.len()..];
    let mut canonical = String::with_capacity(remainder.len());
    let mut at_word_start = true;

    for character in remainder.chars() {
        let character = match character {
            '_' => ' ',
            _ if at_word_start => character.to_ascii_uppercase(),
            _ => character.to_ascii_lowercase(),
        };

        at_word_start = is_word_delimiter(character);
        canonical.push(if character == ' ' { '-' } else { character });
    }

    Some(canonical)
}

fn is_word_delimiter(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest]
    #[case("HTTP_CONTENT_TYPE", "Content-Type")]
    #[case("HTTP_X_CUSTOM_HEADER", "X-Custom-Header")]
    #[case("HTTP_HOST", "Host")]
    #[case("HTTP_USER_AGENT", "User-Agent")]
    #[case("HTTP_DNT", "Dnt")]
    #[case("HTTP_SEC_CH_UA_MOBILE", "Sec-Ch-Ua-Mobile")]
    #[case("HTTP_x_lower_case", "X-Lower-Case")]
    #[case("HTTP_ACCEPT__ENCODING", "Accept--Encoding")]
    #[case("HTTP__LEADING", "-Leading")]
    #[case("HTTP_X", "X")]
    fn canonical_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(canonicalize_transport_name(input).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("HTTP")]
    #[case("HTTP_")]
    #[case("REQUEST_METHOD")]
    #[case("CONTENT_TYPE")]
    #[case("http_host")]
    #[case("XHTTP_HOST")]
    fn not_header_carriers(#[case] input: &str) {
        assert_eq!(canonicalize_transport_name(input), None);
    }

    /// Canonicalizing the gateway name of an already canonical header name
    /// gives the same name back.
    #[test]
    fn stable_for_canonical_names() {
        for name in ["Content-Type", "X-Custom-Header", "Accept", "If-None-Match"] {
            let variable = format!("HTTP_{}", name.to_ascii_uppercase().replace('-', "_"));
            assert_eq!(canonicalize_transport_name(&variable).as_deref(), Some(name));
        }
    }

    #[test]
    fn output_never_contains_underscores() {
        let name = canonicalize_transport_name("HTTP_A_B_C_D_E").unwrap();
        assert!(!name.contains('_'));
        assert!(name.split('-').all(|word| word.chars().next().unwrap().is_ascii_uppercase()));
    }
}
