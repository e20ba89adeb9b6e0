//! Tests for signature parsing and verification.

use super::{
    SIGNATURE_HEADER, WebhookError, WebhookSignature, compute_signature, constant_time_eq,
    verify_headers, verify_signature, verify_signature_str,
};

const SECRET: &str = "test_secret";
const PAYLOAD: &str = r#"{"test":"data"}"#;

fn valid_header() -> String {
    format!("sha256={}", compute_signature(PAYLOAD.as_bytes(), SECRET))
}

/// Replaces the character at `index` with a different hex digit.
fn mutate_digit(digest: &str, index: usize) -> String {
    digest
        .char_indices()
        .map(|(i, c)| {
            if i == index {
                if c == '0' { '1' } else { '0' }
            } else {
                c
            }
        })
        .collect()
}

mod parsing {
    use super::*;

    #[test]
    fn splits_algorithm_and_digest() {
        let signature = WebhookSignature::parse("sha256=abc123").unwrap();

        assert_eq!(signature.algorithm, "sha256");
        assert_eq!(signature.digest, "abc123");
    }

    #[test]
    fn splits_on_first_equals_only() {
        let signature: WebhookSignature = "sha256=ab=cd".parse().unwrap();

        assert_eq!(signature.digest, "ab=cd");
    }

    #[test]
    fn missing_separator_is_invalid_format() {
        let result = WebhookSignature::parse("invalid_signature");

        assert!(matches!(result, Err(WebhookError::InvalidFormat(_))));
    }

    #[test]
    fn unsupported_algorithm_is_invalid_format() {
        for header in ["md5=abc123", "SHA256=abc123", "sha1=abc123", "=abc123"] {
            let result = WebhookSignature::parse(header);

            assert!(
                matches!(result, Err(WebhookError::InvalidFormat(_))),
                "{header} should be rejected"
            );
        }
    }
}

mod digest {
    use super::*;

    #[test]
    fn is_lowercase_hex_sha256() {
        let digest = compute_signature(PAYLOAD.as_bytes(), SECRET);

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn matches_known_vector() {
        // RFC 4231 test case 2
        let digest = compute_signature(b"what do ya want for nothing?", "Jefe");

        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn empty_secret_is_accepted() {
        assert_eq!(compute_signature(b"body", "").len(), 64);
    }

    #[test]
    fn constant_time_eq_compares_content_and_length() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }
}

mod verification {
    use super::*;

    #[test]
    fn correct_signature_verifies() {
        assert!(verify_signature(PAYLOAD.as_bytes(), &valid_header(), SECRET).is_ok());
    }

    #[test]
    fn any_single_digit_mutation_is_rejected() {
        let digest = compute_signature(PAYLOAD.as_bytes(), SECRET);

        for index in 0..digest.len() {
            let header = format!("sha256={}", mutate_digit(&digest, index));

            let result = verify_signature(PAYLOAD.as_bytes(), &header, SECRET);

            assert!(
                matches!(result, Err(WebhookError::InvalidSignature)),
                "mutation at {index} was accepted"
            );
        }
    }

    #[test]
    fn wrong_length_digest_is_invalid_signature() {
        let digest = compute_signature(PAYLOAD.as_bytes(), SECRET);

        for header in [
            format!("sha256={}", &digest[..63]),
            format!("sha256={digest}0"),
            "sha256=".to_string(),
        ] {
            let result = verify_signature(PAYLOAD.as_bytes(), &header, SECRET);

            assert!(matches!(result, Err(WebhookError::InvalidSignature)));
        }
    }

    #[test]
    fn uppercase_digest_is_rejected() {
        let header = format!(
            "sha256={}",
            compute_signature(PAYLOAD.as_bytes(), SECRET).to_uppercase()
        );

        let result = verify_signature(PAYLOAD.as_bytes(), &header, SECRET);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn wrong_secret_or_body_is_rejected() {
        let header = valid_header();

        assert!(verify_signature(PAYLOAD.as_bytes(), &header, "other_secret").is_err());
        assert!(verify_signature(br#"{"test": "data"}"#, &header, SECRET).is_err());
    }

    #[test]
    fn malformed_headers_are_invalid_format() {
        for header in ["invalid_signature", "md5=abc123"] {
            let result = verify_signature(PAYLOAD.as_bytes(), header, SECRET);

            assert!(matches!(result, Err(WebhookError::InvalidFormat(_))));
        }
    }

    #[test]
    fn bytes_and_str_entry_points_agree() {
        let good = valid_header();
        let headers = [
            good.as_str(),
            "sha256=0000",
            "invalid_signature",
            "md5=abc123",
        ];

        for header in headers {
            let from_bytes = verify_signature(PAYLOAD.as_bytes(), header, SECRET);
            let from_str = verify_signature_str(PAYLOAD, header, SECRET);

            assert_eq!(
                format!("{from_bytes:?}"),
                format!("{from_str:?}"),
                "entry points disagree for {header}"
            );
        }
    }
}

mod headers {
    use super::*;
    use http::{HeaderMap, HeaderValue};

    #[test]
    fn reads_signature_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Firecrawl-Signature".parse::<http::HeaderName>().unwrap(),
            HeaderValue::from_str(&valid_header()).unwrap(),
        );

        assert!(verify_headers(&headers, PAYLOAD.as_bytes(), SECRET).is_ok());
    }

    #[test]
    fn missing_header_is_reported() {
        let result = verify_headers(&HeaderMap::new(), PAYLOAD.as_bytes(), SECRET);

        assert!(matches!(result, Err(WebhookError::MissingSignature)));
    }

    #[test]
    fn empty_header_is_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static(""));

        let result = verify_headers(&headers, PAYLOAD.as_bytes(), SECRET);

        assert!(matches!(result, Err(WebhookError::MissingSignature)));
    }

    #[test]
    fn non_ascii_header_is_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_bytes(b"sha256=\xff\xfe").unwrap(),
        );

        let result = verify_headers(&headers, PAYLOAD.as_bytes(), SECRET);

        assert!(matches!(result, Err(WebhookError::InvalidFormat(_))));
    }
}
