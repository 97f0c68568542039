//! `__VIEWSTATE` extraction from urlencoded request bodies.
//!
//! The CLI front-end is handed whole captured bodies; the library decoder
//! only ever consumes the isolated field value, so the split lives here.

/// Form field name carrying the serialized state.
pub const FIELD_NAME: &str = "__VIEWSTATE";

/// Isolate and percent-decode the `__VIEWSTATE` value from an
/// `application/x-www-form-urlencoded` body. Pairs without an `=` are
/// skipped; returns `None` when the field is absent.
pub fn extract_viewstate(body: &str) -> Option<String> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == FIELD_NAME)
        .map(|(_, value)| percent_decode(value))
}

/// Decode `%HH` escapes. Malformed or incomplete escapes pass through
/// verbatim, and `+` is left alone: base64 uses `+` as an alphabet
/// character, so mapping it to space would corrupt the payload.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_field_among_others() {
        let body = "a=b&__VIEWSTATE=%2FwEPZA%3D%3D&c=d";
        assert_eq!(extract_viewstate(body).as_deref(), Some("/wEPZA=="));
    }

    #[test]
    fn absent_field_is_none() {
        assert_eq!(extract_viewstate("a=b&c=d"), None);
        assert_eq!(extract_viewstate(""), None);
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let body = "junk&__VIEWSTATE=AAAA&more-junk";
        assert_eq!(extract_viewstate(body).as_deref(), Some("AAAA"));
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(percent_decode("a+b"), "a+b");
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(percent_decode("%"), "%");
        assert_eq!(percent_decode("%2"), "%2");
        assert_eq!(percent_decode("%GG"), "%GG");
        assert_eq!(percent_decode("100%25"), "100%");
    }
}
