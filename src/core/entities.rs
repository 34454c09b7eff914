//! HTML entity decoding.
//!
//! Handles the XML built-ins, common HTML named entities, and numeric
//! character references. Uses Cow for zero-copy when no entities are
//! present. Unknown or unterminated references are kept as literal text;
//! there is no strict mode here.

use memchr::memchr;
use std::borrow::Cow;

/// Decode entity references in text or attribute content.
///
/// Returns Borrowed if no entities are present (zero-copy),
/// returns Owned if entities were decoded.
#[inline]
pub fn decode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check for an ampersand using SIMD.
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_entities(input))
}

/// Decode all entity references in the input.
fn decode_entities(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut pos = 0;

    while pos < input.len() {
        match memchr(b'&', &bytes[pos..]) {
            Some(amp) => {
                // Copy everything before the entity.
                result.push_str(&input[pos..pos + amp]);
                pos += amp;

                // Find the semicolon.
                match memchr(b';', &bytes[pos..]) {
                    Some(semi) => {
                        let entity = &input[pos + 1..pos + semi];
                        if let Some(decoded) = decode_entity(entity) {
                            result.push(decoded);
                            pos += semi + 1;
                        } else {
                            // Unknown entity, keep as-is.
                            result.push('&');
                            pos += 1;
                        }
                    }
                    None => {
                        // No semicolon found, keep the ampersand.
                        result.push('&');
                        pos += 1;
                    }
                }
            }
            None => {
                // No more entities, copy the rest.
                result.push_str(&input[pos..]);
                break;
            }
        }
    }

    result
}

/// Decode a single entity (without `&` and `;`).
fn decode_entity(entity: &str) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix('#') {
        return decode_numeric_entity(numeric);
    }

    let c = match entity {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        // HTML named entities (common ones)
        "nbsp" => '\u{00A0}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        _ => return None,
    };
    Some(c)
}

/// Decode a numeric character reference (the `#` is already stripped).
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let codepoint = if let Some(hex) = entity
        .strip_prefix('x')
        .or_else(|| entity.strip_prefix('X'))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.parse::<u32>().ok()?
    };

    if codepoint == 0 {
        // A reference to NUL decodes to the replacement character, matching
        // the cursor's treatment of raw NUL.
        return Some('\u{FFFD}');
    }
    char::from_u32(codepoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities() {
        let result = decode_text("Hello, World!");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), "Hello, World!");
    }

    #[test]
    fn test_basic_entities() {
        let result = decode_text("&lt;hello&gt; &amp; &quot;world&quot;");
        assert_eq!(result.as_ref(), "<hello> & \"world\"");
    }

    #[test]
    fn test_numeric_decimal() {
        assert_eq!(decode_text("&#65;&#66;&#67;").as_ref(), "ABC");
    }

    #[test]
    fn test_numeric_hex() {
        assert_eq!(decode_text("&#x41;&#x42;&#x43;").as_ref(), "ABC");
    }

    #[test]
    fn test_unicode_entity() {
        assert_eq!(decode_text("&#x1F600;").as_ref(), "😀");
    }

    #[test]
    fn test_unknown_entity() {
        assert_eq!(decode_text("&unknown;").as_ref(), "&unknown;");
    }

    #[test]
    fn test_unterminated_reference() {
        assert_eq!(decode_text("a&b").as_ref(), "a&b");
    }

    #[test]
    fn test_html_named() {
        assert_eq!(
            decode_text("a&nbsp;b&mdash;c").as_ref(),
            "a\u{00A0}b\u{2014}c"
        );
    }

    #[test]
    fn test_nul_reference() {
        assert_eq!(decode_text("&#0;").as_ref(), "\u{FFFD}");
    }
}
