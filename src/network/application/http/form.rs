//! `application/x-www-form-urlencoded` bodies.

use super::Error;
use base64ct::{Base64, Encoding};
use heapless::String;

/// Capacity of an encoded form body, in bytes.
pub const MAX_FORM_LEN: usize = 2048;

/// An encoded form body.
pub type FormBody = String<MAX_FORM_LEN>;

/// Percent sequences turned back into literal characters after encoding,
/// applied in this order.
const UNESCAPES: [(&str, &str); 11] = [
    ("%20", " "),
    ("%21", "!"),
    ("%22", "\""),
    ("%23", "#"),
    ("%24", "$"),
    ("%25", "%"),
    ("%26", "&"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2B", " "),
];

/// Serializes `pairs` as `key=value` joined by `&`, in order.
///
/// A key or value made only of `0` and `1` characters is sent as the base64
/// of its bytes instead.
///
/// # Examples
///
/// ```rust
/// use rawhttp::network::application::http::form;
///
/// let body = form::encode(&[("name", "Abram"), ("0101", "x")]).unwrap();
/// assert_eq!(body.as_str(), "name=Abram&MDEwMQ===x");
/// ```
pub fn encode(pairs: &[(&str, &str)]) -> Result<FormBody, Error> {
    let mut body = FormBody::new();
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            body.push('&').map_err(|_| Error::BufferOverflow)?;
        }
        push_field(&mut body, key)?;
        body.push('=').map_err(|_| Error::BufferOverflow)?;
        push_field(&mut body, value)?;
    }
    unescape(&body)
}

/// Whether `field` is a non-empty run of `0`/`1` characters.
pub fn is_binary(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c == '0' || c == '1')
}

fn push_field(body: &mut FormBody, field: &str) -> Result<(), Error> {
    if is_binary(field) {
        let mut scratch = [0u8; MAX_FORM_LEN];
        let encoded =
            Base64::encode(field.as_bytes(), &mut scratch).map_err(|_| Error::BufferOverflow)?;
        body.push_str(encoded).map_err(|_| Error::BufferOverflow)
    } else {
        body.push_str(field).map_err(|_| Error::BufferOverflow)
    }
}

/// Applies the fixed unescape table, one full pass per entry.
fn unescape(body: &str) -> Result<FormBody, Error> {
    let mut current = FormBody::try_from(body).map_err(|_| Error::BufferOverflow)?;
    for (from, to) in UNESCAPES {
        if !current.contains(from) {
            continue;
        }
        let mut next = FormBody::new();
        let mut rest = current.as_str();
        while let Some(idx) = rest.find(from) {
            next.push_str(&rest[..idx]).map_err(|_| Error::BufferOverflow)?;
            next.push_str(to).map_err(|_| Error::BufferOverflow)?;
            rest = &rest[idx + from.len()..];
        }
        next.push_str(rest).map_err(|_| Error::BufferOverflow)?;
        current = next;
    }
    Ok(current)
}
