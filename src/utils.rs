use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

pub(crate) const PERCENT: u8 = b'%';

pub(crate) fn parse_content_type(headers: &HeaderMap) -> Option<mime::Mime> {
    headers
        .get(CONTENT_TYPE)
        .map(HeaderValue::to_str)
        .and_then(Result::ok)
        .map(str::parse)
        .and_then(Result::ok)
}

/// Two ASCII digits, zero-padded.
pub(crate) fn push_2digits(out: &mut String, n: u32) {
    out.push(char::from(b'0' + (n / 10 % 10) as u8));
    out.push(char::from(b'0' + (n % 10) as u8));
}
