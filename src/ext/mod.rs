//! [`Inspect`](crate::Inspect) for third-party value types, each behind a
//! cargo feature so that leaving one out changes nothing else.

#[cfg(feature = "json")]
mod json;
