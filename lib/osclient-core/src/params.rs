//! Query parameter encoding.
//!
//! Every endpoint carries an options struct that encodes into a flat
//! [`ParamMap`]. The encoding rules are:
//!
//! - `Option<T>` fields are emitted only when `Some`.
//! - list fields are emitted once, comma-joined, only when non-empty.
//! - plain string fields are emitted only when non-empty.
//! - boolean flags (`pretty`, `human`, `error_trace`) are emitted as `true`
//!   only when set.
//!
//! The `#[derive(Params)]` macro implements [`ToParams`] following these rules.

use std::collections::HashMap;
use std::time::Duration;

/// Encoded query parameters, keyed by parameter name.
///
/// Keys are unique; no ordering is implied.
pub type ParamMap = HashMap<String, String>;

/// Types that encode into query parameters.
///
/// Usually derived:
///
/// ```ignore
/// use osclient::Params;
///
/// #[derive(Default, Params)]
/// #[params(format = "json")]
/// struct CatCountParams {
///     h: Vec<String>,
///     #[params(rename = "s")]
///     sort: Vec<String>,
///     v: Option<bool>,
///     pretty: bool,
/// }
/// ```
pub trait ToParams {
    /// Encode into a parameter map. Encoding is pure and repeatable.
    fn to_params(&self) -> ParamMap;
}

/// A value that can be written as a single query parameter value.
pub trait ParamValue {
    /// The canonical string form of the value.
    fn to_param(&self) -> String;
}

impl ParamValue for str {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for Duration {
    fn to_param(&self) -> String {
        format_duration(*self)
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

macro_rules! display_param_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamValue for $ty {
                fn to_param(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_param_value!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Format a duration the way the REST API expects time values.
///
/// Durations of one millisecond or more are sent as whole milliseconds
/// (`1500ms`); shorter ones as nanoseconds (`250nanos`).
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_millis(1) {
        format!("{}nanos", duration.as_nanos())
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Join list values with commas.
#[must_use]
pub fn join_params<T: ParamValue>(values: &[T]) -> String {
    values
        .iter()
        .map(ParamValue::to_param)
        .collect::<Vec<_>>()
        .join(",")
}
