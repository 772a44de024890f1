use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// The failure to interpret a raw token as a target type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{value}' to {type_name}: {reason}.")]
pub struct ConversionError {
    value: String,
    type_name: &'static str,
    reason: String,
}

impl ConversionError {
    /// Describe why `value` cannot convert to the type `T`.
    pub fn new<T>(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// The raw token which failed to convert.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The name of the target type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Behaviour to convert a raw command line token into a typed value.
///
/// Implemented for the common standard library types.
/// Any `FromStr` type may opt in via [`convert_from_str!`](crate::convert_from_str).
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{Convert, ConversionError};
///
/// #[derive(Debug, PartialEq)]
/// struct Percent(u8);
///
/// impl Convert for Percent {
///     fn convert(value: &str) -> Result<Self, ConversionError> {
///         let digits = value.strip_suffix('%').unwrap_or(value);
///         match u8::convert(digits)? {
///             n if n <= 100 => Ok(Percent(n)),
///             _ => Err(ConversionError::new::<Percent>(value, "out of range")),
///         }
///     }
/// }
///
/// assert_eq!(Percent::convert("42%").unwrap(), Percent(42));
/// assert!(Percent::convert("420%").is_err());
/// ```
pub trait Convert: Sized {
    /// Convert the raw `value`.
    fn convert(value: &str) -> Result<Self, ConversionError>;
}

/// Convert via `FromStr`, keeping the parse error as the reason.
pub fn convert_from_str<T>(value: &str) -> Result<T, ConversionError>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|error| ConversionError::new::<T>(value, error.to_string()))
}

/// Implement [`Convert`] for types which implement `FromStr` (with a `Display` error).
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{convert_from_str, Convert};
/// use std::str::FromStr;
///
/// #[derive(Debug, PartialEq)]
/// struct Name(String);
///
/// impl FromStr for Name {
///     type Err = String;
///
///     fn from_str(value: &str) -> Result<Self, Self::Err> {
///         Ok(Name(value.to_uppercase()))
///     }
/// }
///
/// convert_from_str!(Name);
/// assert_eq!(Name::convert("abc").unwrap(), Name("ABC".to_string()));
/// ```
#[macro_export]
macro_rules! convert_from_str {
    ($($target:ty),+ $(,)?) => {
        $(
            impl $crate::Convert for $target {
                fn convert(value: &str) -> ::std::result::Result<Self, $crate::ConversionError> {
                    $crate::convert_from_str::<$target>(value)
                }
            }
        )+
    };
}

convert_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, String,
    PathBuf, OsString, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr,
);

impl Convert for bool {
    fn convert(value: &str) -> Result<Self, ConversionError> {
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::new::<bool>(value, "expected 'true' or 'false'"))
        }
    }
}
