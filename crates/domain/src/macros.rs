//! Macro for implementing Display and FromStr for wire-level status enums
//!
//! Presence values travel as lowercase strings between the engine and the
//! chat platform. This macro keeps the string mapping in one place so that
//! `Display` and `FromStr` can never drift apart.
//!
//! # Example
//!
//! ```rust
//! use statussync_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ChannelState {
//!     Open,
//!     Archived,
//! }
//!
//! impl_status_conversions!(ChannelState {
//!     Open => "open",
//!     Archived => "archived",
//! });
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display writes the mapped string verbatim
/// - FromStr parses case-insensitively, so mapped strings must be lowercase
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Green,
        Red,
    }

    impl_status_conversions!(Light {
        Green => "green",
        Red => "red",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(Light::Green.to_string(), "green");
        assert_eq!(Light::Red.to_string(), "red");
    }

    #[test]
    fn test_fromstr_ignores_case_and_padding() {
        assert_eq!(Light::from_str("GREEN").unwrap(), Light::Green);
        assert_eq!(Light::from_str(" Red ").unwrap(), Light::Red);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = Light::from_str("amber");
        assert!(result.unwrap_err().contains("Invalid Light: amber"));
        assert!(Light::from_str("").is_err());
    }
}
