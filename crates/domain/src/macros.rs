//! Macro for implementing Display and FromStr for tag enums
//!
//! Entity kinds, tables and other closed sets of identifiers travel through
//! URLs, config files and log fields as strings. This macro keeps the string
//! form and the parser in one place.
//!
//! # Example
//!
//! ```rust
//! use ordertrack_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Backend {
//!     Sqlite,
//!     Memory,
//! }
//!
//! impl_domain_status_conversions!(Backend {
//!     Sqlite => "sqlite",
//!     Memory => "memory",
//! });
//!
//! assert_eq!(Backend::Sqlite.to_string(), "sqlite");
//! assert_eq!("MEMORY".parse::<Backend>(), Ok(Backend::Memory));
//! ```

/// Implements Display and FromStr traits for tag enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// The string forms must be written in lowercase.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
