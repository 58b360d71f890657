//! Built-in error codes
//!
//! Every [`Registry`](crate::Registry) starts out with these entries. Codes follow
//! the `ERROR_<ENTITY>_<ATTRIBUTE>` convention.

/// Fallback code for records built without a usable code
pub const ERROR_GENERIC: &str = "ERROR_GENERIC";

/// Code of the diagnostic record produced when construction inputs are unusable
pub const ERROR_GENERATE_PARAMETER_INVALID: &str = "ERROR_GENERATE_PARAMETER_INVALID";

/// Internal failure
pub const ERROR_INTERNAL: &str = "ERROR_INTERNAL";

/// Unrecoverable failure
pub const ERROR_PANIC: &str = "ERROR_PANIC";

/// Seed entries as `(code, msg)` pairs
pub const SEED: [(&str, &str); 4] = [
    (ERROR_GENERIC, "An error has occurred"),
    (
        ERROR_GENERATE_PARAMETER_INVALID,
        "Unable to generate error element, parameter invalid",
    ),
    (ERROR_INTERNAL, "An internal error has occurred"),
    (ERROR_PANIC, "A fatal error has occurred"),
];

/// Seed message for `code`, if it is one of the built-ins
pub fn seed_message(code: &str) -> Option<&'static str> {
    SEED.iter().find(|(c, _)| *c == code).map(|(_, msg)| *msg)
}
