//
//  obs-api
//  api/predicate.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # XPath Search Predicates
//!
//! The `/search/*` endpoints take an XPath predicate in the `match` query
//! parameter. XPath 1.0 string literals have no escape syntax, so a value is
//! wrapped in whichever quote character it does not contain:
//!
//! | Value | Predicate |
//! |-------|-----------|
//! | `foo@example.com` | `@email='foo@example.com'` |
//! | `o'brien` | `@email="o'brien"` |
//! | `a'b"c` | rejected with [`PredicateError`] |

use std::fmt;

use thiserror::Error;

/// A value that cannot be written as an XPath string literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot match @{attribute}: value {value:?} contains both quote characters")]
pub struct PredicateError {
    /// The attribute being matched
    pub attribute: String,
    /// The rejected value
    pub value: String,
}

/// An equality test of an attribute against a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPathPredicate {
    attribute: String,
    value: String,
    quote: char,
}

impl XPathPredicate {
    /// Builds `@attribute = value`, choosing a quote that `value` does not contain.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError`] when `value` contains both `'` and `"`.
    pub fn attr_equals(attribute: impl Into<String>, value: impl Into<String>) -> Result<Self, PredicateError> {
        let attribute = attribute.into();
        let value = value.into();

        let quote = match (value.contains('\''), value.contains('"')) {
            (false, _) => '\'',
            (true, false) => '"',
            (true, true) => return Err(PredicateError { attribute, value }),
        };

        Ok(Self {
            attribute,
            value,
            quote,
        })
    }
}

impl fmt::Display for XPathPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}={q}{}{q}", self.attribute, self.value, q = self.quote)
    }
}

/// Renders an attribute equality predicate for a `match` query parameter.
///
/// # Example
///
/// ```rust
/// use obs_api::api::predicate::build_predicate;
///
/// assert_eq!(build_predicate("email", "foo@example.com").unwrap(), "@email='foo@example.com'");
/// ```
pub fn build_predicate(attribute: &str, value: &str) -> Result<String, PredicateError> {
    XPathPredicate::attr_equals(attribute, value).map(|predicate| predicate.to_string())
}
