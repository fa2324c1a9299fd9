//! Immutable two-element carrier
//!
//! Used for transient `(key, value)` shapes in the AST: record type fields
//! are `Pair<Type, String>` and record constructor fields are
//! `Pair<String, Expr>`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable pair with structural equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pair<A, B> {
    #[inline]
    pub fn new(
        first: A,
        second: B,
    ) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn first(&self) -> &A {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Copy of this pair with the first element replaced
    pub fn with_first<C>(
        self,
        first: C,
    ) -> Pair<C, B> {
        Pair::new(first, self.second)
    }

    /// Copy of this pair with the second element replaced
    pub fn with_second<C>(
        self,
        second: C,
    ) -> Pair<A, C> {
        Pair::new(self.first, second)
    }

    #[inline]
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Pair<A, B> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
