#![forbid(unsafe_code)]

//! Responsive value mapping: apply different values based on breakpoint.
//!
//! [`Responsive<T>`] maps [`Breakpoint`] tiers to values of any type,
//! with inheritance from smaller breakpoints. If no value is set for a
//! given breakpoint, the value from the next smaller breakpoint is used.
//!
//! # Usage
//!
//! ```
//! use shoots_layout::{Breakpoint, Responsive};
//!
//! let columns = Responsive::new(7u16)    // sm: 7
//!     .at(Breakpoint::Lg, 28);           // lg: 28
//!
//! // md inherits from sm
//! assert_eq!(columns.resolve(Breakpoint::Md), &7);
//! assert_eq!(columns.resolve(Breakpoint::Lg), &28);
//! ```
//!
//! # Invariants
//!
//! 1. `Sm` always has a value (set via `new()`).
//! 2. A missing tier inherits from the nearest smaller tier that has a value.
//! 3. `resolve()` never fails.
//!
//! # Serialization
//!
//! Serialized as a map of the explicit tiers (`{ sm = 7, md = 14, lg = 28 }`);
//! `sm` is required when deserializing.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;

/// A breakpoint-aware value with inheritance from smaller tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    /// Values indexed by `Breakpoint` ordinal (0=Sm .. 2=Lg).
    base: T,
    overrides: [Option<T>; 2],
}

impl<T: Clone> Responsive<T> {
    /// Create a responsive value with a base value for `Sm`.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            base,
            overrides: [None, None],
        }
    }

    /// Set the value for a specific breakpoint (builder pattern).
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.set(bp, value);
        self
    }

    /// Set the value for a specific breakpoint (mutating).
    pub fn set(&mut self, bp: Breakpoint, value: T) {
        match bp {
            Breakpoint::Sm => self.base = value,
            other => self.overrides[other as usize - 1] = Some(value),
        }
    }

    /// Resolve the value for a given breakpoint.
    #[must_use]
    pub fn resolve(&self, bp: Breakpoint) -> &T {
        let idx = bp as usize;
        for slot in (1..=idx).rev() {
            if let Some(value) = &self.overrides[slot - 1] {
                return value;
            }
        }
        &self.base
    }

    /// Get all explicitly set breakpoints and their values.
    pub fn explicit_values(&self) -> impl Iterator<Item = (Breakpoint, &T)> {
        std::iter::once((Breakpoint::Sm, &self.base)).chain(
            [Breakpoint::Md, Breakpoint::Lg]
                .into_iter()
                .zip(self.overrides.iter())
                .filter_map(|(bp, value)| value.as_ref().map(|v| (bp, v))),
        )
    }

    /// Resolved value for every tier, narrowest first.
    pub fn resolved_values(&self) -> impl Iterator<Item = (Breakpoint, &T)> {
        Breakpoint::ALL.into_iter().map(|bp| (bp, self.resolve(bp)))
    }
}

impl<T: Clone + Default> Default for Responsive<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Responsive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Responsive(")?;
        let mut first = true;
        for (bp, val) in self.explicit_values() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{bp}={val}")?;
            first = false;
        }
        write!(f, ")")
    }
}

impl<T: Clone + Serialize> Serialize for Responsive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let explicit: Vec<_> = self.explicit_values().collect();
        let mut map = serializer.serialize_map(Some(explicit.len()))?;
        for (bp, value) in explicit {
            map.serialize_entry(bp.label(), value)?;
        }
        map.end()
    }
}

impl<'de, T: Clone + Deserialize<'de>> Deserialize<'de> for Responsive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Tiers<T> {
            sm: T,
            md: Option<T>,
            lg: Option<T>,
        }

        let tiers = Tiers::<T>::deserialize(deserializer)?;
        Ok(Self {
            base: tiers.sm,
            overrides: [tiers.md, tiers.lg],
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
