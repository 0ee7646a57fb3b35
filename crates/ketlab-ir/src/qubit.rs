//! Wire identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! wire_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Position of this wire, usable as a bit or array index.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

wire_id!(
    /// A qubit. Qubit `k` is bit `k` of a statevector basis index.
    QubitId,
    "q"
);

wire_id!(
    /// A classical bit, written by measurements.
    ClbitId,
    "c"
);

/// A qubit as the circuit names it: `q_3`, or `anc_0` inside a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    pub id: QubitId,
    /// Register name and offset, when added through a register.
    pub register: Option<(String, u32)>,
}

impl Qubit {
    pub fn new(id: QubitId) -> Self {
        Self { id, register: None }
    }

    pub fn in_register(id: QubitId, register: impl Into<String>, offset: u32) -> Self {
        Self {
            id,
            register: Some((register.into(), offset)),
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.register {
            Some((name, offset)) => write!(f, "{name}_{offset}"),
            None => fmt::Display::fmt(&self.id, f),
        }
    }
}
