//! Newtype domain identifiers.
//!
//! Every named concept the squad passes around (the artefact it writes, the
//! model a provider is asked for, the credential a backend depends on) is a
//! distinct newtype so one cannot be handed where another is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(pub(crate) String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or_else(|| {
                    format!("{} must not be empty", stringify!($name))
                })
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single squad run (one Planner → Builder → Auditor pass).
///
/// Generated fresh for every invocation and attached to the run span so all
/// provider calls from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (configuration names)
// ---------------------------------------------------------------------------

string_id! {
    /// A file-system path, relative to the working directory, of an artefact
    /// the squad reads or writes (e.g. `"artifacts/last_run_report.md"`).
    ArtifactPath
}

string_id! {
    /// The provider-side model identifier sent with every request
    /// (e.g. `"gpt-4o"`).
    ModelId
}

string_id! {
    /// The name of an environment credential (e.g. `"OPENAI_API_KEY"`).
    CredentialName
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_ids_are_rejected() {
        assert!(ArtifactPath::new("").is_none());
        assert!(ModelId::new(String::new()).is_none());
    }

    #[test]
    fn string_id_deserialisation_rejects_empty() {
        let ok: ModelId = serde_json::from_str("\"gpt-4o\"").unwrap();
        assert_eq!(ok.as_str(), "gpt-4o");

        let err = serde_json::from_str::<ModelId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("ModelId must not be empty"));
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new_random(), RunId::new_random());
    }
}
