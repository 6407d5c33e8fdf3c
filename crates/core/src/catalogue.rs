//! String-backed enumerations shared by the idea and application modules.
//!
//! Each catalogue value has one canonical string form used for JSON, the
//! database, and error messages. Parsing an unknown string is a
//! [`CoreError::Validation`](crate::error::CoreError::Validation).
//!
//! A value may list extra accepted spellings after `|`. They parse and
//! deserialize to the same variant but are never emitted.

macro_rules! define_catalogue {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value $(, alias = $alias)*)] $variant ),+
        }

        impl $name {
            /// Every value of the catalogue, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical string form, as stored and serialized.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value $(| $alias)* => Ok($name::$variant),)+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        [$($value),+].join(", ")
                    ))),
                }
            }
        }
    };
}

pub(crate) use define_catalogue;
