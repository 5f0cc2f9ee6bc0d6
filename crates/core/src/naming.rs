//! Closed string enumerations shared by the API and its clients.
//!
//! [`string_enum!`] declares a unit-only enum whose wire form is the
//! snake_case variant name, with `ALL`, `as_str`, `label`, `Display` and a
//! strict `FromStr`.

/// Turn a snake_case tag into a human label: `trading_post` -> `Trading post`.
pub fn humanize(tag: &str) -> String {
    let spaced = tag.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $tag)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire tag.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            /// Human readable label.
            pub fn label(&self) -> String {
                $crate::naming::humanize(self.as_str())
            }

            /// All wire tags, for error messages and form choices.
            pub fn tags() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
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
                match s.trim() {
                    $($tag => Ok($name::$variant),)+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{}'. Valid values: {}",
                        stringify!($name),
                        other,
                        Self::tags().join(", ")
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_replaces_underscores() {
        assert_eq!(humanize("trading_post"), "Trading post");
        assert_eq!(humanize("city"), "City");
        assert_eq!(humanize(""), "");
    }
}
