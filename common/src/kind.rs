//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Variants are displayed, parsed and (with the `serde` feature of this
/// crate) serialized in the provided `case`, which is any case name
/// understood by both [`strum`] and [`serde`] (`camelCase`, `kebab-case`,
/// `PascalCase`, `SCREAMING_SNAKE_CASE`, etc).
///
/// The calling crate must depend on [`strum`] (and on [`serde`] when the
/// `serde` feature of this crate is enabled), because the derived code
/// refers to them.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     #[case = "kebab-case"]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::Cube.to_string(), "cube");
/// assert_eq!(Kind::Sphere.u8(), 2);
/// ```
///
/// [`serde`]: https://docs.rs/serde
/// [`strum`]: https://docs.rs/strum
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        #[case = $case:tt]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $crate::__kind_serde! {
            $case;
            #[derive(
                Clone,
                Copy,
                Debug,
                $crate::private::strum::Display,
                $crate::private::strum::EnumString,
                Eq,
                Hash,
                PartialEq,
            )]
            #[doc = $doc]
            #[repr(u8)]
            #[strum(serialize_all = $case)]
            pub enum $name {
                $(
                     #[doc = $variant_doc]
                     $variant = $value,
                )*
            }
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}

/// Derives [`serde`] traits for a kind enum, renaming its variants in the
/// provided case.
///
/// [`serde`]: https://docs.rs/serde
#[cfg(feature = "serde")]
#[doc(hidden)]
#[macro_export]
macro_rules! __kind_serde {
    ($case:tt; $($item:tt)*) => {
        #[derive(
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[serde(rename_all = $case)]
        $($item)*
    };
}

/// Leaves a kind enum as is, since [`serde`] support is disabled.
///
/// [`serde`]: https://docs.rs/serde
#[cfg(not(feature = "serde"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __kind_serde {
    ($case:tt; $($item:tt)*) => {
        $($item)*
    };
}
