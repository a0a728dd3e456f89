//! Declarative helpers

/// Declare the closed set of environment variables a handler recognizes
///
/// Generates the enum, an `ALL` constant listing every variant, `as_str`,
/// `Display`, and the [`EnvironmentVariable`](crate::effects::EnvironmentVariable)
/// implementation.
///
/// ```rust
/// lambda_core::environment_variables! {
///     /// Variables read by the greeting handler
///     pub enum GreetingEnvironment {
///         /// Table holding greetings
///         TableName => "TABLE_NAME",
///         /// Region of the table
///         Region => "AWS_REGION",
///     }
/// }
///
/// use lambda_core::effects::EnvironmentVariable;
/// assert_eq!(GreetingEnvironment::TableName.key(), "TABLE_NAME");
/// assert_eq!(GreetingEnvironment::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! environment_variables {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $key:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every recognized variable, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The variable name as it appears in the environment
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }
        }

        impl $crate::effects::EnvironmentVariable for $name {
            fn key(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
