//! Builder macro for reducing boilerplate in configuration builders.

/// Generate a builder struct and implementation for a configuration type.
///
/// The configuration type must implement `Default`. The macro generates:
/// - A builder struct with all fields wrapped in `Option`
/// - Setter methods for each field (all accept `impl Into<T>`)
/// - A `build()` method that fills unset fields from `Default` and then runs
///   the optional `check` function on the finished value
/// - A `builder()` method on the config type
///
/// The `check` function has the signature
/// `fn(&Config) -> Result<(), BuilderError>`.
///
/// Note: For `usize` fields, callers must use suffixed literals (e.g., `10usize`)
/// because `i32 -> usize` has no `Into` impl.
macro_rules! impl_builder {
    (
        $Config:ident, $Builder:ident {
            $( $field:ident : $ty:ty ),* $(,)?
        }
        $( check $check:path )?
    ) => {
        #[doc = concat!("Builder for [`", stringify!($Config), "`].")]
        #[derive(Debug, Default)]
        pub struct $Builder {
            $( $field: Option<$ty>, )*
        }

        impl $Config {
            pub fn builder() -> $Builder {
                $Builder::default()
            }
        }

        impl $Builder {
            $(
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            pub fn build(self) -> Result<$Config, $crate::error::BuilderError> {
                let defaults = $Config::default();
                let config = $Config {
                    $( $field: self.$field.unwrap_or(defaults.$field), )*
                };
                $( $check(&config)?; )?
                Ok(config)
            }
        }
    };
}

pub(crate) use impl_builder;
