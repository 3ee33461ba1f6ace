//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message, a snake_case constructor that
//! accepts anything convertible into the field types, and a stable `kind`
//! label used in structured logs.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[allow(dead_code)]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_fields $variant [] [] $( $field : $ty, )*);
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            #[allow(dead_code)]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_fields
            $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
    };

    (@pattern $name:ident $variant:ident) => { $name::$variant };
    (@pattern $name:ident $variant:ident { $($field:ident : $ty:ty),* }) => { $name::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Snake-case variant label for log fields.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        define_port_error!(@pattern $name $variant $( { $($field : $ty),* } )?) => {
                            ::paste::paste! { stringify!([<$variant:snake>]) }
                        }
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Expansion checks for the port error macro.
    use rstest::rstest;

    define_port_error! {
        pub enum StoragePortError {
            Offline => "storage offline",
            Rejected { reason: String } => "rejected: {reason}",
            Throttled { retry_after_secs: u64, reason: String } => "throttled for {retry_after_secs}s: {reason}",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoragePortError::offline(), StoragePortError::Offline);
        assert_eq!(StoragePortError::offline().to_string(), "storage offline");
    }

    #[rstest]
    fn field_constructors_convert_their_arguments() {
        let err = StoragePortError::rejected("quota");
        assert_eq!(err.to_string(), "rejected: quota");

        let err = StoragePortError::throttled(5_u64, String::from("busy"));
        assert_eq!(err.to_string(), "throttled for 5s: busy");
    }

    #[rstest]
    #[case(StoragePortError::offline(), "offline")]
    #[case(StoragePortError::rejected("quota"), "rejected")]
    #[case(StoragePortError::throttled(1_u64, "busy"), "throttled")]
    fn kind_reports_snake_case_variant(#[case] err: StoragePortError, #[case] expected: &str) {
        assert_eq!(err.kind(), expected);
    }
}
