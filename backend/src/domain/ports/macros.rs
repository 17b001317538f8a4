//! Macro generating `thiserror` enums for outbound port failures.
//!
//! Each variant gets a snake-case constructor whose `String` fields accept
//! anything `Into<String>`, keeping adapter error mapping terse.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum CounterStoreError {
            Unreachable => "counter store unreachable",
            Rejected { message: String } => "counter update rejected: {message}",
            Skewed { message: String, delta: i32 } => "counter skew on {message} ({delta})",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        let err = CounterStoreError::unreachable();
        assert_eq!(err, CounterStoreError::Unreachable);
        assert_eq!(err.to_string(), "counter store unreachable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = CounterStoreError::rejected("vacancies below zero");
        assert_eq!(err.to_string(), "counter update rejected: vacancies below zero");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = CounterStoreError::skewed("applicant_count", -1_i32);
        assert_eq!(err.to_string(), "counter skew on applicant_count (-1)");
    }
}
