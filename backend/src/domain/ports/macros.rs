//! `define_port_error!` builds a `thiserror` enum plus one snake_case
//! constructor per variant, taking `impl Into<_>` for every field.

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
    //! Regression coverage for this module.
    use uuid::Uuid;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline",
            Io { message: String } => "io: {message}",
            Missing { gram_id: Uuid } => "gram {gram_id} missing",
            Sized { message: String, size: usize } => "{message} ({size} bytes)",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::offline().to_string(), "store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::io("disk full");
        assert_eq!(err.to_string(), "io: disk full");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let id = Uuid::nil();
        let err = SamplePortError::missing(id);
        assert_eq!(err, SamplePortError::Missing { gram_id: id });
    }

    #[test]
    fn mixed_fields_are_formatted_in_order() {
        let err = SamplePortError::sized("too big", 42_usize);
        assert_eq!(err.to_string(), "too big (42 bytes)");
    }
}
