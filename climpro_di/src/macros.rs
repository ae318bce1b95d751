/// Declares a provider struct.
///
/// Plain fields are leaf dependencies which are cloned whenever they are
/// requested. A `..field: Base { A, B, }` entry embeds another provider and
/// forwards the listed types to it.
#[macro_export]
macro_rules! provider {
    (@leaf $ident:ident, $field:ident, $ty:ty) => {
        impl $crate::Build<$ident> for $ty {
            fn build(provider: &mut $ident) -> Self {
                ::core::clone::Clone::clone(&provider.$field)
            }
        }
    };

    (@forward $ident:ident, $base_field:ident, $ty:ty) => {
        impl $crate::Build<$ident> for $ty {
            fn build(provider: &mut $ident) -> Self {
                $crate::Provide::provide(&mut provider.$base_field)
            }
        }
    };

    (
        $(#[$attr:meta])*
        $vis:vis $ident:ident {
            $( $field:ident: $ty:ty, )*
            $( ..$base_field:ident: $base:ty { $($forwarded:ty,)* $(,)? } )*
        }
    ) => {
        $(#[$attr])*
        $vis struct $ident {
            cache: $crate::TypeMap,
            $( $field: $ty, )*
            $( $base_field: $base, )*
        }

        impl $crate::Provider for $ident {
            fn cache(&mut self) -> &mut $crate::TypeMap {
                &mut self.cache
            }
        }

        $( $crate::provider!(@leaf $ident, $field, $ty); )*
        $($( $crate::provider!(@forward $ident, $base_field, $forwarded); )*)*
    };
}
