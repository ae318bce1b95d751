/// Asserts that a value matches a pattern, with an optional guard.
///
/// The value is matched by reference, so bindings in the pattern and the guard
/// are references.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {
        match &$expr {
            $pat $(if $guard)? => {}
            value => ::core::panic!(
                "value {:?} does not match {}",
                value,
                ::core::stringify!($pat $(if $guard)?),
            ),
        }
    };
}
