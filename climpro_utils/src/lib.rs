mod macros;

/// Returns the version of the Climpro backend.
///
/// Release builds may override the crate version by setting `CLIMPRO_VERSION`
/// at compile time (e.g. to a git tag).
pub fn climpro_version() -> &'static str {
    option_env!("CLIMPRO_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

pub trait Apply {
    /// Passes `self` to the function `f` and returns its result.
    fn apply<X>(self, f: impl FnOnce(Self) -> X) -> X
    where
        Self: Sized,
    {
        f(self)
    }

    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use climpro_utils::Apply;
    /// fn add_option(a: i32, b: Option<i32>) -> i32 {
    ///     a.apply_map(b, |slf, arg| slf + arg)
    /// }
    /// assert_eq!(add_option(1, None), 1);
    /// assert_eq!(add_option(1, Some(2)), 3);
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply() {
        assert_eq!(3.apply(|x| x * 2), 6);
        assert_eq!(3.apply_map(Some(4), |x, y| x + y), 7);
        assert_eq!(3.apply_map(None::<i32>, |x, y| x + y), 3);
    }

    #[test]
    fn assert_matches_guard() {
        let value: Result<u8, ()> = Ok(7);
        crate::assert_matches!(value, Ok(x) if *x == 7);
    }

    #[test]
    fn version() {
        assert!(!climpro_version().is_empty());
    }
}
