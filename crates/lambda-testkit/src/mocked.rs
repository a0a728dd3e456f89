//! Closures that ignore their arguments
//!
//! Stubs for resolvers, projections and other injected closures. Arguments
//! are taken by reference so the closures satisfy higher-ranked bounds such as
//! `Fn(&E) -> T`.

/// Closure returning a clone of `value`
///
/// ```rust
/// use lambda_core::{EnvironmentResolver, HandlerError};
/// use lambda_testkit::mocked;
/// use std::sync::Arc;
///
/// let resolver: EnvironmentResolver<&'static str> =
///     Arc::new(mocked::<&'static str, _>(Ok::<_, HandlerError>("fixed".to_string())));
/// assert_eq!(resolver(&"ANYTHING").unwrap(), "fixed");
/// ```
pub fn mocked<A, T>(value: T) -> impl Fn(&A) -> T + Send + Sync + 'static
where
    A: ?Sized + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_| value.clone()
}

/// Closure returning `Ok(value)` for any error type
///
/// Useful where the error type is not `Clone`, as with boxed errors.
pub fn mocked_ok<A, T, Err>(value: T) -> impl Fn(&A) -> Result<T, Err> + Send + Sync + 'static
where
    A: ?Sized + 'static,
    T: Clone + Send + Sync + 'static,
    Err: 'static,
{
    move |_| Ok(value.clone())
}

/// Closure doing nothing
pub fn mocked_unit<A>() -> impl Fn(&A) + Send + Sync + 'static
where
    A: ?Sized + 'static,
{
    |_| {}
}

/// Two-argument closure returning a clone of `value`
pub fn mocked2<A, B, T>(value: T) -> impl Fn(&A, &B) -> T + Send + Sync + 'static
where
    A: ?Sized + 'static,
    B: ?Sized + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_, _| value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocked_ignores_argument() {
        let stub = mocked::<str, _>(7_u8);
        assert_eq!(stub("a"), 7);
        assert_eq!(stub("b"), 7);
    }

    #[test]
    fn test_mocked2() {
        let stub = mocked2::<u8, str, _>("same");
        assert_eq!(stub(&1, "x"), "same");
    }

    #[test]
    fn test_mocked_unit() {
        let stub = mocked_unit::<[u8]>();
        stub(&[1, 2, 3][..]);
    }
}
