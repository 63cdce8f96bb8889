use std::{
    fmt,
    future::Future,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use futures::future::{BoxFuture, FutureExt};

use crate::errors::panic_message;

type CheckFn<T> = dyn Fn(T) -> BoxFuture<'static, bool> + Send + Sync;

/// A possibly asynchronous yes/no check over a value.
///
/// Used for rule-level checks, registered custom types, and schema-wide
/// checks over the raw argument list.
pub struct Predicate<T> {
    check: Arc<CheckFn<T>>,
}

impl<T: Send + 'static> Predicate<T> {
    /// Wraps a synchronous check.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(move |value: T| {
                let passed = check(&value);
                async move { passed }.boxed()
            }),
        }
    }

    /// Wraps an asynchronous check.
    pub fn new_async<F, Fut>(check: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            check: Arc::new(move |value: T| check(value).boxed()),
        }
    }

    /// Runs the check. A panic inside the check is returned as `Err` with
    /// the panic message.
    pub(crate) async fn evaluate(&self, value: T) -> Result<bool, String> {
        let future = panic::catch_unwind(AssertUnwindSafe(|| (self.check)(value)))
            .map_err(|payload| panic_message(payload.as_ref()))?;

        AssertUnwindSafe(future)
            .catch_unwind()
            .await
            .map_err(|payload| panic_message(payload.as_ref()))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}
