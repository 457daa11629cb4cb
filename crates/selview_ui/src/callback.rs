//! Optional event handlers that turn widget notifications into host messages.

use std::fmt;

/// A handler registered by the host for notifications of type `T`.
///
/// Widgets store a `Callback` per notification and call it when the event
/// fires; an unset callback yields `None`, so widgets never need to special
/// case "nobody is listening".
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// A callback with no handler attached.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the handler, if any.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_callback_yields_nothing() {
        let cb: Callback<u32, String> = Callback::none();
        assert!(cb.call(3).is_none());
        assert!(!cb.is_some());
    }

    #[test]
    fn test_set_callback_maps_value() {
        let cb = Callback::new(|n: u32| format!("n={}", n));
        assert_eq!(cb.call(7).as_deref(), Some("n=7"));
    }
}
