//! Opaque scratch space owned by the wallet provider.

use std::any::Any;
use std::fmt;

/// Type-erased slot a provider uses to keep its in-progress transaction
/// (typically a builder object) between lifecycle steps.
///
/// The lifecycle owns the slot but never looks inside it.
#[derive(Default)]
pub struct ProviderData {
    inner: Option<Box<dyn Any + Send + Sync>>,
}

impl ProviderData {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing whatever was there.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.inner = Some(Box::new(value));
    }

    /// Borrows the stored value if it is a `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref()?.downcast_ref::<T>()
    }

    /// Mutably borrows the stored value if it is a `T`.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.as_mut()?.downcast_mut::<T>()
    }

    /// Removes and returns the stored value if it is a `T`. A value of any
    /// other type is left in place.
    pub fn take<T: Any>(&mut self) -> Option<T> {
        match self.inner.take()?.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(other) => {
                self.inner = Some(other);
                None
            }
        }
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }
}

impl fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderData")
            .field("occupied", &self.inner.is_some())
            .finish()
    }
}
