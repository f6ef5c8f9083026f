//! Pending-result table for dialogs opened by a container component.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use leptos::{provide_context, use_context};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Opaque handle of a registered dialog.
pub struct DialogId(u64);

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Dialog registry misuse.
pub enum RegistryError {
    /// The id was never registered or has already settled.
    #[error("{0} is not pending")]
    NotPending(DialogId),
}

type Resolver<T> = Box<dyn FnOnce(Option<T>)>;

/// Maps open dialogs to the callback awaiting their result.
///
/// Each container owns its own registry, so independent UI instances never share entries. A
/// resolver runs at most once: with `Some(value)` on [`DialogRegistry::resolve`] or `None` on
/// [`DialogRegistry::dismiss`].
pub struct DialogRegistry<T> {
    next_id: Cell<u64>,
    pending: RefCell<HashMap<DialogId, Resolver<T>>>,
}

impl<T> DialogRegistry<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            pending: RefCell::new(HashMap::new()),
        }
    }

    pub fn register(&self, resolver: impl FnOnce(Option<T>) + 'static) -> DialogId {
        let id = DialogId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.pending.borrow_mut().insert(id, Box::new(resolver));
        id
    }

    /// Settles `id` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotPending`] when `id` is unknown or already settled.
    pub fn resolve(&self, id: DialogId, value: T) -> Result<(), RegistryError> {
        let resolver = self.take(id)?;
        resolver(Some(value));
        Ok(())
    }

    /// Settles `id` without a value, as when the dialog is closed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotPending`] when `id` is unknown or already settled.
    pub fn dismiss(&self, id: DialogId) -> Result<(), RegistryError> {
        let resolver = self.take(id)?;
        resolver(None);
        Ok(())
    }

    /// Forgets `id` without running its resolver. Returns whether it was pending.
    pub fn unregister(&self, id: DialogId) -> bool {
        self.pending.borrow_mut().remove(&id).is_some()
    }

    pub fn is_pending(&self, id: DialogId) -> bool {
        self.pending.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    fn take(&self, id: DialogId) -> Result<Resolver<T>, RegistryError> {
        self.pending
            .borrow_mut()
            .remove(&id)
            .ok_or(RegistryError::NotPending(id))
    }
}

impl<T> Default for DialogRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DialogRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogRegistry")
            .field("pending", &self.len())
            .finish()
    }
}

/// Creates a registry for the current container and provides it to descendants.
pub fn provide_dialog_registry<T: 'static>() -> Rc<DialogRegistry<T>> {
    let registry = Rc::new(DialogRegistry::new());
    provide_context(registry.clone());
    registry
}

/// Returns the nearest container's registry, if one was provided.
pub fn use_dialog_registry<T: 'static>() -> Option<Rc<DialogRegistry<T>>> {
    use_context::<Rc<DialogRegistry<T>>>()
}
