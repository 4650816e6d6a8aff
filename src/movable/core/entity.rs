//! Entity contract shared by every collection the service manages.

/// An item that may carry a storage-assigned identifier.
///
/// The identifier is `None` until the repository persists the item and is
/// never changed afterwards.
pub trait Identifiable {
    /// Storage identifier, `None` before the first insert
    fn id(&self) -> Option<i32>;

    /// Set the storage identifier (repositories only)
    fn set_id(&mut self, id: Option<i32>);
}

/// An item with an ordering key inside its collection.
///
/// Positions are assigned by the service; callers creating new items leave
/// them as `None`.
pub trait Movable: Identifiable + Clone + Send + Sync + 'static {
    /// Ordering key, `None` before the service assigns one
    fn position(&self) -> Option<i32>;

    /// Set the ordering key
    fn set_position(&mut self, position: Option<i32>);

    /// Assign a concrete position.
    fn update_position(&mut self, position: i32) {
        self.set_position(Some(position));
    }
}

/// Produces an independent copy of an entity for duplication.
///
/// The copy keeps the content of the source but must come back with `id`
/// and `position` cleared so the repository treats it as a new item.
pub trait CopyStrategy<T>: Send + Sync {
    /// Build the copy
    fn copy(&self, source: &T) -> T;
}

impl<T, F> CopyStrategy<T> for F
where
    F: Fn(&T) -> T + Send + Sync,
{
    fn copy(&self, source: &T) -> T {
        self(source)
    }
}

/// Copy strategy that clones the entity and clears its identity.
///
/// Enough for flat entities; aggregates holding child collections should
/// supply their own strategy so the children are reset too.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneAndReset;

impl<T: Movable> CopyStrategy<T> for CloneAndReset {
    fn copy(&self, source: &T) -> T {
        let mut copy = source.clone();
        copy.set_id(None);
        copy.set_position(None);
        copy
    }
}

/// Find the index of the item with the given identifier.
pub(crate) fn index_of<T: Movable>(items: &[T], id: i32) -> Option<usize> {
    items.iter().position(|item| item.id() == Some(id))
}
