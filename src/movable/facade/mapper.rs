//! Conversion between caller-facing data and stored entities.

/// Maps domain data `D` to stored entities `E` and back.
pub trait Mapper<D, E>: Send + Sync {
    /// Convert caller data into an entity ready to store.
    fn map(&self, source: &D) -> E;

    /// Convert a stored entity back into caller data.
    fn map_back(&self, source: &E) -> D;

    /// Map every element of `sources`, keeping their order.
    fn map_all(&self, sources: &[D]) -> Vec<E> {
        sources.iter().map(|source| self.map(source)).collect()
    }

    /// Map every stored entity back, keeping their order.
    fn map_back_all(&self, sources: &[E]) -> Vec<D> {
        sources.iter().map(|source| self.map_back(source)).collect()
    }
}

/// Mapper for collections whose domain and stored types coincide.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl<T: Clone> Mapper<T, T> for IdentityMapper {
    fn map(&self, source: &T) -> T {
        source.clone()
    }

    fn map_back(&self, source: &T) -> T {
        source.clone()
    }
}
