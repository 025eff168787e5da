//! Stores shared between request tasks.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::repository::{Entity, Repository};

/// A repository shared across connections.
///
/// Requests hold the lock for their whole validator chain, so the
/// lookup-validate-mutate sequence of one request never interleaves with
/// another's.
pub type SharedStore<E> = Arc<Mutex<Box<dyn Repository<E>>>>;

/// Wraps `repository` for sharing.
pub fn shared<E, R>(repository: R) -> SharedStore<E>
where
    E: Entity,
    R: Repository<E> + 'static,
{
    Arc::new(Mutex::new(Box::new(repository)))
}
