//! A process-wide handle to the current schema.

use std::sync::{Arc, PoisonError, RwLock};

use strata_ir::Schema;
use tracing::info;

/// Shared, swappable reference to an immutable [`Schema`].
///
/// Readers take an `Arc<Schema>` snapshot and keep using it even if the
/// schema is reloaded meanwhile. Reloading builds a whole new schema and
/// swaps it in; a published schema is never edited.
#[derive(Debug, Clone)]
pub struct SharedSchema {
    current: Arc<RwLock<Arc<Schema>>>,
}

impl SharedSchema {
    pub fn new(schema: Schema) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(schema))),
        }
    }

    /// Snapshot of the current schema.
    pub fn load(&self) -> Arc<Schema> {
        // The lock only guards a pointer swap, so a poisoned lock still
        // holds a complete schema.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish `schema`, returning the one it replaced.
    pub fn replace(&self, schema: Schema) -> Arc<Schema> {
        let next = Arc::new(schema);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!(models = next.models().len(), "schema replaced");
        std::mem::replace(&mut *current, next)
    }
}

#[cfg(test)]
mod tests {
    use strata_manifest::{a, model, schema};

    use super::*;
    use crate::validate;

    fn build(models: &[&str]) -> Schema {
        let declarations = models
            .iter()
            .fold(schema(), |s, name| {
                s.model(model(*name).field("content", a::string())).unwrap()
            })
            .build();
        validate(declarations).unwrap()
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let shared = SharedSchema::new(build(&["Todo"]));
        let before = shared.load();

        let old = shared.replace(build(&["Todo", "Note"]));

        assert_eq!(before.models().len(), 1);
        assert!(Arc::ptr_eq(&before, &old));
        assert_eq!(shared.load().models().len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedSchema::new(build(&["Todo"]));
        let handle = shared.clone();

        std::thread::spawn(move || {
            handle.replace(build(&["Todo", "Note", "Tag"]));
        })
        .join()
        .unwrap();

        assert_eq!(shared.load().models().len(), 3);
    }
}
