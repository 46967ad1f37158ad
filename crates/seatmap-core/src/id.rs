//! Element identifiers.
//!
//! Hosts address elements by string id (`"table_12"`). Inside the engine an
//! id is an index into a process-wide [`lasso`] interner, so the selection,
//! drag sessions and the store index can copy and hash ids freely.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Suffix source for generated ids. Shared by every prefix, so two kinds
/// never race for the same number.
static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ElementId(Spur);

impl ElementId {
    pub fn intern(name: &str) -> Self {
        Self(NAMES.get_or_intern(name))
    }

    pub fn as_str(&self) -> &'static str {
        NAMES.resolve(&self.0)
    }

    /// A new `<prefix>_<n>` id. Only unique among generated ids; use
    /// `ElementStore::fresh_id` to also avoid ids that came from a backend.
    pub fn generate(prefix: &str) -> Self {
        let n = NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// The part before the last `_`, or the whole id when there is none.
    /// `"table_12"` → `"table"`.
    pub fn prefix(&self) -> &'static str {
        let name = self.as_str();
        name.rsplit_once('_').map_or(name, |(head, _)| head)
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::intern(name)
    }
}

impl From<String> for ElementId {
    fn from(name: String) -> Self {
        Self::intern(&name)
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.as_str().to_owned()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementId").field(&self.as_str()).finish()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
