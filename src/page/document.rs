//! Script-element document model
//!
//! The minimal slice of a document this crate touches: the ordered list of
//! script elements, with insertion adjacent to the first existing one, the
//! way the vendor's loader snippet places itself.

use tokio::sync::RwLock;

/// A script element present in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptElement {
    /// Source URL
    pub src: String,
    /// Whether the element loads without blocking the page
    pub async_load: bool,
}

/// Ordered script elements of one page
#[derive(Debug, Default)]
pub struct Document {
    scripts: RwLock<Vec<ScriptElement>>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document that already carries the given script URLs
    pub fn with_scripts(srcs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let scripts = srcs
            .into_iter()
            .map(|src| ScriptElement {
                src: src.into(),
                async_load: false,
            })
            .collect();
        Self {
            scripts: RwLock::new(scripts),
        }
    }

    /// Insert an async script element adjacent to the first existing one
    pub async fn insert_script(&self, src: impl Into<String>) {
        let element = ScriptElement {
            src: src.into(),
            async_load: true,
        };
        self.scripts.write().await.insert(0, element);
    }

    /// Whether a script element with this URL is present
    pub async fn contains_script(&self, src: &str) -> bool {
        self.scripts.read().await.iter().any(|s| s.src == src)
    }

    /// How many script elements with this URL are present
    pub async fn count_script(&self, src: &str) -> usize {
        self.scripts
            .read()
            .await
            .iter()
            .filter(|s| s.src == src)
            .count()
    }

    /// Total number of script elements
    pub async fn script_count(&self) -> usize {
        self.scripts.read().await.len()
    }

    /// Snapshot of the script elements in document order
    pub async fn scripts(&self) -> Vec<ScriptElement> {
        self.scripts.read().await.clone()
    }
}
