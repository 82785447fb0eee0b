//! Per-scene pool of guest appearance variants.

use bistro_core::SimRng;

/// Appearance names not currently worn by any guest in the scene.
///
/// A guest takes a random free variant when it spawns and gives it back when
/// it leaves, so two guests on screen never look the same while the pool
/// lasts.
#[derive(Debug, Clone, Default)]
pub struct VariantPool {
    free: Vec<String>,
}

impl VariantPool {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { free: names.into_iter().map(Into::into).collect() }
    }

    /// Take a random free variant.  `None` once the pool is exhausted.
    pub fn take(&mut self, rng: &mut SimRng) -> Option<String> {
        let i = rng.pick_index(self.free.len())?;
        Some(self.free.remove(i))
    }

    /// Return a variant to the pool.
    pub fn release(&mut self, name: String) {
        if !self.free.contains(&name) {
            self.free.push(name);
        }
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}
