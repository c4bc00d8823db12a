//! Name → descriptor registry shared by an animator and its clones.

use hashbrown::HashMap;
use log::warn;

use crate::descriptor::ParameterDescriptor;

/// Registered parameter descriptors, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    descriptors: Vec<ParameterDescriptor>,
    index: HashMap<String, usize>,
}

impl ParameterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge descriptors into the registry.
    ///
    /// A name that is already registered keeps its first descriptor; the later
    /// one is dropped with a warning. Returns how many descriptors were added.
    pub fn register<I>(&mut self, descriptors: I) -> usize
    where
        I: IntoIterator<Item = ParameterDescriptor>,
    {
        let mut added = 0;
        for descriptor in descriptors {
            if self.index.contains_key(descriptor.name()) {
                warn!("Parameter '{}' already exists.", descriptor.name());
                continue;
            }
            self.index
                .insert(descriptor.name().to_string(), self.descriptors.len());
            self.descriptors.push(descriptor);
            added += 1;
        }
        added
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.descriptors.iter()
    }

    /// Descriptors that must appear in the first keyframe
    pub fn required(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.descriptors.iter().filter(|d| d.is_required())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
