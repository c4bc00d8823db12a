//! Consumer contract for objects driven by an animator.

use std::any::Any;

use crate::descriptor::ParameterDescriptor;
use crate::snapshot::ParamValues;
use crate::AnimatorError;

/// Something whose state follows interpolated parameter values.
///
/// Consumers declare the parameters they read with [`Animatable::params`];
/// the animator registers them before loading keyframes and later hands every
/// consumer the full snapshot for the current time. Values not declared by a
/// consumer are simply ignored by it.
///
/// Composite consumers wrap other consumers: they return the union of their
/// own and their inner consumers' descriptors and forward `apply_params`.
pub trait Animatable: Send {
    /// Parameters this consumer (and anything it wraps) reads.
    fn params(&self) -> Vec<ParameterDescriptor>;

    /// Update internal state from a snapshot.
    fn apply_params(&mut self, values: &ParamValues) -> Result<(), AnimatorError>;

    /// Deep copy used when the owning animator is cloned.
    fn clone_box(&self) -> Box<dyn Animatable>;

    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Animatable> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Merge descriptor lists, keeping the first descriptor for each name.
pub fn merge_params<I>(lists: I) -> Vec<ParameterDescriptor>
where
    I: IntoIterator<Item = Vec<ParameterDescriptor>>,
{
    let mut merged: Vec<ParameterDescriptor> = Vec::new();
    for descriptor in lists.into_iter().flatten() {
        if !merged.iter().any(|d| d.name() == descriptor.name()) {
            merged.push(descriptor);
        }
    }
    merged
}
