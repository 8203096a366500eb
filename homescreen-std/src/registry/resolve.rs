//! Instance-identity resolution.
//!
//! Turns the registered providers into the concrete instances one user sees.
//! Providers are asked in registration order, each seeing every instance that
//! was created before it, so a provider can keep itself, present a
//! differentiated variant, or step aside when an equivalent instance exists.
//!
//! A provider is asked at most `limit` times (default one). The walk over a
//! provider stops at the first `Suppress`, after a `Keep`, or when the
//! candidate is indistinguishable from an instance already created.

use super::SectionRegistry;
use homescreen_core::{DynSection, InstanceDecision, SectionInstance, UserId};
use std::sync::Arc;

impl SectionRegistry {
    /// Resolve the instances of every registered section for `user_id`.
    pub fn instances_for(&self, user_id: Option<UserId>) -> Vec<SectionInstance> {
        self.resolve_instances(user_id, |_| true)
    }

    /// Resolve the instances of the sections whose key passes `filter`.
    ///
    /// Deterministic for providers whose `create_instance` is pure.
    pub fn resolve_instances<F>(&self, user_id: Option<UserId>, mut filter: F) -> Vec<SectionInstance>
    where
        F: FnMut(&str) -> bool,
    {
        let mut created = Vec::new();
        for provider in self.snapshot() {
            if filter((*provider).meta_dyn().key()) {
                resolve_provider(&provider, user_id, &mut created);
            }
        }
        created
    }
}

fn resolve_provider(
    provider: &Arc<dyn DynSection>,
    user_id: Option<UserId>,
    created: &mut Vec<SectionInstance>,
) {
    let section: &dyn DynSection = &**provider;
    let meta = section.meta_dyn();

    for _ in 0..meta.effective_limit() {
        let (candidate, last) = match section.create_instance_dyn(user_id, created.as_slice()) {
            InstanceDecision::Keep => (SectionInstance::of(Arc::clone(provider)), true),
            InstanceDecision::Variant(variant) if variant.key() != meta.key() => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    key = %meta.key(),
                    variant = %variant.key(),
                    "dropping section variant with a foreign key"
                );
                return;
            }
            InstanceDecision::Variant(variant) => {
                (SectionInstance::new(Arc::clone(provider), variant), false)
            }
            InstanceDecision::Suppress => return,
        };

        if created
            .iter()
            .any(|existing| existing.meta().same_identity(candidate.meta()))
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %meta.key(), "dropping duplicate section instance");
            return;
        }

        created.push(candidate);
        if last {
            return;
        }
    }
}
