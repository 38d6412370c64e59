//! Global platform profile registry.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::profile::PlatformProfile;
use super::vendors;

/// Global profile registry, initialized once and immutable afterwards.
static REGISTRY: Lazy<ProfileRegistry> = Lazy::new(|| {
    let mut registry = ProfileRegistry::new();
    registry.register_builtin_profiles();
    registry
});

/// Registry for platform profiles.
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, PlatformProfile>,
}

impl ProfileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Get the global registry.
    pub fn global() -> &'static ProfileRegistry {
        &REGISTRY
    }

    fn register_builtin_profiles(&mut self) {
        for profile in vendors::builtin_profiles() {
            self.profiles.insert(profile.name.clone(), profile);
        }
    }

    /// Get a profile by platform name.
    pub fn get(&self, name: &str) -> Option<&PlatformProfile> {
        self.profiles.get(name)
    }

    /// Check if a platform is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// List all registered platform names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.profiles.keys()
    }
}

/// Resolve the profile for a platform, falling back to generic defaults
/// carrying the requested name when the platform is not registered.
pub fn profile_for(platform: &str) -> PlatformProfile {
    ProfileRegistry::global()
        .get(platform)
        .cloned()
        .unwrap_or_else(|| PlatformProfile::new(platform))
}
