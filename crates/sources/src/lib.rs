//! parkwatch-sources: Remote store implementations for parkwatch.

mod firebase;
mod fixture;

pub use firebase::FirebaseStore;
pub use fixture::FixtureStore;

/// Register all built-in stores with the global registry
pub fn register_all() {
    use parkwatch_core::global_registry_mut;

    let mut registry = global_registry_mut();
    registry.register_store("firebase", "Firebase Realtime Database", firebase::create);
    registry.register_store("fixture", "Fixture File", fixture::create);
}
