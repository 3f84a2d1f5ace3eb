//! Registry trait for self-registering implementations.
//!
//! Pluggable backends (storage, notification) register themselves with the
//! name used in configuration files plus a factory function that builds an
//! instance from their configuration section.

/// Base trait for implementation registries.
///
/// Each pluggable module provides a `Registry` struct implementing this
/// trait, tying together the configuration name and the factory, for example
/// "memory" for `storage.implementations.memory` or "webhook" for
/// `notify.implementations.webhook`.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
