use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use parking_lot::Mutex;
use tracing::trace;

use crate::Connection;

/// Manages a list of callbacks of shape `F` in a thread-safe manner.
///
/// `F` is usually an unsized function-object type such as
/// `dyn Fn(T) + Send + Sync`, so one [`Registry`] definition serves
/// every callback arity.
///
/// Each instance owns its own lock; independent registries never
/// contend with each other.
pub struct Registry<F: ?Sized> {
	slots: Arc<Mutex<Slots<F>>>,
}

struct Slots<F: ?Sized> {
	next_id: u64,
	entries: Vec<(u64, Arc<F>)>,
}

impl<F: ?Sized> Registry<F> {
	/// Creates an empty registry.
	#[must_use]
	pub fn new() -> Self {
		Self {
			slots: Arc::new(Mutex::new(Slots {
				next_id: 0,
				entries: Vec::new(),
			})),
		}
	}

	/// Adds a callback, returning a [`Connection`] which will later
	/// remove it.
	///
	/// Every call appends a fresh entry, even for a callback that was
	/// added before; each entry is removed only by its own connection.
	/// The connection holds no strong reference to this registry, so it
	/// cannot keep an otherwise-dropped signal alive.
	pub fn add(&self, callback: Arc<F>) -> Connection
	where
		F: Send + Sync + 'static,
	{
		let id = {
			let mut slots = self.slots.lock();
			let id = slots.next_id;
			slots.next_id += 1;
			slots.entries.push((id, callback));
			id
		};
		trace!(id, "callback connected");

		let slots = Arc::downgrade(&self.slots);
		Connection::new(move || {
			if let Some(slots) = slots.upgrade() {
				slots.lock().entries.retain(|(entry, _)| *entry != id);
				trace!(id, "callback disconnected");
			}
		})
	}

	/// Runs `apply` with each callback registered at the instant the
	/// registry's lock was taken.
	///
	/// The entries are copied out under the lock and invoked outside
	/// it. A callback may therefore connect or disconnect on this same
	/// registry (including disconnecting itself) without deadlocking;
	/// such a mutation is not reflected in the iteration already in
	/// flight. A callback added during the iteration is never invoked
	/// by it, and one removed during the iteration may still be.
	pub fn for_each(&self, mut apply: impl FnMut(&F)) {
		let snapshot: Vec<Arc<F>> = {
			let slots = self.slots.lock();
			slots.entries.iter().map(|(_, callback)| Arc::clone(callback)).collect()
		};
		trace!(callbacks = snapshot.len(), "fanning out");
		for callback in &snapshot {
			apply(callback);
		}
	}
}

/// Clones are handles to the same callback list.
impl<F: ?Sized> Clone for Registry<F> {
	fn clone(&self) -> Self {
		Self {
			slots: Arc::clone(&self.slots),
		}
	}
}

impl<F: ?Sized> Default for Registry<F> {
	fn default() -> Self {
		Self::new()
	}
}

impl<F: ?Sized> Debug for Registry<F> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let callbacks = self.slots.lock().entries.len();
		f.debug_struct("Registry").field("callbacks", &callbacks).finish()
	}
}
