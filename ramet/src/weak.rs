use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use parking_lot::Mutex;
use tracing::trace;

type Deliver<P> = Arc<dyn Fn(&P) -> bool + Send + Sync>;

/// A callback registry whose entries are owned by reference-counted
/// owner objects.
///
/// Each entry holds a [`Weak`](`std::sync::Weak`) handle to its owner;
/// the registry never extends the owner's lifetime. Once the last
/// strong handle to an owner is dropped, its entries stop being
/// invoked immediately and are removed from the registry during the
/// next [`emit`](`WeakRegistry::emit`); emission doubles as the pruning pass, there is no
/// separate sweep.
pub struct WeakRegistry<P: 'static> {
	entries: Arc<Mutex<Entries<P>>>,
}

struct Entries<P: 'static> {
	next_id: u64,
	entries: Vec<Entry<P>>,
}

struct Entry<P: 'static> {
	id: u64,
	/// Owner allocation address, for identity comparison only. The
	/// typed `Weak` captured in `deliver` keeps the allocation
	/// reserved while this entry exists, so the address cannot be
	/// reused by another owner in the meantime.
	owner: usize,
	deliver: Deliver<P>,
}

fn address<O>(owner: &Arc<O>) -> usize {
	Arc::as_ptr(owner) as usize
}

impl<P: 'static> WeakRegistry<P> {
	/// Creates an empty registry.
	#[must_use]
	pub fn new() -> Self {
		Self {
			entries: Arc::new(Mutex::new(Entries {
				next_id: 0,
				entries: Vec::new(),
			})),
		}
	}

	/// Registers `handler` to be called with `owner` and the payload on
	/// each emission, for as long as `owner` stays alive.
	///
	/// Subscribing the same owner again retains both entries
	/// independently; [`unsubscribe`](`WeakRegistry::unsubscribe`) removes them all at once.
	pub fn subscribe<O: Send + Sync + 'static>(
		&self,
		owner: &Arc<O>,
		handler: impl Fn(&O, &P) + Send + Sync + 'static,
	) {
		let weak = Arc::downgrade(owner);
		let deliver: Deliver<P> = Arc::new(move |payload: &P| match weak.upgrade() {
			Some(owner) => {
				handler(&owner, payload);
				true
			}
			None => false,
		});

		let mut entries = self.entries.lock();
		let id = entries.next_id;
		entries.next_id += 1;
		entries.entries.push(Entry {
			id,
			owner: address(owner),
			deliver,
		});
		trace!(id, "owner subscribed");
	}

	/// Removes every entry whose owner is `owner`, by identity.
	///
	/// A no-op if the owner has no entries.
	pub fn unsubscribe<O: Send + Sync + 'static>(&self, owner: &Arc<O>) {
		let target = address(owner);
		self.entries
			.lock()
			.entries
			.retain(|entry| entry.owner != target);
	}

	/// Invokes each live owner's handler with `payload`, then removes
	/// the entries whose owner turned out to have been dropped.
	///
	/// The entry list is copied out under the registry's lock and the
	/// handlers run outside it; the dead entries are taken out of the
	/// live collection afterwards, not out of the snapshot.
	pub fn emit(&self, payload: &P) {
		let snapshot: Vec<(u64, Deliver<P>)> = {
			let entries = self.entries.lock();
			entries
				.entries
				.iter()
				.map(|entry| (entry.id, Arc::clone(&entry.deliver)))
				.collect()
		};

		let mut reclaimed = Vec::new();
		for (id, deliver) in snapshot {
			if !(*deliver)(payload) {
				reclaimed.push(id);
			}
		}

		if !reclaimed.is_empty() {
			trace!(
				pruned = reclaimed.len(),
				"removing subscriptions of dropped owners"
			);
			self.entries
				.lock()
				.entries
				.retain(|entry| !reclaimed.contains(&entry.id));
		}
	}
}

/// Clones are handles to the same subscription list.
impl<P: 'static> Clone for WeakRegistry<P> {
	fn clone(&self) -> Self {
		Self {
			entries: Arc::clone(&self.entries),
		}
	}
}

impl<P: 'static> Default for WeakRegistry<P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<P: 'static> Debug for WeakRegistry<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let subscriptions = self.entries.lock().entries.len();
		f.debug_struct("WeakRegistry")
			.field("subscriptions", &subscriptions)
			.finish()
	}
}
