use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use parking_lot::Mutex;
use ramet::{Connection, Registry};

use crate::{
	error::Uninitialised,
	stream::{Callback, Stream},
};

/// A wrapper around a mutable value which can be connected to, to get
/// notified of changes.
///
/// Writes go through [`replace`](`ValueCell::replace`) (always notifies) or
/// [`change`](`ValueCell::change`) (skips the write and the notification when the new
/// value equals the old). The cell's slot lock is never held while
/// callbacks run, so a callback may read the cell it is observing.
pub struct ValueCell<T: 'static> {
	slot: Arc<Mutex<Option<T>>>,
	registry: Registry<Callback<T>>,
}

impl<T: 'static> ValueCell<T> {
	/// Creates a cell holding `initial`.
	#[must_use]
	pub fn new(initial: T) -> Self {
		Self {
			slot: Arc::new(Mutex::new(Some(initial))),
			registry: Registry::new(),
		}
	}

	/// Creates a cell to be initialised by its first write.
	///
	/// Reading before that first write fails with [`Uninitialised`].
	#[must_use]
	pub fn late_init() -> Self {
		Self {
			slot: Arc::new(Mutex::new(None)),
			registry: Registry::new(),
		}
	}

	/// Whether the cell holds a value yet.
	///
	/// Always `true` for cells created through [`new`](`ValueCell::new`).
	#[must_use]
	pub fn is_initialised(&self) -> bool {
		self.slot.lock().is_some()
	}

	/// Returns the current value.
	///
	/// # Errors
	///
	/// [`Uninitialised`] if the cell was created through
	/// [`late_init`](`ValueCell::late_init`) and has not been written yet.
	pub fn try_get(&self) -> Result<T, Uninitialised>
	where
		T: Clone,
	{
		self.slot.lock().clone().ok_or(Uninitialised)
	}

	/// Returns the current value.
	///
	/// # Panics
	///
	/// Iff the cell was created through [`late_init`](`ValueCell::late_init`) and has not
	/// been written yet. Use [`try_get`](`ValueCell::try_get`) to handle that case.
	#[must_use]
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.try_get().expect("value cell read before initialisation")
	}

	/// Writes `value` and notifies every connected callback,
	/// unconditionally.
	pub fn replace(&self, value: T)
	where
		T: Clone,
	{
		*self.slot.lock() = Some(value.clone());
		self.registry.for_each(|callback| callback(value.clone()));
	}

	/// Writes `value` and notifies every connected callback, unless the
	/// cell already holds an equal value, in which case neither
	/// happens.
	///
	/// The first write to a [`late_init`](`ValueCell::late_init`) cell always notifies.
	pub fn change(&self, value: T)
	where
		T: Clone + PartialEq,
	{
		{
			let mut slot = self.slot.lock();
			if slot.as_ref() == Some(&value) {
				return;
			}
			*slot = Some(value.clone());
		}
		self.registry.for_each(|callback| callback(value.clone()));
	}

	/// Connects a callback to be invoked with each *future* value
	/// written to the cell. The current value is not replayed; see
	/// [`connect_with_current`](`ValueCell::connect_with_current`) for that.
	pub fn connect(&self, callback: impl Fn(T) + Send + Sync + 'static) -> Connection {
		self.registry.add(Arc::new(callback))
	}

	/// Connects a callback like [`connect`](`ValueCell::connect`), then immediately invokes
	/// it once with the current value, if there is one.
	pub fn connect_with_current(
		&self,
		callback: impl Fn(T) + Send + Sync + 'static,
	) -> Connection
	where
		T: Clone,
	{
		let callback: Arc<Callback<T>> = Arc::new(callback);
		let connection = self.registry.add(Arc::clone(&callback));
		let current = self.slot.lock().clone();
		if let Some(current) = current {
			(*callback)(current);
		}
		connection
	}

	/// The cell's future values as a [`Stream`], for composing with the
	/// stream combinators.
	#[must_use = "streams do nothing until connected to"]
	pub fn changes(&self) -> Stream<T> {
		let registry = self.registry.clone();
		Stream::from_attach(move |callback| registry.add(callback))
	}
}

/// Clones share the same slot and the same callbacks.
impl<T: 'static> Clone for ValueCell<T> {
	fn clone(&self) -> Self {
		Self {
			slot: Arc::clone(&self.slot),
			registry: self.registry.clone(),
		}
	}
}

impl<T: Debug + 'static> Debug for ValueCell<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let slot = self.slot.lock();
		f.debug_struct("ValueCell").field("value", &*slot).finish()
	}
}
