use std::sync::Arc;

use ramet::WeakRegistry;

/// An event source whose subscriptions live exactly as long as their
/// owner.
///
/// Instead of handing out a disposal handle, [`subscribe`](`Subscribable::subscribe`) ties the
/// handler to an [`Arc`]-owned object. The handler is invoked with a
/// borrow of that owner on each [`emit`](`Subscribable::emit`); once the owner's last
/// strong handle is dropped, the subscription falls away on the next
/// emission without any explicit unsubscribe. [`unsubscribe`](`Subscribable::unsubscribe`) removes
/// all of an owner's handlers early.
pub struct Subscribable<P: 'static> {
	registry: WeakRegistry<P>,
}

impl<P: 'static> Subscribable<P> {
	/// Creates a subscribable with no subscriptions.
	#[must_use]
	pub fn new() -> Self {
		Self {
			registry: WeakRegistry::new(),
		}
	}

	/// Registers `handler` to be called with `owner` and each emitted
	/// payload, for as long as `owner` stays alive.
	///
	/// Subscribing the same owner several times retains every handler;
	/// [`unsubscribe`](`Subscribable::unsubscribe`) removes them all at once.
	pub fn subscribe<O: Send + Sync + 'static>(
		&self,
		owner: &Arc<O>,
		handler: impl Fn(&O, &P) + Send + Sync + 'static,
	) {
		self.registry.subscribe(owner, handler);
	}

	/// Removes every handler subscribed with `owner`. A no-op for an
	/// owner that never subscribed.
	pub fn unsubscribe<O: Send + Sync + 'static>(&self, owner: &Arc<O>) {
		self.registry.unsubscribe(owner);
	}

	/// Invokes each live owner's handler with `payload`.
	pub fn emit(&self, payload: P) {
		self.registry.emit(&payload);
	}
}

/// Clones share the same subscriptions.
impl<P: 'static> Clone for Subscribable<P> {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
		}
	}
}

impl<P: 'static> Default for Subscribable<P> {
	fn default() -> Self {
		Self::new()
	}
}

/// A [`Subscribable`] which emits no payload.
#[derive(Clone, Default)]
pub struct UnitSubscribable {
	inner: Subscribable<()>,
}

impl UnitSubscribable {
	/// Creates a subscribable with no subscriptions.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `handler` to be called with `owner` on each emission,
	/// for as long as `owner` stays alive.
	pub fn subscribe<O: Send + Sync + 'static>(
		&self,
		owner: &Arc<O>,
		handler: impl Fn(&O) + Send + Sync + 'static,
	) {
		self.inner.subscribe(owner, move |owner, _payload: &()| handler(owner));
	}

	/// Removes every handler subscribed with `owner`.
	pub fn unsubscribe<O: Send + Sync + 'static>(&self, owner: &Arc<O>) {
		self.inner.unsubscribe(owner);
	}

	/// Invokes each live owner's handler.
	pub fn emit(&self) {
		self.inner.emit(());
	}
}

/// A [`Subscribable`] which emits two payload values.
pub struct BiSubscribable<A: 'static, B: 'static> {
	inner: Subscribable<(A, B)>,
}

impl<A: 'static, B: 'static> BiSubscribable<A, B> {
	/// Creates a subscribable with no subscriptions.
	#[must_use]
	pub fn new() -> Self {
		Self {
			inner: Subscribable::new(),
		}
	}

	/// Registers `handler` to be called with `owner` and both emitted
	/// values, for as long as `owner` stays alive.
	pub fn subscribe<O: Send + Sync + 'static>(
		&self,
		owner: &Arc<O>,
		handler: impl Fn(&O, &A, &B) + Send + Sync + 'static,
	) {
		self.inner
			.subscribe(owner, move |owner, (a, b): &(A, B)| handler(owner, a, b));
	}

	/// Removes every handler subscribed with `owner`.
	pub fn unsubscribe<O: Send + Sync + 'static>(&self, owner: &Arc<O>) {
		self.inner.unsubscribe(owner);
	}

	/// Invokes each live owner's handler with `a` and `b`.
	pub fn emit(&self, a: A, b: B) {
		self.inner.emit((a, b));
	}
}

/// Clones share the same subscriptions.
impl<A: 'static, B: 'static> Clone for BiSubscribable<A, B> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<A: 'static, B: 'static> Default for BiSubscribable<A, B> {
	fn default() -> Self {
		Self::new()
	}
}
