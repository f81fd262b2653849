use std::{
	fmt::{self, Debug, Formatter},
	mem,
};

use parking_lot::Mutex;

type Teardown = Box<dyn FnOnce() + Send>;

/// A [`Connection`] represents one callback attached to something
/// observable, with a single operation to [`disconnect`](`Connection::disconnect`) that callback.
///
/// Disconnecting runs the connection's teardown at most once;
/// every later call is a no-op. A [`Connection`] holds no strong
/// reference to whatever it was attached to.
pub struct Connection {
	teardown: Mutex<Option<Teardown>>,
}

impl Connection {
	/// Wraps `teardown` so that it runs on the first [`disconnect`](`Connection::disconnect`) only.
	pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
		Self {
			teardown: Mutex::new(Some(Box::new(teardown))),
		}
	}

	/// A [`Connection`] which does nothing when disconnected.
	#[must_use]
	pub fn blank() -> Self {
		Self {
			teardown: Mutex::new(None),
		}
	}

	/// Joins multiple [`Connection`]s into a single one which, when
	/// disconnected, disconnects each of the given connections in the
	/// order supplied.
	///
	/// Connections that were already disconnected are skipped over
	/// silently, like any other repeated disconnect.
	#[must_use]
	pub fn join(connections: impl IntoIterator<Item = Connection>) -> Self {
		let connections: Vec<Connection> = connections.into_iter().collect();
		Self::new(move || {
			for connection in &connections {
				connection.disconnect();
			}
		})
	}

	/// Disconnects the associated callback.
	///
	/// The teardown is taken out under the connection's lock but runs
	/// outside it, so a teardown that reaches back into this
	/// [`Connection`] cannot deadlock.
	pub fn disconnect(&self) {
		let teardown = self.teardown.lock().take();
		if let Some(teardown) = teardown {
			teardown();
		}
	}

	/// Whether this connection has nothing (left) to sever.
	///
	/// `true` once [`disconnect`](`Connection::disconnect`) has run, and from birth for
	/// [`blank`](`Connection::blank`) connections.
	#[must_use]
	pub fn is_disconnected(&self) -> bool {
		self.teardown.lock().is_none()
	}

	/// Converts this connection into a guard that disconnects when dropped.
	#[must_use = "scoped connections are disconnected immediately when dropped"]
	pub fn scoped(self) -> ScopedConnection {
		ScopedConnection(Some(self))
	}
}

impl Default for Connection {
	fn default() -> Self {
		Self::blank()
	}
}

impl Debug for Connection {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Connection")
			.field("disconnected", &self.is_disconnected())
			.finish()
	}
}

/// A [`Connection`] that disconnects when dropped.
#[must_use = "scoped connections are disconnected immediately when dropped"]
#[derive(Debug)]
pub struct ScopedConnection(Option<Connection>);

impl ScopedConnection {
	/// Releases the underlying [`Connection`] without disconnecting it.
	pub fn into_connection(mut self) -> Connection {
		self.0.take().unwrap_or_else(Connection::blank)
	}
}

impl Drop for ScopedConnection {
	fn drop(&mut self) {
		if let Some(connection) = self.0.take() {
			connection.disconnect();
		}
	}
}

/// Collects [`Connection`]s so they can all be severed in one call.
///
/// Dropping the set without calling [`disconnect_all`](`ConnectionSet::disconnect_all`) leaves the
/// collected callbacks attached.
#[derive(Debug, Default)]
pub struct ConnectionSet {
	connections: Mutex<Vec<Connection>>,
}

impl ConnectionSet {
	/// Creates an empty set.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Tracks `connection` for a later [`disconnect_all`](`ConnectionSet::disconnect_all`).
	pub fn insert(&self, connection: Connection) {
		self.connections.lock().push(connection);
	}

	/// Disconnects every tracked connection, in insertion order, and
	/// empties the set.
	pub fn disconnect_all(&self) {
		let connections = mem::take(&mut *self.connections.lock());
		for connection in &connections {
			connection.disconnect();
		}
	}
}
