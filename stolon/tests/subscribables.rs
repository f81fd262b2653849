use std::sync::{
	atomic::{AtomicUsize, Ordering::Relaxed},
	Arc,
};

use stolon::{BiSubscribable, Subscribable, UnitSubscribable};

struct Listener {
	hits: AtomicUsize,
}

fn listener() -> Arc<Listener> {
	Arc::new(Listener {
		hits: AtomicUsize::new(0),
	})
}

#[test]
fn handlers_receive_the_owner_and_the_payload() {
	let events = Subscribable::<usize>::new();
	let owner = listener();
	events.subscribe(&owner, |owner, payload| {
		owner.hits.fetch_add(*payload, Relaxed);
	});

	events.emit(3);
	events.emit(5);

	assert_eq!(owner.hits.load(Relaxed), 8);
}

#[test]
fn dropping_the_owner_unsubscribes_without_being_asked() {
	let events = Subscribable::<usize>::new();
	let delivered = Arc::new(AtomicUsize::new(0));
	let owner = Arc::new(());
	events.subscribe(&owner, {
		let delivered = Arc::clone(&delivered);
		move |_owner, _payload| {
			delivered.fetch_add(1, Relaxed);
		}
	});

	events.emit(0);
	assert_eq!(delivered.load(Relaxed), 1);

	drop(owner);
	events.emit(0);
	events.emit(0);
	assert_eq!(delivered.load(Relaxed), 1);
}

#[test]
fn unsubscribe_removes_every_handler_of_that_owner() {
	let events = Subscribable::<usize>::new();
	let owner = listener();
	let bystander = listener();
	events.subscribe(&owner, |owner, _payload| {
		owner.hits.fetch_add(1, Relaxed);
	});
	events.subscribe(&owner, |owner, _payload| {
		owner.hits.fetch_add(1, Relaxed);
	});
	events.subscribe(&bystander, |owner, _payload| {
		owner.hits.fetch_add(1, Relaxed);
	});

	events.emit(0);
	assert_eq!(owner.hits.load(Relaxed), 2);
	assert_eq!(bystander.hits.load(Relaxed), 1);

	events.unsubscribe(&owner);
	events.emit(0);
	assert_eq!(owner.hits.load(Relaxed), 2);
	assert_eq!(bystander.hits.load(Relaxed), 2);
}

#[test]
fn unsubscribing_a_stranger_changes_nothing() {
	let events = Subscribable::<usize>::new();
	let owner = listener();
	events.subscribe(&owner, |owner, _payload| {
		owner.hits.fetch_add(1, Relaxed);
	});

	events.unsubscribe(&Arc::new("stranger"));
	events.emit(0);

	assert_eq!(owner.hits.load(Relaxed), 1);
}

#[test]
fn distinct_owners_are_independent() {
	let events = Subscribable::<usize>::new();
	let first = listener();
	let second = listener();
	events.subscribe(&first, |owner, _payload| {
		owner.hits.fetch_add(1, Relaxed);
	});
	events.subscribe(&second, |owner, _payload| {
		owner.hits.fetch_add(1, Relaxed);
	});

	drop(first);
	events.emit(0);

	assert_eq!(second.hits.load(Relaxed), 1);
}

#[test]
fn unit_subscribable_emits_without_payload() {
	let events = UnitSubscribable::new();
	let owner = listener();
	events.subscribe(&owner, |owner| {
		owner.hits.fetch_add(1, Relaxed);
	});

	events.emit();
	events.emit();

	assert_eq!(owner.hits.load(Relaxed), 2);
}

#[test]
fn bi_subscribable_emits_both_values() {
	let events = BiSubscribable::<usize, usize>::new();
	let owner = listener();
	events.subscribe(&owner, |owner, a, b| {
		owner.hits.fetch_add(a * b, Relaxed);
	});

	events.emit(2, 3);

	assert_eq!(owner.hits.load(Relaxed), 6);
}
