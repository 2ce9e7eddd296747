//! End-to-end store subscription through `bind_store`.
//!
//! The scenarios mirror how a component actually consumes a store: bind
//! during setup, mount, let changes schedule renders, flush, read the
//! cached value from the view.

use std::rc::Rc;

use hostlink::{HostInstance, Observable, Store, bind_store};
use hostlink_harness::SimHost;

fn bind_counter(sim: &mut SimHost, store: &Observable<i32>) -> Rc<hostlink::StoreSubscriber<i32>> {
    let store = store.clone();
    bind_store(sim, move || Rc::new(store.clone()) as Rc<dyn Store<i32>>)
}

#[test]
fn mount_populates_value_and_requests_render() {
    let store = Observable::new(10);
    let mut sim = SimHost::new();
    let counter = bind_counter(&mut sim, &store);

    assert_eq!(counter.value(), None);
    assert_eq!(sim.render_requests(), 0);

    sim.mount();
    assert_eq!(counter.value(), Some(10));
    assert_eq!(sim.render_requests(), 1);
}

#[test]
fn change_schedules_render_and_updates_cache() {
    let store = Observable::new(0);
    let mut sim = SimHost::new();
    let counter = bind_counter(&mut sim, &store);
    sim.mount();
    sim.render();

    store.set(1);
    store.set(2);
    // Two changes, two schedules (plus the one from mount).
    assert_eq!(sim.render_requests(), 3);
    assert_eq!(counter.value(), Some(2));

    sim.render();
    assert_eq!(counter.value(), Some(2));
}

#[test]
fn equal_set_schedules_nothing() {
    let store = Observable::new(4);
    let mut sim = SimHost::new();
    let _counter = bind_counter(&mut sim, &store);
    sim.mount();

    let before = sim.render_requests();
    store.set(4);
    assert_eq!(sim.render_requests(), before);
}

#[test]
fn unmounted_component_ignores_changes() {
    let store = Observable::new(0);
    let mut sim = SimHost::new();
    let counter = bind_counter(&mut sim, &store);
    sim.mount();
    sim.unmount();
    let before = sim.render_requests();

    store.set(99);
    assert_eq!(counter.value(), Some(0));
    assert_eq!(sim.render_requests(), before);

    // Remount catches up with the missed change and repaints.
    sim.mount();
    assert_eq!(counter.value(), Some(99));
    assert_eq!(sim.render_requests(), before + 1);
}

#[test]
fn store_keeps_no_subscriber_while_unmounted() {
    let store = Observable::new(0);
    let mut sim = SimHost::new();
    let _counter = bind_counter(&mut sim, &store);

    assert_eq!(store.subscriber_count(), 0);
    sim.mount();
    assert_eq!(store.subscriber_count(), 1);
    sim.unmount();
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn await_visual_consistency_after_change() {
    let store = Observable::new(String::from("draft"));
    let mut sim = SimHost::new();
    let store_clone = store.clone();
    let text = bind_store(&mut sim, move || {
        Rc::new(store_clone.clone()) as Rc<dyn Store<String>>
    });
    sim.mount();

    store.set(String::from("final"));
    let ticket = sim.sim_instance().next_tick();
    sim.render();

    assert!(futures::executor::block_on(ticket));
    assert_eq!(text.value(), Some(String::from("final")));
}

#[test]
fn two_components_one_store() {
    let store = Observable::new(0);
    let mut sim_a = SimHost::new();
    let mut sim_b = SimHost::new();
    let a = bind_counter(&mut sim_a, &store);
    let b = bind_counter(&mut sim_b, &store);

    sim_a.mount();
    sim_b.mount();
    store.set(5);

    assert_eq!(a.value(), Some(5));
    assert_eq!(b.value(), Some(5));
    // Each component scheduled its own renders: one at mount, one on the
    // change.
    assert_eq!(sim_a.render_requests(), 2);
    assert_eq!(sim_b.render_requests(), 2);

    sim_b.unmount();
    store.set(6);
    assert_eq!(a.value(), Some(6));
    assert_eq!(b.value(), Some(5));
}
