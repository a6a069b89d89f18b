//! Source plugin tests: poller production, stop semantics, and the
//! synthetic simulator feed.

use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::attribute::AttributeValue;
use crate::queue::{DeliveryQueue, Popped};
use crate::sources::{PollSource, SimStateSource, Source};

#[tokio::test]
async fn poll_source_emits_gauge_readings_in_order() {
    let (mut queue, pusher) = DeliveryQueue::bounded(16);
    let stop = CancellationToken::new();

    let mut counter = 0i64;
    let mut source = PollSource::new("pokey", "rpm", Duration::from_millis(5), move || {
        counter += 1;
        Some(AttributeValue::Int(counter))
    });
    source.start(pusher, stop.clone()).unwrap();

    for expected in 1..=3i64 {
        let popped = timeout(Duration::from_secs(2), queue.pop())
            .await
            .expect("poller must produce");
        let Popped::Item(attribute) = popped else {
            panic!("queue closed before readings arrived");
        };
        assert_eq!(attribute.name(), "rpm");
        assert_eq!(attribute.origin(), "pokey");
        assert_eq!(attribute.value(), &AttributeValue::Int(expected));
    }

    source.stop();
    assert!(stop.is_cancelled());
}

#[tokio::test]
async fn poll_source_skips_ticks_without_a_reading() {
    let (mut queue, pusher) = DeliveryQueue::bounded(16);
    let stop = CancellationToken::new();

    // Only every other tick yields a value.
    let mut tick = 0u32;
    let mut source = PollSource::new("pokey", "flaps", Duration::from_millis(5), move || {
        tick += 1;
        (tick % 2 == 0).then(|| AttributeValue::Bool(true))
    });
    source.start(pusher, stop).unwrap();

    let popped = timeout(Duration::from_secs(2), queue.pop())
        .await
        .expect("a reading still arrives eventually");
    let Popped::Item(attribute) = popped else {
        panic!("queue closed unexpectedly");
    };
    assert_eq!(attribute.value(), &AttributeValue::Bool(true));
    source.stop();
}

#[tokio::test]
async fn starting_a_poll_source_twice_is_rejected() {
    let (_queue, pusher) = DeliveryQueue::bounded(4);
    let mut source = PollSource::new("pokey", "rpm", Duration::from_millis(5), || {
        Some(AttributeValue::Int(0))
    });

    source
        .start(pusher.clone(), CancellationToken::new())
        .unwrap();
    let err = source
        .start(pusher, CancellationToken::new())
        .expect_err("second start must fail");
    assert_eq!(err.as_label(), "hub_registration");
    source.stop();
}

#[tokio::test]
async fn stop_is_safe_on_a_source_that_never_started() {
    let mut poller = PollSource::new("pokey", "rpm", Duration::from_millis(5), || {
        Some(AttributeValue::Int(0))
    });
    poller.stop();
    poller.stop();

    let mut sim = SimStateSource::new("sim", Duration::from_millis(10));
    sim.stop();
    sim.stop();
}

#[tokio::test]
async fn sim_source_walks_all_three_gauges() {
    let (mut queue, pusher) = DeliveryQueue::bounded(32);
    let stop = CancellationToken::new();

    let mut source = SimStateSource::new("sim", Duration::from_millis(10));
    source.start(pusher, stop).unwrap();

    // One tick pushes speed, altitude, heading in that order.
    let expected = ["speed", "altitude", "heading"];
    for name in expected {
        let popped = timeout(Duration::from_secs(2), queue.pop())
            .await
            .expect("sim must produce");
        let Popped::Item(attribute) = popped else {
            panic!("queue closed before the first tick completed");
        };
        assert_eq!(attribute.name(), name);
        assert_eq!(attribute.origin(), "sim");
        let AttributeValue::Float(v) = attribute.value() else {
            panic!("sim gauges are floats");
        };
        assert!(v.is_finite());
    }

    source.stop();
}

#[tokio::test]
async fn sim_source_production_ends_when_the_queue_closes() {
    let (mut queue, pusher) = DeliveryQueue::bounded(4);
    let stop = CancellationToken::new();

    let mut source = SimStateSource::new("sim", Duration::from_millis(10));
    source.start(pusher, stop).unwrap();

    // Take one reading, then close; the producer task must observe the
    // closed queue and stop on its own, without stop() being called.
    let popped = timeout(Duration::from_secs(2), queue.pop())
        .await
        .expect("sim must produce");
    assert!(matches!(popped, Popped::Item(_)));

    queue.close();
    loop {
        match queue.pop().await {
            Popped::Item(_) => continue,
            Popped::Closed => break,
        }
    }
}
