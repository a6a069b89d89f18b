//! Delivery queue tests: FIFO ordering, close-then-drain, loud push failure.

use std::time::Duration;

use tokio::time::timeout;

use crate::attribute::{Attribute, AttributeValue};
use crate::error::QueueError;
use crate::queue::{DeliveryQueue, Popped};

fn attr(origin: &str, n: i64) -> Attribute {
    Attribute::new("speed", AttributeValue::Int(n)).with_origin(origin)
}

fn int_of(popped: Popped) -> i64 {
    match popped {
        Popped::Item(a) => match a.value() {
            AttributeValue::Int(n) => *n,
            other => panic!("expected int, got {other:?}"),
        },
        Popped::Closed => panic!("queue closed early"),
    }
}

#[tokio::test]
async fn single_producer_fifo_order() {
    let (mut queue, pusher) = DeliveryQueue::bounded(16);

    for n in 1..=5 {
        pusher.push(attr("test", n)).await.unwrap();
    }

    for n in 1..=5 {
        assert_eq!(int_of(queue.pop().await), n);
    }
}

#[tokio::test]
async fn close_unblocks_waiting_consumer() {
    let (mut queue, _pusher) = DeliveryQueue::bounded(4);
    let token = queue.close_token();

    let consumer = tokio::spawn(async move { queue.pop().await });

    tokio::task::yield_now().await;
    token.cancel();

    let popped = timeout(Duration::from_secs(1), consumer)
        .await
        .expect("pop must unblock after close")
        .unwrap();
    assert_eq!(popped, Popped::Closed);
}

#[tokio::test]
async fn queued_values_drain_before_closed_is_observed() {
    let (mut queue, pusher) = DeliveryQueue::bounded(8);

    pusher.push(attr("test", 10)).await.unwrap();
    pusher.push(attr("test", 20)).await.unwrap();
    pusher.push(attr("test", 30)).await.unwrap();

    queue.close();

    assert_eq!(int_of(queue.pop().await), 10);
    assert_eq!(int_of(queue.pop().await), 20);
    assert_eq!(int_of(queue.pop().await), 30);
    assert_eq!(queue.pop().await, Popped::Closed);
}

#[tokio::test]
async fn push_after_close_fails_loudly() {
    let (queue, pusher) = DeliveryQueue::bounded(8);

    queue.close();

    assert!(pusher.is_closed());
    assert_eq!(pusher.push(attr("late", 99)).await, Err(QueueError::Closed));
}

#[tokio::test]
async fn close_is_idempotent() {
    let (mut queue, pusher) = DeliveryQueue::bounded(8);

    pusher.push(attr("test", 1)).await.unwrap();
    queue.close();
    queue.close();

    assert_eq!(int_of(queue.pop().await), 1);
    assert_eq!(queue.pop().await, Popped::Closed);
    assert_eq!(queue.pop().await, Popped::Closed);
}

#[tokio::test]
async fn multi_producer_preserves_per_producer_order() {
    const PER_PRODUCER: i64 = 100;

    let (mut queue, pusher) = DeliveryQueue::bounded(4);
    let token = queue.close_token();

    let mut producers = Vec::new();
    for origin in ["alpha", "beta", "gamma"] {
        let pusher = pusher.clone();
        producers.push(tokio::spawn(async move {
            for n in 0..PER_PRODUCER {
                pusher.push(attr(origin, n)).await.unwrap();
                if n % 7 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        }));
    }

    let consumer = tokio::spawn(async move {
        let mut seen: Vec<(String, i64)> = Vec::new();
        loop {
            match queue.pop().await {
                Popped::Item(a) => {
                    let n = match a.value() {
                        AttributeValue::Int(n) => *n,
                        other => panic!("expected int, got {other:?}"),
                    };
                    seen.push((a.origin().to_string(), n));
                }
                Popped::Closed => break,
            }
        }
        seen
    });

    for p in producers {
        p.await.unwrap();
    }
    token.cancel();

    let seen = timeout(Duration::from_secs(5), consumer).await.unwrap().unwrap();
    assert_eq!(seen.len(), 3 * PER_PRODUCER as usize);

    // Global interleaving is arbitrary, but each producer's values must
    // arrive in its own push order.
    for origin in ["alpha", "beta", "gamma"] {
        let per: Vec<i64> = seen
            .iter()
            .filter(|(o, _)| o == origin)
            .map(|(_, n)| *n)
            .collect();
        let expected: Vec<i64> = (0..PER_PRODUCER).collect();
        assert_eq!(per, expected, "producer '{origin}' order was broken");
    }
}
