//! Tests for the in-process change feed.

use crate::live::adapters::memory::InMemoryChangeFeed;
use crate::live::domain::{ChangeAction, ChangeEvent, Topic};
use crate::live::ports::ChangeFeed;
use rstest::rstest;
use std::time::Duration;
use uuid::Uuid;

fn event(topic: Topic) -> ChangeEvent {
    ChangeEvent {
        action: ChangeAction::Insert,
        topic,
        row_id: Uuid::new_v4(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscription_only_sees_its_topics() {
    let feed = InMemoryChangeFeed::new();
    let mut subscription = feed
        .subscribe(&[Topic::Tasks])
        .await
        .expect("subscription opens");

    feed.publish(event(Topic::Users));
    feed.publish(event(Topic::Routines));
    let expected = event(Topic::Tasks);
    feed.publish(expected);

    let received = subscription.next_event().await.expect("event arrives");
    assert_eq!(received, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_subscriber_receives_a_published_event() {
    let feed = InMemoryChangeFeed::new();
    let mut first = feed
        .subscribe(&[Topic::TaskSubmissions])
        .await
        .expect("subscription opens");
    let mut second = feed
        .subscribe(&[Topic::TaskSubmissions])
        .await
        .expect("subscription opens");

    let published = event(Topic::TaskSubmissions);
    feed.publish(published);

    assert_eq!(first.next_event().await, Some(published));
    assert_eq!(second.next_event().await, Some(published));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscription_ends_when_the_feed_is_dropped() {
    let feed = InMemoryChangeFeed::new();
    let mut subscription = feed
        .subscribe(&[Topic::Tasks])
        .await
        .expect("subscription opens");
    drop(feed);

    let ended = tokio::time::timeout(Duration::from_secs(1), subscription.next_event())
        .await
        .expect("stream ends promptly");
    assert_eq!(ended, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publishing_without_subscribers_is_a_no_op() {
    let feed = InMemoryChangeFeed::new();
    feed.publish(event(Topic::Tasks));

    let mut late = feed
        .subscribe(&[Topic::Tasks])
        .await
        .expect("subscription opens");
    let fresh = event(Topic::Tasks);
    feed.publish(fresh);
    assert_eq!(late.next_event().await, Some(fresh));
}
