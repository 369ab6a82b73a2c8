use super::*;

async fn next_event(rx: &mut broadcast::Receiver<NotificationEvent>) -> NotificationEvent {
    rx.recv().await.expect("notification event")
}

#[tokio::test(start_paused = true)]
async fn shown_text_expires_after_ttl() {
    let notifier = Notifier::new();
    let mut rx = notifier.subscribe();

    notifier.show("Successfully added blog").await;
    assert_eq!(notifier.text().await, "Successfully added blog");
    assert_eq!(
        next_event(&mut rx).await,
        NotificationEvent::Shown("Successfully added blog".to_string())
    );

    tokio::time::advance(NOTIFICATION_TTL - Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    assert_eq!(notifier.text().await, "Successfully added blog");
    assert!(notifier.is_active().await);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(next_event(&mut rx).await, NotificationEvent::Cleared);
    assert_eq!(notifier.text().await, "");
    assert!(notifier.current().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn new_message_restarts_countdown() {
    let notifier = Notifier::new();
    let mut rx = notifier.subscribe();

    notifier.show("first").await;
    tokio::time::advance(Duration::from_millis(3000)).await;
    notifier.show("second").await;

    // Past the first message's original expiry.
    tokio::time::advance(Duration::from_millis(3000)).await;
    tokio::task::yield_now().await;
    assert_eq!(notifier.text().await, "second");

    tokio::time::advance(Duration::from_millis(2000)).await;
    assert_eq!(
        next_event(&mut rx).await,
        NotificationEvent::Shown("first".to_string())
    );
    assert_eq!(
        next_event(&mut rx).await,
        NotificationEvent::Shown("second".to_string())
    );
    assert_eq!(next_event(&mut rx).await, NotificationEvent::Cleared);
    assert_eq!(notifier.text().await, "");
}

#[tokio::test]
async fn snapshot_carries_expiry_timestamp() {
    let notifier = Notifier::new();
    let before = Utc::now();
    notifier.show("hello").await;

    let current = notifier.current().await.expect("active");
    assert_eq!(current.text, "hello");
    let window = current.expires_at - before;
    assert!(window >= chrono::Duration::milliseconds(NOTIFICATION_TTL_MS as i64));
    assert!(window < chrono::Duration::milliseconds(NOTIFICATION_TTL_MS as i64 + 1000));
}

#[tokio::test]
async fn idle_notifier_has_empty_text() {
    let notifier = Notifier::default();
    assert_eq!(notifier.text().await, "");
    assert!(!notifier.is_active().await);
}

#[tokio::test(start_paused = true)]
async fn blank_text_clears_the_banner() {
    let notifier = Notifier::new();
    let mut rx = notifier.subscribe();

    notifier.show("").await;
    assert_eq!(notifier.text().await, "");
    assert!(!notifier.is_active().await);

    notifier.show("Successfully logged in").await;
    notifier.show("   ").await;
    assert_eq!(notifier.text().await, "");
    assert!(!notifier.is_active().await);
    assert_eq!(
        next_event(&mut rx).await,
        NotificationEvent::Shown("Successfully logged in".to_string())
    );
    assert_eq!(next_event(&mut rx).await, NotificationEvent::Cleared);

    // The aborted countdown never fires a second clear.
    tokio::time::advance(NOTIFICATION_TTL).await;
    tokio::task::yield_now().await;
    assert!(matches!(
        rx.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));
}
