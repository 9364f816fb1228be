//! Dispatch tests for the order notifier, run against the mock provider.

mod common;

use common::*;
use domain_orders::{EmailKind, OrderError, OrderNotifier, VendorNotification};
use email::{MockEmailProvider, NotificationError};
use std::time::Duration;

fn notifier(provider: &MockEmailProvider) -> OrderNotifier<MockEmailProvider> {
    OrderNotifier::new(provider.clone(), config()).unwrap()
}

#[tokio::test]
async fn test_burger_order_sends_three_emails() {
    let provider = MockEmailProvider::new();
    let report = notifier(&provider)
        .submit_order(submission(burger_order()))
        .await
        .unwrap();

    assert_eq!(provider.attempt_count().await, 3);
    assert!(provider.was_sent_to(OWNER).await);
    assert!(provider.was_sent_to("ama@x.com").await);
    assert!(provider.was_sent_to("joe@x.com").await);

    assert_eq!(report.transaction_ref, "MM-7781");
    assert_eq!(report.vendors_notified(), 1);

    let sent = provider.sent_emails().await;
    let joe = sent.iter().find(|e| e.is_addressed_to("joe@x.com")).unwrap();
    assert_eq!(joe.subject, "New Order for Joe's - #81b7e4");
    assert_eq!(joe.from.as_deref(), Some(SENDER));
    let body = joe.body_html.as_deref().unwrap();
    assert!(body.contains("<strong>2x</strong> Burger"));
    assert!(body.contains("Hello <strong>Joe&#x27;s</strong>"));
}

#[tokio::test]
async fn test_every_vendor_entry_gets_an_attempt() {
    let provider = MockEmailProvider::new();
    let report = notifier(&provider)
        .submit_order(submission(market_order()))
        .await
        .unwrap();

    assert_eq!(provider.attempt_count().await, 5);
    assert_eq!(report.vendor_outcomes.len(), 3);
    assert!(report.vendor_outcomes.iter().all(|o| o.is_sent()));

    let names: Vec<_> = report
        .vendor_outcomes
        .iter()
        .map(|o| o.vendor.name.as_str())
        .collect();
    assert_eq!(names, vec!["Joe's", "Mama Kitchen", "Fresh Press"]);
}

#[tokio::test]
async fn test_order_without_vendors_sends_two_emails() {
    let mut order = market_order();
    order.as_object_mut().unwrap().remove("vendorNotifications");

    let provider = MockEmailProvider::new();
    let report = notifier(&provider)
        .submit_order(submission(order))
        .await
        .unwrap();

    assert_eq!(provider.attempt_count().await, 2);
    assert!(report.vendor_outcomes.is_empty());
}

#[tokio::test]
async fn test_admin_failure_skips_customer() {
    let provider = MockEmailProvider::new().failing_for(OWNER);
    let err = notifier(&provider)
        .submit_order(submission(market_order()))
        .await
        .unwrap_err();

    match err {
        OrderError::Delivery { kind, source } => {
            assert_eq!(kind, EmailKind::Admin);
            assert_eq!(source.status(), Some(400));
        }
        other => panic!("expected delivery error, got {other:?}"),
    }
    assert!(provider.was_attempted_for(OWNER).await);
    assert!(!provider.was_attempted_for("chanda@x.com").await);
}

#[tokio::test(start_paused = true)]
async fn test_admin_failure_leaves_vendor_sends_running() {
    let vendor_emails = ["joe@x.com", "mama@x.com", "press@x.com"];
    let provider = vendor_emails.iter().fold(
        MockEmailProvider::new().failing_for(OWNER),
        |provider, vendor| provider.delaying_for(*vendor, Duration::from_secs(3)),
    );

    let err = notifier(&provider)
        .submit_order(submission(market_order()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Delivery { kind: EmailKind::Admin, .. }
    ));
    assert!(!provider.was_sent_to("joe@x.com").await);

    tokio::time::sleep(Duration::from_secs(5)).await;

    for vendor in vendor_emails {
        assert!(provider.was_attempted_for(vendor).await, "{vendor} not attempted");
        assert!(provider.was_sent_to(vendor).await, "{vendor} send was cancelled");
    }
    assert!(!provider.was_attempted_for("chanda@x.com").await);
}

#[tokio::test]
async fn test_customer_failure_fails_order() {
    let provider = MockEmailProvider::new().failing_for("chanda@x.com");
    let err = notifier(&provider)
        .submit_order(submission(market_order()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Delivery { kind: EmailKind::Customer, .. }
    ));
    assert!(provider.was_sent_to(OWNER).await);
}

#[tokio::test]
async fn test_vendor_failure_is_reported_not_raised() {
    let provider = MockEmailProvider::new().failing_for("mama@x.com");
    let report = notifier(&provider)
        .submit_order(submission(market_order()))
        .await
        .unwrap();

    assert_eq!(provider.attempt_count().await, 5);
    assert_eq!(provider.sent_count().await, 4);
    assert_eq!(report.vendors_notified(), 2);
    assert_eq!(report.vendors_failed(), 1);

    let failed = &report.vendor_outcomes[1];
    assert_eq!(failed.vendor.email, "mama@x.com");
    assert!(failed.error.as_deref().unwrap().contains("invalid request"));
}

#[tokio::test]
async fn test_every_vendor_failing_still_succeeds() {
    let provider = MockEmailProvider::new()
        .failing_for("joe@x.com")
        .failing_for("mama@x.com")
        .failing_for("press@x.com");

    let report = notifier(&provider)
        .submit_order(submission(market_order()))
        .await
        .unwrap();

    assert_eq!(report.vendors_failed(), 3);
    assert!(provider.was_sent_to("chanda@x.com").await);
}

#[tokio::test]
async fn test_vendor_without_items_still_notified() {
    let mut order = submission(burger_order());
    order.vendor_notifications = Some(vec![VendorNotification {
        name: "Ghost Grill".to_string(),
        email: "ghost@x.com".to_string(),
    }]);

    let provider = MockEmailProvider::new();
    notifier(&provider).submit_order(order).await.unwrap();

    let sent = provider.sent_emails().await;
    let ghost = sent.iter().find(|e| e.is_addressed_to("ghost@x.com")).unwrap();
    let body = ghost.body_html.as_deref().unwrap();
    assert!(!body.contains("Burger"));
    assert!(!body.contains("<li>"));
}

#[tokio::test]
async fn test_duplicate_vendor_entries_send_twice() {
    let mut order = submission(burger_order());
    let joe = order.vendors()[0].clone();
    order.vendor_notifications = Some(vec![joe.clone(), joe]);

    let provider = MockEmailProvider::new();
    notifier(&provider).submit_order(order).await.unwrap();

    let to_joe = provider
        .sent_emails()
        .await
        .iter()
        .filter(|e| e.is_addressed_to("joe@x.com"))
        .count();
    assert_eq!(to_joe, 2);
}

#[tokio::test]
async fn test_repeated_submission_is_not_deduplicated() {
    let provider = MockEmailProvider::new();
    let notifier = notifier(&provider);

    notifier.submit_order(submission(burger_order())).await.unwrap();
    notifier.submit_order(submission(burger_order())).await.unwrap();

    assert_eq!(provider.sent_count().await, 6);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_provider_times_out() {
    let provider = MockEmailProvider::new().with_delay(Duration::from_secs(60));
    let notifier = OrderNotifier::new(
        provider.clone(),
        config().with_send_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = notifier
        .submit_order(submission(burger_order()))
        .await
        .unwrap_err();

    match err {
        OrderError::Delivery {
            kind: EmailKind::Admin,
            source: NotificationError::Timeout(after),
        } => assert_eq!(after, Duration::from_secs(2)),
        other => panic!("expected admin timeout, got {other:?}"),
    }
    assert_eq!(provider.sent_count().await, 0);
}

#[tokio::test]
async fn test_customer_fields_are_escaped() {
    let mut order = submission(burger_order());
    order.customer.name = "<b>Ama</b> & Co".to_string();

    let provider = MockEmailProvider::new();
    notifier(&provider).submit_order(order).await.unwrap();

    for email in provider.sent_emails().await {
        let body = email.body_html.unwrap();
        assert!(!body.contains("<b>Ama</b>"));
        assert!(body.contains("&lt;b&gt;Ama&lt;/b&gt; &amp; Co"));
    }
}

#[tokio::test]
async fn test_provider_readiness() {
    let healthy = MockEmailProvider::new();
    assert!(notifier(&healthy).check_provider().await.is_ok());
    assert_eq!(notifier(&healthy).provider_name(), "mock");

    let broken = MockEmailProvider::failing("down");
    assert!(notifier(&broken).check_provider().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_vendor_timeout_is_reported_not_raised() {
    let provider = MockEmailProvider::new().delaying_for("mama@x.com", Duration::from_secs(60));
    let notifier = OrderNotifier::new(
        provider.clone(),
        config().with_send_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let report = notifier
        .submit_order(submission(market_order()))
        .await
        .unwrap();

    assert_eq!(report.vendors_notified(), 2);
    let mama = &report.vendor_outcomes[1];
    assert_eq!(mama.vendor.email, "mama@x.com");
    assert!(mama.error.as_deref().unwrap().contains("timed out"));

    assert!(provider.was_sent_to(OWNER).await);
    assert!(provider.was_sent_to("chanda@x.com").await);
    assert!(!provider.was_sent_to("mama@x.com").await);
}

#[tokio::test]
async fn test_panicking_vendor_send_becomes_failed_outcome() {
    let provider = MockEmailProvider::new().panicking_for("press@x.com");
    let report = notifier(&provider)
        .submit_order(submission(market_order()))
        .await
        .unwrap();

    assert_eq!(report.vendors_failed(), 1);
    let press = &report.vendor_outcomes[2];
    assert_eq!(press.vendor.email, "press@x.com");
    assert!(press.error.as_deref().unwrap().contains("panicked"));
    assert!(provider.was_sent_to("chanda@x.com").await);
    assert!(provider.was_sent_to("joe@x.com").await);
}
