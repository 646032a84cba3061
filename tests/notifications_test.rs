//! Integration tests for notification delivery
//!
//! Rendered notifications are sent to the mock Telegram API; failures are
//! counted, never propagated.

mod helpers;

use chrono::Utc;
use helpers::*;
use serial_test::serial;
use uuid::Uuid;

use bookly_bot::config::Settings;
use bookly_bot::models::{BookSummary, NewBookAlert, UnfinishedBook};
use bookly_bot::services::{DeliveryReport, NotificationKind, NotificationService};

fn service(mock: &TelegramMockServer, media_base_url: Option<&str>) -> NotificationService {
    let mut settings = Settings::default();
    settings.bot.mini_app_url = "https://bookly-mini-app.vercel.app".to_string();
    settings.bot.media_base_url = media_base_url.map(str::to_string);
    settings.notifications.send_delay_ms = 0;
    NotificationService::new(mock.bot(), &settings)
}

fn unfinished(telegram_id: i64) -> UnfinishedBook {
    UnfinishedBook {
        user_id: Uuid::new_v4(),
        telegram_id,
        book_id: Uuid::new_v4(),
        title: "Война и мир".to_string(),
        progress: 42.0,
        last_read_at: Utc::now(),
    }
}

fn alert(cover_url: Option<&str>) -> NewBookAlert {
    NewBookAlert {
        user_id: Uuid::new_v4(),
        telegram_id: test_chat_id(),
        genre: "Классика".to_string(),
        book: BookSummary {
            id: Uuid::new_v4(),
            title: "Мастер и Маргарита".to_string(),
            author: "Михаил Булгаков".to_string(),
            price: 0.0,
            is_free: true,
            cover_url: cover_url.map(str::to_string),
        },
    }
}

#[tokio::test]
#[serial]
async fn test_unfinished_reminder_is_sent_as_message() {
    let mock = TelegramMockServer::new().await;
    mock.setup_default_mocks().await;
    let service = service(&mock, None);

    let notification = service.unfinished_reminder(&unfinished(test_chat_id()));
    assert_eq!(notification.kind, NotificationKind::UnfinishedReminder);
    service.send(&notification).await.expect("send should succeed");

    let requests = mock.requests_to("sendMessage").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["text"], "📖 Вы остановились на 42% книги «Война и мир». Продолжить чтение?");
    assert_eq!(first_button_text(&requests[0]), Some("Продолжить чтение"));
    mock.verify_endpoint_called("sendPhoto", 0).await;
}

#[tokio::test]
#[serial]
async fn test_new_book_with_cover_is_sent_as_photo() {
    let mock = TelegramMockServer::new().await;
    mock.setup_default_mocks().await;
    let service = service(&mock, Some("https://api.bookly.app"));

    let notification = service.new_book_alert(&alert(Some("/uploads/covers/master.jpg")));
    service.send(&notification).await.expect("send should succeed");

    mock.verify_endpoint_called("sendPhoto", 1).await;
    mock.verify_endpoint_called("sendMessage", 0).await;
}

#[tokio::test]
#[serial]
async fn test_relative_cover_without_base_falls_back_to_text() {
    let mock = TelegramMockServer::new().await;
    mock.setup_default_mocks().await;
    let service = service(&mock, None);

    let notification = service.new_book_alert(&alert(Some("/uploads/covers/master.jpg")));
    assert!(notification.photo.is_none());
    service.send(&notification).await.expect("send should succeed");

    let requests = mock.requests_to("sendMessage").await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0]["text"].as_str().unwrap().ends_with("💰 Бесплатно"));
    assert_eq!(first_button_text(&requests[0]), Some("Посмотреть книгу"));
}

#[tokio::test]
#[serial]
async fn test_deliver_counts_failures_and_continues() {
    let mock = TelegramMockServer::new().await;
    mock.setup_error_mocks().await;
    let service = service(&mock, None);

    let notifications = vec![
        service.unfinished_reminder(&unfinished(1)),
        service.unfinished_reminder(&unfinished(2)),
    ];
    let report = service.deliver(&notifications).await;

    assert_eq!(report, DeliveryReport { sent: 0, failed: 2 });
    mock.verify_endpoint_called("sendMessage", 2).await;
}

#[tokio::test]
#[serial]
async fn test_deliver_reports_successes() {
    let mock = TelegramMockServer::new().await;
    mock.setup_default_mocks().await;
    let service = service(&mock, None);

    let notifications = vec![
        service.unfinished_reminder(&unfinished(1)),
        service.new_book_alert(&alert(None)),
    ];
    let report = service.deliver(&notifications).await;

    assert_eq!(report, DeliveryReport { sent: 2, failed: 0 });
}
