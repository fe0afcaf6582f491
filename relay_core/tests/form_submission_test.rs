use relay_core::forms::{
    FormCollector, FormConfig, FormField, FormStatus, HttpRelayClient, NoopTracker, RelayClient,
    SubmitError, TracingTracker,
};
use relay_core::{create_app_with_config, AppConfig, AppState, Inquiry, MemoryTransport};
use std::net::SocketAddr;

async fn spawn_relay(transport: MemoryTransport) -> SocketAddr {
    let mut config = AppConfig::default();
    config.mail.sender = "Safari Bookings <relay@example.com>".to_string();
    config.mail.recipient = "bookings@example.com".to_string();

    let app = create_app_with_config(AppState::with_transport(transport, &config), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn relay_url(addr: SocketAddr) -> String {
    format!("http://{}/api/send-email", addr)
}

#[tokio::test]
async fn test_contact_form_round_trip() {
    let transport = MemoryTransport::new();
    let addr = spawn_relay(transport.clone()).await;
    let client = HttpRelayClient::new(relay_url(addr));

    let mut form = FormCollector::new(FormConfig::contact());
    form.set(FormField::Name, "Jane Doe");
    form.set(FormField::Email, "jane@example.com");
    form.set(FormField::Subject, "Migration season");
    form.set(FormField::Message, "When is the best time to see the crossing?");

    let status = form.submit(&client, &TracingTracker).await.unwrap();
    assert_eq!(status, FormStatus::Success);
    assert!(form.is_pristine());

    let email = transport.last_sent().expect("relay should have sent an email");
    assert!(email.subject.contains("Migration season"));
    assert!(email.text_body.contains("When is the best time to see the crossing?"));
    assert_eq!(email.reply_to, "jane@example.com");
}

#[tokio::test]
async fn test_booking_modal_round_trip() {
    let transport = MemoryTransport::new();
    let addr = spawn_relay(transport.clone()).await;
    let client = HttpRelayClient::new(relay_url(addr));

    let mut form = FormCollector::new(FormConfig::booking().with_package("Serengeti Migration Safari"));
    form.open();
    form.set(FormField::Name, "Jane Doe");
    form.set(FormField::Email, "jane@example.com");
    form.set(FormField::TravelDate, "2025-08-01");
    form.set(FormField::Guests, "2");

    let status = form.submit(&client, &NoopTracker).await.unwrap();
    assert_eq!(status, FormStatus::Success);
    assert!(form.close_deadline().is_some());

    let email = transport.last_sent().unwrap();
    assert_eq!(email.subject, "New Safari Inquiry: Booking Request: Serengeti Migration Safari");
    assert!(email.text_body.contains("Travel Date: 2025-08-01"));
    assert!(email.text_body.contains("Guests: 2"));
    assert!(email.html_body.contains("Guests: 2<br>Package: Serengeti Migration Safari"));
}

#[tokio::test]
async fn test_relay_failure_sets_error_and_keeps_values() {
    let transport = MemoryTransport::failing("smtp unavailable");
    let addr = spawn_relay(transport.clone()).await;
    let client = HttpRelayClient::new(relay_url(addr));

    let mut form = FormCollector::new(FormConfig::contact());
    form.set(FormField::Name, "Jane Doe");
    form.set(FormField::Email, "jane@example.com");
    form.set(FormField::Message, "Hello");

    let status = form.submit(&client, &NoopTracker).await.unwrap();
    assert_eq!(status, FormStatus::Error);
    assert_eq!(form.value(FormField::Message), "Hello");
    assert_eq!(transport.attempts(), 1);
}

#[tokio::test]
async fn test_client_reports_rejection_status() {
    let addr = spawn_relay(MemoryTransport::new()).await;
    let client = HttpRelayClient::new(relay_url(addr));

    let result = client
        .post_inquiry(&Inquiry {
            name: Some("Jane".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(result, Err(SubmitError::Rejected { status: 400 }));
}

#[tokio::test]
async fn test_unreachable_relay_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpRelayClient::new(relay_url(addr));
    let result = client
        .post_inquiry(&Inquiry::new("Jane", "jane@example.com", None, "hi"))
        .await;
    assert!(matches!(result, Err(SubmitError::Network(_))));

    let mut form = FormCollector::new(FormConfig::contact());
    form.set(FormField::Name, "Jane");
    form.set(FormField::Email, "jane@example.com");
    form.set(FormField::Message, "hi");
    assert_eq!(form.submit(&client, &NoopTracker).await.unwrap(), FormStatus::Error);
    assert_eq!(form.value(FormField::Name), "Jane");
}
