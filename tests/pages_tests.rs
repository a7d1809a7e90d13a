use std::sync::Arc;

use chrono::NaiveDate;
use nexcrm_admin::data::{Customer, Order};
use nexcrm_admin::notify::Variant;
use nexcrm_admin::prelude::*;
use nexcrm_admin::segments::Segment;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    crm: NexCrm,
    inbox: MemoryNotifier,
}

impl Harness {
    fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(self.inbox.clone())
    }
}

async fn setup(server: &MockServer, role: &str) -> Harness {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "displayName": "Test User",
            "email": "test@example.com",
            "role": role,
            "createdAt": "2025-01-01T00:00:00.000Z"
        })))
        .mount(server)
        .await;

    let crm = NexCrm::new(&format!("{}/api", server.uri())).unwrap();
    assert!(crm.auth().check_auth().await);
    Harness {
        crm,
        inbox: MemoryNotifier::new(),
    }
}

fn customers_json() -> serde_json::Value {
    json!([
        { "_id": "1", "customer_id": "C-100", "name": "Bob Smith", "email": "bob@example.com", "phone": "555-0100", "visits": 2 },
        { "_id": "2", "customer_id": "C-200", "name": "Alice Jones", "email": "alice@example.com", "visits": 5 },
        { "_id": "3", "customer_id": "C-300", "name": "Carol White", "email": "carol@example.com" }
    ])
}

#[tokio::test]
async fn test_customers_page_filters_locally() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    Mock::given(method("GET"))
        .and(path("/api/data/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_json()))
        .expect(1)
        .mount(&server)
        .await;

    let mut page: Page<Customer> = Page::new(h.crm.clone(), h.notifier());
    assert!(page.mount().await);
    assert_eq!(page.items().len(), 3);

    page.set_search("bob");
    let names: Vec<_> = page.filtered().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Bob Smith"]);

    page.set_search("C-2");
    assert_eq!(page.filtered().len(), 1);

    page.set_search("555-01");
    assert_eq!(page.filtered()[0].customer_id, "C-100");

    page.set_search("");
    assert_eq!(page.filtered().len(), 3);
    assert!(h.inbox.drain().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_items() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    Mock::given(method("GET"))
        .and(path("/api/data/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "o1", "order_id": "ORD-1", "customer_id_external": "C-100", "date": "2025-05-01", "amount": 20.5 }
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/data/orders"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut page: Page<Order> = Page::new(h.crm.clone(), h.notifier());
    assert!(page.mount().await);
    assert!(!page.refresh().await);

    assert_eq!(page.items().len(), 1);
    assert!(!page.is_loading());
    let notes = h.inbox.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Error");
    assert_eq!(
        notes[0].description.as_deref(),
        Some("Could not load orders. Please try again later.")
    );
    assert_eq!(notes[0].variant, Variant::Destructive);
}

#[tokio::test]
async fn test_non_admin_export_notifies_access_denied() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    Mock::given(method("GET"))
        .and(path("/api/data/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_json()))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("customers.csv");

    let mut page: Page<Customer> = Page::new(h.crm.clone(), h.notifier());
    page.mount().await;

    assert!(page.export_csv(&target).is_none());
    assert!(!target.exists());
    let notes = h.inbox.drain();
    assert_eq!(notes[0].title, "Access Denied");
    assert_eq!(
        notes[0].description.as_deref(),
        Some("Only admin users can export customer data.")
    );
}

#[tokio::test]
async fn test_admin_page_export_and_import() {
    let server = MockServer::start().await;
    let h = setup(&server, "admin").await;
    Mock::given(method("GET"))
        .and(path("/api/data/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_json()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/data/customers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Imported" })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let mut page: Page<Customer> = Page::new(h.crm.clone(), h.notifier());
    page.mount().await;

    let outcome = page.export_csv(dir.path().join("customers.csv")).unwrap();
    assert_eq!(outcome.rows, 3);

    let file = dir.path().join("upload.json");
    std::fs::write(&file, r#"[{"customer_id": "C-400", "name": "Dan"}]"#).unwrap();
    assert!(page.import_file(&file).await.is_some());

    let notes = h.inbox.drain();
    let descriptions: Vec<_> = notes.iter().filter_map(|n| n.description.as_deref()).collect();
    assert_eq!(
        descriptions,
        ["Customers exported successfully.", "Customers data imported successfully"]
    );
}

#[tokio::test]
async fn test_segment_created_from_prompt() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    let rules = json!({ "logic": "AND", "conditions": [{ "field": "total_spend", "operator": ">", "value": 500 }] });
    Mock::given(method("POST"))
        .and(path("/api/ai/parse-segment"))
        .and(body_json(json!({ "prompt": "people who spent over 500" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&rules))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/segments/create"))
        .and(body_json(json!({ "name": "Big spenders", "rules": rules })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "s9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/segments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "s9",
            "name": "Big spenders",
            "rules": { "logic": "AND", "conditions": [{ "field": "total_spend", "operator": ">", "value": 500 }] },
            "audience_size_snapshot": 12
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut page: Page<Segment> = Page::new(h.crm.clone(), h.notifier());
    assert!(page.create_with_ai("Big spenders", "people who spent over 500").await);

    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].audience_size_snapshot, 12);
    let notes = h.inbox.drain();
    assert_eq!(notes[0].description.as_deref(), Some("Segment created successfully"));
}

#[tokio::test]
async fn test_segment_creation_failure_is_notified() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    Mock::given(method("POST"))
        .and(path("/api/ai/parse-segment"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/segments/create"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut page: Page<Segment> = Page::new(h.crm.clone(), h.notifier());
    assert!(!page.create_with_ai("Anything", "gibberish").await);

    let notes = h.inbox.drain();
    assert_eq!(notes[0].title, "Error");
    assert_eq!(
        notes[0].description.as_deref(),
        Some("Failed to create segment. Please try again.")
    );
}

async fn mount_campaign_lists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "campaign_id": "cmp-1",
                "segment_name": "VIP",
                "message_template": "Hi",
                "audience_size": 4,
                "status_counts": { "SENT": 4, "FAILED": 0, "PENDING": 0 },
                "created_at": "2025-05-01T10:00:00Z",
                "created_by": "ada@example.com"
            },
            {
                "campaign_id": "cmp-2",
                "segment_name": "Lapsed",
                "message_template": "We miss you",
                "audience_size": 2,
                "status_counts": { "SENT": 0, "FAILED": 0, "PENDING": 2 },
                "created_at": "2025-05-02T10:00:00Z",
                "created_by": "ada@example.com"
            }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/segments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "s1", "name": "VIP", "audience_size_snapshot": 4 }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_campaign_create_notifies_audience() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    mount_campaign_lists(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/campaigns/send"))
        .and(body_json(json!({ "segment_id": "s1", "message_template": "Hello {name}" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "audienceSize": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = CampaignsPage::new(h.crm.clone(), h.notifier());
    assert!(page.mount().await);
    assert_eq!(page.segments().len(), 1);

    page.campaigns_mut().set_search("lap");
    assert_eq!(page.campaigns().filtered().len(), 1);

    let receipt = page.create("s1", "Hello {name}").await.unwrap();
    assert_eq!(receipt.audience_size, 4);

    let notes = h.inbox.drain();
    assert_eq!(notes[0].title, "Success");
    assert_eq!(notes[0].description.as_deref(), Some("Campaign started for 4 customers"));
}

#[tokio::test]
async fn test_message_suggestions_for_segment() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    mount_campaign_lists(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/segments/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_id": "s1", "name": "VIP" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/ai/message-suggestions"))
        .and(body_json(json!({
            "objective": "Engage customers in the segment",
            "segmentDescription": "VIP - Customers matching specific criteria",
            "tone": "Friendly and professional"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Hi {name}, a treat for you", "Thanks for sticking with us"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = CampaignsPage::new(h.crm.clone(), h.notifier());
    page.mount().await;

    assert!(page.message_suggestions("").await.is_empty());
    let suggestions = page.message_suggestions("s1").await;
    assert_eq!(suggestions.iter().count(), 2);
    assert!(h.inbox.drain().is_empty());
}

#[tokio::test]
async fn test_dashboard_load_and_reset() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    Mock::given(method("GET"))
        .and(path("/api/data/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/data/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "o1", "order_id": "ORD-1", "customer_id_external": "C-100", "date": "2025-05-03T12:00:00.000Z", "amount": 100.0 },
            { "_id": "o2", "order_id": "ORD-2", "customer_id_external": "C-200", "date": "2025-01-15", "amount": 40.0 },
            { "_id": "o3", "order_id": "ORD-3", "customer_id_external": "C-200", "date": "2024-06-15", "amount": 60.0 }
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/data/orders"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
    let mut page = DashboardPage::new(h.crm.clone(), h.notifier());
    assert!(page.load_at(today).await);

    let stats = page.stats();
    assert_eq!(stats.customer_count, 3);
    assert_eq!(stats.total_visits, 7);
    assert_eq!(stats.order_count, 3);
    assert_eq!(stats.total_revenue, 200.0);
    assert_eq!(stats.chart.len(), 6);
    assert_eq!(stats.chart[0].key, "2024-12");
    assert_eq!(stats.chart[5].value, 100.0);
    assert_eq!(stats.chart.iter().map(|m| m.value).sum::<f64>(), 140.0);

    assert!(!page.load_at(today).await);
    assert_eq!(page.stats().customer_count, 0);
    assert_eq!(page.stats().total_revenue, 0.0);
    assert!(page.stats().chart.is_empty());
    let notes = h.inbox.drain();
    assert_eq!(notes[0].title, "Error Loading Data");
}

#[tokio::test]
async fn test_settings_export_and_profile() {
    let server = MockServer::start().await;
    let h = setup(&server, "admin").await;
    Mock::given(method("GET"))
        .and(path("/api/data/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "o1", "order_id": "ORD-1", "customer_id_external": "C-100", "date": "2025-05-01", "amount": 1200.0 }
        ])))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("orders.csv");

    let page = SettingsPage::new(h.crm.clone(), h.notifier());
    assert_eq!(page.profile().unwrap().display_name, "Test User");

    let outcome = page.export(ExportKind::Orders, &target).await.unwrap();
    assert_eq!(outcome.rows, 1);
    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        "_id,order_id,customer_id_external,date,amount\no1,ORD-1,C-100,2025-05-01,1200"
    );
    let notes = h.inbox.drain();
    assert_eq!(notes[0].title, "Export Successful");
}

#[tokio::test]
async fn test_settings_export_with_no_data() {
    let server = MockServer::start().await;
    let h = setup(&server, "admin").await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let page = SettingsPage::new(h.crm.clone(), h.notifier());
    assert!(page.export(ExportKind::Campaigns, dir.path().join("campaigns.csv")).await.is_none());

    let notes = h.inbox.drain();
    assert_eq!(notes[0].title, "No Data");
    assert_eq!(notes[0].description.as_deref(), Some("There are no campaigns to export."));
    assert_eq!(notes[0].variant, Variant::Default);
}

#[tokio::test]
async fn test_null_fields_still_load() {
    let server = MockServer::start().await;
    let h = setup(&server, "user").await;
    Mock::given(method("GET"))
        .and(path("/api/data/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "1", "customer_id": "C-100", "name": "Bob Smith", "email": "bob@example.com" },
            { "_id": "2", "customer_id": "C-200", "name": "No Email", "email": null, "visits": null }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "campaign_id": "cmp-1",
            "segment_name": "VIP",
            "message_template": "Hi",
            "audience_size": 4,
            "status_counts": { "SENT": 4, "FAILED": null, "PENDING": 0 },
            "created_at": "2025-05-01T10:00:00Z",
            "created_by": null
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/segments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut customers: Page<Customer> = Page::new(h.crm.clone(), h.notifier());
    assert!(customers.mount().await);
    assert_eq!(customers.items().len(), 2);
    customers.set_search("no email");
    assert_eq!(customers.filtered().len(), 1);

    let mut campaigns = CampaignsPage::new(h.crm.clone(), h.notifier());
    assert!(campaigns.mount().await);
    assert_eq!(campaigns.campaigns().items()[0].created_by, "");
    assert!(h.inbox.drain().is_empty());
}
