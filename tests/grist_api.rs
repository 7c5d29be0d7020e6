use grist_calendar::calendar::RecordId;
use grist_calendar::storage::{StoreConfig, TablesConfig};
use grist_calendar::sync::{ApiError, Collection, GristClient, RecordStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOC: &str = "/api/docs/doc1";

fn client(server: &MockServer) -> GristClient {
    let store = StoreConfig {
        base_url: format!("{}{}/", server.uri(), DOC),
        api_key: "secret".to_string(),
    };
    GristClient::new(&store, TablesConfig::default())
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn list_sends_bearer_key_and_reads_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/tables/EQUIPES/records", DOC)))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                { "id": 1, "fields": { "nom": "Ops", "couleur": "#ff0000" } },
                { "id": 2, "fields": { "nom": "Dev" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server).list(Collection::Teams).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, RecordId::Int(1));
    assert_eq!(records[0].text("nom"), "Ops");
}

#[tokio::test]
async fn list_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/tables/RESERVATIONS/records", DOC)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "R1", "fields": { "objet": "Sync" } }
        ])))
        .mount(&server)
        .await;

    let records = client(&server).list(Collection::Reservations).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, RecordId::from("R1"));
}

#[tokio::test]
async fn create_posts_fields_and_returns_assigned_id() {
    let server = MockServer::start().await;
    let sent = json!({
        "objet": "Retro",
        "debut": "2024-01-02T09:00:00Z",
        "fin": "2024-01-02T10:00:00Z",
        "equipe": 1
    });
    Mock::given(method("POST"))
        .and(path(format!("{}/tables/RESERVATIONS/records", DOC)))
        .and(body_json(&sent))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [{ "id": 7 }] })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server)
        .create(Collection::Reservations, fields(sent.clone()))
        .await
        .unwrap();

    assert_eq!(record.id, RecordId::Int(7));
    assert_eq!(Value::Object(record.fields), sent);
}

#[tokio::test]
async fn update_patches_single_record_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{}/tables/RESERVATIONS/records/R1", DOC)))
        .and(body_json(json!({ "fin": "2024-01-01T10:30:00Z" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server)
        .update(
            Collection::Reservations,
            RecordId::from("R1"),
            fields(json!({ "fin": "2024-01-01T10:30:00Z" })),
        )
        .await
        .unwrap();

    assert_eq!(record.id, RecordId::from("R1"));
    assert_eq!(record.text("fin"), "2024-01-01T10:30:00Z");
}

#[tokio::test]
async fn delete_hits_record_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/tables/RESERVATIONS/records/3", DOC)))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete(Collection::Reservations, RecordId::Int(3))
        .await
        .unwrap();
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client(&server).list(Collection::Teams).await;

    assert!(matches!(result, Err(ApiError::AuthenticationFailed)));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client(&server)
        .update(Collection::Reservations, RecordId::Int(1), Map::new())
        .await;

    match result {
        Err(ApiError::RequestError(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client(&server)
        .delete(Collection::Reservations, RecordId::Int(99))
        .await;

    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
