//! End-to-end tests for `/orders`.

use galley::{app, AppState};
use galley_config::ServerConfig;
use galley_test::TestClient;
use http::StatusCode;
use proptest::prelude::*;
use serde_json::{json, Value};

fn client_with(state: &AppState) -> TestClient {
    TestClient::new(app(state, ServerConfig::default()))
}

fn client() -> TestClient {
    client_with(&AppState::new())
}

fn order() -> Value {
    json!({
        "deliverTo": "308 Negra Arroyo Lane",
        "mobileNumber": "(505) 143-3369",
        "dishes": [
            { "id": "1", "name": "Soup", "price": 4, "quantity": 2 },
            { "id": "2", "name": "Salad", "price": 6, "quantity": 1 }
        ]
    })
}

async fn create(client: &TestClient, order: Value) -> Value {
    client
        .post("/orders")
        .json(&json!({ "data": order }))
        .send()
        .await
        .assert_status(StatusCode::CREATED)
        .data()
}

async fn created_id(client: &TestClient) -> String {
    create(client, order()).await["id"].as_str().unwrap().to_string()
}

async fn set_status(client: &TestClient, id: &str, status: &str) -> Value {
    let mut body = order();
    body["status"] = json!(status);
    client
        .put(format!("/orders/{id}"))
        .json(&json!({ "data": body }))
        .send()
        .await
        .assert_status(StatusCode::OK)
        .data()
}

#[tokio::test]
async fn test_create_defaults_to_pending() {
    let client = client();
    let created = create(&client, order()).await;

    assert_eq!(created["status"], "pending");
    assert_eq!(created["deliverTo"], "308 Negra Arroyo Lane");
    // Lines keep every field the client sent.
    assert_eq!(created["dishes"], order()["dishes"]);

    let id = created["id"].as_str().unwrap();
    let read = client.get(format!("/orders/{id}")).send().await.data();
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_create_keeps_given_status() {
    let mut body = order();
    body["status"] = json!("preparing");
    let created = create(&client(), body).await;
    assert_eq!(created["status"], "preparing");
}

#[tokio::test]
async fn test_create_rejects_unknown_status() {
    let mut body = order();
    body["status"] = json!("lost");
    client()
        .post("/orders")
        .json(&json!({ "data": body }))
        .send()
        .await
        .assert_error(
            StatusCode::BAD_REQUEST,
            "Order must have a status of pending, preparing, out-for-delivery, delivered",
        );
}

#[tokio::test]
async fn test_create_requires_fields() {
    let client = client();
    let cases = [
        ("deliverTo", "Order must include a deliverTo."),
        ("mobileNumber", "Order must include a mobileNumber."),
        ("dishes", "Order must include a dish."),
    ];
    for (field, message) in cases {
        let mut body = order();
        body.as_object_mut().unwrap().remove(field);
        client
            .post("/orders")
            .json(&json!({ "data": body }))
            .send()
            .await
            .assert_error(StatusCode::BAD_REQUEST, message);
    }
}

#[tokio::test]
async fn test_create_rejects_bad_dishes() {
    let client = client();
    for dishes in [json!([]), json!({ "id": "1" }), json!("soup")] {
        let mut body = order();
        body["dishes"] = dishes;
        client
            .post("/orders")
            .json(&json!({ "data": body }))
            .send()
            .await
            .assert_error(StatusCode::BAD_REQUEST, "Order must include at least one dish");
        assert_eq!(client.get("/orders").send().await.data(), json!([]));
    }
}

#[tokio::test]
async fn test_create_reports_bad_quantity_index() {
    let mut body = order();
    body["dishes"][1]["quantity"] = json!(0);
    client()
        .post("/orders")
        .json(&json!({ "data": body }))
        .send()
        .await
        .assert_error(
            StatusCode::BAD_REQUEST,
            "Dish 1 must have a quantity that is an integer greater than 0",
        );
}

#[tokio::test]
async fn test_read_missing() {
    client()
        .get("/orders/abc")
        .send()
        .await
        .assert_error(StatusCode::NOT_FOUND, "Order does not exist: abc.");
}

#[tokio::test]
async fn test_update_replaces_order() {
    let client = client();
    let id = created_id(&client).await;

    let mut body = order();
    body["status"] = json!("out-for-delivery");
    body["dishes"] = json!([{ "id": "3", "quantity": 5 }]);
    let updated = client
        .put(format!("/orders/{id}"))
        .json(&json!({ "data": body }))
        .send()
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["status"], "out-for-delivery");
    assert_eq!(updated["dishes"], json!([{ "id": "3", "quantity": 5 }]));

    let read = client.get(format!("/orders/{id}")).send().await.data();
    assert_eq!(read, updated);
}

#[tokio::test]
async fn test_update_requires_status() {
    let client = client();
    let id = created_id(&client).await;

    client
        .put(format!("/orders/{id}"))
        .json(&json!({ "data": order() }))
        .send()
        .await
        .assert_error(
            StatusCode::BAD_REQUEST,
            "Order must have a status of pending, preparing, out-for-delivery, delivered",
        );
}

#[tokio::test]
async fn test_update_rejects_bad_quantity() {
    let client = client();
    let created = create(&client, order()).await;
    let id = created["id"].as_str().unwrap();

    for quantity in [json!(0), json!("2"), Value::Null] {
        let mut body = order();
        body["status"] = json!("pending");
        body["dishes"] = json!([{ "id": "1", "quantity": quantity }]);
        client
            .put(format!("/orders/{id}"))
            .json(&json!({ "data": body }))
            .send()
            .await
            .assert_error(
                StatusCode::BAD_REQUEST,
                "Dish 0 must have a quantity that is an integer greater than 0",
            );
        let read = client.get(format!("/orders/{id}")).send().await.data();
        assert_eq!(read, created);
    }
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let client = client();
    let id = created_id(&client).await;

    let first = set_status(&client, &id, "preparing").await;
    let after_first = client.get("/orders").send().await.data();
    let second = set_status(&client, &id, "preparing").await;
    let after_second = client.get("/orders").send().await.data();

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
    assert_eq!(after_second, json!([second]));
}

#[tokio::test]
async fn test_update_id_mismatch() {
    let client = client();
    let id = created_id(&client).await;

    let mut body = order();
    body["id"] = json!("nope");
    body["status"] = json!("pending");
    client
        .put(format!("/orders/{id}"))
        .json(&json!({ "data": body }))
        .send()
        .await
        .assert_error(
            StatusCode::BAD_REQUEST,
            &format!("Order id does not match route id. Order: nope, Route: {id}."),
        );
}

#[tokio::test]
async fn test_update_id_mismatch_precedes_status() {
    let client = client();
    let id = created_id(&client).await;

    let mut body = order();
    body["id"] = json!("nope");
    let response = client
        .put(format!("/orders/{id}"))
        .json(&json!({ "data": body }))
        .send()
        .await;
    assert!(response.error_message().starts_with("Order id does not match"));
}

#[tokio::test]
async fn test_update_without_persistence_echoes_only() {
    let mut state = AppState::new();
    state.persist_order_updates = false;
    let client = client_with(&state);
    let id = created_id(&client).await;

    let echoed = set_status(&client, &id, "delivered").await;
    assert_eq!(echoed["status"], "delivered");

    let read = client.get(format!("/orders/{id}")).send().await.data();
    assert_eq!(read["status"], "pending");
}

#[tokio::test]
async fn test_delete_pending_order() {
    let client = client();
    let id = created_id(&client).await;

    let response = client.delete(format!("/orders/{id}")).send().await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.body().is_empty());

    client
        .get(format!("/orders/{id}"))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_pending() {
    let client = client();
    let id = created_id(&client).await;
    set_status(&client, &id, "preparing").await;

    client
        .delete(format!("/orders/{id}"))
        .send()
        .await
        .assert_error(
            StatusCode::BAD_REQUEST,
            "An order cannot be deleted unless it is pending.",
        );
    assert_eq!(client.get("/orders").send().await.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_missing() {
    client()
        .delete("/orders/9")
        .send()
        .await
        .assert_error(StatusCode::NOT_FOUND, "Order does not exist: 9.");
}

#[tokio::test]
async fn test_stores_are_independent() {
    let client = client();
    created_id(&client).await;

    assert_eq!(client.get("/dishes").send().await.data(), json!([]));
    assert_eq!(client.get("/orders").send().await.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = client().get("/orders").send().await;
    assert!(response.header_str("x-request-id").is_some());
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_first_bad_quantity_is_reported(
        good in proptest::collection::vec(1u64..100, 0..6),
        bad in prop_oneof![Just(json!(0)), Just(json!(-3)), Just(json!(2.5)), Just(json!("1"))],
        tail in proptest::collection::vec(0u64..3, 0..4),
    ) {
        let mut dishes: Vec<Value> = good.iter().map(|q| json!({ "quantity": q })).collect();
        let index = dishes.len();
        dishes.push(json!({ "quantity": bad }));
        dishes.extend(tail.iter().map(|q| json!({ "quantity": q })));

        let mut body = order();
        body["dishes"] = Value::Array(dishes);

        let message = run(async {
            client()
                .post("/orders")
                .json(&json!({ "data": body }))
                .send()
                .await
                .error_message()
        });
        prop_assert_eq!(
            message,
            format!("Dish {index} must have a quantity that is an integer greater than 0")
        );
    }

    #[test]
    fn prop_created_orders_read_back(
        quantities in proptest::collection::vec(1u64..1000, 1..8),
        status in prop_oneof![
            Just("pending"), Just("preparing"), Just("out-for-delivery"), Just("delivered")
        ],
    ) {
        let dishes: Vec<Value> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| json!({ "id": i.to_string(), "quantity": q }))
            .collect();
        let mut body = order();
        body["dishes"] = Value::Array(dishes.clone());
        body["status"] = json!(status);

        let (created, read) = run(async move {
            let client = client();
            let created = create(&client, body).await;
            let id = created["id"].as_str().unwrap().to_string();
            let read = client.get(format!("/orders/{id}")).send().await.data();
            (created, read)
        });
        prop_assert_eq!(&created, &read);
        prop_assert_eq!(&created["dishes"], &Value::Array(dishes));
        prop_assert_eq!(&created["status"], &json!(status));
    }
}
