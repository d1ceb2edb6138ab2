use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use foodcourt_api_gateway::{AppState, app};
use foodcourt_client::ClientConfig;
use foodcourt_core::models::Role;
use foodcourt_mock_services::MockState;

struct Gateway {
    mock: MockState,
    base: String,
    http: reqwest::Client,
}

impl Gateway {
    async fn start() -> Self {
        let mock = MockState::new();
        let mock_addr = foodcourt_mock_services::spawn(mock.clone())
            .await
            .expect("mock services should bind");
        let config = ClientConfig::for_endpoint(format!("http://{mock_addr}"));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app(AppState::new(&config)))
                .await
                .unwrap();
        });

        Self {
            mock,
            base: format!("http://{addr}"),
            http: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let response = self
            .http
            .get(format!("{}{path}", self.base))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self.http.post(format!("{}{path}", self.base)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn patch(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .patch(format!("{}{path}", self.base))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let response = self
            .http
            .delete(format!("{}{path}", self.base))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .http
            .post(format!("{}/auth/token", self.base))
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn seed_restaurant(&self, admin_token: &str, name: &str) -> Uuid {
        let (status, body) = self
            .post(
                "/restaurants",
                admin_token,
                Some(json!({ "name": name, "address": "Local 1" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().parse().unwrap()
    }

    async fn seed_dish(&self, admin_token: &str, restaurant: Uuid, id: &str, price: i64) {
        let (status, _) = self
            .post(
                &format!("/restaurants/{restaurant}/dishes"),
                admin_token,
                Some(json!({
                    "id": id,
                    "name": format!("Dish {id}"),
                    "description": "",
                    "category": "PLATO_FUERTE",
                    "price": price,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn full_order_flow_through_the_gateway() {
    let gw = Gateway::start().await;

    let admin = gw.mock.seed_user("admin", "admin", Role::Administrador, None);
    let admin_token = gw.mock.issue_token_for(admin);

    let pizzeria = gw.seed_restaurant(&admin_token, "Pizzeria Roma").await;
    gw.seed_dish(&admin_token, pizzeria, "pizza", 10_000).await;
    gw.seed_dish(&admin_token, pizzeria, "flan", 5_000).await;
    let burgers = gw.seed_restaurant(&admin_token, "Burger Norte").await;
    gw.seed_dish(&admin_token, burgers, "burger", 9_000).await;

    let employee = gw
        .mock
        .seed_user("luis", "secret", Role::Empleado, Some(pizzeria));
    let employee_token = gw.mock.issue_token_for(employee);

    // Customer provisioning and login go through the gateway proxy.
    let (status, _) = gw
        .post(
            "/users",
            &admin_token,
            Some(json!({ "username": "ana", "password": "secret", "role": "CLIENTE", "restaurant_id": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let customer_token = gw.login("ana", "secret").await;

    // Browse the food court.
    let (status, body) = gw.get("/restaurants", &customer_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 2);

    // Build the cart: 3 pizzas + 1 flan = 35 000.
    let (status, body) = gw
        .post(
            "/cart/items",
            &customer_token,
            Some(json!({ "restaurant_id": pizzeria, "dish_id": "pizza", "quantity": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], 20_000);
    assert_eq!(body["restaurant_name"], "Pizzeria Roma");

    // A dish from another restaurant is refused loudly, without mutating.
    let (status, body) = gw
        .post(
            "/cart/items",
            &customer_token,
            Some(json!({ "restaurant_id": burgers, "dish_id": "burger", "quantity": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("restaurant"));
    let (_, body) = gw.get("/cart", &customer_token).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_amount"], 20_000);

    let (status, body) = gw
        .patch(
            "/cart/items/pizza",
            &customer_token,
            json!({ "quantity": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], 30_000);
    let (status, body) = gw
        .post(
            "/cart/items",
            &customer_token,
            Some(json!({ "restaurant_id": pizzeria, "dish_id": "flan", "quantity": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], 35_000);
    assert_eq!(body["item_count"], 4);

    // Submit: the order is re-priced by the service and the cart is cleared.
    let (status, order) = gw.post("/orders", &customer_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "PENDIENTE");
    assert_eq!(order["total_amount"], 35_000);
    assert!(order["pin"].is_null());
    let order_id = order["id"].as_str().unwrap().to_string();
    let (_, body) = gw.get("/cart", &customer_token).await;
    assert!(body["items"].as_array().unwrap().is_empty());
    assert!(body["restaurant_id"].is_null());

    // Resubmitting an empty cart is rejected locally.
    let (status, body) = gw.post("/orders", &customer_token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cart is empty");

    // The kitchen board shows the order in the PENDIENTE queue with its
    // permitted actions; customers cannot reach employee endpoints.
    let (status, board) = gw
        .get(&format!("/restaurants/{pizzeria}/board"), &employee_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["pendiente"].as_array().unwrap().len(), 1);
    let actions = board["pendiente"][0]["actions"].as_array().unwrap();
    assert!(actions.iter().any(|a| a == "take"));
    assert!(actions.iter().any(|a| a == "cancel"));

    let (status, _) = gw
        .post(
            &format!("/restaurants/{pizzeria}/orders/{order_id}/take"),
            &customer_token,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = gw
        .post(
            &format!("/restaurants/{pizzeria}/orders/{order_id}/take"),
            &employee_token,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "EN_PREPARACION");
    assert_eq!(body["employee_id"].as_str().unwrap(), employee.to_string());

    // Cancelling is no longer legal once preparation started.
    let (status, _) = gw
        .post(&format!("/orders/{order_id}/cancel"), &customer_token, None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Ready: the PIN goes to the customer view only.
    let (status, body) = gw
        .post(
            &format!("/restaurants/{pizzeria}/orders/{order_id}/ready"),
            &employee_token,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "LISTO");
    assert!(body["pin"].is_null());

    let (_, body) = gw.get("/orders", &customer_token).await;
    let listed = &body["orders"][0];
    assert_eq!(listed["status"], "LISTO");
    let pin = listed["pin"].as_str().unwrap().to_string();
    assert!(foodcourt_core::pin::is_well_formed(&pin));

    let (_, board) = gw
        .get(&format!("/restaurants/{pizzeria}/board"), &employee_token)
        .await;
    assert!(board["listo"][0]["pin"].is_null());

    // Malformed PIN is refused before the service; wrong PIN is a
    // business-rule rejection that leaves the order LISTO.
    let (status, _) = gw
        .post(
            &format!("/restaurants/{pizzeria}/orders/{order_id}/deliver"),
            &employee_token,
            Some(json!({ "pin": "ab" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = gw
        .post(
            &format!("/restaurants/{pizzeria}/orders/{order_id}/deliver"),
            &employee_token,
            Some(json!({ "pin": "WRONG1" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("PIN"));
    let (_, body) = gw.get("/orders", &customer_token).await;
    assert_eq!(body["orders"][0]["status"], "LISTO");
    assert_eq!(body["orders"][0]["pin"].as_str().unwrap(), pin);

    // Correct PIN: terminal hand-off; the PIN disappears from the view and
    // further delivery attempts are rejected.
    let (status, body) = gw
        .post(
            &format!("/restaurants/{pizzeria}/orders/{order_id}/deliver"),
            &employee_token,
            Some(json!({ "pin": pin })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ENTREGADO");

    let (_, body) = gw.get("/orders", &customer_token).await;
    assert_eq!(body["orders"][0]["status"], "ENTREGADO");
    assert!(body["orders"][0]["pin"].is_null());

    let (status, _) = gw
        .post(
            &format!("/restaurants/{pizzeria}/orders/{order_id}/deliver"),
            &employee_token,
            Some(json!({ "pin": pin })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn customer_can_cancel_while_pending() {
    let gw = Gateway::start().await;
    let admin = gw.mock.seed_user("admin", "admin", Role::Administrador, None);
    let admin_token = gw.mock.issue_token_for(admin);
    let restaurant = gw.seed_restaurant(&admin_token, "Wok Express").await;
    gw.seed_dish(&admin_token, restaurant, "arroz", 8_000).await;

    let customer = gw.mock.seed_user("ana", "secret", Role::Cliente, None);
    let customer_token = gw.mock.issue_token_for(customer);
    let other = gw.mock.seed_user("eva", "secret", Role::Cliente, None);
    let other_token = gw.mock.issue_token_for(other);

    let (status, _) = gw
        .post(
            "/cart/items",
            &customer_token,
            Some(json!({ "restaurant_id": restaurant, "dish_id": "arroz", "quantity": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, order) = gw.post("/orders", &customer_token, None).await;
    assert_eq!(status, StatusCode::OK);
    let order_id = order["id"].as_str().unwrap();

    // Another customer cannot cancel someone else's order.
    let (status, _) = gw
        .post(&format!("/orders/{order_id}/cancel"), &other_token, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = gw
        .post(&format!("/orders/{order_id}/cancel"), &customer_token, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CANCELADO");

    // Terminal: a second cancel is rejected.
    let (status, _) = gw
        .post(&format!("/orders/{order_id}/cancel"), &customer_token, None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn owner_menu_edits_do_not_touch_captured_prices() {
    let gw = Gateway::start().await;
    let admin = gw.mock.seed_user("admin", "admin", Role::Administrador, None);
    let admin_token = gw.mock.issue_token_for(admin);
    let restaurant = gw.seed_restaurant(&admin_token, "Pizzeria Roma").await;
    gw.seed_dish(&admin_token, restaurant, "pizza", 10_000).await;

    let owner = gw
        .mock
        .seed_user("dora", "secret", Role::Dueno, Some(restaurant));
    let owner_token = gw.mock.issue_token_for(owner);
    let customer = gw.mock.seed_user("ana", "secret", Role::Cliente, None);
    let customer_token = gw.mock.issue_token_for(customer);

    let (status, _) = gw
        .post(
            "/cart/items",
            &customer_token,
            Some(json!({ "restaurant_id": restaurant, "dish_id": "pizza", "quantity": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, order) = gw.post("/orders", &customer_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["total_amount"], 20_000);

    // The owner raises the price afterwards; the placed order keeps the
    // captured one.
    let (status, body) = gw
        .patch(
            &format!("/restaurants/{restaurant}/dishes/pizza"),
            &owner_token,
            json!({ "price": 12_000 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 12_000);

    let (_, body) = gw.get("/orders", &customer_token).await;
    assert_eq!(body["orders"][0]["total_amount"], 20_000);

    // Owners cannot edit other restaurants.
    let foreign = gw.seed_restaurant(&admin_token, "Burger Norte").await;
    gw.seed_dish(&admin_token, foreign, "burger", 9_000).await;
    let (status, _) = gw
        .patch(
            &format!("/restaurants/{foreign}/dishes/burger"),
            &owner_token,
            json!({ "price": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // An unavailable dish can no longer be added to carts.
    let (status, _) = gw
        .patch(
            &format!("/restaurants/{restaurant}/dishes/pizza"),
            &owner_token,
            json!({ "available": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = gw
        .post(
            "/cart/items",
            &customer_token,
            Some(json!({ "restaurant_id": restaurant, "dish_id": "pizza", "quantity": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_edits_and_clearing() {
    let gw = Gateway::start().await;
    let admin = gw.mock.seed_user("admin", "admin", Role::Administrador, None);
    let admin_token = gw.mock.issue_token_for(admin);
    let restaurant = gw.seed_restaurant(&admin_token, "Wok Express").await;
    gw.seed_dish(&admin_token, restaurant, "arroz", 8_000).await;
    gw.seed_dish(&admin_token, restaurant, "sopa", 6_000).await;

    let customer = gw.mock.seed_user("ana", "secret", Role::Cliente, None);
    let token = gw.mock.issue_token_for(customer);

    gw.post(
        "/cart/items",
        &token,
        Some(json!({ "restaurant_id": restaurant, "dish_id": "arroz", "quantity": 1 })),
    )
    .await;
    gw.post(
        "/cart/items",
        &token,
        Some(json!({ "restaurant_id": restaurant, "dish_id": "sopa", "quantity": 2 })),
    )
    .await;

    // Removing one line keeps the binding; removing the last releases it.
    let (status, body) = gw.delete("/cart/items/sopa", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurant_id"].as_str().unwrap(), restaurant.to_string());

    let (status, body) = gw
        .patch("/cart/items/arroz", &token, json!({ "quantity": 0 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert!(body["restaurant_id"].is_null());
    assert!(body["restaurant_name"].is_null());

    // Unknown lines are reported, not ignored.
    let (status, _) = gw.delete("/cart/items/ghost", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Clearing is unconditional.
    gw.post(
        "/cart/items",
        &token,
        Some(json!({ "restaurant_id": restaurant, "dish_id": "arroz", "quantity": 5 })),
    )
    .await;
    let (status, body) = gw.delete("/cart", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_count"], 0);
    assert!(body["restaurant_id"].is_null());
}
