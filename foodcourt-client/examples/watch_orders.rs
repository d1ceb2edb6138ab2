//! Order tracking from a terminal: signs a customer in, polls their orders
//! on the configured interval and prints every status change, showing the
//! delivery PIN while an order is ready for pickup.
//!
//! Run with the mock services up:
//!   cargo run -p foodcourt-mock-services
//!   AUTH_SERVICE_ENDPOINT=http://localhost:8101 \
//!   RESTAURANT_SERVICE_ENDPOINT=http://localhost:8101 \
//!   ORDER_SERVICE_ENDPOINT=http://localhost:8101 \
//!   FOODCOURT_USER=ana FOODCOURT_PASSWORD=secret \
//!   cargo run -p foodcourt-client --example watch_orders

use foodcourt_client::ClientConfig;
use foodcourt_client::auth::{AuthClient, Session};
use foodcourt_client::orders::OrderClient;
use foodcourt_client::poller::{OrderPoller, OrderScope};
use foodcourt_core::board::visible_pin;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env();
    let username = std::env::var("FOODCOURT_USER").expect("FOODCOURT_USER required");
    let password = std::env::var("FOODCOURT_PASSWORD").expect("FOODCOURT_PASSWORD required");

    let auth = AuthClient::new(&config);
    let mut session = Session::new();
    session.login(&auth, &username, &password).await?;
    let token = session.token().expect("token just issued").to_string();
    let me = auth.token_info(&token).await?;

    let orders = OrderClient::new(&config).with_token(token);
    let poller = OrderPoller::spawn(orders, OrderScope::Customer(me.user_id), config.poll_interval);
    let mut rx = poller.subscribe();

    println!("watching orders for {username} every {:?}", config.poll_interval);
    loop {
        rx.changed().await?;
        let snapshot = rx.borrow().clone();
        println!("-- update #{}", snapshot.version);
        for order in &snapshot.orders {
            match visible_pin(order) {
                Some(pin) => println!(
                    "  {} {:>14} total {:>8}  PIN: {pin}",
                    order.id,
                    order.status.as_str(),
                    order.total_amount()
                ),
                None => println!(
                    "  {} {:>14} total {:>8}",
                    order.id,
                    order.status.as_str(),
                    order.total_amount()
                ),
            }
        }
    }
}
