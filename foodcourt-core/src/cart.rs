use thiserror::Error;
use uuid::Uuid;

use crate::models::Dish;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart holds dishes from restaurant {in_cart}, cannot add from restaurant {attempted}")]
    CrossRestaurantConflict { in_cart: Uuid, attempted: Uuid },
    #[error("Quantity must be positive")]
    InvalidQuantity,
    #[error("Dish {0} is not in the cart")]
    NoSuchItem(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub dish_id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantBinding {
    pub id: Uuid,
    pub name: String,
}

/// In-progress selection for one customer session. All items of a non-empty
/// cart belong to the bound restaurant; removing the last item releases the
/// binding.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    restaurant: Option<RestaurantBinding>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `dish`, summing with an existing line for the
    /// same dish. Fails without mutating when the cart is bound to another
    /// restaurant; the caller decides whether to clear and retry.
    pub fn add_item(
        &mut self,
        dish: &Dish,
        quantity: u32,
        restaurant_name: &str,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if let Some(binding) = &self.restaurant {
            if binding.id != dish.restaurant_id {
                return Err(CartError::CrossRestaurantConflict {
                    in_cart: binding.id,
                    attempted: dish.restaurant_id,
                });
            }
        }

        match self.items.iter_mut().find(|item| item.dish_id == dish.id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem {
                dish_id: dish.id.clone(),
                name: dish.name.clone(),
                unit_price: dish.price,
                quantity,
            }),
        }
        self.restaurant = Some(RestaurantBinding {
            id: dish.restaurant_id,
            name: restaurant_name.to_string(),
        });
        Ok(())
    }

    pub fn remove_item(&mut self, dish_id: &str) -> Result<(), CartError> {
        let index = self
            .items
            .iter()
            .position(|item| item.dish_id == dish_id)
            .ok_or_else(|| CartError::NoSuchItem(dish_id.to_string()))?;
        self.items.remove(index);
        if self.items.is_empty() {
            self.restaurant = None;
        }
        Ok(())
    }

    /// Replaces the stored quantity; zero or negative behaves as removal.
    pub fn update_quantity(&mut self, dish_id: &str, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_item(dish_id);
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.dish_id == dish_id)
            .ok_or_else(|| CartError::NoSuchItem(dish_id.to_string()))?;
        item.quantity = quantity as u32;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant = None;
    }

    pub fn total_amount(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.unit_price * item.quantity as i64)
            .sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn restaurant(&self) -> Option<&RestaurantBinding> {
        self.restaurant.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DishCategory;

    fn dish(id: &str, restaurant_id: Uuid, price: i64) -> Dish {
        Dish {
            id: id.to_string(),
            restaurant_id,
            name: format!("Dish {id}"),
            description: String::new(),
            image: None,
            category: DishCategory::PlatoFuerte,
            price,
            available: true,
        }
    }

    #[test]
    fn add_item_binds_restaurant() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();

        cart.add_item(&dish("pizza-1", restaurant, 12_000), 2, "Pizzeria")
            .unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        let binding = cart.restaurant().unwrap();
        assert_eq!(binding.id, restaurant);
        assert_eq!(binding.name, "Pizzeria");
    }

    #[test]
    fn add_from_other_restaurant_fails_without_mutating() {
        let pizzeria = Uuid::new_v4();
        let burgers = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("pizza-1", pizzeria, 12_000), 2, "Pizzeria")
            .unwrap();

        let err = cart
            .add_item(&dish("burger-2", burgers, 9_000), 1, "Burger")
            .unwrap_err();

        assert_eq!(
            err,
            CartError::CrossRestaurantConflict {
                in_cart: pizzeria,
                attempted: burgers,
            }
        );
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].dish_id, "pizza-1");
        assert_eq!(cart.restaurant().unwrap().id, pizzeria);
    }

    #[test]
    fn clearing_allows_a_new_restaurant() {
        let pizzeria = Uuid::new_v4();
        let burgers = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("pizza-1", pizzeria, 12_000), 1, "Pizzeria")
            .unwrap();

        cart.clear();
        cart.add_item(&dish("burger-2", burgers, 9_000), 1, "Burger")
            .unwrap();

        assert_eq!(cart.restaurant().unwrap().id, burgers);
    }

    #[test]
    fn adding_same_dish_sums_quantities() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();
        let pizza = dish("pizza-1", restaurant, 12_000);

        cart.add_item(&pizza, 2, "Pizzeria").unwrap();
        cart.add_item(&pizza, 3, "Pizzeria").unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn zero_quantity_add_is_rejected() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();

        let err = cart
            .add_item(&dish("pizza-1", restaurant, 12_000), 0, "Pizzeria")
            .unwrap_err();

        assert_eq!(err, CartError::InvalidQuantity);
        assert!(cart.is_empty());
        assert!(cart.restaurant().is_none());
    }

    #[test]
    fn total_is_a_linear_fold() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("a", restaurant, 10_000), 2, "R").unwrap();
        cart.add_item(&dish("b", restaurant, 5_000), 3, "R").unwrap();

        assert_eq!(cart.total_amount(), 35_000);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn removing_last_item_releases_binding() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("a", restaurant, 10_000), 2, "R").unwrap();
        cart.add_item(&dish("b", restaurant, 5_000), 1, "R").unwrap();

        cart.remove_item("a").unwrap();
        assert!(cart.restaurant().is_some());

        cart.remove_item("b").unwrap();
        assert!(cart.is_empty());
        assert!(cart.restaurant().is_none());
    }

    #[test]
    fn update_quantity_replaces_or_removes() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("a", restaurant, 10_000), 2, "R").unwrap();

        cart.update_quantity("a", 7).unwrap();
        assert_eq!(cart.items()[0].quantity, 7);

        cart.update_quantity("a", 0).unwrap();
        assert!(cart.is_empty());
        assert!(cart.restaurant().is_none());
    }

    #[test]
    fn negative_quantity_update_removes() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("a", restaurant, 10_000), 2, "R").unwrap();

        cart.update_quantity("a", -1).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn update_of_unknown_dish_reports_no_match() {
        let restaurant = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("a", restaurant, 10_000), 2, "R").unwrap();

        let err = cart.update_quantity("missing", 3).unwrap_err();
        assert_eq!(err, CartError::NoSuchItem("missing".to_string()));

        let err = cart.remove_item("missing").unwrap_err();
        assert_eq!(err, CartError::NoSuchItem("missing".to_string()));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn rebinding_after_empty_updates_name() {
        let pizzeria = Uuid::new_v4();
        let burgers = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(&dish("a", pizzeria, 10_000), 1, "Pizzeria")
            .unwrap();
        cart.remove_item("a").unwrap();

        cart.add_item(&dish("b", burgers, 9_000), 1, "Burger").unwrap();

        let binding = cart.restaurant().unwrap();
        assert_eq!(binding.id, burgers);
        assert_eq!(binding.name, "Burger");
    }
}
