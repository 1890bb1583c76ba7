use crate::core::promotions::Promotion;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub fidelity: u32,
}

impl Customer {
    pub fn new(name: impl Into<String>, fidelity: u32) -> Self {
        Self {
            name: name.into(),
            fidelity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: String,
    pub quantity: u32,
    pub price: f64,
}

impl LineItem {
    pub fn new(product: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            product: product.into(),
            quantity,
            price,
        }
    }

    pub fn total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<LineItem product:{} quantity:{} price:{:.2}>",
            self.product, self.quantity, self.price
        )
    }
}

/// A customer, their cart and the promotion applied at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub customer: Customer,
    pub cart: Vec<LineItem>,
    pub promo: Option<Promotion>,
}

impl Order {
    pub fn new(customer: Customer, cart: Vec<LineItem>) -> Self {
        Self {
            customer,
            cart,
            promo: None,
        }
    }

    pub fn with_promo(mut self, promo: Promotion) -> Self {
        self.promo = Some(promo);
        self
    }

    pub fn total(&self) -> f64 {
        self.cart.iter().map(LineItem::total).sum()
    }

    pub fn discount(&self) -> f64 {
        self.promo.map(|p| p.discount(self)).unwrap_or(0.0)
    }

    pub fn due(&self) -> f64 {
        self.total() - self.discount()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Order total: {:.2} due: {:.2}>", self.total(), self.due())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_display() {
        let item = LineItem::new("banana", 4, 0.5);
        assert_eq!(item.to_string(), "<LineItem product:banana quantity:4 price:0.50>");
        assert_eq!(item.total(), 2.0);
    }

    #[test]
    fn test_order_without_promo_is_due_in_full() {
        let order = Order::new(
            Customer::new("John Doe", 0),
            vec![LineItem::new("banana", 4, 0.5), LineItem::new("apple", 10, 1.5)],
        );
        assert_eq!(order.total(), 17.0);
        assert_eq!(order.due(), 17.0);
        assert_eq!(order.to_string(), "<Order total: 17.00 due: 17.00>");
    }

    #[test]
    fn test_empty_cart() {
        let order = Order::new(Customer::new("Nobody", 5000), vec![]).with_promo(Promotion::Best);
        assert_eq!(order.total(), 0.0);
        assert_eq!(order.due(), 0.0);
    }
}
