//! Discount strategies for an [`Order`].
//!
//! Each promotion is a plain strategy over the order value; `Best` tries all
//! of them and keeps the largest discount.

use crate::domain::order::{Customer, LineItem, Order};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const FIDELITY_THRESHOLD: u32 = 1000;
pub const BULK_ITEM_THRESHOLD: u32 = 20;
pub const LARGE_ORDER_DISTINCT_PRODUCTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Promotion {
    /// 5% off for customers with at least 1000 fidelity points
    Fidelity,
    /// 10% off every line with 20 or more units
    BulkItem,
    /// 7% off orders with 10 or more distinct products
    LargeOrder,
    /// Largest of the three above
    Best,
}

impl Promotion {
    pub const STRATEGIES: [Promotion; 3] =
        [Promotion::Fidelity, Promotion::BulkItem, Promotion::LargeOrder];

    pub fn discount(&self, order: &Order) -> f64 {
        match self {
            Promotion::Fidelity => fidelity_promo(order),
            Promotion::BulkItem => bulk_item_promo(order),
            Promotion::LargeOrder => large_order_promo(order),
            Promotion::Best => Self::STRATEGIES
                .iter()
                .map(|p| p.discount(order))
                .fold(0.0, f64::max),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Promotion::Fidelity => "fidelity",
            Promotion::BulkItem => "bulk-item",
            Promotion::LargeOrder => "large-order",
            Promotion::Best => "best",
        }
    }
}

fn fidelity_promo(order: &Order) -> f64 {
    if order.customer.fidelity >= FIDELITY_THRESHOLD {
        order.total() * 0.05
    } else {
        0.0
    }
}

fn bulk_item_promo(order: &Order) -> f64 {
    order
        .cart
        .iter()
        .filter(|item| item.quantity >= BULK_ITEM_THRESHOLD)
        .map(|item| item.total() * 0.1)
        .sum()
}

fn large_order_promo(order: &Order) -> f64 {
    let distinct: HashSet<&str> = order.cart.iter().map(|i| i.product.as_str()).collect();
    if distinct.len() >= LARGE_ORDER_DISTINCT_PRODUCTS {
        order.total() * 0.07
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub caption: String,
    pub order: Order,
}

/// The five checkout stories of the exercise.
pub fn classic_scenarios() -> Vec<Scenario> {
    let joe = Customer::new("John Doe", 0);
    let ann = Customer::new("Ann Smith", 1100);
    let cart = vec![
        LineItem::new("banana", 4, 0.50),
        LineItem::new("apple", 10, 1.50),
        LineItem::new("watermelon", 5, 5.00),
    ];
    let banana_cart = vec![
        LineItem::new("banana", 30, 0.50),
        LineItem::new("apple", 10, 1.50),
    ];
    // A..J, one of each
    let large_order: Vec<LineItem> = (b'A'..b'A' + 10)
        .map(|c| LineItem::new(char::from(c).to_string(), 1, 1.0))
        .collect();

    vec![
        Scenario {
            caption: format!("{} has {} fidelity points", joe.name, joe.fidelity),
            order: Order::new(joe.clone(), cart.clone()).with_promo(Promotion::Fidelity),
        },
        Scenario {
            caption: format!("{} has {} fidelity points", ann.name, ann.fidelity),
            order: Order::new(ann, cart.clone()).with_promo(Promotion::Fidelity),
        },
        Scenario {
            caption: format!("{} buys many units of the same product", joe.name),
            order: Order::new(joe.clone(), banana_cart).with_promo(Promotion::BulkItem),
        },
        Scenario {
            caption: format!("{} places an order with many distinct items", joe.name),
            order: Order::new(joe.clone(), large_order).with_promo(Promotion::LargeOrder),
        },
        Scenario {
            caption: "only 3 distinct items, no discount here!".to_string(),
            order: Order::new(joe, cart).with_promo(Promotion::LargeOrder),
        },
    ]
}
