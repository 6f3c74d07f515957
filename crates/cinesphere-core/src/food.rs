//! Food order: Quantity-aggregated line items built during one booking.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::MenuItem;

/// One aggregated line of a [`FoodOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodLine {
  pub quantity:   u32,
  /// Captured on first add; later catalog price changes do not apply.
  pub unit_price: Decimal,
}

impl FoodLine {
  pub fn subtotal(&self) -> Decimal { self.unit_price * Decimal::from(self.quantity) }
}

/// Line items keyed by item name (case-sensitive). Iteration is in
/// lexicographic name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FoodOrder {
  items: BTreeMap<String, FoodLine>,
  total: Decimal,
}

impl FoodOrder {
  pub fn new() -> Self { Self::default() }

  /// Add `quantity` of `item`. Returns `false` and leaves the order unchanged
  /// when `quantity` is not positive or the line would exceed `u32::MAX`.
  pub fn add_item(&mut self, item: &MenuItem, quantity: i64) -> bool {
    let Ok(quantity) = u32::try_from(quantity) else {
      return false;
    };
    if quantity == 0 {
      return false;
    }

    let current = self.items.get(&item.name).map_or(0, |l| l.quantity);
    if current.checked_add(quantity).is_none() {
      return false;
    }

    let line = self
      .items
      .entry(item.name.clone())
      .or_insert(FoodLine { quantity: 0, unit_price: item.price });
    line.quantity += quantity;
    self.total += line.unit_price * Decimal::from(quantity);
    true
  }

  pub fn total_price(&self) -> Decimal { self.total }

  pub fn total_items(&self) -> u64 { self.items.values().map(|l| u64::from(l.quantity)).sum() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Lines in item-name order.
  pub fn lines(&self) -> impl Iterator<Item = (&str, &FoodLine)> {
    self.items.iter().map(|(name, line)| (name.as_str(), line))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn nachos() -> MenuItem { MenuItem::new("Nachos", Decimal::new(29000, 2), "Snack") }

  #[test]
  fn repeated_item_aggregates() {
    let mut order = FoodOrder::new();
    order.add_item(&nachos(), 2);
    order.add_item(&nachos(), 1);

    assert_eq!(order.total_items(), 3);
    assert_eq!(order.total_price(), Decimal::new(87000, 2));
    assert_eq!(order.lines().count(), 1);
  }

  #[test]
  fn non_positive_quantities_are_ignored() {
    let mut order = FoodOrder::new();
    assert!(!order.add_item(&nachos(), 0));
    assert!(!order.add_item(&nachos(), -3));
    assert!(order.is_empty());
    assert_eq!(order.total_price(), Decimal::ZERO);
  }

  #[test]
  fn oversized_quantity_is_refused() {
    let mut order = FoodOrder::new();
    assert!(!order.add_item(&nachos(), 5_000_000_000));
    assert!(order.is_empty());
    assert_eq!(order.total_price(), Decimal::ZERO);
  }

  #[test]
  fn line_quantity_never_overflows() {
    let mut order = FoodOrder::new();
    assert!(order.add_item(&nachos(), 3_000_000_000));
    assert!(!order.add_item(&nachos(), 3_000_000_000));

    assert_eq!(order.total_items(), 3_000_000_000);
    assert_eq!(order.total_price(), Decimal::new(29000, 2) * Decimal::from(3_000_000_000u32));
  }

  #[test]
  fn unit_price_is_frozen_at_first_add() {
    let mut order = FoodOrder::new();
    order.add_item(&nachos(), 1);

    let mut repriced = nachos();
    repriced.price = Decimal::new(99900, 2);
    order.add_item(&repriced, 1);

    let (_, line) = order.lines().next().unwrap();
    assert_eq!(line.unit_price, Decimal::new(29000, 2));
    assert_eq!(order.total_price(), Decimal::new(58000, 2));
  }

  #[test]
  fn lines_are_ordered_by_name() {
    let mut order = FoodOrder::new();
    order.add_item(&MenuItem::new("Veg Burger", Decimal::new(22000, 2), "Snack"), 1);
    order.add_item(&MenuItem::new("Coca-Cola", Decimal::new(15000, 2), "Beverage"), 2);
    order.add_item(&MenuItem::new("Fresh Lime Soda", Decimal::new(18000, 2), "Beverage"), 1);

    let names: Vec<&str> = order.lines().map(|(n, _)| n).collect();
    assert_eq!(names, ["Coca-Cola", "Fresh Lime Soda", "Veg Burger"]);
  }
}
