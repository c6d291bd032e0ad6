// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for cart arithmetic.

use kisanmitra_test_utils::{TestHarness, fixtures};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    Set(usize, i64),
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4).prop_map(Op::Add),
        (0usize..4).prop_map(Op::Remove),
        (0usize..4, -2i64..6).prop_map(|(i, q)| Op::Set(i, q)),
        (0usize..4).prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn lines_stay_positive_and_totals_agree(ops in prop::collection::vec(op(), 0..40)) {
        let h = TestHarness::new();
        let products: Vec<_> = (0..4)
            .map(|n| fixtures::product(&format!("p{n}"), 10 * (n + 1), 12 * (n + 1)))
            .collect();

        for op in ops {
            match op {
                Op::Add(i) => h.cart.add_to_cart(&products[i]).expect("valid product"),
                Op::Remove(i) => h.cart.remove_from_cart(&products[i].id),
                Op::Set(i, q) => h.cart.update_quantity(&products[i].id, q),
                Op::Delete(i) => h.cart.delete_item(&products[i].id),
            }
        }

        let cart = h.cart.get_cart();
        prop_assert!(cart.iter().all(|i| i.quantity >= 1));
        let mut ids: Vec<_> = cart.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), cart.len());

        let subtotal: Decimal = cart.iter().map(|i| i.price * Decimal::from(i.quantity)).sum();
        prop_assert_eq!(h.cart.get_cart_subtotal(), subtotal);
        prop_assert!(h.cart.get_cart_savings() >= Decimal::ZERO);
        prop_assert_eq!(h.cart.get_cart_count(), cart.iter().map(|i| u64::from(i.quantity)).sum::<u64>());
    }
}
