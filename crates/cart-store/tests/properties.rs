use std::collections::BTreeSet;
use std::sync::Arc;

use cart_cache::{KeyValueStore, MemoryStore};
use cart_data::{StaticCatalog, StaticStock};
use cart_store::prelude::*;
use cart_store::DEFAULT_STORAGE_KEY;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn store_for(ids: &BTreeSet<i64>, stock: i64) -> (CartStore, Arc<MemoryStore>) {
    let catalog = StaticCatalog::new();
    let levels = StaticStock::new();
    for &id in ids {
        let id = ProductId::new(id);
        catalog.insert(ProductMetadata::new(id, format!("Tênis {id}"), 99.9, "t.jpg"));
        levels.set(id, stock);
    }
    let storage = Arc::new(MemoryStore::new());
    let store = CartStore::builder(catalog, levels, Arc::clone(&storage))
        .open()
        .unwrap();
    (store, storage)
}

proptest! {
    #[test]
    fn distinct_adds_each_hold_one(ids in prop::collection::btree_set(1i64..500, 0..16)) {
        let (store, storage) = store_for(&ids, 1);
        let order: Vec<i64> = ids.iter().rev().copied().collect();

        runtime().block_on(async {
            for &id in &order {
                store.add_product(ProductId::new(id)).await.unwrap();
            }
        });

        let cart = store.cart();
        let expected: Vec<ProductId> = order.iter().map(|&id| ProductId::new(id)).collect();
        prop_assert_eq!(cart.ids(), expected);
        prop_assert!(cart.iter().all(|item| item.amount == 1));

        let persisted = storage.get(DEFAULT_STORAGE_KEY).unwrap();
        if ids.is_empty() {
            prop_assert!(persisted.is_none());
        } else {
            let persisted: Cart = serde_json::from_str(&persisted.unwrap()).unwrap();
            prop_assert_eq!(&persisted, &*cart);
        }
    }

    #[test]
    fn amount_never_exceeds_stock(stock in 0i64..6, adds in 0usize..10) {
        let ids: BTreeSet<i64> = [7].into_iter().collect();
        let (store, _) = store_for(&ids, stock);
        let id = ProductId::new(7);

        let accepted = runtime().block_on(async {
            let mut accepted = 0i64;
            for _ in 0..adds {
                if store.add_product(id).await.is_ok() {
                    accepted += 1;
                }
            }
            accepted
        });

        prop_assert_eq!(accepted, (adds as i64).min(stock));
        prop_assert_eq!(store.cart().amount_of(id).unwrap_or(0), accepted);
    }
}
