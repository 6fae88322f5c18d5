use polars::prelude::*;
use sales_core::enricher::{self, CITY, CUSTOMER_NAME, PRODUCT_NAME, STATE};
use sales_workbook::{CustomerRow, ProductRow, RegionRow};

fn orders(
    products: &[Option<i64>],
    customers: &[Option<i64>],
    regions: &[Option<i64>],
) -> DataFrame {
    df![
        "order_number" => (0..products.len()).map(|i| format!("SO-{i}")).collect::<Vec<_>>(),
        "product_index" => products,
        "customer_index" => customers,
        "region_index" => regions,
    ]
    .expect("df")
}

fn products() -> Vec<ProductRow> {
    vec![
        ProductRow {
            index: 1,
            product_name: Some("Cookware".to_string()),
        },
        ProductRow {
            index: 2,
            product_name: Some("Bakeware".to_string()),
        },
    ]
}

fn customers() -> Vec<CustomerRow> {
    vec![CustomerRow {
        customer_index: 1,
        customer_name: Some("Avon Corp".to_string()),
    }]
}

fn region(index: i64, city: &str) -> RegionRow {
    RegionRow {
        index,
        city: Some(city.to_string()),
        county: None,
        state_code: Some("AL".to_string()),
        state: Some("Alabama".to_string()),
        time_zone: None,
    }
}

#[test]
fn left_join_keeps_every_order() {
    let df = orders(
        &[Some(1), Some(2), None],
        &[Some(1), Some(9), Some(1)],
        &[Some(1), Some(1), Some(2)],
    );
    let regions = vec![region(1, "Birmingham"), region(2, "Mobile")];

    let enriched =
        enricher::enrich_orders(&df, &products(), &customers(), &regions).expect("enrich");
    assert_eq!(enriched.height(), 3);

    let product = enriched.column(PRODUCT_NAME).unwrap().str().unwrap();
    assert_eq!(product.get(0), Some("Cookware"));
    assert_eq!(product.get(1), Some("Bakeware"));
    assert_eq!(product.get(2), None);

    let customer = enriched.column(CUSTOMER_NAME).unwrap().str().unwrap();
    assert_eq!(customer.get(1), None);
    assert_eq!(customer.get(2), Some("Avon Corp"));

    let city = enriched.column(CITY).unwrap().str().unwrap();
    assert_eq!(city.get(2), Some("Mobile"));
    let state = enriched.column(STATE).unwrap().str().unwrap();
    assert_eq!(state.get(0), Some("Alabama"));
}

#[test]
fn duplicate_dimension_keys_repeat_matching_orders() {
    let df = orders(&[Some(1), Some(2)], &[Some(1), Some(1)], &[Some(1), Some(2)]);
    let regions = vec![
        region(1, "Birmingham"),
        region(1, "Huntsville"),
        region(2, "Mobile"),
    ];

    let enriched =
        enricher::enrich_orders(&df, &products(), &customers(), &regions).expect("enrich");
    assert_eq!(enriched.height(), 3);

    let numbers: Vec<&str> = enriched
        .column("order_number")
        .unwrap()
        .str()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(numbers, vec!["SO-0", "SO-0", "SO-1"]);

    let cities: Vec<&str> = enriched
        .column(CITY)
        .unwrap()
        .str()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(cities, vec!["Birmingham", "Huntsville", "Mobile"]);
}

#[test]
fn empty_dimension_yields_null_attributes() {
    let df = orders(&[Some(1)], &[Some(1)], &[Some(1)]);

    let enriched = enricher::enrich_orders(&df, &[], &[], &[]).expect("enrich");
    assert_eq!(enriched.height(), 1);
    assert_eq!(enriched.column(PRODUCT_NAME).unwrap().null_count(), 1);
    assert_eq!(enriched.column(CITY).unwrap().null_count(), 1);
}
