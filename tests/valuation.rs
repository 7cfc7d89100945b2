use std::fs;

use inventory_valuation::file::{InventoryFile, value_contents};
use inventory_valuation::handler;
use inventory_valuation::model::{Column, Diagnostic, HeaderIndex, HeaderState};
use inventory_valuation::source::read_feed;
use inventory_valuation::{RowCoercionError, ValuationError};
use tempfile::tempdir;

fn assert_total_eq(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 1e-9,
        "total value not as expected: expected {expected}, got {actual}"
    );
}

#[test]
fn values_rows_with_columns_in_declared_order() {
    let data = "
        dummy-col1\tdummy-col2\tquantity\tdummy-col3\tcost
        -\tsample value\t0\t-\t7
        -\tsample value\t1\tanother sample value\t0.15
        -\tsample value\t2\tanother sample value\t5.25
        ";

    let valuation = value_contents(data);

    assert_total_eq(10.65, valuation.total);
    assert_eq!(valuation.rows_evaluated, 3);
    assert!(valuation.diagnostics.is_empty());
}

#[test]
fn header_names_match_regardless_of_case_and_position() {
    let data = "
        dummy-col1\tCOST\tdummy-col3\tQuAnTiTy\tdummy-col4
        -\t0.00\t-\t17\t-
        -\t3\t-\t5\t-
        -\t5.21\t-\t1\t-
        ";

    let file = InventoryFile::parse(data);

    assert_eq!(
        file.header(),
        &HeaderState::Resolved(HeaderIndex {
            quantity_index: 3,
            cost_index: 1
        })
    );
    assert_total_eq(20.21, file.total_value());
}

#[test]
fn zero_quantities_and_costs_total_zero() {
    let data = "
        dummy-col1\tdummy-col2\tquantity\tdummy-col3\tcost
        -\tsample value\t4\t-\t0
        -\t-\t0\t-\t999.9
        ";

    assert_total_eq(0.0, value_contents(data).total);
}

#[test]
fn misspelled_cost_header_values_as_zero_and_names_cost() {
    let data = "
        dummy-col1\tdummy-col2\tquantity\tdummy-col3\tcsot
        -\tsample value\t99\t-\t99
        ";

    let valuation = value_contents(data);

    assert_eq!(valuation.total, 0.0);
    assert!(valuation.is_soft_zero());
    match valuation.diagnostics.as_slice() {
        [Diagnostic::MissingColumns { missing, message, .. }] => {
            assert_eq!(missing, &vec![Column::Cost]);
            assert!(message.contains("Cost"));
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
}

#[test]
fn substring_of_quantity_is_not_accepted() {
    let data = "
        dummy-col1\tdummy-col2\tunknown-quantity\tdummy-col3\tCOST
        -\tsample value\t99\t-\t99
        ";

    let valuation = value_contents(data);

    assert_eq!(valuation.total, 0.0);
    assert_eq!(valuation.rows_evaluated, 0);
    assert!(matches!(
        valuation.header,
        HeaderState::Unresolved(ref error) if error.missing() == [Column::Quantity]
    ));
}

#[test]
fn non_numeric_quantity_contributes_zero() {
    let data = "
        dummy-col1\tdummy-col2\tquantity\tdummy-col3\tcost
        -\tsample value\tZero\t-\t0
        ";

    let valuation = value_contents(data);

    assert_eq!(valuation.total, 0.0);
    assert_eq!(valuation.rows_evaluated, 1);
    match valuation.diagnostics.as_slice() {
        [Diagnostic::RowCoercion {
            line_number,
            quantity_index,
            cost_index,
            error,
            ..
        }] => {
            assert_eq!(*line_number, 2);
            assert_eq!((*quantity_index, *cost_index), (2, 4));
            assert_eq!(
                error,
                &RowCoercionError::NotNumeric {
                    column: Column::Quantity,
                    value: "Zero".into()
                }
            );
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
}

#[test]
fn short_row_does_not_disturb_other_rows() {
    let data = "quantity\tsku\tcost\n2\ta\t2\n5\tb";

    let valuation = value_contents(data);

    assert_total_eq(4.0, valuation.total);
    assert_eq!(valuation.rows_evaluated, 2);
    assert!(matches!(
        valuation.diagnostics.as_slice(),
        [Diagnostic::RowCoercion {
            line_number: 3,
            error: RowCoercionError::MissingField {
                column: Column::Cost,
                index: 2,
                field_count: 2
            },
            ..
        }]
    ));
}

#[test]
fn blank_feed_values_as_zero_without_soft_zero_marker() {
    let valuation = value_contents("\n\n   \n");
    assert_eq!(valuation.total, 0.0);
    assert_eq!(valuation.header, HeaderState::Empty);
    assert!(!valuation.is_soft_zero());
}

#[test]
fn total_matches_independent_sum() {
    let rows: Vec<(f64, f64)> = (0..50)
        .map(|i| (f64::from(i % 7) - 2.0, f64::from(i) * 0.25 + 0.1))
        .collect();
    let mut data = String::from("sku\tCost\tnote\tQUANTITY\n");
    for (i, (quantity, cost)) in rows.iter().enumerate() {
        data.push_str(&format!("item-{i}\t{cost}\t-\t{quantity}\n"));
    }

    let expected: f64 = rows.iter().map(|(quantity, cost)| quantity * cost).sum();

    assert_total_eq(expected, value_contents(&data).total);
}

#[test]
fn valuing_twice_gives_identical_results() {
    let data = "quantity\tcost\n3\t1.1\nbad\t1\n7\t2.2";
    let file = InventoryFile::parse(data);

    let first = file.valuate();
    let second = file.valuate();

    assert_eq!(first, second);
    assert_eq!(first.total.to_bits(), second.total.to_bits());
}

#[test]
fn concurrent_feeds_keep_their_own_layouts() {
    let left = "quantity\tcost\n2\t10\n3\t10";
    let right = "cost\tx\tquantity\n1\t-\t4\n2\t-\t5";

    let (left_total, right_total) = std::thread::scope(|scope| {
        let left_handle = scope.spawn(|| value_contents(left).total);
        let right_handle = scope.spawn(|| value_contents(right).total);
        (
            left_handle.join().expect("left feed valued"),
            right_handle.join().expect("right feed valued"),
        )
    });

    assert_total_eq(50.0, left_total);
    assert_total_eq(14.0, right_total);
}

#[test]
fn feed_read_from_disk_is_valued() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("inventory.tsv");
    fs::write(&path, "Quantity\tCost\r\n4\t2.5\r\n1\t1\r\n").expect("feed written");

    let contents = read_feed(&path).expect("feed read");

    assert_total_eq(11.0, value_contents(&contents).total);
}

#[test]
fn post_event_envelope_values_the_feed() {
    let event = serde_json::json!({
        "httpMethod": "POST",
        "body": { "data": "quantity\tcost\n0\t7\n1\t0.15\n2\t5.25" }
    });

    let response = handler::handle_post(&event).expect("event handled");
    let total = response["total_value"].as_f64().expect("numeric total");

    assert_total_eq(10.65, total);
    assert_eq!(response["header"]["quantity_index"], 0);
    assert_eq!(response["header"]["cost_index"], 1);
}

#[test]
fn strict_mode_turns_soft_zero_into_error() {
    let valuation = value_contents("qty\tcost\n1\t1");
    let error = valuation.into_strict().unwrap_err();
    assert!(matches!(error, ValuationError::SoftZero(_)));
}
