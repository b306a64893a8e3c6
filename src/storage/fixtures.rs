//! Sample inventory used by tests

use rusqlite::params;

use super::Database;

/// Fill `db` with a small inventory
///
/// - Hex Bolt M8: 120 in / 45 out at Main Warehouse, 30 in at Annex
/// - Hex Nut M8: 200 in / 80 out at Main Warehouse
/// - Flat Washer M8: 500 in / 510 out at Annex
/// - Carriage Bolt M10: no movements, no group
/// - Cable Tie 200mm: 1000 in at Main Warehouse
pub(crate) fn seed_inventory(db: &Database) {
    let conn = db.connection();
    conn.execute_batch(
        "INSERT INTO stock_group (group_id, description) VALUES
            (1, 'Fasteners'),
            (2, 'Electrical');
         INSERT INTO warehouse (warehouse_id, description) VALUES
            (1, 'Main Warehouse'),
            (2, 'Annex');
         INSERT INTO stock (stock_id, description, group_id, purchase_price) VALUES
            (1, 'Hex Bolt M8', 1, 1500),
            (2, 'Hex Nut M8', 1, 350.5),
            (3, 'Flat Washer M8', 1, 100),
            (4, 'Carriage Bolt M10', NULL, 2750),
            (5, 'Cable Tie 200mm', 2, 75);
         INSERT INTO invoice (invoice_id, warehouse_id, issued_at) VALUES
            (1, 1, '2024-01-05'),
            (2, 1, '2024-02-10'),
            (3, 2, '2024-03-15');
         INSERT INTO invoice_detail (invoice_id, stock_id, qty_in, qty_out) VALUES
            (1, 1, 100, 0),
            (2, 1, 20, 45),
            (3, 1, 30, 0),
            (1, 2, 200, 0),
            (2, 2, 0, 80),
            (3, 3, 500, 0),
            (3, 3, 0, 510),
            (1, 5, 1000, 0);",
    )
    .expect("seed inventory");
}

/// Add `count` products named `Widget 001`, `Widget 002`, ... with one
/// movement each at Main Warehouse
///
/// Expects [`seed_inventory`] to have run first.
pub(crate) fn seed_widgets(db: &Database, count: u32) {
    let conn = db.connection();
    for i in 1..=count {
        let stock_id = 1000 + i64::from(i);
        conn.execute(
            "INSERT INTO stock (stock_id, description, group_id, purchase_price) VALUES (?1, ?2, 1, ?3)",
            params![stock_id, format!("Widget {:03}", i), f64::from(i) * 10.0],
        )
        .expect("insert widget");
        conn.execute(
            "INSERT INTO invoice_detail (invoice_id, stock_id, qty_in, qty_out) VALUES (1, ?1, ?2, 1)",
            params![stock_id, f64::from(i)],
        )
        .expect("insert widget movement");
    }
}
