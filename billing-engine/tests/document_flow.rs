use billing_engine::forms::RemovedRow;
use billing_engine::{
    DocumentForm, ErrorCode, Output, ProductSelection, RecordKind, StockForm, SubmitGuard,
    process, row_total,
};
use shared::models::{
    Discount, DocumentKind, DocumentPayload, DocumentRecord, DocumentStatus, LineItem, Product,
};
use shared::{DateInput, WireDate, from_wire_date, to_wire_date};

fn catalog() -> Vec<Product> {
    serde_json::from_str(
        r#"[
            {"id": 1, "name": "Widget", "sku": "W-1", "sale_price": "100", "unit_id": 1, "unit_name": "pcs"},
            {"id": 2, "name": "Gadget", "sku": "G-2", "sale_price": "50", "unit_id": 1, "unit_name": "pcs"},
            {"id": 3, "name": "Crate", "sku": "C-3", "sale_price": "500", "unit_id": 2, "unit_name": "box"}
        ]"#,
    )
    .unwrap()
}

/// Invoice with rows [2 × 100 Fixed 10, 1 × 50 Percentage 20]
fn two_row_invoice(catalog: &[Product]) -> DocumentForm {
    let mut form = DocumentForm::new(DocumentKind::Invoice);
    form.select_product_by_id(0, 1, catalog).unwrap();
    form.set_quantity(0, 2.0).unwrap();
    form.set_row_discount(0, Discount::fixed(10.0)).unwrap();

    let row = form.add_row().unwrap();
    form.select_product_by_id(row, 2, catalog).unwrap();
    form.set_quantity(row, 1.0).unwrap();
    form.set_row_discount(row, Discount::percentage(20.0)).unwrap();
    form
}

#[test]
fn test_invoice_without_footer_discount() {
    let form = two_row_invoice(&catalog());

    let totals: Vec<f64> = form.rows().iter().map(|r| r.total_amount).collect();
    assert_eq!(totals, vec![190.0, 40.0]);
    assert_eq!(form.totals().total_quantity, 3.0);
    assert_eq!(form.totals().total_price, 250.0);
    assert_eq!(form.totals().total_discount, 20.0);
    assert_eq!(form.totals().grand_total, 230.0);
}

#[test]
fn test_invoice_with_footer_percentage() {
    let mut form = two_row_invoice(&catalog());
    let totals = form.set_footer_discount(Discount::percentage(10.0)).unwrap();

    assert_eq!(totals.total_price, 250.0);
    assert_eq!(totals.total_discount, 43.0);
    assert_eq!(totals.grand_total, 207.0);
}

#[test]
fn test_zero_quantity_row_is_all_zero() {
    let catalog = catalog();
    let mut form = DocumentForm::new(DocumentKind::Invoice);
    form.select_product_by_id(0, 3, &catalog).unwrap();
    form.set_row_discount(0, Discount::fixed(0.0)).unwrap();

    assert_eq!(form.rows()[0].unit_price, 500.0);
    assert_eq!(form.rows()[0].total_amount, 0.0);
    assert_eq!(form.totals().total_quantity, 0.0);
    assert_eq!(form.totals().total_price, 0.0);
    assert_eq!(form.totals().total_discount, 0.0);
    assert_eq!(form.totals().grand_total, 0.0);
}

#[test]
fn test_row_total_properties() {
    let samples = [(1.0, 10.0), (2.5, 4.1), (3.0, 10.99), (10.0, 0.07)];
    for (q, p) in samples {
        let gross = row_total(q, p, &Discount::NONE);
        assert_eq!(row_total(q, p, &Discount::percentage(0.0)), gross);
        assert_eq!(row_total(q, p, &Discount::percentage(100.0)), 0.0);
        assert_eq!(row_total(q, p, &Discount::fixed(gross + 1.0)), 0.0);
        assert!(row_total(q, p, &Discount::fixed(1.0)) <= gross);
    }
}

#[test]
fn test_recalculation_is_idempotent() {
    let mut form = two_row_invoice(&catalog());
    form.set_footer_discount(Discount::fixed(5.0)).unwrap();
    let before = form.clone();

    form.recalculate();
    form.recalculate();
    assert_eq!(form, before);
}

#[test]
fn test_duplicate_product_is_rejected_and_reset() {
    let catalog = catalog();
    let mut form = two_row_invoice(&catalog);
    let row = form.add_row().unwrap();
    form.set_quantity(row, 5.0).unwrap();

    // Row 2's picker no longer offers products 1 and 2
    let offered: Vec<i64> = form
        .available_products(&catalog, row)
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(offered, vec![3]);

    let outcome = form.select_product_by_id(row, 2, &catalog).unwrap();
    assert_eq!(outcome.warning(), Some("You cannot choose the duplicate product!"));
    assert!(matches!(
        outcome,
        ProductSelection::RejectedDuplicate { conflicting_row: 1, .. }
    ));

    let reset = &form.rows()[row];
    assert_eq!(reset.product_id, None);
    assert_eq!(reset.unit_id, None);
    assert_eq!(reset.unit_price, 0.0);
    assert_eq!(reset.total_amount, 0.0);
    assert_eq!(form.totals().grand_total, 230.0);
}

#[test]
fn test_wire_date_round_trip() {
    let parsed = from_wire_date("2024-03-07").unwrap();
    assert_eq!(parsed, WireDate::new(2024, 3, 7));
    assert_eq!(to_wire_date(&DateInput::Picked(parsed)), "2024-03-07");

    let from_timestamp = from_wire_date("2024-03-07T23:30:00.000000Z").unwrap();
    assert_eq!(from_timestamp, parsed);

    assert_eq!(from_wire_date("yesterday").unwrap_err().code, ErrorCode::InvalidDate);
}

#[test]
fn test_edit_invoice_then_post() {
    let record: DocumentRecord = serde_json::from_str(
        r#"{
            "id": 42,
            "invoice_number": "INV-0042",
            "customer_id": 9,
            "invoice_date": "2024-03-07T00:00:00.000000Z",
            "status": "Active",
            "details": [
                {"id": 100, "product_id": 1, "quantity": "2", "price": "100.00", "discount_type": "Fixed", "discount_value": "10", "total_amount": "190.00"},
                {"id": 101, "product_id": 2, "quantity": 1, "price": null, "discount_type": "Percentage", "discount_value": 20, "total_amount": 0}
            ]
        }"#,
    )
    .unwrap();

    let catalog = catalog();
    let mut form = DocumentForm::from_record(DocumentKind::Invoice, record, &catalog).unwrap();
    assert!(form.is_edit_mode());
    assert_eq!(form.totals().grand_total, 230.0);

    // Removing a saved row tells the host to delete it server-side
    let removed: RemovedRow<LineItem> = form.remove_row(1).unwrap();
    assert_eq!(removed.row_id(), Some(101));
    form.reinsert(removed).unwrap();

    let guard = SubmitGuard::new();
    let ticket = guard.try_begin().unwrap();
    let payload = form.build_payload(true).unwrap();
    assert_eq!(guard.try_begin().unwrap_err().code, ErrorCode::SubmitInFlight);
    drop(ticket);

    let DocumentPayload::Invoice(invoice) = &payload else {
        panic!("expected an invoice payload");
    };
    assert_eq!(invoice.invoice_date, "2024-03-07");
    assert_eq!(invoice.status, DocumentStatus::Posted);
    assert_eq!(invoice.items[1].unit_price, 50.0);

    form.mark_submitted(None, true);
    assert_eq!(
        form.set_quantity(0, 9.0).unwrap_err().code,
        ErrorCode::DocumentLocked
    );
    assert!(!guard.is_in_flight());
}

#[test]
fn test_return_prefilled_from_invoice() {
    let invoice: DocumentRecord = serde_json::from_str(
        r#"{
            "id": 42,
            "customer_id": 9,
            "customer_name": "Acme Traders",
            "details": [
                {"id": 100, "product_id": 1, "quantity": 2, "price": 100, "discount_type": "Fixed", "discount_value": 10},
                {"id": 101, "product_id": 2, "quantity": 0, "price": 50, "discount_type": "", "discount_value": null}
            ]
        }"#,
    )
    .unwrap();

    let catalog = catalog();
    let mut form = DocumentForm::new(DocumentKind::InvoiceReturn);
    assert!(form.prefill_from_invoice(invoice, &catalog).unwrap());
    assert!(form.rows().iter().all(|r| r.id.is_none()));

    let payload = form.build_payload(false).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["invoice_id"], 42);
    assert_eq!(json["customer_id"], 9);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["grand_total"], 190.0);
    assert!(json.get("invoice_number").is_none());
}

#[test]
fn test_stock_sheet_flow() {
    let catalog = catalog();
    let mut form = StockForm::new();
    form.select_product_by_id(0, 3, &catalog).unwrap();
    form.set_stock(0, 4.0).unwrap();
    assert!(form.on_tab(0));
    form.select_product_by_id(1, 2, &catalog).unwrap();
    form.set_stock(1, 10.0).unwrap();
    form.set_price(1, 45.5).unwrap();

    assert_eq!(form.totals().total_stock, 14.0);
    assert_eq!(form.totals().total_price, 2455.0);

    let rejected = form.select_product_by_id(1, 3, &catalog).unwrap();
    assert!(!rejected.is_applied());
    assert_eq!(form.totals().total_price, 2000.0);
}

#[test]
fn test_cli_process_return_record() {
    let input = r#"{
        "id": 7,
        "invoice_id": 42,
        "return_date": "2024-03-09 10:15:00",
        "details": [
            {"id": 1, "product_id": 2, "quantity": "3", "sale_price": "50", "discount_type": "Percentage", "discount_value": "10", "total": "0"}
        ]
    }"#;
    let Output::Document(payload) = process(RecordKind::Return, input, &catalog(), false).unwrap()
    else {
        panic!("expected a document payload");
    };
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["return_date"], "2024-03-09");
    assert_eq!(json["items"][0]["total_amount"], 135.0);
    assert_eq!(json["grand_total"], 135.0);
}

#[test]
fn test_cli_huge_quantities_do_not_overflow() {
    let input = r#"{
        "id": 8,
        "invoice_date": "2024-03-09",
        "details": [
            {"product_id": 1, "quantity": 1e20, "price": 1e20, "discount_type": "Percentage", "discount_value": 1e20},
            {"product_id": 2, "quantity": -4, "price": 50}
        ]
    }"#;
    let Output::Document(payload) = process(RecordKind::Invoice, input, &catalog(), false).unwrap()
    else {
        panic!("expected a document payload");
    };
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["items"][0]["quantity"], 1_000_000_000.0);
    assert_eq!(json["items"][1]["quantity"], 0.0);
    assert_eq!(json["total_quantity"], 1_000_000_000.0);
    assert_eq!(json["grand_total"], 0.0);
}
