//! `tally validate-costs` — stored vs recomputed cost health check.

use serde::Serialize;
use tallybook_reports::{validate_order_costs, CostMismatch};
use tallybook_store::{LedgerStore, MemoryStore};

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

#[derive(Debug, Serialize)]
pub struct CostHealthReport {
    pub orders_checked: usize,
    pub orders_failed: usize,
    pub mismatches: Vec<CostMismatch>,
    /// Orders whose inputs are invalid (negative quantity or price);
    /// checked orders exclude these.
    pub errors: Vec<String>,
}

/// Exit 0 when every order is clean, 1 when drift or bad inputs exist.
pub fn run(store: &MemoryStore, json: bool) -> Result<u8, String> {
    let orders = store.list_orders().map_err(|e| e.to_string())?;
    let outsourced = store.list_outsourced().map_err(|e| e.to_string())?;

    let mut report = CostHealthReport {
        orders_checked: 0,
        orders_failed: 0,
        mismatches: Vec::new(),
        errors: Vec::new(),
    };

    for order in &orders {
        match validate_order_costs(order, &outsourced) {
            Ok(mismatches) => {
                report.orders_checked += 1;
                if !mismatches.is_empty() {
                    report.orders_failed += 1;
                    report.mismatches.extend(mismatches);
                }
            }
            Err(err) => report.errors.push(err.to_string()),
        }
    }

    let clean = report.mismatches.is_empty() && report.errors.is_empty();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?
        );
    } else if clean {
        println!("{} orders checked, no drift", report.orders_checked);
    } else {
        println!(
            "{} orders checked, {} with drift, {} with invalid inputs",
            report.orders_checked,
            report.orders_failed,
            report.errors.len()
        );
        for m in &report.mismatches {
            println!(
                "  {} {}: stored {} computed {}",
                m.order_id, m.field, m.stored, m.computed
            );
        }
        for e in &report.errors {
            eprintln!("error: {e}");
        }
    }

    Ok(if clean { EXIT_SUCCESS } else { EXIT_ERROR })
}
