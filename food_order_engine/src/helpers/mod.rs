mod totals;

pub use totals::{order_total, validate_new_order};
