use serde_json::Value;

use super::scalar_text;

/// Headline figure of each command, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "implied_discount_rate",
    "net_annual_pct",
    "purchase_price",
    "answer",
    "Net Yield (Annual)",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Array(items) = result_obj {
        for item in items {
            print_minimal(item);
        }
        return;
    }

    if let Value::Object(map) = result_obj {
        let headline = PRIORITY_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
        if let Some(val) = headline {
            println!("{}", scalar_text(val));
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}
