use serde_json::Value;

/// Headline figure of each calculation, most specific first.
const PRIORITY_KEYS: [&str; 7] = [
    "best_option",
    "break_even_months",
    "actual_term_months",
    "total_monthly_payment",
    "max_home_price",
    "monthly_payment",
    "total_interest",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            match map.get(key) {
                // Refinance that never pays for itself.
                Some(Value::Null) if key == "break_even_months" => {
                    println!("never");
                    return;
                }
                Some(val) if !val.is_null() => {
                    println!("{}", format_minimal(val));
                    return;
                }
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
