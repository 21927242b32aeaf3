//! Serializes JSON values as Lua table literals for wiki data modules.
//!
//! Output is deterministic: object keys are reordered with
//! [compare_keys](crate::key_order::compare_keys) at every level, arrays stay
//! inline, objects get one `key = value` per line.

use serde_json::{Number, Value};

use crate::key_order::compare_keys;

const INDENT: &str = "  ";

/// Lua literal for `value` at the top level.
pub fn to_lua(value: &Value) -> String {
    let mut out = String::new();
    write_lua(value, 0, &mut out);
    out
}

/// Full data module: `local p = <literal>\n\nreturn p\n`.
pub fn to_lua_module(value: &Value) -> String {
    format!("local p = {}\n\nreturn p\n", to_lua(value))
}

/// Append the literal for `value` to `out`. `depth` is the nesting level of the
/// enclosing table; object entries are indented one level deeper.
pub fn write_lua(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("nil"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => out.push_str(&format_number(number)),
        Value::String(text) => write_string(text, out),
        Value::Array(items) if items.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push_str("{ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_lua(item, depth, out);
            }
            out.push_str(" }");
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| compare_keys(a, b));

            let inner = INDENT.repeat(depth + 1);
            out.push_str("{\n");
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&inner);
                write_key(key, out);
                out.push_str(" = ");
                write_lua(&map[key.as_str()], depth + 1, out);
            }
            out.push('\n');
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
        }
    }
}

fn is_bare_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn write_key(key: &str, out: &mut String) {
    if is_bare_identifier(key) {
        out.push_str(key);
    } else {
        out.push_str("[\"");
        out.push_str(key);
        out.push_str("\"]");
    }
}

fn write_string(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// JavaScript `Number#toString` text: integers verbatim, floats in shortest
/// round-trip form without trailing zeros, exponent form below 1e-6 and from 1e21.
pub fn format_number(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(int) = number.as_u64() {
        return int.to_string();
    }
    match number.as_f64() {
        Some(float) => format_f64(float),
        None => number.to_string(),
    }
}

fn format_f64(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return "nil".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };

    // `{:e}` gives the shortest round-trip digits, e.g. "1.25e-7".
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Decimal point position relative to the digit string.
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let exp_sign = if n - 1 < 0 { "-" } else { "+" };
        let exp = (n - 1).abs();
        if k == 1 {
            format!("{digits}e{exp_sign}{exp}")
        } else {
            format!("{}.{}e{exp_sign}{exp}", &digits[..1], &digits[1..])
        }
    };
    format!("{sign}{body}")
}
