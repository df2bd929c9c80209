//! Structured log context
//!
//! A context is an insertion-ordered map of string keys to arbitrary JSON
//! values, rendered beneath the message line as an indented key/value block.
//! Rendering is deterministic: keys keep their insertion order and nesting
//! indents by four spaces per level.

use serde_json::Value;

/// Structured context attached to a log call
///
/// Backed by `serde_json::Map` with the `preserve_order` feature, so
/// iteration order is insertion order.
pub type Context = serde_json::Map<String, Value>;

const INDENT: &str = "    ";

/// Build a [`Context`] from `key => value` pairs
///
/// Values go through `serde_json::json!`, so scalars, arrays and nested
/// objects all work:
///
/// ```
/// use daylog::context;
///
/// let ctx = context! {
///     "user" => "alice",
///     "attempts" => 3,
///     "tags" => ["auth", "retry"],
/// };
/// assert_eq!(ctx.len(), 3);
/// ```
#[macro_export]
macro_rules! context {
    () => { $crate::Context::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut ctx = $crate::Context::new();
        $(ctx.insert($key.to_string(), ::serde_json::json!($value));)+
        ctx
    }};
}

/// Render a context as an indented block, one `key: value` line per entry
///
/// The block starts at one indent level (four spaces) and carries no
/// trailing newline. Returns an empty string for an empty context.
pub fn render_context(context: &Context) -> String {
    let mut lines = Vec::new();
    for (key, value) in context {
        render_entry(key, value, 1, &mut lines);
    }
    lines.join("\n")
}

fn render_entry(key: &str, value: &Value, depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    match value {
        Value::Object(map) => {
            lines.push(format!("{}{}:", pad, key));
            for (k, v) in map {
                render_entry(k, v, depth + 1, lines);
            }
        }
        Value::Array(items) if !is_flat_array(items) => {
            lines.push(format!("{}{}:", pad, key));
            for item in items {
                render_item(item, depth + 1, lines);
            }
        }
        other => {
            lines.push(format!("{}{}: {}", pad, key, render_scalar(other)));
        }
    }
}

fn render_item(value: &Value, depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    match value {
        Value::Object(map) => {
            lines.push(format!("{}-", pad));
            for (k, v) in map {
                render_entry(k, v, depth + 1, lines);
            }
        }
        Value::Array(items) if !is_flat_array(items) => {
            lines.push(format!("{}-", pad));
            for item in items {
                render_item(item, depth + 1, lines);
            }
        }
        other => {
            lines.push(format!("{}- {}", pad, render_scalar(other)));
        }
    }
}

/// Arrays of scalars stay on one line; anything nested expands
fn is_flat_array(items: &[Value]) -> bool {
    items
        .iter()
        .all(|v| !matches!(v, Value::Object(_) | Value::Array(_)))
}

/// Scalars and flat arrays, rendered inline
///
/// Strings are written literally, without the quoting and escaping their
/// JSON form would carry.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_scalar).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(_) => unreachable!("objects are rendered as blocks"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_context_renders_empty() {
        assert_eq!(render_context(&Context::new()), "");
    }

    #[test]
    fn test_scalars_one_line_each() {
        let ctx = context! {
            "user" => "alice",
            "attempts" => 3,
            "active" => true,
            "session" => Value::Null,
        };
        let block = render_context(&ctx);
        assert_eq!(
            block,
            "    user: alice\n    attempts: 3\n    active: true\n    session: null"
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let ctx = context! {
            "zebra" => 1,
            "apple" => 2,
            "mango" => 3,
        };
        let block = render_context(&ctx);
        let keys: Vec<&str> = block
            .lines()
            .map(|l| l.trim().split(':').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_flat_array_inline() {
        let ctx = context! { "tags" => ["auth", "retry", "slow"] };
        assert_eq!(render_context(&ctx), "    tags: [auth, retry, slow]");
    }

    #[test]
    fn test_nested_object_indents_per_level() {
        let ctx = context! {
            "request" => json!({
                "method": "GET",
                "headers": { "host": "example.com" }
            }),
        };
        let block = render_context(&ctx);
        assert_eq!(
            block,
            "    request:\n        method: GET\n        headers:\n            host: example.com"
        );
    }

    #[test]
    fn test_array_of_objects_expands() {
        let ctx = context! {
            "peers" => json!([{ "addr": "10.0.0.1" }, { "addr": "10.0.0.2" }]),
        };
        let block = render_context(&ctx);
        assert_eq!(
            block,
            "    peers:\n        -\n            addr: 10.0.0.1\n        -\n            addr: 10.0.0.2"
        );
    }

    #[test]
    fn test_strings_render_unquoted() {
        let ctx = context! { "path" => "C:\\logs\\app" };
        assert_eq!(render_context(&ctx), "    path: C:\\logs\\app");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let ctx = context! {
            "a" => json!({ "x": [1, 2], "y": "z" }),
            "b" => [true, false],
        };
        assert_eq!(render_context(&ctx), render_context(&ctx));
    }
}
