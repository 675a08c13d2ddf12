use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    Ok(match serde_json::to_value(value)? {
        Value::Array(items) => render_array_table(&items, options),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            table::render_rows(&["field", "value"], &rows, options)
        }
        scalar => table::render_rows(&["value"], &[vec![value_to_cell(&scalar)]], options),
    })
}

/// One column per key seen in any item, sorted, with `id` moved to the front.
fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, options);
    }

    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key.as_str());
            }
        }
    }
    headers.sort_unstable();
    if let Some(pos) = headers.iter().position(|header| *header == "id") {
        headers[..=pos].rotate_right(1);
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&headers, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::{render, render_table, table::TableOptions};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Truck {
        id: &'static str,
        registration_number: &'static str,
        capacity_kg: Option<f64>,
    }

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn json_render_is_valid_json() {
        let value = Truck {
            id: "trk-1",
            registration_number: "MH12AB1234",
            capacity_kg: Some(9000.0),
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["registrationNumber"], "MH12AB1234");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Truck {
            id: "trk-1",
            registration_number: "MH12AB1234",
            capacity_kg: None,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(out.contains("\"capacityKg\":null"));
    }

    #[test]
    fn object_renders_as_field_value_table() {
        let value = Truck {
            id: "trk-1",
            registration_number: "MH12AB1234",
            capacity_kg: None,
        };
        let out = render_table(&value, PLAIN).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("field")));
        assert!(out.contains("registrationNumber"));
        assert!(out.lines().any(|line| line.starts_with("capacityKg") && line.ends_with('-')));
    }

    #[test]
    fn list_renders_one_row_per_item_with_id_first() {
        let trucks = vec![
            Truck {
                id: "trk-1",
                registration_number: "MH12AB1234",
                capacity_kg: Some(9000.0),
            },
            Truck {
                id: "trk-2",
                registration_number: "KA01",
                capacity_kg: None,
            },
        ];
        let out = render_table(&trucks, PLAIN).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[3].starts_with("trk-2"));
    }

    #[test]
    fn empty_list_says_so() {
        let out = render_table(&Vec::<Truck>::new(), PLAIN).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
