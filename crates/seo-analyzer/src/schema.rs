//! Structured-data (JSON-LD) extractor.

use scraper::{Html, Selector};
use seo_types::{Issue, Severity};
use serde_json::Value;

pub struct SchemaSignals {
    pub has_schema_markup: bool,
    pub schema_types: Vec<String>,
}

fn collect_types(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(type_value) = map.get("@type") {
                match type_value {
                    Value::String(s) => out.push(s.clone()),
                    Value::Array(arr) => {
                        for v in arr {
                            if let Value::String(s) = v {
                                out.push(s.clone());
                            }
                        }
                    }
                    _ => {}
                }
            }
            if let Some(Value::Array(graph)) = map.get("@graph") {
                for entry in graph {
                    collect_types(entry, out);
                }
            }
        }
        Value::Array(arr) => {
            for entry in arr {
                collect_types(entry, out);
            }
        }
        _ => {}
    }
}

pub fn extract(document: &Html, issues: &mut Vec<Issue>) -> SchemaSignals {
    let mut schema_types = Vec::new();

    if let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) {
        for el in document.select(&selector) {
            let raw: String = el.text().collect();
            let Ok(value) = serde_json::from_str::<Value>(raw.trim()) else {
                continue;
            };
            collect_types(&value, &mut schema_types);
        }
    }

    let has_schema_markup = !schema_types.is_empty();
    if !has_schema_markup {
        issues.push(Issue::new(
            Severity::Info,
            "no_schema_markup",
            "Page has no structured data (JSON-LD) with a @type",
        ));
    }

    SchemaSignals {
        has_schema_markup,
        schema_types,
    }
}
