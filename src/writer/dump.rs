//! Structured value dumping.
//!
//! Values are described by [`DumpValue`], built by hand or converted from any
//! `serde::Serialize` type through `serde_json::Value`.

use super::WriterTheme;
use crate::console::DrawOp;
use crate::term::NEWLINE;
use serde::Serialize;

/// Indentation added per nesting level.
const INDENT: &str = "   ";

/// A dumpable value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DumpValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Sequence(Vec<DumpValue>),
    Mapping(Vec<(String, DumpValue)>),
    /// A named record; fields are listed sorted by name.
    Structured {
        type_name: String,
        fields: Vec<(String, DumpValue)>,
    },
}

impl DumpValue {
    /// Convert a serializable value.
    ///
    /// A top-level object becomes [`DumpValue::Structured`] named after `T`;
    /// nested objects become mappings.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_value(value)?;
        Ok(match Self::from(json) {
            Self::Mapping(fields) => Self::Structured {
                type_name: short_type_name::<T>().to_string(),
                fields,
            },
            other => other,
        })
    }

    pub fn structured(type_name: impl Into<String>, fields: Vec<(String, DumpValue)>) -> Self {
        Self::Structured {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Label shown in parentheses before the value; `None` for null.
    pub fn type_label(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some("bool"),
            Self::Number(_) => Some("number"),
            Self::Text(_) => Some("string"),
            Self::Sequence(_) => Some("list"),
            Self::Mapping(_) => Some("map"),
            Self::Structured { type_name, .. } => Some(type_name),
        }
    }

    /// One-line rendering used for scalars and for composites past the depth
    /// budget.
    pub fn summary(&self) -> String {
        match self {
            Self::Null => "[NULL]".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value.clone(),
            Self::Sequence(items) => format!("[{} item(s)]", items.len()),
            Self::Mapping(entries) => format!("{{{} entry(ies)}}", entries.len()),
            Self::Structured { type_name, .. } => type_name.clone(),
        }
    }

    fn is_composite(&self) -> bool {
        matches!(
            self,
            Self::Sequence(_) | Self::Mapping(_) | Self::Structured { .. }
        )
    }
}

impl From<serde_json::Value> for DumpValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for DumpValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DumpValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for DumpValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for DumpValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for DumpValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for DumpValue {
    /// Non-finite floats have no JSON number form and dump as null.
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<DumpValue>> From<Vec<T>> for DumpValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Drawing ops for `value`, expanding composites down to `max_depth` levels.
///
/// The returned ops end with the `;` terminator line.
pub(crate) fn dump_ops(value: &DumpValue, max_depth: usize, theme: &WriterTheme) -> Vec<DrawOp> {
    let mut dumper = Dumper {
        theme,
        ops: Vec::new(),
    };
    dumper.value(value, max_depth + 1, 0);
    dumper.put(";", theme.schema_color);
    dumper.put(NEWLINE, theme.schema_color);
    dumper.ops
}

struct Dumper<'a> {
    theme: &'a WriterTheme,
    ops: Vec<DrawOp>,
}

impl Dumper<'_> {
    fn put(&mut self, text: impl Into<String>, color: crossterm::style::Color) {
        self.ops.push(DrawOp::Foreground(color));
        self.ops.push(DrawOp::Text(text.into()));
    }

    fn value(&mut self, value: &DumpValue, budget: usize, depth: usize) {
        let theme = self.theme;
        if let Some(label) = value.type_label() {
            self.put("(", theme.schema_color);
            self.put(label, theme.type_color);
            self.put(") ", theme.schema_color);
        }

        if budget == 0 || !value.is_composite() {
            self.put(value.summary(), theme.value_color);
            return;
        }

        let padding = INDENT.repeat(depth);
        self.put(format!("{{{NEWLINE}"), theme.schema_color);

        match value {
            DumpValue::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.separator(index);
                    self.put(format!("{padding}{INDENT}["), theme.schema_color);
                    self.put(index.to_string(), theme.property_color);
                    self.put("]: ", theme.schema_color);
                    self.value(item, budget - 1, depth + 1);
                }
            }
            DumpValue::Mapping(entries) => {
                for (index, (key, item)) in entries.iter().enumerate() {
                    self.separator(index);
                    self.put(format!("{padding}{INDENT}["), theme.schema_color);
                    self.put(key.as_str(), theme.property_color);
                    self.put("]: ", theme.schema_color);
                    self.value(item, budget - 1, depth + 1);
                }
            }
            DumpValue::Structured { fields, .. } => {
                let mut sorted: Vec<_> = fields.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(&b.0));
                for (index, (name, item)) in sorted.into_iter().enumerate() {
                    self.separator(index);
                    self.put(format!("{padding}{INDENT}{name}"), theme.property_color);
                    self.put(": ", theme.schema_color);
                    self.value(item, budget - 1, depth + 1);
                }
            }
            _ => {}
        }

        self.put(NEWLINE, theme.schema_color);
        self.put(format!("{padding}}}"), theme.schema_color);
    }

    fn separator(&mut self, index: usize) {
        if index > 0 {
            self.put(format!(", {NEWLINE}"), self.theme.schema_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn plain(ops: &[DrawOp]) -> String {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text(text) => Some(text.as_str()),
                DrawOp::Foreground(_) => None,
            })
            .collect()
    }

    fn dump(value: &DumpValue, max_depth: usize) -> String {
        plain(&dump_ops(value, max_depth, &WriterTheme::default())).replace(NEWLINE, "\n")
    }

    #[test]
    fn scalars_print_type_and_value() {
        assert_eq!(dump(&DumpValue::from(10_i64), 1), "(number) 10;\n");
        assert_eq!(dump(&DumpValue::from("hi"), 1), "(string) hi;\n");
        assert_eq!(dump(&DumpValue::Null, 1), "[NULL];\n");
    }

    #[test]
    fn sequence_lists_indexed_entries() {
        let value = DumpValue::from(vec!["a", "b"]);
        assert_eq!(
            dump(&value, 1),
            "(list) {\n   [0]: (string) a, \n   [1]: (string) b\n};\n"
        );
    }

    #[test]
    fn structured_fields_are_sorted_and_depth_limited() {
        let value = DumpValue::structured(
            "Item",
            vec![
                ("zeta".to_string(), DumpValue::from(vec![1_i64, 2])),
                ("alpha".to_string(), DumpValue::from(true)),
            ],
        );
        assert_eq!(
            dump(&value, 0),
            "(Item) {\n   alpha: (bool) true, \n   zeta: (list) [2 item(s)]\n};\n"
        );
    }

    #[test]
    fn nested_composites_indent_by_depth() {
        let value = DumpValue::Mapping(vec![(
            "inner".to_string(),
            DumpValue::Mapping(vec![("k".to_string(), DumpValue::from("v"))]),
        )]);
        assert_eq!(
            dump(&value, 2),
            "(map) {\n   [inner]: (map) {\n      [k]: (string) v\n   }\n};\n"
        );
    }

    #[test]
    fn zero_depth_summarizes_children() {
        let value = DumpValue::from(vec![vec!["a"]]);
        assert_eq!(dump(&value, 0), "(list) {\n   [0]: (list) [1 item(s)]\n};\n");
    }

    #[test]
    fn empty_composite_still_closes() {
        assert_eq!(dump(&DumpValue::Sequence(Vec::new()), 1), "(list) {\n\n};\n");
    }

    #[derive(Serialize)]
    struct Sample {
        b: String,
        a: Vec<&'static str>,
        xcz: Nested,
    }

    #[derive(Serialize)]
    struct Nested {
        pp: Vec<String>,
    }

    #[test]
    fn serialize_values_become_structured() {
        let value = DumpValue::from_serialize(&Sample {
            b: "String".to_string(),
            a: vec!["a", "b"],
            xcz: Nested { pp: Vec::new() },
        })
        .unwrap();
        let DumpValue::Structured { type_name, fields } = &value else {
            panic!("expected structured, got {value:?}");
        };
        assert_eq!(type_name, "Sample");
        assert_eq!(fields.len(), 3);
        let text = dump(&value, 1);
        assert!(text.starts_with("(Sample) {\n   a: (list) {\n"), "got:\n{text}");
        assert!(text.contains("   xcz: (map) {\n      [pp]: (list) [0 item(s)]"), "got:\n{text}");
    }

    #[test]
    fn non_finite_floats_dump_as_null() {
        assert_eq!(DumpValue::from(f64::NAN), DumpValue::Null);
    }
}
