use std::fmt;

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    fn error(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(ValidationSeverity::Error, context, message);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn into_errors(self) -> Vec<ValidationDiagnostic> {
        self.diagnostics
            .into_iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
            .collect()
    }
}

/// Shape check for a raw trade table. Covers both the root table (`pool`) and
/// pool tables (`input1`, `output`); whichever sections are present get checked.
pub fn validate_table(table_name: &str, payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(object) = payload.as_object() else {
        report.error(table_name, "table is not a JSON object");
        return report;
    };

    if !object.contains_key("roll") {
        report.error(format!("{table_name}.roll"), "'roll' is missing");
    }

    if let Some(pool) = object.get("pool") {
        validate_pool(&mut report, table_name, pool);
    }
    if let Some(input) = object.get("input1") {
        validate_input(&mut report, table_name, input);
    }
    if let Some(output) = object.get("output") {
        validate_output(&mut report, table_name, output);
    }

    if !object.contains_key("pool") && !object.contains_key("output") {
        report.push(
            ValidationSeverity::Warning,
            table_name,
            "table has neither 'pool' nor 'output'",
        );
    }

    report
}

fn validate_pool(report: &mut ValidationReport, table_name: &str, pool: &Value) {
    let context = format!("{table_name}.pool");
    let Some(entries) = pool.as_array() else {
        report.error(context, "'pool' should be a list");
        return;
    };
    if entries.is_empty() {
        report.error(context, "'pool' is empty");
        return;
    }

    for (index, entry) in entries.iter().enumerate() {
        let entry_context = format!("{context}[{index}]");
        let Some(entry) = entry.as_object() else {
            report.error(entry_context, "entry is not an object");
            continue;
        };
        match entry.get("value") {
            Some(Value::String(name)) if !name.trim().is_empty() => {}
            Some(_) => report.error(
                format!("{entry_context}.value"),
                "'value' should be a non-empty string",
            ),
            None => report.error(format!("{entry_context}.value"), "'value' is missing"),
        }
        check_weight(report, &entry_context, entry);
    }
}

fn validate_input(report: &mut ValidationReport, table_name: &str, input: &Value) {
    let context = format!("{table_name}.input1");
    let Some(input) = input.as_object() else {
        report.error(context, "'input1' is not an object");
        return;
    };
    if !matches!(input.get("filter"), Some(Value::String(_))) {
        report.error(format!("{context}.filter"), "'filter' should be an item id string");
    }
    let count = input
        .get("count")
        .and_then(|count| count.get("count"))
        .and_then(Value::as_u64);
    if count.is_none() {
        report.error(format!("{context}.count"), "'count.count' should be a non-negative integer");
    }
}

fn validate_output(report: &mut ValidationReport, table_name: &str, output: &Value) {
    let context = format!("{table_name}.output");
    let Some(items) = output.as_array() else {
        report.error(context, "'output' should be a list");
        return;
    };
    if items.is_empty() {
        report.error(context, "'output' is empty");
        return;
    }

    for (index, item) in items.iter().enumerate() {
        let item_context = format!("{context}[{index}]");
        let Some(item) = item.as_object() else {
            report.error(item_context, "entry is not an object");
            continue;
        };
        if !matches!(item.get("item"), Some(Value::String(_))) {
            report.error(format!("{item_context}.item"), "'item' should be an item id string");
        }
        check_weight(report, &item_context, item);
    }
}

fn check_weight(report: &mut ValidationReport, context: &str, entry: &Map<String, Value>) {
    let context = format!("{context}.weight");
    match entry.get("weight") {
        None => report.error(context, "'weight' is missing"),
        Some(weight) => match weight.as_f64() {
            None => report.error(context, "'weight' should be a number"),
            Some(w) if w < 0.0 => report.error(context, format!("'weight' is negative ({w})")),
            Some(_) => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn messages(report: &ValidationReport) -> Vec<String> {
        report.diagnostics.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn valid_root_table_passes() {
        let table = json!({
            "roll": {"type": "weighted", "count": 1},
            "pool": [
                {"value": "pool_common", "weight": 1},
                {"value": "pool_rare", "weight": 0.25}
            ]
        });
        let report = validate_table("daily_shop", &table);
        assert!(report.diagnostics.is_empty(), "{:?}", messages(&report));
    }

    #[test]
    fn valid_pool_table_passes() {
        let table = json!({
            "roll": {},
            "input1": {"filter": "minecraft:emerald_block", "count": {"count": 48}},
            "output": [{"item": "cobblemon:master_ball", "count": {"count": 1}, "weight": 1}]
        });
        assert!(!validate_table("pool_rare", &table).has_errors());
    }

    #[test]
    fn missing_roll_is_an_error() {
        let table = json!({"pool": [{"value": "a", "weight": 1}]});
        let report = validate_table("daily_shop", &table);
        assert!(report.has_errors());
        assert_eq!(messages(&report), vec!["daily_shop.roll: 'roll' is missing"]);
    }

    #[test]
    fn pool_must_be_a_list() {
        let table = json!({"roll": {}, "pool": {"value": "a", "weight": 1}});
        let report = validate_table("daily_shop", &table);
        assert_eq!(messages(&report), vec!["daily_shop.pool: 'pool' should be a list"]);
    }

    #[test]
    fn pool_entries_need_value_and_numeric_weight() {
        let table = json!({
            "roll": {},
            "pool": [
                {"weight": 1},
                {"value": "b", "weight": "1"},
                {"value": "c"},
                {"value": "d", "weight": -2}
            ]
        });
        let report = validate_table("daily_shop", &table);
        assert_eq!(
            messages(&report),
            vec![
                "daily_shop.pool[0].value: 'value' is missing",
                "daily_shop.pool[1].weight: 'weight' should be a number",
                "daily_shop.pool[2].weight: 'weight' is missing",
                "daily_shop.pool[3].weight: 'weight' is negative (-2)",
            ]
        );
    }

    #[test]
    fn empty_output_and_bad_cost_are_errors() {
        let table = json!({
            "roll": {},
            "input1": {"filter": "minecraft:emerald", "count": {"count": -1}},
            "output": []
        });
        let report = validate_table("pool_a", &table);
        assert_eq!(
            messages(&report),
            vec![
                "pool_a.input1.count: 'count.count' should be a non-negative integer",
                "pool_a.output: 'output' is empty",
            ]
        );
    }

    #[test]
    fn table_without_sections_only_warns() {
        let report = validate_table("odd", &json!({"roll": {}}));
        assert!(!report.has_errors());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].severity, ValidationSeverity::Warning);
    }
}
