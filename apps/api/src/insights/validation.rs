//! Shape and range checks for a model-produced insight payload.
//!
//! Runs on the raw decoded JSON so that every problem can be reported at once.
//! Errors accumulate; no check short-circuits another.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::insights::models::{DemandLevel, MarketOutlook, INSIGHT_LIST_LEN};

pub const GROWTH_RATE_MIN: f64 = -100.0;
pub const GROWTH_RATE_MAX: f64 = 1000.0;

const SALARY_TEXT_FIELDS: [&str; 2] = ["role", "location"];
const SALARY_NUMBER_FIELDS: [&str; 3] = ["min", "max", "median"];
const LIST_FIELDS: [&str; 3] = ["topSkills", "keyTrends", "recommendedSkills"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_insight(candidate: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    check_salary_ranges(candidate.get("salaryRanges"), &mut errors);
    check_growth_rate(candidate.get("growthRate"), &mut errors);
    check_literal(
        candidate.get("demandLevel"),
        "demandLevel",
        &DemandLevel::ALL.map(|d| d.as_str()),
        &mut errors,
    );
    check_literal(
        candidate.get("marketOutlook"),
        "marketOutlook",
        &MarketOutlook::ALL.map(|m| m.as_str()),
        &mut errors,
    );
    for field in LIST_FIELDS {
        check_list(candidate.get(field), field, &mut errors);
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_salary_ranges(value: Option<&Value>, errors: &mut Vec<String>) {
    let Some(ranges) = value.and_then(Value::as_array) else {
        errors.push(format!(
            "salaryRanges must be an array of exactly {INSIGHT_LIST_LEN} items"
        ));
        return;
    };
    if ranges.len() != INSIGHT_LIST_LEN {
        errors.push(format!(
            "salaryRanges must contain exactly {INSIGHT_LIST_LEN} items, got {}",
            ranges.len()
        ));
    }

    for (i, range) in ranges.iter().enumerate() {
        let mut complete = true;
        for field in SALARY_TEXT_FIELDS {
            if !range.get(field).is_some_and(Value::is_string) {
                errors.push(format!("salaryRanges[{i}].{field} is missing or not a string"));
                complete = false;
            }
        }
        for field in SALARY_NUMBER_FIELDS {
            if !range.get(field).is_some_and(Value::is_number) {
                errors.push(format!("salaryRanges[{i}].{field} is missing or not a number"));
                complete = false;
            }
        }
        if !complete {
            continue;
        }

        let num = |field: &str| range.get(field).and_then(Value::as_f64).unwrap_or_default();
        let (min, max, median) = (num("min"), num("max"), num("median"));
        if !(min <= median && median <= max) {
            errors.push(format!(
                "salaryRanges[{i}]: expected min <= median <= max, got min={min}, median={median}, max={max}"
            ));
        }
    }
}

fn check_growth_rate(value: Option<&Value>, errors: &mut Vec<String>) {
    match value.and_then(Value::as_f64) {
        Some(rate) if (GROWTH_RATE_MIN..=GROWTH_RATE_MAX).contains(&rate) => {}
        Some(rate) => errors.push(format!(
            "growthRate must be between {GROWTH_RATE_MIN} and {GROWTH_RATE_MAX}, got {rate}"
        )),
        None => errors.push("growthRate must be a number".to_string()),
    }
}

fn check_literal(value: Option<&Value>, field: &str, accepted: &[&str], errors: &mut Vec<String>) {
    let ok = value
        .and_then(Value::as_str)
        .is_some_and(|s| accepted.contains(&s));
    if !ok {
        errors.push(format!("{field} must be one of: {}", accepted.join(", ")));
    }
}

fn check_list(value: Option<&Value>, field: &str, errors: &mut Vec<String>) {
    match value.and_then(Value::as_array) {
        Some(items) if items.len() == INSIGHT_LIST_LEN => {}
        Some(items) => errors.push(format!(
            "{field} must contain exactly {INSIGHT_LIST_LEN} items, got {}",
            items.len()
        )),
        None => errors.push(format!(
            "{field} must be an array of exactly {INSIGHT_LIST_LEN} items"
        )),
    }
}
