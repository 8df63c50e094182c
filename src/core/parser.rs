//! # Output Parser Module / 输出解析模块
//!
//! Extracts the catalogue fields from a simulator's free-form output. Each
//! field has one pattern and one declared type; patterns are applied to the
//! whole text independently of each other and the first match wins.
//!
//! 从模拟器的自由格式输出中提取目录字段。每个字段都有一个模式和一个声明的类型；
//! 模式彼此独立地应用于整个文本，并以第一个匹配为准。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::core::models::{Field, FieldType, FieldValue, ParsedFields};

impl Field {
    /// The pattern that locates this field. Capture group 1 holds the value;
    /// the safety event also captures its message in group 2.
    pub fn pattern(self) -> &'static str {
        match self {
            Field::RandomSeed => r"RandomSeed\s=\s*(\d+)",
            Field::Safety => r"\[Safety\]\s+@(\d+\.\d*):\s+(.*)",
            Field::Delivered => r"Delivered:\s*(\d+)",
            Field::Stranded => r"Stranded:\s*(\d+)",
            Field::Total => r"Total:\s*(\d+)",
            Field::AverageDeliveryTime => r"Average_delivery_time:\s*(\d+\.\d*)",
            Field::MaximumDeliveryTime => r"Maximum_delivery_time:\s*(\d+\.\d*)",
            Field::DeliveryScore => r"Delivery_performance_score:\s*(\d+\.\d*)",
            Field::AverageSatisfaction => r"Average_satisfaction_score:\s*(\d+\.\d*)",
            Field::MinSatisfaction => r"Min_satisfaction_score:\s*(\d+\.\d*)",
            Field::SatisfactionScore => r"Satisfaction_performance_score:\s*(\d+\.\d*)",
            Field::SimTime => r"(\d+\.\d*s)\s*simulation seconds",
            Field::RealTime => r"(\d+\.\d*)\s*real seconds",
            Field::WarningCount => r"generated\s*(\d+)\s*warnings",
            Field::StoppedNoCalls => r"Stopped at floor with no calls =\s*(\d+)",
            Field::OpenedNoCalls => r"Doors opened at floor with no calls =\s*(\d+)",
            Field::LanternNotLit => r"another floor =\s*(\d+)",
            Field::LanternChangedDirection => r"doors open =\s*(\d+)",
            Field::ServicedWrongDirection => r"than lantern =\s*(\d+)",
            Field::NoFastSpeed => r"fast speed =\s*(\d+)",
            Field::NudgeBeforeReversal => r"before reversal =\s*(\d+)",
            Field::Passed => r"Passed:\s*(\d+)",
            Field::Failed => r"Failed:\s*(\d+)",
        }
    }
}

static CATALOGUE: Lazy<HashMap<Field, Regex>> = Lazy::new(|| {
    Field::ALL
        .iter()
        .map(|&field| {
            let regex = Regex::new(field.pattern()).expect("catalogue patterns are valid regexes");
            (field, regex)
        })
        .collect()
});

/// Parses every catalogue field out of `text`.
/// 从 `text` 中解析所有目录字段。
pub fn parse(text: &str) -> ParsedFields {
    parse_fields(text, &Field::ALL)
}

/// Parses only `fields`, in the given order. The order never affects the
/// result because each field is extracted independently.
///
/// 仅按给定顺序解析 `fields`。顺序不会影响结果，因为每个字段都是独立提取的。
pub fn parse_fields(text: &str, fields: &[Field]) -> ParsedFields {
    let mut parsed = ParsedFields::new();
    for &field in fields {
        if let Some(value) = extract(text, field) {
            parsed.insert(field, value);
        }
    }
    parsed
}

/// Extracts a single field, or `None` when it is absent or its capture does
/// not parse as the declared type.
pub fn extract(text: &str, field: Field) -> Option<FieldValue> {
    let captures = CATALOGUE.get(&field)?.captures(text)?;
    let raw = captures.get(1)?.as_str();

    let value = match field.field_type() {
        FieldType::Integer => raw.parse().ok().map(FieldValue::Integer),
        FieldType::Float => raw.parse().ok().map(FieldValue::Float),
        FieldType::Duration => strip_unit(raw).parse().ok().map(FieldValue::Float),
        FieldType::Event => Some(FieldValue::Event {
            at: raw.to_string(),
            message: captures
                .get(2)
                .map(|m| m.as_str().trim_end().to_string())
                .unwrap_or_default(),
        }),
    };

    if value.is_none() {
        log::warn!("Ignoring {field}: '{raw}' is not a valid {:?}", field.field_type());
    }
    value
}

fn strip_unit(raw: &str) -> &str {
    raw.trim_end_matches(|c: char| c.is_ascii_alphabetic())
}
