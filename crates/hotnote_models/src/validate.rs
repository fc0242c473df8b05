//! Structural validation of hot-post analysis output.

use serde_json::Value;

/// Fields whose value must itself carry non-empty arrays to be usable
/// downstream. A field absent from this table only needs to be present
/// and non-null.
const ARRAY_REQUIREMENTS: &[(&str, &[&str])] = &[
    ("rules", &[]),
    ("titleFormulas", &["suggestedFormulas"]),
    ("contentStructure", &["openingHooks", "endingHooks"]),
    ("tagStrategy", &["commonTags"]),
    ("coverStyleAnalysis", &["commonStyles"]),
];

/// Check an analysis document against the caller's required fields.
///
/// Returns every problem found, empty when the document is acceptable.
/// A required field must be present and non-null; fields with a known
/// structure must additionally carry the non-empty arrays listed in
/// [`ARRAY_REQUIREMENTS`].
///
/// # Examples
///
/// ```
/// use hotnote_models::validate_analysis;
/// use serde_json::json;
///
/// let doc = json!({"rules": ["hook first"], "tone": "playful"});
/// assert!(validate_analysis(&doc, &["rules", "tone"]).is_empty());
///
/// let problems = validate_analysis(&doc, &["rules", "tagStrategy"]);
/// assert_eq!(problems, vec!["missing field: tagStrategy"]);
/// ```
pub fn validate_analysis(document: &Value, required_fields: &[&str]) -> Vec<String> {
    let mut problems = Vec::new();

    if !document.is_object() {
        problems.push("analysis is not a JSON object".to_string());
        return problems;
    }

    for &field in required_fields {
        let Some(value) = document.get(field) else {
            problems.push(format!("missing field: {}", field));
            continue;
        };
        if value.is_null() {
            problems.push(format!("null field: {}", field));
            continue;
        }
        check_structure(field, value, &mut problems);
    }

    problems
}

fn check_structure(field: &str, value: &Value, problems: &mut Vec<String>) {
    let Some(&(_, array_paths)) = ARRAY_REQUIREMENTS.iter().find(|(name, _)| *name == field) else {
        return;
    };

    if array_paths.is_empty() {
        if !is_nonempty_array(value) {
            problems.push(format!("{} must be a non-empty array", field));
        }
        return;
    }

    for &path in array_paths {
        match value.get(path) {
            Some(inner) if is_nonempty_array(inner) => {}
            _ => problems.push(format!("{}.{} must be a non-empty array", field, path)),
        }
    }
}

fn is_nonempty_array(value: &Value) -> bool {
    value.as_array().is_some_and(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_document() -> Value {
        json!({
            "rules": ["open with a question"],
            "titleFormulas": {"suggestedFormulas": ["{pain} + {fix}"]},
            "contentStructure": {
                "openingHooks": ["你有没有发现"],
                "endingHooks": ["评论区告诉我"]
            },
            "tagStrategy": {"commonTags": ["护肤"]},
            "coverStyleAnalysis": {"commonStyles": ["大字报"]}
        })
    }

    const ALL_FIELDS: &[&str] = &[
        "rules",
        "titleFormulas",
        "contentStructure",
        "tagStrategy",
        "coverStyleAnalysis",
    ];

    #[test]
    fn complete_document_passes() {
        assert!(validate_analysis(&full_document(), ALL_FIELDS).is_empty());
    }

    #[test]
    fn empty_inner_array_is_reported() {
        let mut doc = full_document();
        doc["contentStructure"]["endingHooks"] = json!([]);
        let problems = validate_analysis(&doc, ALL_FIELDS);
        assert_eq!(
            problems,
            vec!["contentStructure.endingHooks must be a non-empty array"]
        );
    }

    #[test]
    fn null_and_missing_fields_are_distinct() {
        let doc = json!({"rules": null});
        let problems = validate_analysis(&doc, &["rules", "tagStrategy"]);
        assert_eq!(
            problems,
            vec!["null field: rules", "missing field: tagStrategy"]
        );
    }

    #[test]
    fn unknown_fields_need_only_presence() {
        let doc = json!({"tone": {"whatever": true}});
        assert!(validate_analysis(&doc, &["tone"]).is_empty());
    }

    #[test]
    fn non_object_document_is_rejected() {
        let problems = validate_analysis(&json!([1, 2]), &["rules"]);
        assert_eq!(problems, vec!["analysis is not a JSON object"]);
    }
}
