//! Schema validation over a step array, collecting every error rather than
//! failing fast on the first one.
//!
//! Deserializing a [`crate::protocol::StepEnvelope`] already rejects
//! unrecognized/ambiguous action keys and missing mandatory fields for the
//! typed params structs, but it does so one step at a time and stops at the
//! first `serde` error. The validator re-parses the raw step array so it can
//! report every offending step in one pass, plus the cross-field and
//! enumerated-value rules `serde`'s derive can't express (mutually
//! exclusive options, ref-format regex, non-negative bounds).

use serde_json::Value;

use crate::protocol::{Step, StepEnvelope};

/// Largest timeout (ms) a step or request may declare.
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Errors found for one step in the array.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StepValidationError {
    pub index: usize,
    /// The action name if it could be determined, else `"unknown"`.
    pub step: String,
    pub errors: Vec<String>,
}

/// Aggregate validation outcome, matching the wire shape
/// `{valid, errors: [{index, step, errors}]}`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<StepValidationError>,
}

/// Validate a raw (already-parsed-as-JSON) step array. Never panics: any
/// step that doesn't even deserialize is reported as an error for its
/// index, not propagated as a parse failure.
pub fn validate(steps: &[Value]) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, raw) in steps.iter().enumerate() {
        let mut step_errors = Vec::new();
        let mut action_name = "unknown".to_string();

        match serde_json::from_value::<StepEnvelope>(raw.clone()) {
            Ok(envelope) => {
                action_name = envelope.action.name().to_string();
                validate_envelope(&envelope, &mut step_errors);
            }
            Err(e) => step_errors.push(e.to_string()),
        }

        if !step_errors.is_empty() {
            errors.push(StepValidationError {
                index,
                step: action_name,
                errors: step_errors,
            });
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

fn validate_envelope(envelope: &StepEnvelope, errors: &mut Vec<String>) {
    if let Some(timeout) = envelope.timeout {
        if timeout.as_millis() as u64 > MAX_TIMEOUT_MS {
            errors.push(format!(
                "timeout {}ms exceeds the maximum of {MAX_TIMEOUT_MS}ms",
                timeout.as_millis()
            ));
        }
    }

    match &envelope.action {
        Step::Click(p) => validate_target(&p.target, errors),
        Step::Fill(p) => validate_target(&p.target, errors),
        Step::Hover { target }
        | Step::SelectText { target }
        | Step::Submit { target }
        | Step::FormState { target }
        | Step::Get { target }
        | Step::GetDom { target }
        | Step::GetBox { target }
        | Step::Query { target }
        | Step::QueryAll { target }
        | Step::Inspect { target } => validate_target(target, errors),
        Step::Wait { selector, .. } if selector.is_empty() => {
            errors.push("wait requires a non-empty selector".to_string());
        }
        Step::Goto(p) if p.url.is_empty() => {
            errors.push("goto requires a non-empty url".to_string());
        }
        Step::Drag(p) => {
            if p.source.selector.is_none()
                && p.source.element_ref.is_none()
                && p.source.x.is_none()
            {
                errors.push("drag source must specify a selector, ref, or coordinates".to_string());
            }
            if p.target.selector.is_none()
                && p.target.element_ref.is_none()
                && p.target.x.is_none()
            {
                errors.push("drag target must specify a selector, ref, or coordinates".to_string());
            }
        }
        Step::Poll(p) => {
            if p.r#fn.is_empty() {
                errors.push("poll requires a non-empty fn expression".to_string());
            }
        }
        Step::Eval(p) if p.expression.is_empty() => {
            errors.push("eval requires a non-empty expression".to_string());
        }
        _ => {}
    }
}

/// An `ElementTarget` must carry exactly one addressing strategy, and a
/// `ref` field (when present) must match the wire-stable format.
fn validate_target(target: &crate::protocol::ElementTarget, errors: &mut Vec<String>) {
    let strategies = [
        target.selector.is_some(),
        target.element_ref.is_some(),
        target.text.is_some(),
        target.selectors.is_some(),
        target.x.is_some() && target.y.is_some(),
        target.label.is_some(),
    ];
    let count = strategies.iter().filter(|b| **b).count();

    if count == 0 {
        errors.push(
            "target requires one of selector, ref, text, selectors, x/y, or label".to_string(),
        );
    } else if count > 1 {
        errors.push("target may specify only one addressing strategy".to_string());
    }

    if let Some(ref r) = target.element_ref {
        if !is_valid_ref(r) {
            errors.push(format!("ref {r:?} does not match ^s\\d+e\\d+$"));
        }
    }
}

/// Hand-rolled `^s\d+e\d+$` check; a regex crate isn't pulled in for one
/// fixed pattern used at validation time on every step.
pub fn is_valid_ref(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('s') else {
        return false;
    };
    let Some(e_pos) = rest.find('e') else {
        return false;
    };
    let (snapshot_id, rest) = rest.split_at(e_pos);
    let element_id = &rest[1..];
    !snapshot_id.is_empty()
        && !element_id.is_empty()
        && snapshot_id.bytes().all(|b| b.is_ascii_digit())
        && element_id.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ref_format_accepts_well_formed_refs() {
        assert!(is_valid_ref("s1e2"));
        assert!(is_valid_ref("s0e0"));
        assert!(is_valid_ref("s123e456"));
    }

    #[test]
    fn ref_format_rejects_malformed_refs() {
        assert!(!is_valid_ref("e12345"));
        assert!(!is_valid_ref("s1"));
        assert!(!is_valid_ref("s1e"));
        assert!(!is_valid_ref("se1"));
        assert!(!is_valid_ref("s1e2e3"));
        assert!(!is_valid_ref(""));
    }

    #[test]
    fn validate_never_panics_on_arbitrary_json() {
        let steps = vec![
            json!(null),
            json!(42),
            json!({"click": {}}),
            json!({}),
            json!({"click": {"selector": "#a"}, "fill": {"selector": "#a", "value": "x"}}),
            json!({"goto": "http://x/"}),
        ];
        let result = validate(&steps);
        assert!(!result.valid);
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn validator_totality_is_either_valid_empty_or_invalid_nonempty() {
        for steps in [
            vec![json!({"goto": "http://x/"})],
            vec![json!({"click": {}})],
            vec![json!({"click": {"selector": "#a", "ref": "s1e2"}})],
        ] {
            let result = validate(&steps);
            assert_eq!(result.valid, result.errors.is_empty());
        }
    }

    #[test]
    fn click_with_both_selector_and_ref_is_rejected() {
        let steps = vec![json!({"click": {"selector": "#a", "ref": "s1e2"}})];
        let result = validate(&steps);
        assert!(!result.valid);
    }

    #[test]
    fn click_with_malformed_ref_is_rejected() {
        let steps = vec![json!({"click": {"ref": "e12345"}})];
        let result = validate(&steps);
        assert!(!result.valid);
    }

    #[test]
    fn well_formed_steps_validate_clean() {
        let steps = vec![
            json!({"goto": "http://example.com"}),
            json!({"click": {"selector": "button#submit"}}),
            json!({"fill": {"label": "Name", "value": "Ann"}}),
            json!({"snapshot": {}}),
        ];
        let result = validate(&steps);
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
    }
}
