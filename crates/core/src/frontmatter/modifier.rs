//! Header field edits.

use super::parser::yaml_kind;
use super::types::{FieldEdit, FieldEditOp, Frontmatter};
use serde_yaml::Value;
use thiserror::Error;

/// Errors that can occur while editing header fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontmatterEditError {
    #[error("field '{0}' is not a boolean, cannot toggle")]
    NotBoolean(String),
    #[error("field '{0}' is not a number, cannot increment")]
    NotNumber(String),
    #[error("field '{0}' is not a list, cannot append")]
    NotList(String),
    #[error("operation on field '{0}' requires a value")]
    MissingValue(String),
    #[error("increment for field '{field}' must be a number, got {actual}")]
    BadIncrement { field: String, actual: &'static str },
}

/// Apply edits to header fields.
///
/// Edits run in order against a working copy; the header is only updated
/// when every edit succeeds.
pub fn apply_edits(
    fm: &mut Frontmatter,
    edits: &[FieldEdit],
) -> Result<(), FrontmatterEditError> {
    let mut working = fm.clone();
    for edit in edits {
        apply_single_edit(&mut working, edit)?;
    }
    *fm = working;
    Ok(())
}

fn apply_single_edit(
    fm: &mut Frontmatter,
    edit: &FieldEdit,
) -> Result<(), FrontmatterEditError> {
    let field = &edit.field;
    match edit.op {
        FieldEditOp::Set => {
            let value = edit
                .value
                .clone()
                .ok_or_else(|| FrontmatterEditError::MissingValue(field.clone()))?;
            fm.insert(field.clone(), value);
        }
        FieldEditOp::Remove => {
            fm.remove(field);
        }
        FieldEditOp::Toggle => match fm.get(field) {
            Some(Value::Bool(b)) => {
                let flipped = !b;
                fm.insert(field.clone(), Value::Bool(flipped));
            }
            // Missing fields toggle from false.
            None => {
                fm.insert(field.clone(), Value::Bool(true));
            }
            Some(_) => return Err(FrontmatterEditError::NotBoolean(field.clone())),
        },
        FieldEditOp::Increment => {
            let step = match &edit.value {
                None => Value::Number(1.into()),
                Some(v @ Value::Number(_)) => v.clone(),
                Some(other) => {
                    return Err(FrontmatterEditError::BadIncrement {
                        field: field.clone(),
                        actual: yaml_kind(other),
                    });
                }
            };
            let next = match fm.get(field) {
                Some(Value::Number(current)) => add_numbers(current, &step),
                None => step,
                Some(_) => return Err(FrontmatterEditError::NotNumber(field.clone())),
            };
            fm.insert(field.clone(), next);
        }
        FieldEditOp::Append => {
            let item = edit
                .value
                .clone()
                .ok_or_else(|| FrontmatterEditError::MissingValue(field.clone()))?;
            match fm.get(field).cloned() {
                Some(Value::Sequence(mut seq)) => {
                    seq.push(item);
                    fm.insert(field.clone(), Value::Sequence(seq));
                }
                None => {
                    fm.insert(field.clone(), Value::Sequence(vec![item]));
                }
                Some(_) => return Err(FrontmatterEditError::NotList(field.clone())),
            }
        }
    }
    Ok(())
}

/// Integers stay integers; anything involving a float becomes a float.
fn add_numbers(current: &serde_yaml::Number, step: &Value) -> Value {
    let step_num = match step {
        Value::Number(n) => n,
        _ => return Value::Number(current.clone()),
    };
    match (current.as_i64(), step_num.as_i64()) {
        (Some(a), Some(b)) => Value::Number(a.saturating_add(b).into()),
        _ => {
            let a = current.as_f64().unwrap_or(0.0);
            let b = step_num.as_f64().unwrap_or(0.0);
            Value::Number((a + b).into())
        }
    }
}
