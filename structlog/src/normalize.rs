//! The argument normalizer: a recovering parser over untyped input.
//!
//! Logging calls accept a loosely structured list of [`Param`]s: flat
//! key/value pairs at alternating positions, mixed freely with maps,
//! loggables and errors. A single left-to-right scan classifies each element
//! and produces an ordered field sequence plus an optional extracted error.
//!
//! The scan carries a `reliable_ordering` flag. While it holds, a plain
//! scalar is a candidate key consuming the next element as its value. The
//! first invalid key flips the flag: from then on positional pairing cannot
//! be trusted, so plain scalars are skipped silently and only
//! position-independent elements (loggables, errors, maps) are honored.
//! Nothing in here ever fails the call; every malformed element degrades to
//! a dropped field plus one warn diagnostic.

use std::error::Error;
use std::sync::Arc;

use crate::backend::Diagnostics;
use crate::loggable::Loggable;
use crate::param::Param;
use crate::value::{Field, Value};

/// Key under which an error argument's root-cause message is recorded.
pub(crate) const ERROR_MESSAGE_KEY: &str = "errorMessage";

/// Upper bound on `Error::source` chain traversal, guarding against
/// self-referential cause chains.
const MAX_CAUSE_DEPTH: usize = 64;

pub(crate) type ExtractedError = Arc<dyn Error + Send + Sync>;

pub(crate) struct Normalized {
    pub(crate) fields: Vec<Field>,
    pub(crate) error: Option<ExtractedError>,
}

/// Normalizes a call's argument list into an ordered field sequence.
///
/// Fields whose key already exists in `global` are dropped with a
/// diagnostic; the global value takes precedence. With `extract_errors`
/// unset (context calls), error params receive no special treatment and fall
/// through to ordinary classification.
pub(crate) fn normalize(
    params: &[Param],
    global: &[Field],
    diag: &Diagnostics<'_>,
    extract_errors: bool,
) -> Normalized {
    let mut fields = Vec::new();
    let mut error: Option<ExtractedError> = None;
    let mut reliable_ordering = true;

    let mut i = 0;
    while i < params.len() {
        match &params[i] {
            Param::Loggable(loggable) => {
                for field in expand_loggable(loggable.as_ref(), diag) {
                    push_field(&mut fields, field, global, diag);
                }
                i += 1;
            }
            Param::Error(cause) if extract_errors => {
                // The error itself is forwarded to the backend; the field
                // records its root cause for easy parsing.
                fields.push(Field::new(
                    ERROR_MESSAGE_KEY,
                    Value::String(root_cause_message(cause.as_ref())),
                ));
                if error.is_none() {
                    error = Some(Arc::clone(cause));
                }
                i += 1;
            }
            // A map at an even position, or at an odd position whose
            // predecessor was not a valid key (so it cannot have been meant
            // as that key's value), contributes its own entries.
            Param::Map(entries) if i % 2 == 0 || !is_valid_key(&params[i - 1]) => {
                for (key, value) in entries {
                    if validate_string_key(key, None, Some(diag)) {
                        push_field(
                            &mut fields,
                            Field::new(key.clone(), value.clone()),
                            global,
                            diag,
                        );
                    }
                }
                i += 1;
            }
            param if reliable_ordering => {
                if i + 1 < params.len() {
                    match validate_key(param, None, Some(diag)) {
                        Some(key) => {
                            let field = Field::new(key, params[i + 1].clone().into_value());
                            push_field(&mut fields, field, global, diag);
                        }
                        // Ordering can no longer be trusted: we cannot tell
                        // whether the rejected element was meant to consume a
                        // value slot.
                        None => reliable_ordering = false,
                    }
                    i += 2;
                } else {
                    diag.warn(&format!(
                        "odd number of parameters ({}) passed in. The value pair for key \
                         `{param}` not found thus it has been ignored.",
                        params.len(),
                    ));
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    Normalized { fields, error }
}

fn push_field(fields: &mut Vec<Field>, field: Field, global: &[Field], diag: &Diagnostics<'_>) {
    match global.iter().find(|candidate| candidate.key == field.key) {
        Some(winner) => diag.warn(&format!(
            "key `{}` ignored because it exists in the global context with value `{}` \
             which takes precedence.",
            field.key, winner.value,
        )),
        None => fields.push(field),
    }
}

/// Expands a loggable's field list, validating each key.
///
/// An odd-length list drops its trailing element with a diagnostic,
/// independently of the surrounding call's argument parity.
pub(crate) fn expand_loggable(loggable: &dyn Loggable, diag: &Diagnostics<'_>) -> Vec<Field> {
    let Some(items) = loggable.fields() else {
        diag.warn(&format!(
            "loggable `{}` returned no fields.",
            loggable.name()
        ));
        return Vec::new();
    };

    let mut even = items.len();
    if even % 2 != 0 {
        even -= 1;
        diag.warn(&format!(
            "odd number of parameters ({}) returned from `{}`. The value pair for key \
             `{}` not found thus it has been ignored.",
            items.len(),
            loggable.name(),
            items[even],
        ));
    }

    let mut fields = Vec::with_capacity(even / 2);
    let mut items = items.into_iter().take(even);
    while let (Some(key), Some(value)) = (items.next(), items.next()) {
        if let Some(key) = validate_key(&key, Some(loggable.name()), Some(diag)) {
            fields.push(Field::new(key, value.into_value()));
        }
    }
    fields
}

/// Validates a candidate key param: it must be a non-empty string scalar
/// with no embedded spaces.
///
/// With `diag` set, rejection emits one warn diagnostic distinguishing wrong
/// type from embedded spaces and naming the loggable `source`, if any. Some
/// checks are retrospective, deciding whether an already-seen element was a
/// key; those pass `None` to stay silent.
pub(crate) fn validate_key<'p>(
    param: &'p Param,
    source: Option<&str>,
    diag: Option<&Diagnostics<'_>>,
) -> Option<&'p str> {
    match param {
        Param::Scalar(Value::String(key)) => {
            validate_string_key(key, source, diag).then_some(key.as_str())
        }
        _ => {
            if let Some(diag) = diag {
                diag.warn(&format!(
                    "key `{param}` expected to be of type string but `{}` passed in{}.",
                    param.kind(),
                    origin(source),
                ));
            }
            None
        }
    }
}

pub(crate) fn validate_string_key(
    key: &str,
    source: Option<&str>,
    diag: Option<&Diagnostics<'_>>,
) -> bool {
    if key.is_empty() {
        if let Some(diag) = diag {
            diag.warn(&format!("empty key passed in{}.", origin(source)));
        }
        return false;
    }
    if !key.contains(' ') {
        return true;
    }
    if let Some(diag) = diag {
        diag.warn(&format!(
            "key `{key}` with spaces passed in{}.",
            origin(source)
        ));
    }
    false
}

fn origin(source: Option<&str>) -> String {
    source
        .map(|name| format!(" from `{name}`"))
        .unwrap_or_default()
}

fn is_valid_key(param: &Param) -> bool {
    validate_key(param, None, None).is_some()
}

/// Walks the cause chain to the innermost error and returns its message.
pub(crate) fn root_cause_message(error: &(dyn Error + 'static)) -> String {
    let mut current = error;
    for _ in 0..MAX_CAUSE_DEPTH {
        match current.source() {
            Some(source) => current = source,
            None => break,
        }
    }
    current.to_string()
}
