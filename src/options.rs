use crate::error::{Error, Result};
use serde_json::{Map, Value, json};

/// Free-form figure options: name -> value of varying shape (scalar, list,
/// or nested record).
pub type Options = Map<String, Value>;

/// Outcome of [`partition`]: the two disjoint option sets a figure call
/// consumes — `display` feeds construction, `update` is applied afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioned {
    pub display: Options,
    pub update: Options,
}

/// Split caller options into display and update sets.
///
/// Keys on the allowlist go to `display`, everything else to `update`; the
/// two sets are disjoint and together hold every input key. Defaults are
/// then injected into `display` for absent keys only — a caller-supplied
/// value always wins, even a null or empty one. Finally the `marker` entry
/// of `update` gets its nested line defaults resolved.
pub fn partition(options: Options, allowlist: &[&str], defaults: &Options) -> Result<Partitioned> {
    let mut display = Options::new();
    let mut update = Options::new();

    for (key, value) in options {
        if allowlist.contains(&key.as_str()) {
            display.insert(key, value);
        } else {
            update.insert(key, value);
        }
    }

    for (key, value) in defaults {
        if !display.contains_key(key) {
            display.insert(key.clone(), value.clone());
        }
    }

    resolve_marker(&mut update)?;

    Ok(Partitioned { display, update })
}

/// Fill in the `marker.line.{width,color}` defaults.
///
/// Three levels, each defaulted independently:
/// - no `marker` at all: a whole default record with line width 1.0;
/// - `marker` without `line`: a default line record with width 0.75;
/// - `line` missing `width` or `color`: each injected on its own (0.75 and
///   "#ffffff").
///
/// The 1.0 / 0.75 width split between the first two branches is inherited
/// behavior and kept as-is.
fn resolve_marker(update: &mut Options) -> Result<()> {
    let Some(value) = update.get_mut("marker") else {
        update.insert(
            "marker".to_string(),
            json!({"line": {"width": 1.0, "color": "#ffffff"}}),
        );
        return Ok(());
    };

    let marker = value
        .as_object_mut()
        .ok_or_else(|| Error::malformed_option("marker", "expected an object"))?;

    let Some(line_value) = marker.get_mut("line") else {
        marker.insert(
            "line".to_string(),
            json!({"width": 0.75, "color": "#ffffff"}),
        );
        return Ok(());
    };

    let line = line_value
        .as_object_mut()
        .ok_or_else(|| Error::malformed_option("marker", "expected `line` to be an object"))?;

    line.entry("width").or_insert(json!(0.75));
    line.entry("color").or_insert(json!("#ffffff"));

    Ok(())
}
