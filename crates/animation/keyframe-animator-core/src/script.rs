//! Reader for the line-oriented keyframe script format.
//!
//! ```text
//! # comment
//! 0
//! position: 0, 0, 0
//! direction: 0, 0, 1
//! 2.5
//! position: 10, 0, 0
//! ```
//!
//! All whitespace is removed from a line before it is interpreted. A line
//! without a colon starts a new keyframe at the given time; `name:value`
//! binds a value in the keyframe being accumulated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hashbrown::{HashMap, HashSet};
use log::debug;

use crate::config::{AnimatorConfig, KeyframeOrder};
use crate::keyframe::{Keyframe, KeyframeStore};
use crate::parse::parse_scalar;
use crate::registry::ParameterRegistry;
use crate::value::Value;
use crate::AnimatorError;

/// Open and read a keyframe script from disk.
pub fn load_script(
    path: impl AsRef<Path>,
    registry: &ParameterRegistry,
    config: &AnimatorConfig,
) -> Result<KeyframeStore, AnimatorError> {
    let path = path.as_ref();
    let label = path.display().to_string();
    let file = File::open(path).map_err(|_| AnimatorError::ScriptNotFound {
        path: label.clone(),
    })?;
    read_script(BufReader::new(file), &label, registry, config)
}

/// Read a keyframe script held in memory.
pub fn parse_script(
    text: &str,
    registry: &ParameterRegistry,
    config: &AnimatorConfig,
) -> Result<KeyframeStore, AnimatorError> {
    read_script(text.as_bytes(), "<memory>", registry, config)
}

/// Read a keyframe script from any buffered reader; `source` labels errors.
pub fn read_script<R: BufRead>(
    reader: R,
    source: &str,
    registry: &ParameterRegistry,
    config: &AnimatorConfig,
) -> Result<KeyframeStore, AnimatorError> {
    let mut builder = ScriptBuilder::new(registry, config);
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AnimatorError::ScriptRead {
            path: source.to_string(),
            reason: e.to_string(),
        })?;
        builder.feed_line(index + 1, &line)?;
    }
    let store = builder.finish()?;
    debug!(
        "Loaded {} keyframes from {} ({}..{})",
        store.len(),
        source,
        store.start(),
        store.end()
    );
    Ok(store)
}

/// Accumulates script lines into sealed keyframes.
struct ScriptBuilder<'a> {
    registry: &'a ParameterRegistry,
    config: &'a AnimatorConfig,
    keyframes: Vec<Keyframe>,
    /// Values in effect; carried into every later keyframe.
    values: HashMap<String, Value>,
    /// Names written since the pending keyframe's time line.
    explicit: HashSet<String>,
    pending_time: f64,
    pending_line: usize,
}

impl<'a> ScriptBuilder<'a> {
    fn new(registry: &'a ParameterRegistry, config: &'a AnimatorConfig) -> Self {
        Self {
            registry,
            config,
            keyframes: Vec::new(),
            values: HashMap::new(),
            explicit: HashSet::new(),
            pending_time: 0.0,
            pending_line: 0,
        }
    }

    fn feed_line(&mut self, line_no: usize, raw: &str) -> Result<(), AnimatorError> {
        // byte-order mark written by some editors
        let raw = match line_no {
            1 => raw.strip_prefix('\u{feff}').unwrap_or(raw),
            _ => raw,
        };
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match line.split_once(':') {
            None => {
                if !self.values.is_empty() {
                    self.seal()?;
                }
                let time = parse_scalar(&line)?;
                if time.is_nan() {
                    return Err(AnimatorError::parse("time", &line));
                }
                self.pending_time = time;
                self.pending_line = line_no;
                Ok(())
            }
            Some((name, literal)) => {
                if name.is_empty() || literal.is_empty() || literal.contains(':') {
                    return Err(AnimatorError::MalformedLine {
                        line: line_no,
                        content: raw.to_string(),
                    });
                }
                self.bind(line_no, name, literal)
            }
        }
    }

    fn bind(&mut self, line_no: usize, name: &str, literal: &str) -> Result<(), AnimatorError> {
        let descriptor =
            self.registry
                .get(name)
                .ok_or_else(|| AnimatorError::UnknownParameter {
                    name: name.to_string(),
                    line: line_no,
                })?;
        let value = descriptor.parse(literal)?;

        if let Some(previous) = self.values.get(name) {
            if !previous.same_kind(&value) {
                return Err(AnimatorError::TypeMismatch {
                    parameter: name.to_string(),
                    expected: previous.kind(),
                    actual: value.kind(),
                });
            }
            if let (Value::Array(a), Value::Array(b)) = (previous, &value) {
                if self.config.strict_array_lengths && a.len() != b.len() {
                    return Err(AnimatorError::ArrayLengthMismatch {
                        parameter: name.to_string(),
                        expected: a.len(),
                        actual: b.len(),
                    });
                }
            }
        }

        self.explicit.insert(name.to_string());
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn seal(&mut self) -> Result<(), AnimatorError> {
        if self.keyframes.is_empty() {
            self.check_required()?;
        } else if self.config.keyframe_order == KeyframeOrder::Strict {
            let previous = self.keyframes[self.keyframes.len() - 1].time;
            if self.pending_time < previous {
                return Err(AnimatorError::UnorderedKeyframes {
                    line: self.pending_line,
                    time: self.pending_time,
                    previous,
                });
            }
        }

        self.keyframes.push(Keyframe::with_explicit(
            self.pending_time,
            self.values.clone(),
            std::mem::take(&mut self.explicit),
        ));
        Ok(())
    }

    fn check_required(&self) -> Result<(), AnimatorError> {
        match self
            .registry
            .required()
            .find(|d| !self.values.contains_key(d.name()))
        {
            Some(missing) => Err(AnimatorError::MissingRequiredParameter {
                name: missing.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn finish(mut self) -> Result<KeyframeStore, AnimatorError> {
        self.seal()?;
        KeyframeStore::new(self.keyframes)
    }
}
