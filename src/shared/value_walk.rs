//! Depth-bounded visitor over JSON trees
//!
//! Every string leaf is offered to a per-string transform together with the
//! key it sits under (`None` for array elements and the root). Containers are
//! descended into before their string siblings are rewritten, so a transform
//! never sees text it produced itself during the same walk.

use serde_json::Value;

/// Nesting limit for any walk; contract payloads are far shallower than this
pub const MAX_WALK_DEPTH: usize = 64;

pub type WalkResult<T> = Result<T, WalkError>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WalkError {
    #[error("value nested deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct ValueWalker {
    max_depth: usize,
}

impl Default for ValueWalker {
    fn default() -> Self {
        Self::new(MAX_WALK_DEPTH)
    }
}

impl ValueWalker {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Rewrite string leaves in place
    ///
    /// `transform(key, text)` returns the replacement, or `None` to leave the
    /// string alone. Returns how many strings were replaced. On `TooDeep` the
    /// tree may be partially rewritten.
    pub fn rewrite_strings<F>(&self, value: &mut Value, mut transform: F) -> WalkResult<usize>
    where
        F: FnMut(Option<&str>, &str) -> Option<String>,
    {
        let mut replaced = 0;
        self.walk(value, None, 0, &mut transform, &mut replaced)?;
        Ok(replaced)
    }

    fn walk<F>(
        &self,
        value: &mut Value,
        key: Option<&str>,
        depth: usize,
        transform: &mut F,
        replaced: &mut usize,
    ) -> WalkResult<()>
    where
        F: FnMut(Option<&str>, &str) -> Option<String>,
    {
        if depth > self.max_depth {
            return Err(WalkError::TooDeep {
                max_depth: self.max_depth,
            });
        }

        match value {
            Value::Object(map) => {
                for (child_key, child) in map.iter_mut() {
                    self.walk(child, Some(child_key.as_str()), depth + 1, transform, replaced)?;
                }
            }
            Value::Array(items) => {
                for child in items.iter_mut() {
                    self.walk(child, None, depth + 1, transform, replaced)?;
                }
            }
            Value::String(text) => {
                if let Some(new_text) = transform(key, text.as_str()) {
                    *text = new_text;
                    *replaced += 1;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }

        Ok(())
    }
}
