use smallvec::SmallVec;

use crate::error::Error;
use crate::num::value_from_number_token;
use crate::parse::Event;
use crate::types::{Array, Object, Value};
use crate::Result;

/// One hop of the path from the root to the current insertion target.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Key(String),
    Index(usize),
}

type StepStack = SmallVec<[Step; 16]>;

/// Folds a flat event sequence into a [`Value`] tree.
///
/// The builder keeps a stack of insertion targets, addressed as an index
/// path from the root rather than by reference — container growth may
/// reallocate backing storage, so targets are re-resolved from the root on
/// each event. The stack starts with the root as its sole entry; closing
/// the outermost container pops that entry and ends the session.
pub struct TreeBuilder {
    root: Value,
    steps: StepStack,
    entries: usize,
    pending_key: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            root: Value::Null,
            steps: StepStack::new(),
            entries: 1,
            pending_key: String::new(),
        }
    }

    /// Discards all stack state and starts a fresh session over `root`.
    pub fn reset(&mut self, root: Value) {
        self.root = root;
        self.steps.clear();
        self.entries = 1;
        self.pending_key.clear();
    }

    /// Current insertion-target stack size. Starts at 1; reaches 0 once the
    /// outermost container has been closed.
    pub fn depth(&self) -> usize {
        self.entries
    }

    /// The key recorded by the last [`Event::Key`], not yet consumed by a
    /// value event.
    pub fn pending_key(&self) -> &str {
        &self.pending_key
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Takes the built document and resets for the next session.
    pub fn finish(&mut self) -> Value {
        let root = self.root.take();
        self.reset(Value::Null);
        root
    }

    pub fn event(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::StartObject => self.start_object(),
            Event::EndObject => self.end_object(),
            Event::StartArray => self.start_array(),
            Event::EndArray => self.end_array(),
            Event::Key(key) => self.key(key),
            Event::Null => self.null(),
            Event::Bool(value) => self.boolean(value),
            Event::Number(token) => self.number(token),
            Event::String(value) => self.string(value),
        }
    }

    pub fn key(&mut self, key: &str) -> Result<()> {
        self.pending_key.clear();
        self.pending_key.push_str(key);
        Ok(())
    }

    pub fn null(&mut self) -> Result<()> {
        self.place(Value::Null).map(|_| ())
    }

    pub fn boolean(&mut self, value: bool) -> Result<()> {
        self.place(Value::Bool(value)).map(|_| ())
    }

    pub fn number(&mut self, token: &str) -> Result<()> {
        let value = value_from_number_token(token)?;
        self.place(value).map(|_| ())
    }

    pub fn string(&mut self, value: &str) -> Result<()> {
        self.place(Value::from(value)).map(|_| ())
    }

    pub fn start_object(&mut self) -> Result<()> {
        let step = self.place(Value::Object(Object::new()))?;
        self.push_step(step);
        Ok(())
    }

    pub fn start_array(&mut self) -> Result<()> {
        let step = self.place(Value::Array(Array::new()))?;
        self.push_step(step);
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.pop()
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.pop()
    }

    /// Inserts `value` at the current target. Returns the step addressing
    /// the inserted slot, or `None` when the scalar root was replaced in
    /// place (a container started there does not deepen the stack).
    fn place(&mut self, value: Value) -> Result<Option<Step>> {
        if self.entries == 0 {
            return Err(Error::malformed_structure(
                "no open container: the document has already been closed",
            ));
        }

        let key = std::mem::take(&mut self.pending_key);
        let at_root = self.steps.is_empty();
        let target = resolve_target(&mut self.root, &self.steps)?;

        match target {
            Value::Object(obj) => {
                obj.insert(key.clone(), value);
                Ok(Some(Step::Key(key)))
            }
            Value::Array(arr) => {
                arr.push(value);
                Ok(Some(Step::Index(arr.len() - 1)))
            }
            scalar => {
                if at_root {
                    *scalar = value;
                    Ok(None)
                } else {
                    Err(Error::malformed_structure(
                        "current insertion target is a scalar, cannot hold children",
                    ))
                }
            }
        }
    }

    fn push_step(&mut self, step: Option<Step>) {
        if let Some(step) = step {
            self.steps.push(step);
            self.entries += 1;
        }
    }

    fn pop(&mut self) -> Result<()> {
        if self.entries == 0 {
            return Err(Error::malformed_structure(
                "container end with no matching start",
            ));
        }
        self.entries -= 1;
        self.steps.pop();
        Ok(())
    }
}

/// Walks the step path down from the root to the current insertion target.
fn resolve_target<'a>(root: &'a mut Value, steps: &[Step]) -> Result<&'a mut Value> {
    let mut curr = root;
    for step in steps {
        curr = match (curr, step) {
            (Value::Object(obj), Step::Key(key)) => obj.get_mut(key).ok_or_else(|| {
                Error::malformed_structure(format!("insertion target '{key}' disappeared"))
            })?,
            (Value::Array(arr), Step::Index(index)) => arr.get_mut(*index).ok_or_else(|| {
                Error::malformed_structure(format!("insertion target [{index}] disappeared"))
            })?,
            _ => {
                return Err(Error::malformed_structure(
                    "insertion path no longer matches the document shape",
                ))
            }
        };
    }
    Ok(curr)
}
