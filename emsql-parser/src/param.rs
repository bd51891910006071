//! Parameter bookkeeping.
//!
//! Positional parameters (`?`) get their ordinal from order of appearance;
//! indexed parameters (`?N` / `$N`) fill a sparse array that is reconciled
//! at statement end. The two forms must never mix in one statement.

use emsql_ast::{ParameterRef, Value};
use emsql_core::{ErrorKind, FrontendError, Result};

/// Which parameter style the statement uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ParamMode {
    Positional,
    Indexed,
}

/// The growing parameter list of one parse.
#[derive(Debug, Default)]
pub struct ParamTracker {
    mode: Option<ParamMode>,
    positional: u32,
    max_index: u32,
    cleared: bool,
}

impl ParamTracker {
    /// An empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parameter marker; `index` 0 means positional.
    pub fn register(&mut self, index: u32) -> Result<ParameterRef> {
        if index == 0 {
            match self.mode {
                Some(ParamMode::Indexed) => return Err(mixing_error()),
                _ => self.mode = Some(ParamMode::Positional),
            }
            self.positional += 1;
            Ok(ParameterRef {
                ordinal: self.positional,
                explicit: false,
            })
        } else {
            match self.mode {
                Some(ParamMode::Positional) => return Err(mixing_error()),
                _ => self.mode = Some(ParamMode::Indexed),
            }
            self.max_index = self.max_index.max(index);
            Ok(ParameterRef {
                ordinal: index,
                explicit: true,
            })
        }
    }

    /// Number of parameters seen so far.
    pub fn count(&self) -> u32 {
        if self.cleared {
            return 0;
        }
        match self.mode {
            Some(ParamMode::Positional) => self.positional,
            Some(ParamMode::Indexed) => self.max_index,
            None => 0,
        }
    }

    /// Wipes the list; used by the brace initializer, which binds literal
    /// values and leaves the command parameter-free.
    pub fn clear(&mut self) {
        self.cleared = true;
    }

    /// Reconciles the list: unseen indexed ordinals get placeholders.
    pub fn finish(self) -> Vec<ParameterDef> {
        (1..=self.count()).map(ParameterDef::new).collect()
    }
}

fn mixing_error() -> FrontendError {
    FrontendError::new(
        ErrorKind::CannotMixIndexedAndUnindexedParams,
        "Cannot mix indexed and unindexed parameters",
    )
}

/// One parameter slot of a prepared command, in ordinal order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDef {
    /// 1-based ordinal.
    pub ordinal: u32,
    value: Option<Value>,
}

impl ParameterDef {
    fn new(ordinal: u32) -> Self {
        Self {
            ordinal,
            value: None,
        }
    }

    /// Binds a value.
    pub fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// Whether a value has been bound.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The bound value, if any.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_ordinals_follow_appearance() {
        let mut tracker = ParamTracker::new();
        assert_eq!(tracker.register(0).unwrap().ordinal, 1);
        assert_eq!(tracker.register(0).unwrap().ordinal, 2);
        assert_eq!(tracker.register(0).unwrap().ordinal, 3);
        assert_eq!(tracker.finish().len(), 3);
    }

    #[test]
    fn indexed_list_length_is_max_index() {
        let mut tracker = ParamTracker::new();
        tracker.register(3).unwrap();
        tracker.register(1).unwrap();
        let params = tracker.finish();
        assert_eq!(params.len(), 3);
        assert_eq!(params[2].ordinal, 3);
        assert!(!params[0].is_set());
    }

    #[test]
    fn mixing_is_rejected() {
        let mut tracker = ParamTracker::new();
        tracker.register(0).unwrap();
        let error = tracker.register(2).unwrap_err();
        assert_eq!(error.kind, ErrorKind::CannotMixIndexedAndUnindexedParams);

        let mut tracker = ParamTracker::new();
        tracker.register(2).unwrap();
        let error = tracker.register(0).unwrap_err();
        assert_eq!(error.kind, ErrorKind::CannotMixIndexedAndUnindexedParams);
    }

    #[test]
    fn clear_leaves_no_parameters() {
        let mut tracker = ParamTracker::new();
        tracker.register(0).unwrap();
        tracker.clear();
        assert!(tracker.finish().is_empty());
    }
}
