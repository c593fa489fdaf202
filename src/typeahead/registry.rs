//! Associates typeaheads with the fields they are bound to.
use std::collections::HashMap;

use tracing::debug;

use super::error::{Result, TypeaheadError};
use super::field::TextField;
use super::options::TypeaheadOptions;
use super::widget::Typeahead;

/// Typeaheads keyed by the id of their field.
pub struct TypeaheadRegistry<T, F> {
    widgets: HashMap<String, Typeahead<T, F>>,
}

impl<T, F> Default for TypeaheadRegistry<T, F> {
    fn default() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }
}

impl<T, F> TypeaheadRegistry<T, F>
where
    T: Clone + 'static,
    F: TextField,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a new typeahead to `field`. An existing typeahead under the same
    /// id is torn down first and its field dropped.
    pub fn create_typeahead(
        &mut self,
        id: impl Into<String>,
        field: F,
        options: TypeaheadOptions<T>,
    ) -> &mut Typeahead<T, F> {
        let id = id.into();
        if let Some(previous) = self.widgets.remove(&id) {
            debug!("replacing typeahead on {}", id);
            previous.destroy();
        }
        debug!("typeahead attached to {}", id);
        self.widgets
            .entry(id)
            .or_insert_with(|| Typeahead::new(field, options))
    }

    pub fn get(&self, id: &str) -> Option<&Typeahead<T, F>> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Typeahead<T, F>> {
        self.widgets.get_mut(id)
    }

    /// Forces a lookup on the field's typeahead, e.g. after a button cleared
    /// the field.
    pub fn trigger_lookup(&mut self, id: &str) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(id)
            .ok_or_else(|| TypeaheadError::UnknownField(id.to_string()))?;
        widget.lookup(false);
        Ok(())
    }

    /// Detaches the typeahead and returns its field.
    pub fn destroy(&mut self, id: &str) -> Result<F> {
        self.widgets
            .remove(id)
            .map(Typeahead::destroy)
            .ok_or_else(|| TypeaheadError::UnknownField(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeahead::field::InputField;

    fn options() -> TypeaheadOptions<String> {
        let names = vec!["alice".to_string(), "bob".to_string()];
        TypeaheadOptions::new(names, |s: &String| s.clone())
    }

    #[test]
    fn trigger_lookup_reaches_the_stored_widget() {
        let mut registry = TypeaheadRegistry::new();
        registry.create_typeahead("recipient", InputField::new().with_text("al"), options());

        registry.trigger_lookup("recipient").unwrap();
        let widget = registry.get("recipient").unwrap();
        assert!(widget.is_shown());
        assert_eq!(widget.active_value().map(String::as_str), Some("alice"));
    }

    #[test]
    fn unknown_fields_are_reported() {
        let mut registry: TypeaheadRegistry<String, InputField> = TypeaheadRegistry::new();
        assert_eq!(
            registry.trigger_lookup("nope"),
            Err(TypeaheadError::UnknownField("nope".to_string()))
        );
        assert!(registry.destroy("nope").is_err());
    }

    #[test]
    fn destroy_returns_the_field() {
        let mut registry = TypeaheadRegistry::new();
        registry.create_typeahead("topic", InputField::new().with_text("bo"), options());
        let field = registry.destroy("topic").unwrap();
        assert_eq!(field.value(), "bo");
        assert!(registry.is_empty());
    }
}
