// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use std::collections::HashMap;
use std::rc::Rc;

/// A name to id table whose keys are interned.
///
/// The `Rc<str>` handed out for a name is shared by every caller that registers or looks up
/// the same name, so `Rc::ptr_eq` is a valid identity check for names from the same table.
/// An entry may exist with no id yet; that is how forward references are recorded.
#[derive(Clone, Debug)]
pub struct Dictionary<V> {
    entries: HashMap<Rc<str>, Option<V>>,
}

impl<V> Default for Dictionary<V> {
    fn default() -> Self {
        Dictionary {
            entries: HashMap::new(),
        }
    }
}

// public implementation
impl<V: Copy> Dictionary<V> {
    pub fn new() -> Self {
        Default::default()
    }
    /// Interns `name` and returns the shared string.  A `Some` id replaces any previous id;
    /// `None` leaves an existing id alone.
    pub fn add_reference(&mut self, name: &str, id: Option<V>) -> Rc<str> {
        if let Some(key) = self.find_ref_string(name) {
            if id.is_some() {
                self.entries.insert(Rc::clone(&key), id);
            }
            return key;
        }

        let key: Rc<str> = Rc::from(name);
        self.entries.insert(Rc::clone(&key), id);
        key
    }
    /// The id registered for `name`, if any.
    pub fn find_reference(&self, name: &str) -> Option<V> {
        self.entries.get(name).and_then(|id| *id)
    }
    /// The interned string for `name`, if it has been registered.
    pub fn find_ref_string(&self, name: &str) -> Option<Rc<str>> {
        self.entries.get_key_value(name).map(|(key, _)| Rc::clone(key))
    }
    pub fn remove_reference(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }
    /// Drops every id while keeping the interned names.
    pub fn clear_ids(&mut self) {
        for id in self.entries.values_mut() {
            *id = None;
        }
    }
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_interned() {
        let mut dict: Dictionary<usize> = Dictionary::new();
        let first = dict.add_reference("BOLT", None);
        let second = dict.add_reference("BOLT", None);
        assert!(Rc::ptr_eq(&first, &second));
        assert!(Rc::ptr_eq(&first, &dict.find_ref_string("BOLT").unwrap()));
        assert_eq!(1, dict.len());
    }

    #[test]
    fn forward_reference_is_filled_in_later() {
        let mut dict = Dictionary::new();
        dict.add_reference("BOLT", None);
        assert_eq!(None, dict.find_reference("BOLT"));
        dict.add_reference("BOLT", Some(3));
        assert_eq!(Some(3), dict.find_reference("BOLT"));

        // registering the name again without an id keeps the id
        dict.add_reference("BOLT", None);
        assert_eq!(Some(3), dict.find_reference("BOLT"));
    }

    #[test]
    fn remove_and_missing_names() {
        let mut dict = Dictionary::new();
        dict.add_reference("A", Some(1));
        assert!(dict.remove_reference("A"));
        assert!(!dict.remove_reference("A"));
        assert_eq!(None, dict.find_reference("A"));
        assert_eq!(None, dict.find_ref_string("A"));
    }

    #[test]
    fn clearing_ids_keeps_the_interned_names() {
        let mut dict = Dictionary::new();
        let name = dict.add_reference("A", Some(1));
        dict.clear_ids();
        assert_eq!(None, dict.find_reference("A"));
        assert!(dict.contains("A"));
        assert!(Rc::ptr_eq(&name, &dict.add_reference("A", Some(2))));
        assert_eq!(Some(2), dict.find_reference("A"));
    }
}
