use smol_str::SmolStr;

/// Read-only attribute list of a start element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(SmolStr, SmolStr)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attributes::insert`].
    pub fn with(mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name`, replacing an existing value of the same name.
    pub fn insert(&mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Present and non-empty.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }

    /// Present and containing `needle`, e.g. `subType="x-preverse"` contains `preverse`.
    pub fn contains(&self, name: &str, needle: &str) -> bool {
        self.get(name).is_some_and(|v| v.contains(needle))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<SmolStr>, V: Into<SmolStr>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_values_replace_earlier_ones() {
        let attrs: Attributes = [("type", "x-p"), ("sID", "p1"), ("type", "paragraph")]
            .into_iter()
            .collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("type"), Some("paragraph"));
    }

    #[test]
    fn empty_values_are_not_set() {
        let attrs = Attributes::new().with("sID", "").with("subType", "x-preverse");
        assert!(!attrs.is_set("sID"));
        assert!(attrs.is_set("subType"));
        assert!(attrs.contains("subType", "preverse"));
        assert!(!attrs.contains("type", "preverse"));
    }
}
