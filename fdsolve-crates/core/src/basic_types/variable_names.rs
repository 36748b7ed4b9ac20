use crate::basic_types::ModelError;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::engine::DomainId;

/// The display names of variables and the names under which variables can be looked up.
///
/// Auxiliary variables introduced by the model do not have a name.
#[derive(Clone, Debug, Default)]
pub(crate) struct VariableNames {
    names: KeyedVec<DomainId, Option<String>>,
    registered: HashMap<String, DomainId>,
}

impl VariableNames {
    pub(crate) fn name(&self, domain: DomainId) -> Option<&str> {
        self.names.get(domain).and_then(|name| name.as_deref())
    }

    /// Sets the display name of `domain` without registering it for lookup.
    pub(crate) fn set_name(&mut self, domain: DomainId, name: String) {
        self.names.accomodate(domain, None);
        self.names[domain] = Some(name);
    }

    /// Makes `domain` retrievable under `name`.
    ///
    /// If the domain does not yet have a display name, `name` becomes its display name.
    pub(crate) fn register(&mut self, name: &str, domain: DomainId) -> Result<(), ModelError> {
        match self.registered.get(name) {
            Some(registered) if *registered == domain => return Ok(()),
            Some(_) => return Err(ModelError::DuplicateName(name.to_owned())),
            None => {}
        }

        let _ = self.registered.insert(name.to_owned(), domain);
        if self.name(domain).is_none() {
            self.set_name(domain, name.to_owned());
        }

        Ok(())
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<DomainId> {
        self.registered.get(name).copied()
    }

    /// All named domains in the order in which they were created.
    pub(crate) fn named_domains(&self) -> impl Iterator<Item = (DomainId, &str)> + '_ {
        self.names
            .keys()
            .filter_map(|domain| self.name(domain).map(|name| (domain, name)))
    }
}
