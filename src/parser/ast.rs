use crate::abi::FunctionSelector;
use crate::error::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    /// The Noir type exactly as written in the contract source.
    pub type_name: String,
}

/// A private function found in contract source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: String,
    pub raw_parameters: Vec<String>,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_types: Vec<String>,
    selector: Option<FunctionSelector>,
}

impl FunctionDescriptor {
    pub fn new(
        name: impl Into<String>,
        raw_parameters: Vec<String>,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_parameters,
            parameters,
            return_types: Vec::new(),
            selector: None,
        }
    }

    pub fn selector(&self) -> Option<FunctionSelector> {
        self.selector
    }

    /// Selectors are write-once.
    pub fn assign_selector(&mut self, selector: FunctionSelector) -> Result<(), ResolveError> {
        if self.selector.is_some() {
            return Err(ResolveError::SelectorAlreadyAssigned(self.name.clone()));
        }
        self.selector = Some(selector);
        Ok(())
    }
}

/// A name brought into scope by a `use` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    pub name: String,
    /// Full path of the imported item, e.g. `dep::aztec::types::point::Point`.
    pub path: String,
    /// The local name given with `as`, if any.
    pub alias: Option<String>,
}

impl ImportedName {
    /// The module the item was imported from, if the path has one.
    pub fn module(&self) -> Option<&str> {
        self.path.rsplit_once("::").map(|(module, _)| module)
    }
}
