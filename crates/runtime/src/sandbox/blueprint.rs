use magic_core::{BlueprintId, Component};

/// Template the sandbox instantiates on spawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blueprint {
    pub components: Vec<Component>,
    /// Parts left behind when an entity of this blueprint is gibbed.
    pub gib_parts: Vec<BlueprintId>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_gib_parts<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gib_parts
            .extend(parts.into_iter().map(|part| BlueprintId::new(part)));
        self
    }
}
