//! Attribute metadata for resource and provider schemas.
//!
//! The plugin host turns these declarations into its own schema types; nothing
//! here participates in reconciliation.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "attributes")]
pub enum AttributeKind {
    String,
    Bool,
    /// Single nested object.
    Object(Vec<Attribute>),
    /// List of nested objects.
    List(Vec<Attribute>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub description: &'static str,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<&'static str>,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            one_of: Vec::new(),
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, AttributeKind::String, description)
    }

    pub fn bool(name: &'static str, description: &'static str) -> Self {
        Self::new(name, AttributeKind::Bool, description)
    }

    pub fn object(
        name: &'static str,
        description: &'static str,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self::new(name, AttributeKind::Object(attributes), description)
    }

    pub fn list(
        name: &'static str,
        description: &'static str,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self::new(name, AttributeKind::List(attributes), description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn one_of(mut self, values: &[&'static str]) -> Self {
        self.one_of = values.to_vec();
        self
    }

    fn children(&self) -> &[Attribute] {
        match &self.kind {
            AttributeKind::Object(attrs) | AttributeKind::List(attrs) => attrs,
            AttributeKind::String | AttributeKind::Bool => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            description,
            attributes,
        }
    }

    /// Look up an attribute by dotted path, e.g. `http_config.api_key.value`.
    pub fn attribute(&self, path: &str) -> Option<&Attribute> {
        let mut current: &[Attribute] = &self.attributes;
        let mut found = None;
        for segment in path.split('.') {
            let attr = current.iter().find(|a| a.name == segment)?;
            current = attr.children();
            found = Some(attr);
        }
        found
    }

    /// Dotted paths of every sensitive attribute.
    pub fn sensitive_paths(&self) -> Vec<String> {
        fn walk(prefix: &str, attrs: &[Attribute], out: &mut Vec<String>) {
            for attr in attrs {
                let path = if prefix.is_empty() {
                    attr.name.to_string()
                } else {
                    format!("{}.{}", prefix, attr.name)
                };
                if attr.sensitive {
                    out.push(path.clone());
                }
                walk(&path, attr.children(), out);
            }
        }

        let mut out = Vec::new();
        walk("", &self.attributes, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(
            "sample",
            vec![
                Attribute::string("id", "identifier").computed(),
                Attribute::object(
                    "auth",
                    "credentials",
                    vec![
                        Attribute::string("user", "user").required(),
                        Attribute::string("password", "password")
                            .required()
                            .sensitive(),
                    ],
                )
                .optional(),
            ],
        )
    }

    #[test]
    fn test_nested_lookup() {
        let schema = sample();
        let attr = schema.attribute("auth.password").unwrap();
        assert!(attr.required && attr.sensitive);
        assert!(schema.attribute("auth.missing").is_none());
        assert!(schema.attribute("id.nested").is_none());
    }

    #[test]
    fn test_sensitive_paths() {
        assert_eq!(sample().sensitive_paths(), vec!["auth.password".to_string()]);
    }
}
