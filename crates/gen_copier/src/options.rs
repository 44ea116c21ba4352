//! Options that control the generated method.

/// Name of the generated method unless another one is configured.
pub const DEFAULT_METHOD_NAME: &str = "copy_to";

/// Options used by [`Copier`](crate::Copier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopierOptions {
    /// The recognized package qualifier of the source type. If the source type name starts with
    /// `<strip_prefix>::`, that segment is removed once before it's used as the receiver type.
    pub strip_prefix: Option<String>,
    /// Name of the generated method.
    pub method_name: String,
}

impl Default for CopierOptions {
    fn default() -> Self {
        CopierOptions {
            strip_prefix: None,
            method_name: DEFAULT_METHOD_NAME.into(),
        }
    }
}

impl CopierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = Some(prefix.into());
        self
    }

    pub fn with_method_name(mut self, name: impl Into<String>) -> Self {
        self.method_name = name.into();
        self
    }

    /// Returns the receiver type for the source type `name`.
    ///
    /// Only the configured qualifier is stripped, and only once. Names without a qualifier or
    /// with a different one are returned unchanged.
    pub fn receiver_type<'n>(&self, name: &'n str) -> &'n str {
        let Some(prefix) = self.strip_prefix.as_deref() else {
            return name;
        };

        match name.strip_prefix(prefix).and_then(|rest| rest.strip_prefix("::")) {
            Some(rest) if !rest.is_empty() => rest,
            _ => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CopierOptions::default();
        assert_eq!(options.method_name, "copy_to");
        assert_eq!(options.receiver_type("models::Person"), "models::Person");
    }

    #[test]
    fn strips_recognized_prefix_once() {
        let options = CopierOptions::new().with_strip_prefix("models");
        assert_eq!(options.receiver_type("models::Person"), "Person");
        assert_eq!(options.receiver_type("models::models::Person"), "models::Person");
        assert_eq!(options.receiver_type("models::inner::Person"), "inner::Person");
    }

    #[test]
    fn leaves_other_names_alone() {
        let options = CopierOptions::new().with_strip_prefix("models");
        assert_eq!(options.receiver_type("Person"), "Person");
        assert_eq!(options.receiver_type("dto::Person"), "dto::Person");
        assert_eq!(options.receiver_type("modelsx::Person"), "modelsx::Person");
        assert_eq!(options.receiver_type("models::"), "models::");
    }
}
