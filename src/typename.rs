//! Short type names.
//!
//! Types opt in by declaring their qualified name through [`ShortTypeName`];
//! nothing is derived from runtime type metadata.

/// Last segment of a qualified name, split on `\` or `::`.
pub fn strip_class_namespace(long_name: &str) -> &str {
  let after_backslash = long_name.rsplit('\\').next().unwrap_or(long_name);
  after_backslash.rsplit("::").next().unwrap_or(after_backslash)
}

/// A type that knows its own (possibly namespaced) name.
pub trait ShortTypeName {
  /// Fully qualified name, e.g. `app::billing::Invoice`.
  const TYPE_NAME: &'static str;

  fn short_type_name(&self) -> &'static str {
    strip_class_namespace(Self::TYPE_NAME)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Invoice;
  impl ShortTypeName for Invoice {
    const TYPE_NAME: &'static str = "App\\Billing\\Invoice";
  }

  enum Shape {
    Circle,
  }
  impl ShortTypeName for Shape {
    const TYPE_NAME: &'static str = "geometry::Shape";
  }

  #[test]
  fn strips_backslash_namespaces() {
    assert_eq!(strip_class_namespace("A\\B\\C"), "C");
    assert_eq!(strip_class_namespace("C"), "C");
    assert_eq!(strip_class_namespace(""), "");
  }

  #[test]
  fn strips_rust_paths() {
    assert_eq!(strip_class_namespace("webutils::text::Key"), "Key");
  }

  #[test]
  fn values_report_declared_short_name() {
    assert_eq!(Invoice.short_type_name(), "Invoice");
    assert_eq!(Shape::Circle.short_type_name(), "Shape");
  }
}
