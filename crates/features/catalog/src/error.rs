use std::borrow::Cow;

/// Errors raised while reading or checking tenant bundles.
#[mplan_derive::planner_error]
pub enum CatalogError {
    /// A bundle is not valid JSON or does not match the bundle schema.
    #[error("Bundle parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// A bundle file or directory could not be read.
    #[error("Bundle I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// A bundle parsed but breaks a catalog rule.
    #[error("Invalid bundle \"{tenant_id}\": {reason}")]
    Invalid { tenant_id: String, reason: Cow<'static, str> },
}
