use std::fmt;

/// A non-fatal event raised while loading configuration.
///
/// Diagnostics never abort a load. Each one is logged at `warn` level through
/// `tracing` and handed to the sink installed with
/// [`Config::on_diagnostic`](crate::Config::on_diagnostic), if any.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// `from_envar` named a variable that is not set, without a rename.
    /// Nothing was registered.
    MissingEnvironment { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingEnvironment { name } => {
                write!(f, "Environment variable '{name}' not found.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_environment_message() {
        let d = Diagnostic::MissingEnvironment { name: "BAR".into() };
        let msg = d.to_string();
        assert!(msg.contains("'BAR'"));
        assert!(msg.contains("not found"));
    }
}
