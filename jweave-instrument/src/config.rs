/// Names driving probe decisions. Immutable; threaded through the
/// [`Instrumenter`](crate::Instrumenter) constructor.
#[derive(Debug, Clone)]
pub struct InstrumentConfig {
    /// Lifecycle entry hook that gets the activity preface probe.
    pub lifecycle_hook: String,
    /// View-creation hook that gets the fragment-host probe.
    pub view_create_hook: String,
    /// Reserved resource class short name, never instrumented.
    pub resource_class: String,
    /// Prefix marking synthetic accessor methods, never instrumented.
    pub synthetic_prefix: String,
    /// Zero-argument ancestor accessor returning the hosting container.
    pub host_accessor: String,
}

impl Default for InstrumentConfig {
    fn default() -> InstrumentConfig {
        InstrumentConfig {
            lifecycle_hook: "onCreate".to_string(),
            view_create_hook: "onCreateView".to_string(),
            resource_class: "R".to_string(),
            synthetic_prefix: "access$".to_string(),
            host_accessor: "getActivity".to_string(),
        }
    }
}
