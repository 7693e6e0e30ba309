//! Engine configuration.

/// Tunables for an [`Engine`](crate::Engine).
///
/// The defaults give the corrected behaviour. The `legacy_*` switches
/// reproduce two approximations of older analysers for callers that need
/// identical inference results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// A plain function call yields `this` instead of the return hint.
    pub legacy_call_returns_this: bool,
    /// `ToObject(undefined)` yields `null` instead of `undefined`.
    pub legacy_undefined_to_null: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with both legacy approximations switched on.
    pub fn legacy() -> Self {
        Self::new()
            .legacy_call_returns_this(true)
            .legacy_undefined_to_null(true)
    }

    #[must_use]
    pub fn legacy_call_returns_this(mut self, enabled: bool) -> Self {
        self.legacy_call_returns_this = enabled;
        self
    }

    #[must_use]
    pub fn legacy_undefined_to_null(mut self, enabled: bool) -> Self {
        self.legacy_undefined_to_null = enabled;
        self
    }
}
