use std::env;

/// Set by hosted notebook runtimes.
pub const NOTEBOOK_ENV_VAR: &str = "COLAB_RELEASE_TAG";
/// Set by most CI providers.
pub const CI_ENV_VAR: &str = "CI";

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A developer running the binary from a terminal.
    LocalDev,
    /// A notebook cell, where output is captured rather than shown on a terminal.
    Notebook,
    /// Non-interactive pipeline runs.
    Ci,
}

/// Derive the active execution context from the environment.
pub fn detect_context() -> ExecutionContext {
    if env_flag(NOTEBOOK_ENV_VAR) {
        ExecutionContext::Notebook
    } else if env_flag(CI_ENV_VAR) {
        ExecutionContext::Ci
    } else {
        ExecutionContext::LocalDev
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| {
            let value = value.trim();
            !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
        })
        .unwrap_or(false)
}
