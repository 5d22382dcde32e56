//! Error types for the sandbox

use derive_more::{Display, From};

/// Failure to set up the sandbox itself.
#[derive(Display, Debug, From)]
#[display("{kind}")]
pub struct SandboxError {
    #[from]
    kind: Box<SandboxErrorKind>,
}

impl<E> From<E> for SandboxError
where
    SandboxErrorKind: From<E>,
{
    fn from(error: E) -> Self {
        SandboxError {
            kind: Box::new(SandboxErrorKind::from(error)),
        }
    }
}

impl SandboxError {
    pub(crate) fn engine(error: anyhow::Error) -> Self {
        SandboxErrorKind::Engine(error).into()
    }

    pub(crate) fn linker(error: anyhow::Error) -> Self {
        SandboxErrorKind::Linker(error).into()
    }

    pub fn kind(&self) -> &SandboxErrorKind {
        &self.kind
    }
}

#[derive(Display, Debug)]
pub enum SandboxErrorKind {
    #[display("Engine creation failed: {_0:#}")]
    Engine(anyhow::Error),

    #[display("Invalid assertion pattern: {_0}")]
    AssertionPattern(regex::Error),

    #[display("Linker setup failed: {_0:#}")]
    Linker(anyhow::Error),
}

impl From<regex::Error> for SandboxErrorKind {
    fn from(error: regex::Error) -> Self {
        SandboxErrorKind::AssertionPattern(error)
    }
}

impl std::error::Error for SandboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            SandboxErrorKind::Engine(e) | SandboxErrorKind::Linker(e) => Some(&**e),
            SandboxErrorKind::AssertionPattern(e) => Some(e),
        }
    }
}

/// Failure to load a compiled binary into a container.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display("{kind}")]
pub struct LoadError {
    kind: Box<LoadErrorKind>,
}

impl From<LoadErrorKind> for LoadError {
    fn from(kind: LoadErrorKind) -> Self {
        LoadError {
            kind: Box::new(kind),
        }
    }
}

impl LoadError {
    pub(crate) fn invalid_module(error: &anyhow::Error) -> Self {
        LoadErrorKind::InvalidModule(format!("{error:#}")).into()
    }

    pub(crate) fn compiler_panic(message: String) -> Self {
        LoadErrorKind::CompilerPanic(message).into()
    }

    pub(crate) fn unresolved_import(module: &str, name: &str) -> Self {
        LoadErrorKind::UnresolvedImport {
            module: module.to_owned(),
            name: name.to_owned(),
        }
        .into()
    }

    pub(crate) fn missing_entry_point(name: &str) -> Self {
        LoadErrorKind::MissingEntryPoint(name.to_owned()).into()
    }

    pub(crate) fn entry_signature(name: &str, found: impl std::fmt::Display) -> Self {
        LoadErrorKind::EntrySignature {
            name: name.to_owned(),
            found: found.to_string(),
        }
        .into()
    }

    pub fn kind(&self) -> &LoadErrorKind {
        &self.kind
    }

    /// The panic message, when the compiler itself panicked.
    pub fn panic_message(&self) -> Option<&str> {
        match &*self.kind {
            LoadErrorKind::CompilerPanic(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    #[display("Invalid module: {_0}")]
    InvalidModule(String),

    #[display("Compiler panicked: {_0}")]
    CompilerPanic(String),

    #[display("Unresolved import: {module}.{name}")]
    UnresolvedImport { module: String, name: String },

    #[display("Entry point not found: {_0}")]
    MissingEntryPoint(String),

    #[display("Entry point {name} has type {found}, expected () -> i32")]
    EntrySignature { name: String, found: String },
}

impl std::error::Error for LoadError {}
