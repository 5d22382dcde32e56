//! Isolated execution containers.
//!
//! A container is a wasmtime engine, linker and store together with every
//! module ever loaded into it. Instances live in the store until the whole
//! container is dropped; nothing is ever unloaded individually.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;
use derive_more::{Display, Error};
use wasmtime::{Caller, Engine, Extern, ExternType, FuncType, Linker, Module, Store, ValType};

use crate::capture::{CaptureScope, Fault, FaultKind, panic_message};
use crate::config::SandboxConfig;
use crate::error::{LoadError, SandboxError};

/// Module name of every host import.
const HOST_MODULE: &str = "env";
const HOST_IMPORTS: [&str; 2] = ["throw", "log"];

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a container.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("container#{_0}")]
pub struct ContainerId(u64);

impl ContainerId {
    fn next() -> Self {
        ContainerId(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An exception raised by guest code through `env.throw`.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("{message}")]
pub struct GuestException {
    pub message: String,
}

impl GuestException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

struct HostState {
    container: ContainerId,
}

/// A resolved, callable entry point of a loaded binary.
#[derive(Clone)]
pub struct EntryPoint {
    module: Module,
    name: String,
    container: ContainerId,
}

impl EntryPoint {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The container this entry point was loaded into.
    pub fn container(&self) -> ContainerId {
        self.container
    }
}

impl std::fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPoint")
            .field("name", &self.name)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

pub struct ExecutionContainer {
    id: ContainerId,
    engine: Engine,
    linker: Linker<HostState>,
    store: Store<HostState>,
    modules: Vec<Module>,
    entry_point: String,
}

impl ExecutionContainer {
    /// Create a fresh, empty container.
    pub fn create(config: &SandboxConfig) -> Result<Self, SandboxError> {
        let mut wasm_config = wasmtime::Config::new();
        wasm_config.cranelift_opt_level(config.opt_level.into());
        // Compile on the calling thread so compiler panics land in its capture scope.
        wasm_config.parallel_compilation(false);
        let engine = Engine::new(&wasm_config).map_err(SandboxError::engine)?;

        let mut linker = Linker::new(&engine);
        define_host_imports(&mut linker).map_err(SandboxError::linker)?;

        let id = ContainerId::next();
        let store = Store::new(&engine, HostState { container: id });
        tracing::debug!(container = %id, "created execution container");

        Ok(Self {
            id,
            engine,
            linker,
            store,
            modules: Vec::new(),
            entry_point: config.entry_point.clone(),
        })
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Number of binaries loaded so far. Never decreases.
    pub fn loaded(&self) -> usize {
        self.modules.len()
    }

    /// Compile `bytes` into this container and resolve its entry point.
    ///
    /// Accepts the binary format and, for convenience, the text format.
    pub fn load(&mut self, bytes: &[u8]) -> Result<EntryPoint, LoadError> {
        let scope = CaptureScope::enter();
        let compiled = catch_unwind(AssertUnwindSafe(|| Module::new(&self.engine, bytes)));
        drop(scope);

        let module = match compiled {
            Ok(Ok(module)) => module,
            Ok(Err(error)) => return Err(LoadError::invalid_module(&error)),
            Err(payload) => return Err(LoadError::compiler_panic(panic_message(&*payload))),
        };

        for import in module.imports() {
            let known = import.module() == HOST_MODULE && HOST_IMPORTS.contains(&import.name());
            let well_typed = matches!(import.ty(), ExternType::Func(ty) if is_host_signature(&ty));
            if !known || !well_typed {
                return Err(LoadError::unresolved_import(import.module(), import.name()));
            }
        }

        match module.get_export(&self.entry_point) {
            Some(ExternType::Func(ty)) if is_entry_signature(&ty) => {}
            Some(ty) => return Err(LoadError::entry_signature(&self.entry_point, format!("{ty:?}"))),
            None => return Err(LoadError::missing_entry_point(&self.entry_point)),
        }

        self.modules.push(module.clone());
        tracing::debug!(
            container = %self.id,
            loaded = self.modules.len(),
            "loaded binary"
        );
        Ok(EntryPoint {
            module,
            name: self.entry_point.clone(),
            container: self.id,
        })
    }

    /// Instantiate the entry point's module into this container and call it.
    ///
    /// Failures come back innermost cause first. An instantiation failure
    /// (including a trapping start function) is wrapped in an
    /// initialization fault.
    pub(crate) fn invoke(&mut self, entry: &EntryPoint) -> Result<i32, Vec<Fault>> {
        let instance = self
            .linker
            .instantiate(&mut self.store, &entry.module)
            .map_err(|error| {
                let mut chain = Fault::chain(&error).into_iter();
                let root = chain
                    .next()
                    .unwrap_or_else(|| Fault::new(FaultKind::Error, error.to_string()));
                std::iter::once(Fault::initialization(root))
                    .chain(chain)
                    .collect::<Vec<_>>()
            })?;

        let main = instance
            .get_typed_func::<(), i32>(&mut self.store, &entry.name)
            .map_err(|error| Fault::chain(&error))?;
        main.call(&mut self.store, ()).map_err(|error| Fault::chain(&error))
    }
}

impl std::fmt::Debug for ExecutionContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContainer")
            .field("id", &self.id)
            .field("loaded", &self.modules.len())
            .finish_non_exhaustive()
    }
}

impl Drop for ExecutionContainer {
    fn drop(&mut self) {
        tracing::debug!(
            container = %self.id,
            loaded = self.modules.len(),
            "discarding execution container"
        );
    }
}

fn is_host_signature(ty: &FuncType) -> bool {
    ty.params().len() == 2 && ty.params().all(|p| matches!(p, ValType::I32)) && ty.results().len() == 0
}

fn is_entry_signature(ty: &FuncType) -> bool {
    let results: Vec<ValType> = ty.results().collect();
    ty.params().len() == 0 && matches!(results.as_slice(), [ValType::I32])
}

fn define_host_imports(linker: &mut Linker<HostState>) -> anyhow::Result<()> {
    linker.func_wrap(
        HOST_MODULE,
        "throw",
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> anyhow::Result<()> {
            let message = read_guest_str(&mut caller, ptr, len)?;
            Err(GuestException { message }.into())
        },
    )?;
    linker.func_wrap(
        HOST_MODULE,
        "log",
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> anyhow::Result<()> {
            let message = read_guest_str(&mut caller, ptr, len)?;
            tracing::info!(container = %caller.data().container, "guest: {message}");
            Ok(())
        },
    )?;
    Ok(())
}

/// Read `len` bytes of guest memory at `ptr` as (lossy) UTF-8.
fn read_guest_str(caller: &mut Caller<'_, HostState>, ptr: i32, len: i32) -> anyhow::Result<String> {
    let memory = caller
        .get_export("memory")
        .and_then(Extern::into_memory)
        .ok_or_else(|| anyhow!("guest does not export its memory"))?;
    let start = usize::try_from(ptr)?;
    let end = start + usize::try_from(len)?;
    let bytes = memory
        .data(&*caller)
        .get(start..end)
        .ok_or_else(|| anyhow!("guest string {start}..{end} is out of bounds"))?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
