//! Name-based dispatch into solution modules.
//!
//! Modules are registered explicitly in a [`SolutionRegistry`] (problem name to
//! loader). The [`Invoker`] loads a module on first use, caches the handle per
//! problem, and resolves exports by the descriptor's `function` name. It does no
//! marshalling of its own.

pub mod export;

use crate::errors::{HarnessError, InvokeError};
use crate::marshal::DomainValue;
use crate::model::ProblemDescriptor;
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Once, PoisonError};

pub use export::{ExportFn, IntoExport};

/// The exports of one problem's solution.
pub struct SolutionModule {
    name: String,
    exports: BTreeMap<String, ExportFn>,
}

impl SolutionModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exports: BTreeMap::new(),
        }
    }

    /// Registers `f` under `function`, the name descriptors refer to.
    pub fn export<Args, F>(mut self, function: impl Into<String>, f: F) -> Self
    where
        F: IntoExport<Args>,
    {
        self.exports.insert(function.into(), f.into_export());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exports(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }

    pub fn resolve(&self, function: &str) -> Result<ExportFn, HarnessError> {
        self.exports
            .get(function)
            .cloned()
            .ok_or_else(|| HarnessError::function_not_found(&self.name, function))
    }
}

type ModuleLoader = Box<dyn Fn() -> SolutionModule + Send + Sync>;

/// Explicit registration table: problem directory name to module loader.
#[derive(Default)]
pub struct SolutionRegistry {
    loaders: BTreeMap<String, ModuleLoader>,
}

impl SolutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<L>(&mut self, problem: impl Into<String>, loader: L) -> &mut Self
    where
        L: Fn() -> SolutionModule + Send + Sync + 'static,
    {
        self.loaders.insert(problem.into(), Box::new(loader));
        self
    }

    pub fn contains(&self, problem: &str) -> bool {
        self.loaders.contains_key(problem)
    }

    pub fn problems(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    fn load(&self, problem: &str) -> Option<SolutionModule> {
        self.loaders.get(problem).map(|loader| loader())
    }
}

pub struct Invoker {
    registry: SolutionRegistry,
    modules: Mutex<HashMap<String, Arc<SolutionModule>>>,
}

impl Invoker {
    pub fn new(registry: SolutionRegistry) -> Self {
        Self {
            registry,
            modules: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &SolutionRegistry {
        &self.registry
    }

    /// Loads the problem's module once; later calls return the cached handle.
    /// A panicking loader fails only its own problem and is not cached.
    pub fn module(&self, problem: &ProblemDescriptor) -> Result<Arc<SolutionModule>, HarnessError> {
        let mut cache = self.modules.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(module) = cache.get(&problem.name) {
            return Ok(module.clone());
        }
        let module = match quietly(|| self.registry.load(&problem.name)) {
            Ok(Some(module)) => Arc::new(module),
            Ok(None) => {
                return Err(HarnessError::ModuleNotRegistered {
                    problem: problem.name.clone(),
                })
            }
            Err(message) => {
                return Err(HarnessError::ModuleLoad {
                    problem: problem.name.clone(),
                    message,
                })
            }
        };
        tracing::debug!(problem = %problem.name, exports = module.exports.len(), "loaded solution module");
        cache.insert(problem.name.clone(), module.clone());
        Ok(module)
    }

    pub fn resolve(&self, problem: &ProblemDescriptor, function: &str) -> Result<ExportFn, HarnessError> {
        self.module(problem)?.resolve(function)
    }

    /// Calls an export, turning a panic inside the solution into
    /// [`InvokeError::SolutionRuntimeError`].
    pub fn call(export: &ExportFn, args: Vec<DomainValue>) -> Result<DomainValue, InvokeError> {
        quietly(|| export(args)).unwrap_or_else(|message| Err(InvokeError::SolutionRuntimeError(message)))
    }
}

thread_local! {
    static QUIET: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Runs `f`, catching a panic as its message. The default hook output is
/// suppressed on this thread while `f` runs; other threads keep it.
pub(crate) fn quietly<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    QUIET_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !QUIET.try_with(Cell::get).unwrap_or(false) {
                previous(info);
            }
        }));
    });

    let was_quiet = QUIET.with(|q| q.replace(true));
    let result = catch_unwind(AssertUnwindSafe(f));
    QUIET.with(|q| q.set(was_quiet));
    result.map_err(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::debug!(panic = %message, "caught panic");
        message
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
