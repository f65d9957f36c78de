//! hype_compiler: Compiler orchestration.
//!
//! Loads the parsed source files of a program, runs registration and
//! validation over them, and hands the checked result to a code generator.

pub mod error;
pub mod logging;
pub mod options;

pub use error::CompileError;
pub use options::{parse_config, parse_config_file, CompilerOptions, ProjectConfig};

use hype_ast::SourceFile;
use hype_binder::{ir, ScopeTree};
use hype_checker::{Registration, RegistrationOptions};
use hype_core::{ScopeId, TypeId};
use hype_types::TypeTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The program represents the entire compilation unit.
pub struct Program {
    /// Compiler options.
    pub options: CompilerOptions,
    /// AST files to load with [`Program::load_root_files`].
    pub root_files: Vec<PathBuf>,
    /// Loaded source files, by file name, in the order they were added.
    source_files: Vec<(String, SourceFile)>,
}

impl Program {
    pub fn new(root_files: Vec<PathBuf>, options: CompilerOptions) -> Self {
        Self {
            options,
            root_files,
            source_files: Vec::new(),
        }
    }

    /// Create a program from a hype.json file. Listed files are resolved
    /// against the directory holding the config.
    pub fn from_config_file(path: &Path) -> Result<Self, CompileError> {
        let config = parse_config_file(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let root_files = config
            .files
            .iter()
            .flatten()
            .map(|file| base.join(file))
            .collect();
        Ok(Self::new(root_files, config.options()))
    }

    /// Add an already parsed source file.
    pub fn add_source(&mut self, file_name: impl Into<String>, source: SourceFile) {
        self.source_files.push((file_name.into(), source));
    }

    /// Deserialize a source file from the JSON an external parser produced.
    pub fn load_ast_file(&mut self, path: &Path) -> Result<(), CompileError> {
        let name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: name.clone(),
            source,
        })?;
        let source = serde_json::from_str(&content).map_err(|source| CompileError::Ast {
            path: name.clone(),
            source,
        })?;
        debug!(file = %name, "loaded source file");
        self.add_source(name, source);
        Ok(())
    }

    /// Load all root files from disk.
    pub fn load_root_files(&mut self) -> Result<(), CompileError> {
        for file in self.root_files.clone() {
            self.load_ast_file(&file)?;
        }
        Ok(())
    }

    pub fn source_files(&self) -> impl Iterator<Item = (&str, &SourceFile)> {
        self.source_files.iter().map(|(name, file)| (name.as_str(), file))
    }

    /// Run registration and validation over every loaded file.
    ///
    /// The files form one compilation unit: their constructs are registered
    /// into a single global scope in the order the files were added.
    pub fn compile(&self) -> Result<CheckedProgram, CompileError> {
        if self.source_files.is_empty() {
            return Err(CompileError::NoSource);
        }

        let unit = SourceFile::new(
            self.source_files
                .iter()
                .flat_map(|(_, file)| file.constructs.iter().cloned())
                .collect(),
        );
        let registration = hype_checker::check(&unit, RegistrationOptions::from(&self.options))?;

        info!(
            files = self.source_files.len(),
            scopes = registration.scopes.len(),
            types = registration.table.len(),
            "program checked"
        );
        Ok(CheckedProgram { registration })
    }
}

/// A registered and validated program, ready for code generation.
///
/// Every registered statement carries the scope it belongs to and no
/// placeholder type is left unresolved.
pub struct CheckedProgram {
    registration: Registration,
}

impl CheckedProgram {
    pub fn scopes(&self) -> &ScopeTree {
        &self.registration.scopes
    }

    /// The global scope.
    pub fn root(&self) -> ScopeId {
        self.registration.root()
    }

    pub fn table(&self) -> &TypeTable {
        &self.registration.table
    }

    /// The type of a registered expression.
    pub fn expr_type(&self, expr: &ir::Expression) -> TypeId {
        ir::expr_type(&self.registration.table, expr)
    }

    /// The global statements in source order.
    pub fn statements(&self) -> &[ir::StatementOrExpression] {
        &self.scopes().get(self.root()).statements
    }

    pub fn into_registration(self) -> Registration {
        self.registration
    }
}

/// A code generator over a checked program.
pub trait Emit {
    type Output;
    type Error;

    fn emit(&mut self, program: &CheckedProgram) -> Result<Self::Output, Self::Error>;
}
