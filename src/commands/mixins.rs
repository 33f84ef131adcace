//! `driverkit mixins` command.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::bootstrap::Application;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{DriverError, Result};
use crate::mixin::{Composed, DeclaresMethods, MethodSource, MixinKind, MixinRecord, TargetType};

/// Arguments of one `mixins` invocation.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// Host type to attach to.
    pub type_name: &'a str,
    /// Extension or override.
    pub kind: MixinKind,
    /// Source file declaring the host type.
    pub source: Option<&'a Path>,
    /// Emit JSON.
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    record: &'a MixinRecord,
    methods: Vec<Resolved<'a>>,
    shadowed: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Resolved<'a> {
    method: &'a str,
    provider: &'a str,
}

/// Resolves and prints the driver modules mixed into a type.
///
/// # Errors
///
/// Returns bootstrap errors, [`DriverError::Loader`] or
/// [`DriverError::Resolution`] for a bad module file or `--source`.
pub fn run(ctx: &ServiceContext, config: &Config, request: &Request<'_>) -> Result<()> {
    let target = load_target(ctx, request.type_name, request.source)?;
    let mut app = Application::boot(ctx, config.clone())?;
    let record = app.attach(ctx, &target, request.kind)?.clone();
    let composed = Composed::new(target, record);

    let out =
        render(&composed, request.json).map_err(|e| DriverError::io(&config.app_root, e.into()))?;
    println!("{out}");
    Ok(())
}

fn load_target(
    ctx: &ServiceContext,
    type_name: &str,
    source: Option<&Path>,
) -> Result<TargetType> {
    let Some(path) = source else {
        return Ok(TargetType::new(type_name));
    };
    let definitions = ctx
        .loader
        .load(path)
        .map_err(|e| DriverError::Loader { path: path.to_path_buf(), message: e.to_string() })?;
    definitions
        .into_iter()
        .find(|d| d.name == type_name)
        .map(TargetType::from)
        .ok_or_else(|| DriverError::Resolution {
            expected: type_name.to_string(),
            path: path.to_path_buf(),
        })
}

fn render(composed: &Composed, json: bool) -> serde_json::Result<String> {
    let record = composed.record();
    let shadowed: Vec<String> = composed
        .target()
        .declared_methods()
        .iter()
        .flat_map(|method| record.shadowed_by(method))
        .map(|warning| warning.to_string())
        .collect();
    let methods: Vec<Resolved<'_>> = composed
        .method_names()
        .into_iter()
        .filter_map(|method| {
            let provider = match composed.resolve(method)? {
                MethodSource::Own => composed.target().type_name(),
                MethodSource::Mixin(module) => module.name.as_str(),
            };
            Some(Resolved { method, provider })
        })
        .collect();

    if json {
        return serde_json::to_string_pretty(&Report { record, methods, shadowed });
    }

    let mut out = String::new();
    let type_name = record.target_type_name();
    if record.mixed_modules().is_empty() {
        let _ = write!(out, "No driver {}s for {type_name}", record.kind());
        return Ok(out);
    }
    let _ = writeln!(out, "{type_name} {}s:", record.kind());
    for module in record.mixed_modules() {
        let _ = writeln!(
            out,
            "  {} ({}) {}",
            module.name,
            module.owning_driver,
            module.source_path.display()
        );
    }
    let _ = writeln!(out, "methods:");
    for entry in &methods {
        let _ = writeln!(out, "  {} -> {}", entry.method, entry.provider);
    }
    for warning in &shadowed {
        let _ = writeln!(out, "warning: {warning}");
    }
    Ok(out.trim_end().to_string())
}
