//! Template types for typed variable injection.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::Path;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }

    /// Render into `path`, creating parent directories.
    ///
    /// Returns `false` when the file already held exactly this output and
    /// was left untouched, so rebuilds keep mtimes of unchanged redirects.
    pub fn write_to(&self, vars: &V, path: &Path) -> io::Result<bool> {
        let rendered = self.render(vars);
        if fs::read(path).is_ok_and(|existing| existing == rendered.as_bytes()) {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, rendered)?;
        Ok(true)
    }
}
