// Static registry of request handlers and the permissions they require.
// Handlers register at startup; discovery reads this table, nothing is scanned.

/// Implemented by anything that guards a request handler with permissions
pub trait RequiresPermissions: Send + Sync {
    /// Stable handler identifier, e.g. `employees::update`
    fn handler(&self) -> &str;

    /// `module.action.resource` declarations the handler checks
    fn required_permissions(&self) -> &[&'static str];
}

/// Const-constructible handler declaration
#[derive(Debug, Clone, Copy)]
pub struct HandlerSpec {
    pub name: &'static str,
    pub permissions: &'static [&'static str],
}

impl HandlerSpec {
    pub const fn new(name: &'static str, permissions: &'static [&'static str]) -> Self {
        Self { name, permissions }
    }
}

impl RequiresPermissions for HandlerSpec {
    fn handler(&self) -> &str {
        self.name
    }

    fn required_permissions(&self) -> &[&'static str] {
        self.permissions
    }
}

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn RequiresPermissions>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: RequiresPermissions + 'static>(&mut self, handler: H) -> &mut Self {
        tracing::debug!(
            "Registered handler '{}' requiring {:?}",
            handler.handler(),
            handler.required_permissions()
        );
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn register_all(&mut self, specs: &[HandlerSpec]) -> &mut Self {
        for spec in specs {
            self.register(*spec);
        }
        self
    }

    pub fn handlers(&self) -> impl Iterator<Item = &(dyn RequiresPermissions + 'static)> {
        self.handlers.iter().map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
