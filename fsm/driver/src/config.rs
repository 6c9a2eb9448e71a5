//! Main loop configuration

/// Runtime options of a [`Driver`](crate::Driver)
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Prefix of the driver's log records
    pub name: &'static str,
    /// Runs whenever the FIFO is found empty; a spin-loop hint when unset
    pub idle_hook: Option<fn()>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: "fsm",
            idle_hook: None,
        }
    }
}

impl DriverConfig {
    /// Creates a new driver configuration builder.
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::default()
    }
}

/// Builder for [`DriverConfig`]
#[derive(Debug, Clone, Default)]
pub struct DriverConfigBuilder {
    config: DriverConfig,
}

impl DriverConfigBuilder {
    /// Sets the name used in log records.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Sets the idle hook.
    ///
    /// The hook must return promptly; the loop only polls again once it has.
    pub fn idle_hook(mut self, hook: fn()) -> Self {
        self.config.idle_hook = Some(hook);
        self
    }

    /// Builds the driver configuration.
    pub fn build(self) -> DriverConfig {
        self.config
    }
}
