//! Start the gallery HTTP server

use anyhow::{Context, Result};
use console::style;
use invite_gallery::{
    config::{Environment, GalleryConfig},
    observability::{self, ObservabilityConfig},
    router,
    state::AppState,
};

/// Run the HTTP server until interrupted
#[derive(Debug, Clone, Default)]
pub struct ServeCommand {
    /// Listen address override
    pub host: Option<String>,
    /// Listen port override
    pub port: Option<u16>,
    /// Force the development environment
    pub dev: bool,
}

impl ServeCommand {
    /// Apply command-line overrides on top of loaded configuration
    #[must_use]
    pub fn apply(&self, mut config: GalleryConfig) -> GalleryConfig {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.dev {
            config.server.environment = Environment::Development;
        }
        config
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if logging, state or the listener cannot be set up.
    pub async fn execute(&self, config: GalleryConfig) -> Result<()> {
        let config = self.apply(config);

        observability::init(&ObservabilityConfig::for_environment(
            config.server.environment,
        ))?;

        println!(
            "{} {} on {}",
            style("Starting").green().bold(),
            style("invite-gallery").bold(),
            style(format!("http://{}", config.server.bind_address())).cyan()
        );
        println!(
            "  {} {}",
            style("public:").dim(),
            config.templates.public_dir.display()
        );
        println!(
            "  {} {:?}",
            style("environment:").dim(),
            config.server.environment
        );
        println!();

        let state = AppState::from_config(config).context("Failed to initialize application")?;
        router::serve(state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let mut config = GalleryConfig::default();
        config.server.environment = Environment::Production;

        let command = ServeCommand {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            dev: true,
        };
        let config = command.apply(config);

        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = GalleryConfig::default();
        config.server.port = 4000;
        config.server.environment = Environment::Production;

        let config = ServeCommand::default().apply(config);

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.environment, Environment::Production);
    }
}
