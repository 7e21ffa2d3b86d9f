use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "CDTS - Blob Upload Server".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Ready { addr, base_url } => {
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Server".white(), addr.cyan());
                println!("  {} {}", "URL   ".white(), base_url.blue());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            AppEvent::Shutdown => {
                println!("\n{}", "Server shutting down".red());
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                println!("  {} {}", "Loading config".dimmed(), path.cyan());
            }
            AppEvent::ConfigLoaded { backend, default_container } => {
                println!(
                    "  {} {} storage, default container {}",
                    "✓".green(),
                    backend.cyan(),
                    default_container.cyan()
                );
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }

            // Storage
            AppEvent::StorageReady { backend, location } => {
                println!("  {} {} → {}", "✓".green(), backend.cyan(), location.dimmed());
            }

            // Uploads are per-request, keep them out of the console unless asked
            AppEvent::BlobUploaded { container, blob } => {
                if !self.silent_mode {
                    println!("  {} {}/{}", "↑".green(), container.cyan(), blob);
                }
                tracing::debug!("Uploaded blob {}/{}", container, blob);
            }
            AppEvent::BatchUploaded { container, count } => {
                if !self.silent_mode {
                    println!("  {} {} blob(s) → {}", "↑".green(), count.to_string().cyan(), container.cyan());
                }
                tracing::debug!("Uploaded batch of {} blob(s) to {}", count, container);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mode_is_kept() {
        let bus = EventBus::new(true);
        assert!(bus.silent_mode);

        // Silent buses still accept every event
        bus.emit(AppEvent::BlobUploaded {
            container: "uploads".to_string(),
            blob: "a_1.png".to_string(),
        });
        bus.emit(AppEvent::BatchUploaded {
            container: "uploads".to_string(),
            count: 3,
        });
    }
}
