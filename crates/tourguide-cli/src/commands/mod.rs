//! Command implementations

mod ask;
mod chat;
mod config;
mod navigate;
mod phrases;

use crate::cli::{ChatArgs, Cli, Commands};
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use anyhow::Result;
use tourguide_core::config::LayeredConfig;
use tourguide_knowledge::{load_or_default, FileKnowledgeSource, KnowledgeBase, KnowledgeSource};
use tourguide_remote::HttpKnowledgeSource;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config_with_overrides(&cli)?;
    let offline = cli.offline;

    match cli.command {
        None => chat::execute(ChatArgs::default(), &config, offline, &output).await,
        Some(Commands::Chat(args)) => chat::execute(args, &config, offline, &output).await,
        Some(Commands::Ask(args)) => ask::execute(args, &config, offline, &output).await,
        Some(Commands::Navigate(args)) => navigate::execute(args, &config, &output),
        Some(Commands::Phrases(args)) => phrases::execute(args, &config, &output).await,
        Some(Commands::Config) => config::execute(&config, &output),
    }
}

/// Pick the knowledge source for a configured path or URL
fn knowledge_source(location: &str) -> Box<dyn KnowledgeSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpKnowledgeSource::new(location))
    } else {
        Box::new(FileKnowledgeSource::new(location))
    }
}

/// Load the offline knowledge, falling back to the built-in dataset
async fn load_knowledge(config: &LayeredConfig) -> KnowledgeBase {
    let source = knowledge_source(&config.knowledge.value);
    load_or_default(source.as_ref()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_source_selection() {
        assert_eq!(
            knowledge_source("https://guide.example/data/offline_data.json").describe(),
            "https://guide.example/data/offline_data.json"
        );
        assert_eq!(knowledge_source("data/offline_data.json").describe(), "data/offline_data.json");
    }

    #[tokio::test]
    async fn test_missing_knowledge_file_uses_builtin() {
        let mut config = LayeredConfig::with_defaults();
        config.knowledge.value = "/nonexistent/offline_data.json".to_string();

        let knowledge = load_knowledge(&config).await;
        assert!(knowledge.destination("tokyo").is_some());
    }
}
