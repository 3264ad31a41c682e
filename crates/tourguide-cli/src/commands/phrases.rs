//! Phrases command implementation

use crate::cli::PhrasesArgs;
use crate::output::OutputWriter;
use crate::output_types::PhraseRow;
use anyhow::{anyhow, Result};
use tourguide_core::config::LayeredConfig;
use tourguide_knowledge::{KnowledgeBase, PhraseCategory};

use super::load_knowledge;

pub async fn execute(args: PhrasesArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let categories = match args.category.as_deref() {
        Some(name) => vec![PhraseCategory::parse(name).ok_or_else(|| {
            anyhow!(
                "Unknown phrase category '{}'. Use one of: greetings, directions, emergency, food",
                name
            )
        })?],
        None => PhraseCategory::ALL.to_vec(),
    };

    let knowledge = load_knowledge(config).await;
    let languages: Vec<String> = if args.all {
        knowledge.languages().into_iter().map(String::from).collect()
    } else {
        vec![config.language.value.clone()]
    };

    output.table(phrase_rows(&knowledge, &languages, &categories))
}

fn phrase_rows(
    knowledge: &KnowledgeBase,
    languages: &[String],
    categories: &[PhraseCategory],
) -> Vec<PhraseRow> {
    let mut rows = Vec::new();
    for language in languages {
        for category in categories {
            let Some(phrases) = knowledge.phrases(language, *category) else {
                continue;
            };
            rows.extend(phrases.iter().map(|phrase| PhraseRow {
                language: language.clone(),
                category: category.key().to_string(),
                phrase: phrase.clone(),
            }));
        }
    }
    rows
}
