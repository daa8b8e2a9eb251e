use std::sync::Arc;

use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, Http,
};

use crate::{
    commands::{CommandHandler, Reply, run_deferred},
    constant,
    lingva::{LANGUAGES, LingvaClient, exceeds_text_limit, language_name},
    util,
};

const FAILURE_TEXT: &str = "Houve um erro ao traduzir o texto.";
const NO_TRANSLATION_TEXT: &str = "Erro ao traduzir o texto.";

fn format_translation_reply(source: &str, target: &str, translation: Option<&str>) -> String {
    let (Some(translation), Some(source_name), Some(target_name)) =
        (translation, language_name(source), language_name(target))
    else {
        return NO_TRANSLATION_TEXT.to_string();
    };

    format!("Texto traduzido de {source_name} para {target_name}: {translation}")
}

fn language_option(name: &str, description: &str) -> CreateCommandOption {
    let mut option =
        CreateCommandOption::new(CommandOptionType::String, name, description).required(true);
    for (display, code) in LANGUAGES {
        option = option.add_string_choice(*display, *code);
    }
    option
}

pub struct Handler {
    lingva: Arc<LingvaClient>,
}

impl Handler {
    pub fn new(lingva: Arc<LingvaClient>) -> Self {
        Self { lingva }
    }
}

#[serenity::async_trait]
impl CommandHandler for Handler {
    fn name(&self) -> &str {
        "translate"
    }

    fn descriptor(&self) -> CreateCommand {
        CreateCommand::new(self.name())
            .description("Translate text from one language to another")
            .add_option(language_option(
                constant::value::SOURCE_LANGUAGE,
                "The source language of the text to translate",
            ))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    constant::value::TEXT,
                    "The text to translate",
                )
                .required(true),
            )
            .add_option(language_option(
                constant::value::TARGET_LANGUAGE,
                "The language to translate to",
            ))
    }

    async fn run(&self, http: &Http, cmd: &CommandInteraction) -> anyhow::Result<()> {
        let source = util::get_option(cmd, constant::value::SOURCE_LANGUAGE)?;
        let text = util::get_option(cmd, constant::value::TEXT)?;
        let target = util::get_option(cmd, constant::value::TARGET_LANGUAGE)?;

        // Rejected before deferring, so no external call is made.
        if exceeds_text_limit(text) {
            return util::reply(http, cmd, constant::reply::TEXT_TOO_LONG).await;
        }

        run_deferred(http, cmd, FAILURE_TEXT, async {
            let translation = self.lingva.translate(source, target, text).await?;
            Ok(Reply::Text(format_translation_reply(
                source,
                target,
                translation.as_deref(),
            )))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_reply_format() {
        assert_eq!(
            format_translation_reply("en", "pt", Some("Olá, mundo")),
            "Texto traduzido de Inglês para Português: Olá, mundo"
        );
    }

    #[test]
    fn test_missing_translation_field_is_a_domain_failure() {
        assert_eq!(
            format_translation_reply("en", "pt", None),
            NO_TRANSLATION_TEXT
        );
    }
}
