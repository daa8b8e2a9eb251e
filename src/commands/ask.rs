use std::sync::Arc;

use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, Http,
};

use crate::{
    commands::{CommandHandler, Reply, run_deferred},
    constant,
    gemini::GeminiClient,
    util,
};

const FAILURE_TEXT: &str = "Houve um erro ao consultar o Gemini.";

const RULES: &str = "\
Rules:
1. Limit responses to a maximum of 2000 characters.
2. Provide accurate and concise information.
3. Be respectful and considerate in all responses.
4. Avoid any form of bias or discrimination.
5. Ensure the information is up-to-date and relevant.";

fn build_prompt(question: &str) -> String {
    format!("{RULES}\n\nQuestion: {question}")
}

pub struct Handler {
    gemini: Arc<GeminiClient>,
}

impl Handler {
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }
}

#[serenity::async_trait]
impl CommandHandler for Handler {
    fn name(&self) -> &str {
        "ask"
    }

    fn descriptor(&self) -> CreateCommand {
        CreateCommand::new(self.name())
            .description("Ask a question to Gemini")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    constant::value::QUESTION,
                    "The question to ask Gemini",
                )
                .required(true),
            )
    }

    async fn run(&self, http: &Http, cmd: &CommandInteraction) -> anyhow::Result<()> {
        let question = util::get_option(cmd, constant::value::QUESTION)?;

        run_deferred(http, cmd, FAILURE_TEXT, async {
            // The 2000-character limit is delegated to the prompt rules; the
            // reply is passed through verbatim.
            let answer = self.gemini.generate(&build_prompt(question)).await?;
            Ok(Reply::Text(answer))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_wraps_question_in_rules() {
        let prompt = build_prompt("2+2?");
        assert!(prompt.starts_with("Rules:"));
        assert!(prompt.contains("maximum of 2000 characters"));
        assert!(prompt.ends_with("Question: 2+2?"));
    }
}
