use std::sync::Arc;

use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, Http,
};

use crate::{
    commands::{CommandHandler, Reply, run_deferred},
    constant,
    lingva::{LANGUAGES, LingvaClient, exceeds_text_limit},
    util,
};

const FAILURE_TEXT: &str = "Houve um erro ao gerar o áudio.";
const NO_AUDIO_TEXT: &str = "Erro ao gerar o áudio.";
const SUCCESS_TEXT: &str = "Aqui está o áudio gerado:";
const ATTACHMENT_NAME: &str = "audio.mp3";

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
        "audio"
    }

    fn descriptor(&self) -> CreateCommand {
        let mut language_option = CreateCommandOption::new(
            CommandOptionType::String,
            constant::value::LANGUAGE,
            "The language of the text",
        )
        .required(true);
        for (display, code) in LANGUAGES {
            language_option = language_option.add_string_choice(*display, *code);
        }

        CreateCommand::new(self.name())
            .description("Create an audio from text")
            .add_option(language_option)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    constant::value::TEXT,
                    "The text to convert to audio",
                )
                .required(true),
            )
    }

    async fn run(&self, http: &Http, cmd: &CommandInteraction) -> anyhow::Result<()> {
        let language = util::get_option(cmd, constant::value::LANGUAGE)?;
        let text = util::get_option(cmd, constant::value::TEXT)?;

        // Rejected before deferring, so no external call is made.
        if exceeds_text_limit(text) {
            return util::reply(http, cmd, constant::reply::TEXT_TOO_LONG).await;
        }

        run_deferred(http, cmd, FAILURE_TEXT, async {
            let reply = match self.lingva.audio(language, text).await? {
                Some(bytes) => Reply::Attachment {
                    content: SUCCESS_TEXT.to_string(),
                    filename: ATTACHMENT_NAME.to_string(),
                    bytes,
                },
                None => Reply::Text(NO_AUDIO_TEXT.to_string()),
            };
            Ok(reply)
        })
        .await
    }
}
