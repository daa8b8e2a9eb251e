use std::{collections::HashMap, sync::Arc};

use serenity::all::{
    CommandInteraction, CreateAttachment, CreateCommand, EditInteractionResponse, Http,
};
use tracing::error;

use crate::{currency::CurrencyClient, gemini::GeminiClient, lingva::LingvaClient};

pub mod ask;
pub mod audio;
pub mod hello;
pub mod price;
pub mod translate;

#[serenity::async_trait]
pub trait CommandHandler: Send + Sync {
    fn name(&self) -> &str;
    fn descriptor(&self) -> CreateCommand;
    async fn run(&self, http: &Http, cmd: &CommandInteraction) -> anyhow::Result<()>;
}

/// The full command set, assembled at compile time. Adding a command means
/// adding a module above and a constructor here.
pub fn all(
    gemini: Arc<GeminiClient>,
    currency: Arc<CurrencyClient>,
    lingva: Arc<LingvaClient>,
) -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(hello::Handler),
        Arc::new(ask::Handler::new(gemini)),
        Arc::new(price::Handler::new(currency)),
        Arc::new(translate::Handler::new(lingva.clone())),
        Arc::new(audio::Handler::new(lingva)),
    ]
}

/// Name-keyed lookup over the command set. Built once at startup and
/// read-only afterwards.
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new(handlers: Vec<Arc<dyn CommandHandler>>) -> Self {
        let mut map: HashMap<String, Arc<dyn CommandHandler>> = HashMap::new();
        for handler in handlers {
            let name = handler.name().to_string();
            if map.insert(name.clone(), handler).is_some() {
                // Last registration wins, matching the keyed lookup below.
                tracing::warn!("duplicate command name registered: {name}");
            }
        }
        Self { handlers: map }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn descriptors(&self) -> Vec<CreateCommand> {
        self.handlers
            .values()
            .map(|handler| handler.descriptor())
            .collect()
    }
}

/// What a handler wants edited into its deferred reply.
pub enum Reply {
    Text(String),
    Attachment {
        content: String,
        filename: String,
        bytes: Vec<u8>,
    },
}

/// Shared pipeline for every handler that performs an external call: defer
/// the interaction, await the command-specific work, then edit the deferred
/// reply with the outcome. A failed future is logged and mapped to the
/// handler's own failure text, so users see the domain-specific message
/// rather than the dispatcher's generic one.
pub async fn run_deferred(
    http: &Http,
    cmd: &CommandInteraction,
    failure_text: &str,
    work: impl Future<Output = anyhow::Result<Reply>>,
) -> anyhow::Result<()> {
    cmd.defer(http).await?;

    let reply = match work.await {
        Ok(reply) => reply,
        Err(err) => {
            error!("error executing command {}: {err:#}", cmd.data.name);
            Reply::Text(failure_text.to_string())
        }
    };

    let edit = match reply {
        Reply::Text(content) => EditInteractionResponse::new().content(content),
        Reply::Attachment {
            content,
            filename,
            bytes,
        } => EditInteractionResponse::new()
            .content(content)
            .new_attachment(CreateAttachment::bytes(bytes, filename)),
    };
    cmd.edit_response(http, edit).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_set() -> Vec<Arc<dyn CommandHandler>> {
        all(
            Arc::new(GeminiClient::new(reqwest::Client::new(), "test-key".into())),
            Arc::new(CurrencyClient::new(reqwest::Client::new())),
            Arc::new(LingvaClient::new(reqwest::Client::new())),
        )
    }

    #[test]
    fn test_registry_round_trips_declared_names() {
        let handlers = test_set();
        let declared: HashSet<String> =
            handlers.iter().map(|h| h.name().to_string()).collect();

        let registry = CommandRegistry::new(handlers);
        let registered: HashSet<String> =
            registry.names().into_iter().map(str::to_string).collect();

        assert_eq!(registered, declared);
        assert_eq!(registry.descriptors().len(), declared.len());
    }

    #[test]
    fn test_registry_resolves_known_and_rejects_unknown() {
        let registry = CommandRegistry::new(test_set());
        assert!(registry.get("price").is_some());
        assert!(registry.get("ask").is_some());
        assert!(registry.get("definitely-not-a-command").is_none());
    }

    #[test]
    fn test_duplicate_names_keep_last_registration() {
        let duplicates: Vec<Arc<dyn CommandHandler>> =
            vec![Arc::new(hello::Handler), Arc::new(hello::Handler)];
        let registry = CommandRegistry::new(duplicates);
        assert_eq!(registry.names(), vec!["hello"]);
    }
}
