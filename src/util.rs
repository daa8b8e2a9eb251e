use anyhow::Context as _;
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditMessage, Http,
};

/// Extracts a required string option from a command invocation.
///
/// Required options are validated by Discord before the interaction is
/// delivered, so a miss here means the descriptor and the handler disagree;
/// the error propagates rather than being papered over with a default.
pub fn get_option<'a>(cmd: &'a CommandInteraction, name: &str) -> anyhow::Result<&'a str> {
    get_str(&cmd.data.options, name)
        .with_context(|| format!("missing required option `{name}` for `{}`", cmd.data.name))
}

fn get_str<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| match &option.value {
            CommandDataOptionValue::String(value) => Some(value.as_str()),
            _ => None,
        })
}

/// Sends the initial (and only) response for an invocation.
pub async fn reply(http: &Http, cmd: &CommandInteraction, message: &str) -> anyhow::Result<()> {
    cmd.create_response(
        http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content(message),
        ),
    )
    .await?;
    Ok(())
}

/// Edits the interaction's response if one exists, creating it otherwise.
/// Used by the dispatcher's fallback, which cannot know whether the failing
/// handler got as far as deferring.
pub async fn create_or_edit(
    http: &Http,
    cmd: &CommandInteraction,
    message: &str,
) -> anyhow::Result<()> {
    if let Ok(mut msg) = cmd.get_response(http).await {
        msg.edit(http, EditMessage::new().content(message)).await?;
    } else {
        reply(http, cmd, message).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: serde_json::Value) -> Vec<CommandDataOption> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_get_str_finds_declared_option() {
        let options = options(json!([
            { "name": "source", "type": 3, "value": "USD" },
            { "name": "target", "type": 3, "value": "BRL" },
        ]));
        assert_eq!(get_str(&options, "source"), Some("USD"));
        assert_eq!(get_str(&options, "target"), Some("BRL"));
    }

    #[test]
    fn test_get_str_misses_absent_and_non_string_options() {
        let options = options(json!([
            { "name": "amount", "type": 4, "value": 3 },
        ]));
        assert_eq!(get_str(&options, "amount"), None);
        assert_eq!(get_str(&options, "missing"), None);
    }
}
