use std::sync::Arc;

use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, Http,
};

use crate::{
    commands::{CommandHandler, Reply, run_deferred},
    constant,
    currency::{CURRENCIES, CurrencyClient, RateTable, currency_name},
    util,
};

const FAILURE_TEXT: &str = "Houve um erro ao consultar o preço.";
const UNSUPPORTED_TEXT: &str = "Moeda não suportada.";

/// Formats the rate reply, falling back to the unsupported-currency text when
/// the target code is missing from the response's rate table.
fn format_rate_reply(source: &str, target: &str, table: &RateTable) -> String {
    let (Some(rate), Some(source_name), Some(target_name)) = (
        table.rate(target),
        currency_name(source),
        currency_name(target),
    ) else {
        return UNSUPPORTED_TEXT.to_string();
    };

    format!("O preço de {source_name} para {target_name} é {rate}.")
}

pub struct Handler {
    currency: Arc<CurrencyClient>,
}

impl Handler {
    pub fn new(currency: Arc<CurrencyClient>) -> Self {
        Self { currency }
    }
}

#[serenity::async_trait]
impl CommandHandler for Handler {
    fn name(&self) -> &str {
        "price"
    }

    fn descriptor(&self) -> CreateCommand {
        let mut source_option = CreateCommandOption::new(
            CommandOptionType::String,
            constant::value::SOURCE,
            "The currency to convert from",
        )
        .required(true);

        let mut target_option = CreateCommandOption::new(
            CommandOptionType::String,
            constant::value::TARGET,
            "The currency to convert to",
        )
        .required(true);

        for (code, _) in CURRENCIES {
            source_option = source_option.add_string_choice(*code, *code);
            target_option = target_option.add_string_choice(*code, *code);
        }

        CreateCommand::new(self.name())
            .description("Get the price from one currency to another")
            .add_option(source_option)
            .add_option(target_option)
    }

    async fn run(&self, http: &Http, cmd: &CommandInteraction) -> anyhow::Result<()> {
        let source = util::get_option(cmd, constant::value::SOURCE)?;
        let target = util::get_option(cmd, constant::value::TARGET)?;

        run_deferred(http, cmd, FAILURE_TEXT, async {
            let table = self.currency.latest(source, target).await?;
            Ok(Reply::Text(format_rate_reply(source, target, &table)))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(rates: serde_json::Value) -> RateTable {
        serde_json::from_value(json!({ "rates": rates })).unwrap()
    }

    #[test]
    fn test_rate_reply_format() {
        let table = table(json!({ "BRL": 5.43 }));
        assert_eq!(
            format_rate_reply("USD", "BRL", &table),
            "O preço de Dólar Americano para Real é 5.43."
        );
    }

    #[test]
    fn test_rate_reply_is_idempotent() {
        let table = table(json!({ "BRL": 5.43 }));
        let first = format_rate_reply("USD", "BRL", &table);
        let second = format_rate_reply("USD", "BRL", &table);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_target_rate_is_unsupported() {
        let table = table(json!({ "EUR": 0.92 }));
        assert_eq!(format_rate_reply("USD", "BRL", &table), UNSUPPORTED_TEXT);
    }

    #[test]
    fn test_empty_rate_table_is_unsupported() {
        let table = table(json!({}));
        assert_eq!(format_rate_reply("USD", "BRL", &table), UNSUPPORTED_TEXT);
    }
}
