//! Ask command implementation

use crate::cli::AskArgs;
use crate::output::OutputWriter;
use crate::output_types::AskOutput;
use anyhow::{bail, Result};
use tourguide_core::config::LayeredConfig;
use tourguide_core::models::Sender;
use tourguide_remote::HttpGuideClient;
use tourguide_session::chat::{generate_user_id, ChatContext, ReplySource};
use tourguide_session::{ChatSession, ConnectivityMonitor};

use super::load_knowledge;

pub async fn execute(
    args: AskArgs,
    config: &LayeredConfig,
    offline: bool,
    output: &OutputWriter,
) -> Result<()> {
    let message = args.message.join(" ");

    let knowledge = load_knowledge(config).await;
    let client = HttpGuideClient::new(config.endpoint.value.clone());
    let mut session = ChatSession::new(Box::new(client), knowledge);
    let mut connectivity = ConnectivityMonitor::new(!offline);

    let user_id = generate_user_id();
    let context = ChatContext {
        user_id: &user_id,
        destination: config.destination.value.as_deref().unwrap_or(""),
        language: &config.language.value,
        coordinates: Some(config.home_coordinates()),
    };

    let Some(exchange) = session.send(&message, &context, &mut connectivity).await else {
        bail!("Nothing to ask: the message is blank");
    };

    if output.is_json() {
        let source = match exchange.source {
            ReplySource::Remote => "remote",
            ReplySource::Offline => "offline",
            ReplySource::Failure => "failure",
        };
        output.result(AskOutput {
            message: exchange.user.text,
            reply: exchange.reply.text,
            source: source.to_string(),
            language: config.language.value.clone(),
            destination: config.destination.value.clone(),
        })?;
    } else {
        if exchange.source == ReplySource::Offline {
            output.info("Offline mode: answering from the local phrasebook");
        }
        output.kv(Sender::Bot.label(), &exchange.reply.text);
    }

    Ok(())
}
