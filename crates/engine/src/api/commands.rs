//! `/quests` command surface.

use std::sync::Arc;

use questline_domain::ActorId;

use crate::entities::{Messenger, Quests};
use crate::infrastructure::catalog::keys;
use crate::use_cases::QuestAuthoring;

/// Parsed `/quests` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create,
    Cancel,
    List,
    /// No subcommand, or one we do not know
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Self {
        let Some(first) = args.first() else {
            return Self::Help;
        };
        SUBCOMMANDS
            .iter()
            .find(|sub| first.eq_ignore_ascii_case(sub.name))
            .map_or(Self::Help, |sub| sub.command)
    }
}

struct SubCommand {
    name: &'static str,
    syntax: &'static str,
    description_key: &'static str,
    command: Command,
}

const SUBCOMMANDS: &[SubCommand] = &[
    SubCommand {
        name: "create",
        syntax: "/quests create",
        description_key: keys::COMMAND_CREATE_DESCRIPTION,
        command: Command::Create,
    },
    SubCommand {
        name: "cancel",
        syntax: "/quests cancel",
        description_key: keys::COMMAND_CANCEL_DESCRIPTION,
        command: Command::Cancel,
    },
    SubCommand {
        name: "list",
        syntax: "/quests list",
        description_key: keys::COMMAND_LIST_DESCRIPTION,
        command: Command::List,
    },
];

pub struct CommandRouter {
    authoring: Arc<QuestAuthoring>,
    quests: Arc<Quests>,
    messenger: Arc<Messenger>,
}

impl CommandRouter {
    pub fn new(authoring: Arc<QuestAuthoring>, quests: Arc<Quests>, messenger: Arc<Messenger>) -> Self {
        Self {
            authoring,
            quests,
            messenger,
        }
    }

    pub async fn execute(&self, actor: ActorId, args: &[String]) -> Command {
        let command = Command::parse(args);
        tracing::debug!(actor_id = %actor, ?command, "Quest command received");

        match command {
            Command::Create => {
                self.authoring.start(actor).await;
            }
            Command::Cancel => {
                self.authoring.cancel(actor).await;
            }
            Command::List => self.list(actor).await,
            Command::Help => self.help(actor).await,
        }
        command
    }

    async fn list(&self, actor: ActorId) {
        let quests = self.quests.list().await;
        if quests.is_empty() {
            self.messenger.send(actor, keys::QUEST_LIST_EMPTY).await;
            return;
        }

        let locale = self.messenger.locale_for(actor).await;
        let catalog = self.messenger.catalog();
        let mut lines = vec![catalog.get(&locale, keys::QUEST_LIST_HEADER)];
        for quest in &quests {
            let coins = quest.reward_coins.to_string();
            lines.push(catalog.render(
                &locale,
                keys::QUEST_LIST_ENTRY,
                &[
                    ("name", quest.name.as_str()),
                    ("description", &quest.description),
                    ("coins", &coins),
                ],
            ));
        }
        self.messenger.deliver(actor, lines.join("\n")).await;
    }

    async fn help(&self, actor: ActorId) {
        let locale = self.messenger.locale_for(actor).await;
        let catalog = self.messenger.catalog();
        let separator = catalog.get(&locale, keys::HELP_SEPARATOR);

        let mut lines = vec![separator.clone()];
        for sub in SUBCOMMANDS {
            let description = catalog.get(&locale, sub.description_key);
            lines.push(catalog.render(
                &locale,
                keys::HELP_ENTRY,
                &[("syntax", sub.syntax), ("description", &description)],
            ));
        }
        lines.push(separator);

        for line in lines {
            self.messenger.deliver(actor, line).await;
        }
    }
}
