//! Typed access to resolved slash-command options.

use serenity::all::{CommandInteraction, PartialChannel, ResolvedOption, ResolvedValue, User};

use crate::error::{internal::InternalError, AppError};

pub struct CommandOptions<'a> {
    options: Vec<ResolvedOption<'a>>,
}

impl<'a> CommandOptions<'a> {
    pub fn new(command: &'a CommandInteraction) -> Self {
        Self {
            options: command.data.options(),
        }
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        match self.value(name)? {
            ResolvedValue::String(value) => Some(*value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.value(name)? {
            ResolvedValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.value(name)? {
            ResolvedValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<&'a User> {
        match self.value(name)? {
            ResolvedValue::User(user, _) => Some(*user),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<&'a PartialChannel> {
        match self.value(name)? {
            ResolvedValue::Channel(channel) => Some(*channel),
            _ => None,
        }
    }

    /// Required string option; Discord enforces presence, so absence is a bug.
    pub fn require_string(&self, name: &str) -> Result<&'a str, AppError> {
        self.string(name).ok_or_else(|| missing(name))
    }

    pub fn require_integer(&self, name: &str) -> Result<i64, AppError> {
        self.integer(name).ok_or_else(|| missing(name))
    }

    pub fn require_user(&self, name: &str) -> Result<&'a User, AppError> {
        self.user(name).ok_or_else(|| missing(name))
    }

    pub fn require_channel(&self, name: &str) -> Result<&'a PartialChannel, AppError> {
        self.channel(name).ok_or_else(|| missing(name))
    }

    /// Splits off the invoked subcommand and its own options.
    pub fn subcommand(self) -> Option<(&'a str, CommandOptions<'a>)> {
        let option = self.options.into_iter().next()?;
        match option.value {
            ResolvedValue::SubCommand(options) => Some((option.name, Self { options })),
            _ => None,
        }
    }

    fn value(&self, name: &str) -> Option<&ResolvedValue<'a>> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }
}

fn missing(name: &str) -> AppError {
    InternalError::MissingOption(name.to_string()).into()
}
