//! Fun commands backed by third-party content APIs.

use std::time::Duration;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponseMessage, EditInteractionResponse,
};

use crate::{
    bot::command::{channel_is_nsfw, options::CommandOptions, reply, reply_embed, reply_ephemeral},
    error::AppError,
    model::reddit::{RedditImage, RedditSort, TimeWindow, MEME_SUBREDDITS},
    service::{
        content::{ContentService, ImagePick},
        game::{eight_ball, DiceRoll, DIE_SIDES},
        quote::{Quote, QuoteKind, QuoteService},
        reddit::is_valid_subreddit,
    },
    state::BotState,
};

const FUN_COOLDOWN: Duration = Duration::from_secs(3);
const ROLL_COOLDOWN: Duration = Duration::from_secs(2);

const EMBED_COLOR: u32 = 0x5865F2;

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("cat")
            .description("Send a random cat picture.")
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "subreddit",
                "cats, catpictures, etc.",
            ))
            .add_option(sort_option())
            .add_option(time_option())
            .add_option(nsfw_option()),
        CreateCommand::new("meme")
            .description("Fetch a random meme.")
            .add_option(
                MEME_SUBREDDITS.iter().fold(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "kind",
                        "Which kind of meme?",
                    ),
                    |option, kind| option.add_string_choice(*kind, *kind),
                ),
            )
            .add_option(sort_option())
            .add_option(time_option())
            .add_option(nsfw_option()),
        CreateCommand::new("dog").description("Send a random dog picture."),
        CreateCommand::new("quote")
            .description("Get a random quote.")
            .add_option(QuoteKind::ALL.iter().fold(
                CreateCommandOption::new(CommandOptionType::String, "kind", "Quote type"),
                |option, kind| option.add_string_choice(kind.as_str(), kind.as_str()),
            )),
        CreateCommand::new("eightball")
            .description("Ask the magic 8-ball a question.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "question",
                    "What do you want to know?",
                )
                .required(true),
            ),
        CreateCommand::new("roll")
            .description("Roll dice, like 3d6.")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "count", "How many dice")
                    .min_int_value(1)
                    .max_int_value(30),
            )
            .add_option(DIE_SIDES.iter().fold(
                CreateCommandOption::new(CommandOptionType::Integer, "sides", "What kind of die"),
                |option, sides| option.add_int_choice(format!("d{}", sides), *sides as i32),
            ))
            .add_option(CreateCommandOption::new(
                CommandOptionType::Integer,
                "modifier",
                "Add or subtract after rolling",
            )),
    ]
}

fn sort_option() -> CreateCommandOption {
    RedditSort::ALL.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "sort", "Sort type"),
        |option, sort| option.add_string_choice(sort.as_str(), sort.as_str()),
    )
}

fn time_option() -> CreateCommandOption {
    TimeWindow::ALL.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "time", "Time range for 'top'"),
        |option, window| option.add_string_choice(window.as_str(), window.as_str()),
    )
}

fn nsfw_option() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::Boolean,
        "allow_nsfw",
        "Allow NSFW if the channel allows it",
    )
}

/// Subreddit listing options shared by `/cat` and `/meme`.
struct ListingOptions<'a> {
    subreddit: &'a str,
    sort: RedditSort,
    window: TimeWindow,
    allow_nsfw: bool,
}

impl<'a> ListingOptions<'a> {
    fn parse(options: &CommandOptions<'a>, subreddit_option: &str, default: &'a str) -> Self {
        Self {
            subreddit: options.string(subreddit_option).unwrap_or(default),
            sort: options
                .string("sort")
                .and_then(RedditSort::parse)
                .unwrap_or_default(),
            window: options
                .string("time")
                .and_then(TimeWindow::parse)
                .unwrap_or_default(),
            allow_nsfw: options.boolean("allow_nsfw").unwrap_or(false),
        }
    }
}

/// Refuses NSFW requests outside NSFW channels. Returns `false` if a refusal was sent.
async fn check_nsfw(
    ctx: &Context,
    command: &CommandInteraction,
    allow_nsfw: bool,
) -> Result<bool, AppError> {
    if allow_nsfw && !channel_is_nsfw(ctx, command.channel_id).await {
        reply_ephemeral(ctx, command, "Not posting NSFW in a non-NSFW channel.").await?;
        return Ok(false);
    }

    Ok(true)
}

pub async fn cat(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    state
        .cooldowns
        .check("cat", command.user.id.get(), FUN_COOLDOWN)
        .await?;

    let options = CommandOptions::new(command);
    let listing = ListingOptions::parse(&options, "subreddit", "cats");
    if !is_valid_subreddit(listing.subreddit) {
        return Err(AppError::BadRequest(format!(
            "`{}` doesn't look like a subreddit name.",
            listing.subreddit
        )));
    }
    if !check_nsfw(ctx, command, listing.allow_nsfw).await? {
        return Ok(());
    }

    command.defer(&ctx.http).await?;

    let pick = ContentService::new(&state.http_client)
        .cat(
            listing.subreddit,
            listing.sort,
            listing.window,
            listing.allow_nsfw,
        )
        .await;
    let embed = match pick {
        ImagePick::Reddit(image) => build_reddit_embed(&image),
        ImagePick::Fallback { image_url, .. } => CreateEmbed::new()
            .title(format!(
                "r/{} didn't cooperate. Have a cat anyway.",
                listing.subreddit
            ))
            .image(image_url)
            .color(EMBED_COLOR),
    };

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await?;

    Ok(())
}

pub async fn meme(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    state
        .cooldowns
        .check("meme", command.user.id.get(), FUN_COOLDOWN)
        .await?;

    let options = CommandOptions::new(command);
    let listing = ListingOptions::parse(&options, "kind", MEME_SUBREDDITS[0]);
    if !check_nsfw(ctx, command, listing.allow_nsfw).await? {
        return Ok(());
    }

    command.defer(&ctx.http).await?;

    let pick = ContentService::new(&state.http_client)
        .meme(
            listing.subreddit,
            listing.sort,
            listing.window,
            listing.allow_nsfw,
        )
        .await;
    let response = match pick {
        Some(ImagePick::Reddit(image)) => {
            EditInteractionResponse::new().embed(build_reddit_embed(&image))
        }
        Some(ImagePick::Fallback {
            image_url,
            title,
            link,
        }) => {
            let mut embed = CreateEmbed::new()
                .title(title.unwrap_or_else(|| "Here's a meme.".to_string()))
                .image(image_url)
                .color(EMBED_COLOR);
            if let Some(link) = link {
                embed = embed.url(link);
            }
            EditInteractionResponse::new().embed(embed)
        }
        None => EditInteractionResponse::new()
            .content("Couldn't fetch a meme. The internet has failed us."),
    };

    command.edit_response(&ctx.http, response).await?;

    Ok(())
}

pub async fn dog(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    state
        .cooldowns
        .check("dog", command.user.id.get(), FUN_COOLDOWN)
        .await?;

    command.defer(&ctx.http).await?;

    let response = match ContentService::new(&state.http_client).dog().await {
        Some(url) => EditInteractionResponse::new().embed(
            CreateEmbed::new()
                .title("🐶 Woof")
                .image(url)
                .color(EMBED_COLOR),
        ),
        None => EditInteractionResponse::new().content("No dogs fetched. Rude."),
    };

    command.edit_response(&ctx.http, response).await?;

    Ok(())
}

pub async fn quote(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    state
        .cooldowns
        .check("quote", command.user.id.get(), FUN_COOLDOWN)
        .await?;

    let kind = CommandOptions::new(command)
        .string("kind")
        .and_then(QuoteKind::parse)
        .unwrap_or_default();

    command.defer(&ctx.http).await?;

    let quote = QuoteService::new(&state.http_client).random(kind).await;

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(build_quote_embed(&quote, kind)),
        )
        .await?;

    Ok(())
}

pub async fn eightball(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    state
        .cooldowns
        .check("eightball", command.user.id.get(), FUN_COOLDOWN)
        .await?;

    let question = CommandOptions::new(command).require_string("question")?;
    let answer = eight_ball(&mut rand::rng());

    let embed = CreateEmbed::new()
        .title("🎱 The Magic 8-Ball")
        .color(EMBED_COLOR)
        .field("Question", question, false)
        .field("Answer", answer, false);

    reply_embed(ctx, command, embed, false).await
}

pub async fn roll(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    state
        .cooldowns
        .check("roll", command.user.id.get(), ROLL_COOLDOWN)
        .await?;

    let options = CommandOptions::new(command);
    let count = u32::try_from(options.integer("count").unwrap_or(1)).unwrap_or(0);
    let sides = u32::try_from(options.integer("sides").unwrap_or(6)).unwrap_or(0);
    let modifier = options.integer("modifier").unwrap_or(0);

    let roll = DiceRoll::roll(count, sides, modifier, &mut rand::rng())?;

    reply(
        ctx,
        command,
        CreateInteractionResponseMessage::new().embed(build_roll_embed(&roll)),
    )
    .await
}

fn build_reddit_embed(image: &RedditImage) -> CreateEmbed {
    CreateEmbed::new()
        .title(&image.title)
        .url(&image.permalink)
        .image(&image.image_url)
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new(format!(
            "r/{} • by u/{} • {} upvotes",
            image.subreddit, image.author, image.score
        )))
}

fn build_quote_embed(quote: &Quote, kind: QuoteKind) -> CreateEmbed {
    CreateEmbed::new()
        .description(format!("“{}”\n— **{}**", quote.content, quote.author))
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new(format!(
            "Type: {}{}",
            kind.as_str(),
            if quote.fallback { " • fallback" } else { "" }
        )))
}

fn build_roll_embed(roll: &DiceRoll) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("🎲 {}", roll.notation()))
        .color(EMBED_COLOR)
        .field("Rolls", roll.preview(), false)
        .field("Total", roll.total().to_string(), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reddit_embed_credits_the_post() {
        let image = RedditImage {
            image_url: "https://i.redd.it/a.png".to_string(),
            title: "Loaf".to_string(),
            permalink: "https://www.reddit.com/r/cats/comments/1/".to_string(),
            author: "catperson".to_string(),
            score: 42,
            subreddit: "cats".to_string(),
        };

        let json = serde_json::to_value(build_reddit_embed(&image)).unwrap();

        assert_eq!(json["title"], "Loaf");
        assert_eq!(json["url"], "https://www.reddit.com/r/cats/comments/1/");
        assert_eq!(json["image"]["url"], "https://i.redd.it/a.png");
        assert_eq!(
            json["footer"]["text"],
            "r/cats • by u/catperson • 42 upvotes"
        );
    }

    #[test]
    fn quote_footer_marks_fallback() {
        let quote = Quote {
            content: "Talk is cheap. Show me the code.".to_string(),
            author: "Linus Torvalds".to_string(),
            fallback: true,
        };

        let json = serde_json::to_value(build_quote_embed(&quote, QuoteKind::Technology)).unwrap();

        assert_eq!(
            json["description"],
            "“Talk is cheap. Show me the code.”\n— **Linus Torvalds**"
        );
        assert_eq!(json["footer"]["text"], "Type: technology • fallback");
    }

    #[test]
    fn roll_embed_shows_notation_and_total() {
        let roll = DiceRoll {
            count: 2,
            sides: 6,
            modifier: 1,
            rolls: vec![3, 4],
        };

        let json = serde_json::to_value(build_roll_embed(&roll)).unwrap();

        assert_eq!(json["title"], "🎲 2d6+1");
        assert_eq!(json["fields"][0]["value"], "3, 4");
        assert_eq!(json["fields"][1]["value"], "8");
    }

    #[test]
    fn registers_fun_commands() {
        let names: Vec<_> = register()
            .into_iter()
            .map(|c| serde_json::to_value(c).unwrap()["name"].clone())
            .collect();

        assert_eq!(names, vec!["cat", "meme", "dog", "quote", "eightball", "roll"]);
    }
}
