//! `bitebook`, the terminal client for the Bitebook API.
//!
//! # Usage
//!
//! ```
//! bitebook contacts list
//! bitebook restaurants add --name "Tipo 00" --address "361 Little Bourke St"
//! bitebook --url http://localhost:3000 shell
//! ```

use std::{
  io::Write as _,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::{Context, Result, anyhow};
use bitebook_cli::{
  cache::QueryCache,
  client::{ApiClient, ApiConfig, DEFAULT_URL},
  data::Bitebook,
  form::{ContactForm, RestaurantForm, ReviewSection},
  pipeline::{self, SaveStep},
  views,
};
use bitebook_core::restaurant::{Coordinates, Restaurant};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "bitebook", about = "Terminal client for Bitebook contacts and restaurants")]
struct Cli {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the Bitebook server (default: http://localhost:3000).
  #[arg(long, env = "BITEBOOK_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Contact requests.
  #[command(subcommand)]
  Contacts(ContactCommand),
  /// Tracked restaurants.
  #[command(subcommand)]
  Restaurants(RestaurantCommand),
  /// Interactive prompt sharing one cache across commands.
  Shell,
}

#[derive(Subcommand, Debug)]
enum ContactCommand {
  List,
  Add {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name:  String,
    #[arg(long)]
    email:      String,
    #[arg(long)]
    phone:      String,
    #[arg(long, default_value = "")]
    notes:      String,
  },
  Delete { id: i64 },
  Verify { id: i64 },
}

#[derive(Subcommand, Debug)]
enum RestaurantCommand {
  /// Both lists: want to visit, then visited.
  List,
  Show { id: i64 },
  Add(RestaurantArgs),
  /// Update fields, then rating and review, stopping at the first failure.
  Edit {
    id: i64,
    #[command(flatten)]
    fields: RestaurantArgs,
  },
  /// Set the star rating; 0 clears it.
  Rate {
    id: i64,
    #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
    rating: u8,
  },
  /// Set the review; omit the text to clear it.
  Review { id: i64, text: Option<String> },
  Delete { id: i64 },
}

/// Restaurant fields. On `edit`, omitted flags keep the stored value.
#[derive(Args, Debug, Default)]
struct RestaurantArgs {
  #[arg(long)]
  name:        Option<String>,
  #[arg(long)]
  address:     Option<String>,
  #[arg(long)]
  phone:       Option<String>,
  #[arg(long)]
  website:     Option<String>,
  #[arg(long)]
  description: Option<String>,
  #[arg(long, requires = "lat", allow_hyphen_values = true)]
  lng:         Option<f64>,
  #[arg(long, requires = "lng", allow_hyphen_values = true)]
  lat:         Option<f64>,
  /// 1–5 stars; 0 for none. Shows the review section.
  #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
  rating:      Option<u8>,
  /// Shows the review section.
  #[arg(long)]
  review:      Option<String>,
}

impl RestaurantArgs {
  fn has_review_section(&self) -> bool { self.rating.is_some() || self.review.is_some() }

  fn apply(self, form: &mut RestaurantForm) {
    let has_review_section = self.has_review_section();
    let Self { name, address, phone, website, description, lng, lat, rating, review } = self;
    if let Some(v) = name {
      form.name = v;
    }
    if let Some(v) = address {
      form.address = v;
    }
    if let Some(v) = phone {
      form.phone = v;
    }
    if let Some(v) = website {
      form.website = v;
    }
    if let Some(v) = description {
      form.description = v;
    }
    if let (Some(lng), Some(lat)) = (lng, lat) {
      form.coordinates = Some(Coordinates { lng, lat });
    }
    if has_review_section {
      let section = form.review.get_or_insert_with(ReviewSection::default);
      if let Some(v) = rating {
        section.rating = v;
      }
      if let Some(v) = review {
        section.review = v;
      }
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

fn read_config(path: &Path) -> Result<ConfigFile> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading config file {}", path.display()))?;
  toml::from_str(&raw).context("parsing config file")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let file_cfg = match &cli.config {
    Some(path) => read_config(path)?,
    None => ConfigFile::default(),
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: cli
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_owned()),
  };

  let data = Bitebook::new(ApiClient::new(api_config)?, Arc::new(QueryCache::new()));

  match cli.command {
    Command::Contacts(cmd) => contacts(&data, cmd).await,
    Command::Restaurants(cmd) => restaurants(&data, cmd).await,
    Command::Shell => shell(&data).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn contacts(data: &Bitebook, cmd: ContactCommand) -> Result<()> {
  match cmd {
    ContactCommand::List => {
      print!("{}", views::contact_table(&data.contacts().await?));
    }
    ContactCommand::Add { first_name, last_name, email, phone, notes } => {
      let form = ContactForm { first_name, last_name, email, phone, notes };
      let contact = data.add_contact(&form.validate()?).await?;
      println!("Added contact {} ({})", contact.id, contact.full_name());
    }
    ContactCommand::Delete { id } => {
      let contact = data.delete_contact(id).await?;
      println!("Deleted contact {} ({})", contact.id, contact.full_name());
    }
    ContactCommand::Verify { id } => {
      let contact = data.verify_contact(id).await?;
      println!("Verified contact {} ({})", contact.id, contact.full_name());
    }
  }
  Ok(())
}

/// Set when `--review` was given but the save stopped before the review step,
/// which happens whenever the restaurant has no rating.
fn unsaved_review_note(review_given: bool, applied: &[SaveStep]) -> Option<&'static str> {
  (review_given && !applied.contains(&SaveStep::Review))
    .then_some("Review not saved: a restaurant needs a rating before its review")
}

async fn find_restaurant(data: &Bitebook, id: i64) -> Result<Restaurant> {
  data
    .restaurants()
    .await?
    .iter()
    .find(|r| r.id == id)
    .cloned()
    .ok_or_else(|| anyhow!("Restaurant not found"))
}

async fn restaurants(data: &Bitebook, cmd: RestaurantCommand) -> Result<()> {
  match cmd {
    RestaurantCommand::List => {
      print!("{}", views::restaurant_lists(&data.restaurants().await?));
    }
    RestaurantCommand::Show { id } => {
      print!("{}", views::restaurant_detail(&find_restaurant(data, id).await?));
    }
    RestaurantCommand::Add(args) => {
      let mut form = RestaurantForm::default();
      args.apply(&mut form);
      let created = pipeline::add_restaurant(data, &form.to_new()?).await?;
      println!("Added restaurant {} ({})", created.id, created.name);
    }
    RestaurantCommand::Edit { id, fields } => {
      let current = find_restaurant(data, id).await?;
      let mut form = RestaurantForm::from_restaurant(&current, fields.has_review_section());
      let review_given = fields.review.is_some();
      fields.apply(&mut form);

      match pipeline::save_restaurant(data, id, &form.to_edit()?).await {
        Ok(saved) => {
          println!("Saved restaurant {} ({})", id, saved.restaurant.name);
          if let Some(note) = unsaved_review_note(review_given, &saved.applied) {
            eprintln!("{note}");
          }
        }
        Err(e) => {
          if e.is_partial() {
            let applied: Vec<String> = e.applied.iter().map(ToString::to_string).collect();
            eprintln!("Applied before the failure: {}", applied.join(", "));
          }
          return Err(anyhow::Error::new(e));
        }
      }
    }
    RestaurantCommand::Rate { id, rating } => {
      let r = data.update_rating(id, (rating > 0).then_some(rating)).await?;
      println!("{} {}", r.name, views::stars(r.rating));
    }
    RestaurantCommand::Review { id, text } => {
      let text = text.as_deref().map(str::trim).filter(|t| !t.is_empty());
      let r = data.update_review(id, text).await?;
      match r.review {
        Some(_) => println!("Reviewed {}", r.name),
        None => println!("Cleared review for {}", r.name),
      }
    }
    RestaurantCommand::Delete { id } => {
      let r = data.delete_restaurant(id).await?;
      println!("Deleted restaurant {} ({})", r.id, r.name);
    }
  }
  Ok(())
}

// ─── Shell ────────────────────────────────────────────────────────────────────

/// One line typed at the shell prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct ShellLine {
  #[command(subcommand)]
  command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
  #[command(subcommand)]
  Contacts(ContactCommand),
  #[command(subcommand)]
  Restaurants(RestaurantCommand),
  /// Leave the shell.
  #[command(alias = "quit")]
  Exit,
}

async fn shell(data: &Bitebook) -> Result<()> {
  println!("Connected to {}. Type `help` for commands, `exit` to leave.", data.base_url());
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  loop {
    print!("bitebook> ");
    std::io::stdout().flush().ok();

    let Some(line) = lines.next_line().await.context("reading stdin")? else {
      println!();
      return Ok(());
    };
    let words = match split_words(&line) {
      Ok(words) if words.is_empty() => continue,
      Ok(words) => words,
      Err(e) => {
        eprintln!("error: {e}");
        continue;
      }
    };

    let command = match ShellLine::try_parse_from(words) {
      Ok(parsed) => parsed.command,
      Err(e) => {
        // Help and parse errors are both rendered by clap.
        let _ = e.print();
        continue;
      }
    };

    let result = match command {
      ShellCommand::Exit => return Ok(()),
      ShellCommand::Contacts(cmd) => contacts(data, cmd).await,
      ShellCommand::Restaurants(cmd) => restaurants(data, cmd).await,
    };
    if let Err(e) = result {
      eprintln!("error: {e:#}");
    }
  }
}

/// Split a shell line on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>> {
  let mut words = Vec::new();
  let mut current = String::new();
  let mut in_word = false;
  let mut quoted = false;

  for ch in line.chars() {
    match ch {
      '"' => {
        quoted = !quoted;
        in_word = true;
      }
      c if c.is_whitespace() && !quoted => {
        if in_word {
          words.push(std::mem::take(&mut current));
          in_word = false;
        }
      }
      c => {
        current.push(c);
        in_word = true;
      }
    }
  }

  if quoted {
    return Err(anyhow!("unterminated quote"));
  }
  if in_word {
    words.push(current);
  }
  Ok(words)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn split_words_honours_quotes() {
    let words = split_words(r#"restaurants add --name "Tipo 00" --rating 4"#).unwrap();
    assert_eq!(words, ["restaurants", "add", "--name", "Tipo 00", "--rating", "4"]);
    assert_eq!(split_words(r#"review 3 """#).unwrap(), ["review", "3", ""]);
    assert!(split_words("   ").unwrap().is_empty());
    assert!(split_words(r#"add --name "Tipo"#).is_err());
  }

  #[test]
  fn shell_lines_parse_as_commands() {
    let line = ShellLine::try_parse_from(["restaurants", "rate", "3", "0"]).unwrap();
    assert!(matches!(
      line.command,
      ShellCommand::Restaurants(RestaurantCommand::Rate { id: 3, rating: 0 })
    ));
    assert!(ShellLine::try_parse_from(["restaurants", "rate", "3", "6"]).is_err());
    assert!(matches!(
      ShellLine::try_parse_from(["quit"]).unwrap().command,
      ShellCommand::Exit
    ));
  }

  #[test]
  fn review_section_only_when_requested() {
    let mut form = RestaurantForm::default();
    RestaurantArgs { name: Some("Tipo 00".into()), ..Default::default() }.apply(&mut form);
    assert_eq!(form.name, "Tipo 00");
    assert!(form.review.is_none());

    RestaurantArgs { rating: Some(4), ..Default::default() }.apply(&mut form);
    assert_eq!(form.review, Some(ReviewSection { rating: 4, review: String::new() }));
  }

  #[test]
  fn review_without_rating_is_reported() {
    let note = unsaved_review_note(true, &[SaveStep::Fields]);
    assert!(note.is_some_and(|n| n.contains("rating")));

    let all = [SaveStep::Fields, SaveStep::Rating, SaveStep::Review];
    assert_eq!(unsaved_review_note(true, &all), None);
    assert_eq!(unsaved_review_note(false, &[SaveStep::Fields]), None);
  }

  #[test]
  fn cli_parses_contact_add() {
    let cli = Cli::try_parse_from([
      "bitebook", "--url", "http://example:3000", "contacts", "add", "--first-name", "Jane",
      "--last-name", "Doe", "--email", "jane@x.com", "--phone", "0412345678",
    ])
    .unwrap();
    assert_eq!(cli.url.as_deref(), Some("http://example:3000"));
    assert!(matches!(
      cli.command,
      Command::Contacts(ContactCommand::Add { ref notes, .. }) if notes.is_empty()
    ));
  }
}
