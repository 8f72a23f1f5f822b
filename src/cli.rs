// CLI layer: clap argument definitions and one handler per subcommand.
// Handlers only print; every request goes through `ApiClient`.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::api::{ApiClient, RawResponse};
use crate::model::Page;

/// Create, list, update and archive records in a Notion database.
#[derive(Parser, Debug)]
#[command(name = "notion-automation")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Pretty-print JSON responses
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Create a new page
    Create {
        /// Title of the page
        title: String,
        /// Description of the page
        description: String,
    },
    /// Get pages from the database
    Get {
        /// Number of pages to retrieve (all pages when omitted)
        #[arg(long = "num_pages", visible_alias = "num-pages", value_name = "N")]
        num_pages: Option<u32>,
    },
    /// Update an existing page's published date
    Update {
        /// ID of the page to update
        page_id: String,
        /// New date in ISO format (YYYY-MM-DD or a full timestamp)
        new_date: String,
    },
    /// Delete (archive) a page
    Delete {
        /// ID of the page to delete
        page_id: String,
    },
}

/// Run the parsed command against the client, writing results to stdout.
pub fn run(cli: &Cli, api: &ApiClient) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Create { title, description } => {
            let res = api.create(title, description)?;
            print_response(&mut out, &res, cli.pretty)
        }
        Commands::Get { num_pages } => {
            let pages = fetch_with_spinner(api, *num_pages)?;
            for page in &pages {
                writeln!(out, "{}", page_line(page))?;
            }
            Ok(())
        }
        Commands::Update { page_id, new_date } => {
            let res = api.update(page_id, new_date)?;
            print_response(&mut out, &res, cli.pretty)
        }
        Commands::Delete { page_id } => {
            let res = api.archive(page_id)?;
            print_response(&mut out, &res, cli.pretty)
        }
    }
}

/// One summary line per record.
pub fn page_line(page: &Page) -> String {
    format!(
        "Page ID: {}, Title: {}, URL: {}, Published: {}",
        page.id,
        page.title_text(),
        page.url_text(),
        page.published_start()
    )
}

/// Print the body as the service sent it. Rejections are printed the same
/// way as successes and do not change the exit status.
fn print_response<W: Write>(out: &mut W, res: &RawResponse, pretty: bool) -> Result<()> {
    let rendered = render_json(&res.body, pretty)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

fn render_json(body: &Value, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(body)
    } else {
        serde_json::to_string(body)
    };
    rendered.context("Failed to render response json")
}

fn fetch_with_spinner(api: &ApiClient, count: Option<u32>) -> Result<Vec<Page>> {
    // indicatif draws on stderr and stays hidden when it is not a terminal.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Fetching pages...");

    let pages = api.query_pages(count, |fetched| {
        spinner.set_message(format!("Fetched {} records...", fetched));
        spinner.tick();
    });
    spinner.finish_and_clear();
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_create_with_positional_arguments() {
        let cli = Cli::try_parse_from(["notion-automation", "create", "A title", "A description"])
            .unwrap();
        assert_eq!(
            cli.command,
            Commands::Create {
                title: "A title".into(),
                description: "A description".into(),
            }
        );
    }

    #[test]
    fn get_without_flag_means_all_pages() {
        let cli = Cli::try_parse_from(["notion-automation", "get"]).unwrap();
        assert_eq!(cli.command, Commands::Get { num_pages: None });
    }

    #[test]
    fn get_accepts_underscore_and_dash_flag() {
        let cli = Cli::try_parse_from(["notion-automation", "get", "--num_pages", "5"]).unwrap();
        assert_eq!(cli.command, Commands::Get { num_pages: Some(5) });
        let cli = Cli::try_parse_from(["notion-automation", "get", "--num-pages", "0"]).unwrap();
        assert_eq!(cli.command, Commands::Get { num_pages: Some(0) });
    }

    #[test]
    fn get_rejects_non_numeric_count() {
        assert!(Cli::try_parse_from(["notion-automation", "get", "--num_pages", "many"]).is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli =
            Cli::try_parse_from(["notion-automation", "delete", "abc123", "--pretty", "-vv"])
                .unwrap();
        assert!(cli.pretty);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Commands::Delete {
                page_id: "abc123".into()
            }
        );
    }

    #[test]
    fn update_requires_a_date() {
        assert!(Cli::try_parse_from(["notion-automation", "update", "abc123"]).is_err());
    }

    #[test]
    fn page_line_lists_id_title_url_and_date() {
        let page: Page = serde_json::from_value(json!({
            "id": "p1",
            "properties": {
                "URL": {"title": [{"text": {"content": "https://example.com"}}]},
                "Title": {"rich_text": [{"text": {"content": "Example"}}]},
                "Published": {"date": {"start": "2023-01-15", "end": null}}
            }
        }))
        .unwrap();
        assert_eq!(
            page_line(&page),
            "Page ID: p1, Title: Example, URL: https://example.com, Published: 2023-01-15"
        );
    }

    #[test]
    fn error_bodies_print_like_any_other_response() {
        let res = RawResponse {
            status: 404,
            body: json!({"object": "error", "code": "object_not_found"}),
        };
        let mut buf = Vec::new();
        print_response(&mut buf, &res, false).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"code\":\"object_not_found\",\"object\":\"error\"}\n"
        );
    }
}
