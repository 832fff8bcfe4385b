use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use posts_client::{NewPost, Post, PostsClient, PostsClientError};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:3000";

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "Command line client for posts-server")]
struct Cli {
    /// Server address; a bare `host:port` gets `http://` prepended.
    #[arg(long, global = true, env = "POSTS_SERVER")]
    server: Option<String>,

    /// Print raw JSON instead of the human-readable layout.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every post.
    List,
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        view_counter: Option<i64>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// Check that the server can reach its store.
    Health,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string()));
    let client = PostsClient::new(server).context("failed to build HTTP client")?;

    match cli.command {
        Command::List => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            if cli.json {
                print_json(&posts)?;
            } else {
                print_list(&posts);
            }
        }
        Command::Create {
            title,
            text,
            view_counter,
            published,
        } => {
            let payload = NewPost {
                title,
                text,
                view_counter,
                published,
            };
            let post = client
                .create_post(&payload)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                print_json(&post)?;
            } else {
                print_post("Post created", &post);
            }
        }
        Command::Health => {
            client.health().await.map_err(map_client_error)?;
            println!("{} is ready", client.base_url());
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    let server = server.trim().to_string();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: PostsClientError) -> anyhow::Error {
    let message = match err {
        PostsClientError::Validation(violations) => {
            let lines: Vec<String> = violations
                .iter()
                .map(|violation| format!("  - {violation}"))
                .collect();
            format!("post rejected:\n{}", lines.join("\n"))
        }
        PostsClientError::Unavailable(message) => {
            format!("server cannot reach its store: {message}")
        }
        PostsClientError::Conflict(message) => format!("write conflict: {message}"),
        PostsClientError::InvalidRequest(message) => format!("invalid request: {message}"),
        PostsClientError::Http(err) => format!("HTTP error: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_post(heading: &str, post: &Post) {
    println!("{heading}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("text: {}", post.text);
    if let Some(view_counter) = post.view_counter {
        println!("viewCounter: {view_counter}");
    }
    if let Some(published) = post.published {
        println!("published: {published}");
    }
    println!("createdAt: {}", post.created_at);
    println!("updatedAt: {}", post.updated_at);
}

fn print_list(posts: &[Post]) {
    println!("Posts: {}", posts.len());
    for post in posts {
        println!("- [{}] {}", post.id, post.title);
    }
}
