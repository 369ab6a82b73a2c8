use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{BlogApp, DeleteOutcome, FileSessionStore, HttpBlogApiBuilder};
use shared::domain::{BlogDraft, BlogId};
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod form;
mod view;

use commands::{Command, Target, HELP};
use form::CreateForm;
use view::{render, Page};

#[derive(Parser, Debug)]
#[command(name = "bloglist", about = "Terminal client for the bloglist service")]
struct Args {
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    session_dir: Option<PathBuf>,
}

type Input = Lines<BufReader<Stdin>>;

fn prompt(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

async fn read_line(input: &mut Input) -> Result<Option<String>> {
    input.next_line().await.context("failed to read from stdin")
}

async fn ask(input: &mut Input, label: &str) -> Option<String> {
    prompt(label);
    read_line(input).await.ok().flatten()
}

async fn confirm(input: &mut Input, question: String) -> bool {
    ask(input, &format!("{question} [y/N] "))
        .await
        .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"))
}

struct Shell {
    app: BlogApp,
    input: Input,
    form: CreateForm,
}

impl Shell {
    fn new(app: BlogApp) -> Self {
        Self {
            app,
            input: BufReader::new(stdin()).lines(),
            form: CreateForm::default(),
        }
    }

    async fn show_page(&self) {
        let page = Page::from_app(&self.app, self.form.is_open()).await;
        print!("{}", render(&page));
    }

    async fn run(&mut self) -> Result<()> {
        self.show_page().await;
        loop {
            prompt("> ");
            let Some(line) = read_line(&mut self.input).await? else {
                return Ok(());
            };

            let command = match commands::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };

            if command.requires_login() && self.app.current_user().is_none() {
                println!("log in first: login <username> [password]");
                continue;
            }

            if !self.execute(command).await {
                return Ok(());
            }
        }
    }

    /// Returns `false` when the shell should exit.
    async fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Login { username, password } => {
                let password = match password {
                    Some(password) => password,
                    None => ask(&mut self.input, "password (shown as typed): ")
                        .await
                        .unwrap_or_default(),
                };
                let _ = self.app.login(&username, &password).await;
            }
            Command::Logout => {
                self.app.logout().await;
                self.form.close();
            }
            Command::List => {}
            Command::ToggleForm => self.form.toggle(),
            Command::CancelForm => self.form.close(),
            Command::Create => self.create().await,
            Command::Like(target) => {
                if let Some(id) = self.resolve(&target) {
                    let _ = self.app.like(&id).await;
                }
            }
            Command::Delete(target) => {
                if let Some(id) = self.resolve(&target) {
                    self.delete(&id).await;
                }
            }
            Command::Help => {
                println!("{HELP}");
                return true;
            }
            Command::Quit => return false,
        }
        self.show_page().await;
        true
    }

    async fn create(&mut self) {
        if !self.form.is_open() {
            println!("open the form first with 'new'");
            return;
        }

        let mut draft = BlogDraft::default();
        for (label, field) in [
            ("title: ", &mut draft.title),
            ("author: ", &mut draft.author),
            ("url: ", &mut draft.url),
        ] {
            *field = ask(&mut self.input, label)
                .await
                .unwrap_or_default()
                .trim()
                .to_string();
        }

        let _ = self.form.submit(&mut self.app, &draft).await;
    }

    async fn delete(&mut self, id: &BlogId) {
        let input = &mut self.input;
        let outcome = self
            .app
            .delete(id, move |question| confirm(input, question))
            .await;
        if let Ok(DeleteOutcome::Declined) = outcome {
            info!(blog_id = %id, "shell: delete declined");
        }
    }

    fn resolve(&self, target: &Target) -> Option<BlogId> {
        let id = match target {
            Target::Position(position) => self
                .app
                .blogs
                .display()
                .get(position - 1)
                .map(|blog| blog.id.clone()),
            Target::Id(id) => self.app.blogs.get(id).map(|blog| blog.id.clone()),
        };
        if id.is_none() {
            println!("no such blog");
        }
        id
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config);
    settings.apply_overrides(args.server_url, args.session_dir);
    info!(
        server_url = %settings.server_url,
        session_dir = %settings.session_dir.display(),
        "bloglist: starting"
    );

    let api = HttpBlogApiBuilder::new(settings.server_url.clone())
        .timeout(settings.request_timeout())
        .build()
        .context("failed to configure the blog service client")?;
    let store = FileSessionStore::new(&settings.session_dir);

    let mut app =
        BlogApp::new(Arc::new(api), Arc::new(store)).with_sort_order(settings.sort_order);
    app.startup().await;

    Shell::new(app).run().await
}
