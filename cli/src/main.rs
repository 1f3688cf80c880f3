mod cli;
mod config;
mod render;

use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Parser;
use taskflow_core::{RecordingNotifier, TaskManager};
use taskflow_store::{CategoryStore, Seed, TaskStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::render::{CategoriesView, SummaryView};

const DEFAULT_LOG_FILTER: &str = "taskflow=info,taskflow_core=info,taskflow_store=info";

type Manager = TaskManager<TaskStore, CategoryStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.merge_cli(&cli);
    debug!(?config, "resolved configuration");

    let seed = match &config.seed_path {
        Some(path) => Seed::from_path(path)?,
        None => Seed::builtin()?,
    };
    let (tasks, categories) = seed.into_stores(config.latency);

    let notices = Arc::new(RecordingNotifier::new());
    let mut manager =
        TaskManager::new(tasks, categories, notices.clone()).with_week_start(config.week_start);

    let outcome = run(&cli, &mut manager).await;
    for notice in notices.take() {
        eprintln!("{}", render::notice_line(&notice));
    }
    outcome
}

async fn run(cli: &Cli, manager: &mut Manager) -> anyhow::Result<()> {
    manager.load().await.context("failed to load data")?;
    if let Some(id) = cli.category {
        if !manager.categories().iter().any(|c| c.id == id) {
            bail!("no category with id {id}");
        }
    }
    manager.select_category(cli.category);

    match &cli.command {
        Command::Summary => print_summary(manager, cli.json),
        Command::List {
            search,
            priority,
            status,
        } => {
            if let Some(query) = search {
                manager.set_search_query(query.as_str());
            }
            if let Some(priority) = priority {
                manager.set_priority_filter(*priority);
            }
            if let Some(status) = status {
                manager.set_status_filter(*status);
            }
            print_tasks(manager, cli.json)
        }
        Command::Categories => print_categories(manager, cli.json),
        Command::Add {
            title,
            priority,
            due,
        } => {
            let mut draft = manager.draft_task(title.as_str());
            if let Some(priority) = priority {
                draft = draft.priority(*priority);
            }
            if let Some(day) = due {
                draft = draft.due(start_of_local_day(*day)?);
            }
            if manager.add_task(draft).await.is_none() {
                bail!("task was not added");
            }
            print_tasks(manager, cli.json)
        }
        Command::Complete { id } => {
            manager.toggle_complete(*id, true).await?;
            print_tasks(manager, cli.json)
        }
        Command::Reopen { id } => {
            manager.toggle_complete(*id, false).await?;
            print_tasks(manager, cli.json)
        }
        Command::Delete { id } => {
            manager.remove_task(*id).await?;
            print_tasks(manager, cli.json)
        }
    }
}

fn start_of_local_day(day: NaiveDate) -> anyhow::Result<chrono::DateTime<Utc>> {
    let Some(local) = Local
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
    else {
        bail!("{day} has no local midnight");
    };
    Ok(local.with_timezone(&Utc))
}

fn print_summary(manager: &Manager, json: bool) -> anyhow::Result<()> {
    let header = manager.header();
    let stats = manager.stats(&Local::now());
    let counts = manager.category_counts();
    let categories = CategoriesView::new(manager.categories(), &counts);
    if json {
        let view = SummaryView {
            header: &header,
            stats: &stats,
            completion_percentage: stats.completion_percentage(),
            categories: &categories,
        };
        println!("{}", render::to_json(&view)?);
    } else {
        print!("{}", render::summary_text(&header, &stats));
        println!();
        print!(
            "{}",
            render::categories_text(&categories, manager.selected_category())
        );
    }
    Ok(())
}

fn print_tasks(manager: &Manager, json: bool) -> anyhow::Result<()> {
    let visible = manager.visible_tasks();
    if json {
        println!("{}", render::to_json(&visible)?);
    } else {
        print!(
            "{}",
            render::task_list_text(&visible, manager.categories(), &Local::now())
        );
    }
    Ok(())
}

fn print_categories(manager: &Manager, json: bool) -> anyhow::Result<()> {
    let counts = manager.category_counts();
    let view = CategoriesView::new(manager.categories(), &counts);
    if json {
        println!("{}", render::to_json(&view)?);
    } else {
        print!(
            "{}",
            render::categories_text(&view, manager.selected_category())
        );
    }
    Ok(())
}
