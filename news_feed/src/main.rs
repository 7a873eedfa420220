use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use news_feed::{
    app::NewsFeedApp,
    cli::{
        commands::{Cli, Commands},
        render,
    },
    config::{Config, load_config_path},
    feed::SectorFilter,
    insight::InsightOutcome,
    scheduler::Trigger,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => Config::default(),
    };
    let app = NewsFeedApp::from_config(&cfg)?;

    match cli.command {
        Commands::Run { sector } => run(&app, SectorFilter::parse(&sector)).await?,

        Commands::Refresh { sectors } => {
            let report = match sectors {
                Some(list) => {
                    let chosen = list.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
                    app.scheduler.run_cycle_for(Trigger::Manual, chosen).await
                }
                None => app.scheduler.run_cycle(Trigger::Manual).await,
            };
            println!("{}", render::report(&report));
            println!("{}", render::markets(&app.scheduler.markets()));
            print!("{}", app.feed.with_store(|store| render::feed(store, &SectorFilter::All)));
        }

        Commands::Insight { id } => {
            let Some(item) = app.feed.with_store(|store| store.get(&id).cloned()) else {
                bail!("no story with id {id} in the feed");
            };
            app.insight.select(item);
            if app.insight.generate().await != InsightOutcome::Applied {
                bail!("insight request was not applied");
            }
            let session = app.insight.snapshot();
            match (session.insight(), session.error()) {
                (Some(text), _) => println!("{text}"),
                (None, Some(error)) => bail!("{error}"),
                (None, None) => bail!("no insight returned"),
            }
        }

        Commands::Sectors => {
            print!("{}", app.feed.with_store(render::sectors));
        }
    }

    Ok(())
}

async fn run(app: &NewsFeedApp, filter: SectorFilter) -> anyhow::Result<()> {
    let (handle, task) = app.scheduler.start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(Duration::from_secs(1));
    let mut last_version = None;

    info!("feed running; r = refresh, l = list, q = quit");
    loop {
        tokio::select! {
            _ = redraw.tick() => {
                let version = app.feed.snapshot().version;
                if last_version != Some(version) {
                    last_version = Some(version);
                    println!("{}", render::markets(&app.scheduler.markets()));
                    print!("{}", app.feed.with_store(|store| render::feed(store, &filter)));
                }
            }
            line = lines.next_line() => {
                match line.context("read stdin")?.as_deref().map(str::trim) {
                    Some("r") => {
                        handle.refresh_now().await;
                    }
                    Some("l") => {
                        println!("{}", render::status(&app.scheduler.status()));
                        print!("{}", app.feed.with_store(|store| render::feed(store, &filter)));
                    }
                    Some("q") | None => break,
                    Some(_) => {}
                }
            }
        }
    }

    handle.shutdown().await;
    task.await.context("scheduler task panicked")?;
    Ok(())
}
