//! The Crawl Orchestrator: startup, worker pool, redirect handling, and
//! termination (spec §4.5).

use crate::config::CrawlConfig;
use crate::discovery;
use crate::pause_gate::PauseGate;
use crate::queue::{ClaimOutcome, Frontier, FrontierReceiver, VisitedRegistry};
use crate::registry::{EngineHandle, EngineRegistry};
use crate::skiplist;
use chrono::Utc;
use seo_fetch::{discover_sitemaps, ReqwestHttpClient, RobotsPolicy};
use seo_types::{Crawl, CrawlPatch, CrawlStatus, HttpClient, RobotsTxtStatus, Store};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Runs one crawl to completion (or until the wall-clock budget or a stop
/// request ends it early). Every terminal path updates the crawl row and
/// deregisters from `registry`.
pub async fn run(
    crawl: &Crawl,
    start_url: &str,
    config: CrawlConfig,
    store: Arc<dyn Store>,
    registry: EngineRegistry,
) -> seo_types::Result<()> {
    let crawl_id = crawl.id;
    let resuming = crawl.status == CrawlStatus::Stopped;
    let client: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::with_user_agent(config.user_agent.clone())?);

    store
        .update_crawl(
            crawl_id,
            CrawlPatch {
                status: Some(CrawlStatus::Running),
                started_at: Some(Utc::now()),
                ..CrawlPatch::new()
            },
        )
        .await?;

    let (pause_gate, pause_watcher) = PauseGate::new();
    let handle = Arc::new(EngineHandle::new(pause_gate));
    registry.register(crawl_id, Arc::clone(&handle)).await;

    let result = run_inner(
        crawl_id,
        resuming,
        start_url,
        &config,
        Arc::clone(&client),
        Arc::clone(&store),
        pause_watcher,
        Arc::clone(&handle),
    )
    .await;

    let final_status = match &result {
        Ok(()) if handle.is_stopped() => CrawlStatus::Stopped,
        Ok(()) => CrawlStatus::Completed,
        Err(_) => CrawlStatus::Failed,
    };

    let _ = store
        .update_crawl(
            crawl_id,
            CrawlPatch {
                status: Some(final_status),
                completed_at: Some(Utc::now()),
                ..CrawlPatch::new()
            },
        )
        .await;

    registry.deregister(crawl_id).await;
    result
}

#[allow(clippy::too_many_arguments)]
async fn run_inner(
    crawl_id: u64,
    resuming: bool,
    start_url: &str,
    config: &CrawlConfig,
    client: Arc<dyn HttpClient>,
    store: Arc<dyn Store>,
    pause_watcher: crate::pause_gate::PauseGateWatcher,
    handle: Arc<EngineHandle>,
) -> seo_types::Result<()> {
    // Startup: resolve the starting URL by following redirects once.
    let landing = client.get(start_url).await?;
    let effective_base = seo_types::urlnorm::normalized_host(&landing.final_url)?;

    let origin = url::Url::parse(&landing.final_url)?.origin().ascii_serialization();
    let robots_url = format!("{origin}/robots.txt");
    let (robots_status, robots_content, policy) = match client.get(&robots_url).await {
        Ok(resp) if resp.is_success() => {
            let text = resp.text().unwrap_or_default();
            (RobotsTxtStatus::Found, Some(text.clone()), RobotsPolicy::parse(&text))
        }
        _ => (RobotsTxtStatus::NotFound, None, RobotsPolicy::parse("")),
    };
    let policy = Arc::new(policy);

    let (sitemaps, sitemap_urls) =
        discover_sitemaps(client.as_ref(), &landing.final_url, &policy.sitemaps).await;

    store
        .update_crawl(
            crawl_id,
            CrawlPatch {
                robots_txt_status: Some(robots_status),
                robots_txt_content: robots_content,
                sitemaps_found: Some(sitemaps),
                ..CrawlPatch::new()
            },
        )
        .await?;

    let visited = Arc::new(VisitedRegistry::new(config.max_pages));

    // Resuming a stopped crawl: preload the visited set from whatever Page
    // Records already exist so workers don't re-fetch them (spec §4.5).
    if resuming {
        if let Ok(urls) = store.list_page_urls(crawl_id).await {
            let keys = urls
                .iter()
                .filter_map(|u| seo_types::urlnorm::dedup_key(u).ok());
            visited.preload(keys).await;
        }
    }

    let (frontier, rx) = Frontier::new(config.queue_capacity);

    frontier.enqueue(landing.final_url.clone()).await;
    for sitemap_url in &sitemap_urls {
        if let Ok(host) = seo_types::urlnorm::normalized_host(sitemap_url) {
            if host == effective_base {
                frontier.enqueue(sitemap_url.clone()).await;
            }
        }
    }
    let pages_saved = Arc::new(AtomicU32::new(0));
    let rx = Arc::new(Mutex::new(rx));

    run_workers(
        crawl_id,
        effective_base,
        config,
        client,
        store.clone(),
        Arc::clone(&visited),
        frontier,
        rx,
        pause_watcher,
        Arc::clone(&handle),
        Arc::clone(&pages_saved),
        policy,
        config.wall_clock_budget,
    )
    .await;

    store
        .update_crawl(
            crawl_id,
            CrawlPatch {
                pages_crawled: Some(pages_saved.load(Ordering::SeqCst)),
                ..CrawlPatch::new()
            },
        )
        .await?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_workers(
    crawl_id: u64,
    effective_base: String,
    config: &CrawlConfig,
    client: Arc<dyn HttpClient>,
    store: Arc<dyn Store>,
    visited: Arc<VisitedRegistry>,
    frontier: Frontier,
    rx: Arc<Mutex<FrontierReceiver>>,
    pause_watcher: crate::pause_gate::PauseGateWatcher,
    handle: Arc<EngineHandle>,
    pages_saved: Arc<AtomicU32>,
    policy: Arc<RobotsPolicy>,
    wall_clock_budget: std::time::Duration,
) {
    let mut workers = Vec::with_capacity(config.concurrency);

    for _ in 0..config.concurrency {
        let frontier = frontier.clone();
        let rx = Arc::clone(&rx);
        let visited = Arc::clone(&visited);
        let mut pause_watcher = pause_watcher.clone();
        let handle = Arc::clone(&handle);
        let pages_saved = Arc::clone(&pages_saved);
        let policy = Arc::clone(&policy);
        let effective_base = effective_base.clone();
        let user_agent = config.user_agent.clone();
        let fetch_timeout = config.fetch_timeout;
        let respect_robots = config.respect_robots;
        let max_pages = config.max_pages;
        let client = Arc::clone(&client);
        let store = Arc::clone(&store);

        workers.push(tokio::spawn(async move {
            worker_loop(
                crawl_id,
                effective_base,
                user_agent,
                fetch_timeout,
                respect_robots,
                max_pages,
                client.as_ref(),
                store.as_ref(),
                visited,
                frontier,
                rx,
                &mut pause_watcher,
                handle,
                pages_saved,
                policy,
            )
            .await;
        }));
    }

    // Drop our own frontier handle so the queue closes once every worker's
    // clone is also idle and draining; they exit on `dequeue` returning `None`.
    drop(frontier);

    match tokio::time::timeout(wall_clock_budget, async {
        for worker in workers {
            let _ = worker.await;
        }
    })
    .await
    {
        Ok(()) => {}
        Err(_) => warn!(crawl_id, "wall-clock budget elapsed; outstanding workers abandoned"),
    }
}

#[allow(clippy::too_many_arguments)]
async fn worker_loop(
    crawl_id: u64,
    effective_base: String,
    user_agent: String,
    fetch_timeout: std::time::Duration,
    respect_robots: bool,
    max_pages: u32,
    client: &dyn HttpClient,
    store: &dyn Store,
    visited: Arc<VisitedRegistry>,
    frontier: Frontier,
    rx: Arc<Mutex<FrontierReceiver>>,
    pause_watcher: &mut crate::pause_gate::PauseGateWatcher,
    handle: Arc<EngineHandle>,
    pages_saved: Arc<AtomicU32>,
    policy: Arc<RobotsPolicy>,
) {
    loop {
        pause_watcher.wait_until_open().await;
        if handle.is_stopped() {
            return;
        }

        let Some(url) = rx.lock().await.dequeue().await else {
            return;
        };

        let Ok(original_key) = seo_types::urlnorm::dedup_key(&url) else {
            continue;
        };

        match visited.try_claim(&original_key).await {
            ClaimOutcome::AlreadyVisited | ClaimOutcome::CapReached => continue,
            ClaimOutcome::Claimed => {}
        }

        if respect_robots {
            if let Ok(parsed) = url::Url::parse(&url) {
                if !policy.is_allowed(parsed.path(), &user_agent) {
                    continue;
                }
            }
        }

        let response = match tokio::time::timeout(fetch_timeout, client.get(&url)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!(crawl_id, url, error = %e, "transport error; dropping URL");
                continue;
            }
            Err(_) => {
                warn!(crawl_id, url, "fetch timed out; dropping URL");
                continue;
            }
        };

        // Redirect handling (spec §4.5): no redirect -> classify as-is;
        // off-domain landing -> drop entirely; same dedup key (trailing
        // slash, www, scheme bump) -> treat as the same page under its
        // final URL; otherwise mark the final key visited too and proceed
        // under the final URL, recording where it redirected from.
        let (effective_url, record_redirect_target) = if response.was_redirected() {
            let Ok(final_host) = seo_types::urlnorm::normalized_host(&response.final_url) else {
                continue;
            };
            if final_host != effective_base {
                continue;
            }
            let Ok(final_key) = seo_types::urlnorm::dedup_key(&response.final_url) else {
                continue;
            };
            if final_key == original_key {
                (response.final_url.clone(), None)
            } else {
                visited.mark_visited_only(&final_key).await;
                (response.final_url.clone(), Some(url.clone()))
            }
        } else {
            (url.clone(), None)
        };

        let content_type = response.header("content-type").cloned().unwrap_or_default();
        let is_html = content_type.contains("text/html");
        let status = response.status;

        if !is_html && !(400..600).contains(&status) {
            continue;
        }

        let mut record = if (400..600).contains(&status) {
            seo_analyzer::analyze_non_content(
                &effective_url,
                status,
                &content_type,
                response.body.len(),
                response.elapsed,
            )
        } else {
            seo_analyzer::analyze(
                &effective_url,
                &response.body,
                status,
                &content_type,
                response.elapsed,
            )
        };
        record.redirect_target = record_redirect_target;

        let discovered = if status < 400 {
            response
                .text()
                .ok()
                .map(|html| discovery::discover(&scraper::Html::parse_document(&html), &effective_url))
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        match store.create_page_record(crawl_id, record).await {
            Ok(()) => {
                pages_saved.fetch_add(1, Ordering::SeqCst);
                visited.record_page_saved().await;
            }
            Err(e) => {
                warn!(crawl_id, url = effective_url, error = %e, "store write failed; page not counted");
            }
        }

        for candidate in discovered {
            let Ok(host) = seo_types::urlnorm::normalized_host(&candidate) else {
                continue;
            };
            if host != effective_base {
                continue;
            }
            let Ok(candidate_key) = seo_types::urlnorm::dedup_key(&candidate) else {
                continue;
            };
            if visited.contains(&candidate_key).await {
                continue;
            }
            if visited.pages_crawled().await >= max_pages {
                continue;
            }
            if let Ok(parsed) = url::Url::parse(&candidate) {
                if skiplist::is_excluded(parsed.path()) {
                    continue;
                }
            }
            frontier.enqueue(candidate).await;
        }
    }
}
