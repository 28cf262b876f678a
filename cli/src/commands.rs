use std::io::Write;
use std::path::{Path, PathBuf};

use casualty_core::context::{DashboardConfig, DashboardConfigExt};
use casualty_core::render::{html, text};
use casualty_core::view::{Page, PageView};
use casualty_types::FilterSelection;

use crate::context::CliContext;

const NO_PAGE: &str = "No page mounted. Use `open <page>` first.";

pub fn list_pages() {
    println!("{:<20} Title", "Page");
    println!("{}", "-".repeat(60));
    for page in Page::ALL {
        println!("{:<20} {}", page.slug(), page.title());
    }
}

pub async fn open(page: Page, ctx: &CliContext) {
    ctx.mount(page).await;
    println!("Opened {} ({})", page.title(), page);
}

pub async fn show(ctx: &CliContext, wait: bool) -> Result<(), String> {
    if wait {
        ctx.wait_for_load().await;
    } else {
        ctx.settle_load().await;
    }

    let view = ctx.view().await;
    let view = view.as_ref().ok_or(NO_PAGE)?;
    print!("{}", text::document(&view.document()));
    Ok(())
}

pub async fn set_filter(
    ctx: &CliContext,
    category: Option<String>,
    verdict: Option<String>,
) -> Result<(), String> {
    ctx.settle_load().await;

    let mut view = ctx.view_mut().await;
    let view = view.as_mut().ok_or(NO_PAGE)?;
    let selection = FilterSelection {
        category: category.unwrap_or_default(),
        verdict: verdict.unwrap_or_default(),
    };
    view.set_filter(selection);

    if view.is_loading() {
        println!("Filter set; data is still loading");
    } else {
        println!("{} records match", view.visible_records().len());
    }
    Ok(())
}

pub async fn show_options(ctx: &CliContext) -> Result<(), String> {
    ctx.settle_load().await;

    let view = ctx.view().await;
    let view = view.as_ref().ok_or(NO_PAGE)?;
    let Some(options) = view.filter_options() else {
        println!("No data loaded");
        return Ok(());
    };

    let kind = view.page().dataset_kind();
    println!("{}:", kind.category_field());
    for category in &options.categories {
        println!("  {category}");
    }
    println!("{}:", kind.verdict_field());
    for verdict in &options.verdicts {
        println!("  {verdict}");
    }
    Ok(())
}

pub async fn render(ctx: &CliContext, out: &Path) -> Result<(), String> {
    ctx.settle_load().await;

    let html = {
        let view = ctx.view().await;
        let view = view.as_ref().ok_or(NO_PAGE)?;
        html::document(&view.document())
    };
    write_page(out, &html).await?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Load and render every page into `dir` (the configured output directory
/// when not given).
pub async fn export(ctx: &CliContext, dir: Option<PathBuf>) -> Result<(), String> {
    let config = ctx.config.read().await.clone();
    let dir = dir.unwrap_or_else(|| PathBuf::from(&config.output_directory));
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("failed to create {}: {}", dir.display(), e))?;

    for page in Page::ALL {
        let view = PageView::load(page, &config).await;
        let path = dir.join(format!("{}.html", page.slug()));
        write_page(&path, &html::document(&view.document())).await?;
        println!("Wrote {}", path.display());
    }
    tracing::info!(dir = %dir.display(), pages = Page::ALL.len(), "exported pages");
    Ok(())
}

async fn write_page(path: &Path, html: &str) -> Result<(), String> {
    tokio::fs::write(path, html)
        .await
        .map_err(|e| format!("failed to write {}: {}", path.display(), e))
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match DashboardConfig::config_path() {
        Ok(path) => println!("Config file:      {}", path.display()),
        Err(e) => println!("Config file:      unavailable ({e})"),
    }
    println!("Claims source:    {}", config.claims_source);
    println!("Timeline source:  {}", config.timeline_source);
    println!("Output directory: {}", config.output_directory);
    println!("Date format:      {}", config.date_format);
    println!("Categories:");
    for def in &config.categories {
        let synonym = if def.civilian_synonym { " (civilian)" } else { "" };
        println!("  {}{}", def.label, synonym);
    }
    if !config.chart_excluded.is_empty() {
        println!("Excluded from charts: {}", config.chart_excluded.join(", "));
    }
}

pub async fn close(ctx: &CliContext) {
    ctx.close().await;
    println!("Page closed");
}

pub fn exit() -> Result<(), String> {
    writeln!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
