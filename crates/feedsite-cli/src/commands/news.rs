use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};

use feedsite_core::{
    api::{NewsDraft, NewsItem, NewsPatch, NewsQuery},
    news::truncate_description,
    AppConfig,
};

use super::Backend;

pub async fn list(config: &AppConfig, page: u32, limit: Option<u32>, mine: bool) -> Result<()> {
    let backend = Backend::connect(config).await?;

    let mut query = NewsQuery::new(page, limit.unwrap_or(config.news.page_size));
    if mine {
        let user = backend
            .session
            .current_user()
            .ok_or_else(|| anyhow!("--mine needs a session; run `feedsite login` first"))?;
        query = query.by_creator(user.id);
    }

    let result = backend.news.list(query).await?;
    if result.items.is_empty() {
        println!("No news found.");
        return Ok(());
    }

    println!(
        "News (page {}/{}, {} total):\n",
        result.page,
        result.pages.max(1),
        result.total
    );
    for item in &result.items {
        print_summary(item);
    }

    if result.page < result.pages {
        println!("More: feedsite news list --page {}", result.page + 1);
    }
    Ok(())
}

pub async fn show(config: &AppConfig, id: i64) -> Result<()> {
    let backend = Backend::connect(config).await?;
    let item = backend.news.get(id).await?;

    println!("#{} {}", item.id, item.title);
    println!("  By: {}", item.author());
    if let Some(created) = item.created_at {
        println!("  Created: {}", created.format("%Y-%m-%d %H:%M"));
    }
    if let Some(updated) = item.updated_at {
        println!("  Updated: {}", updated.format("%Y-%m-%d %H:%M"));
    }
    if let Some(url) = &item.image_url {
        println!("  Image: {}", url);
    }
    println!("\n{}", item.description);
    Ok(())
}

pub async fn create(
    config: &AppConfig,
    title: String,
    description: String,
    image_url: Option<String>,
) -> Result<()> {
    let backend = Backend::connect(config).await?;
    let item = backend
        .news
        .create(&NewsDraft::new(title, description, image_url))
        .await?;
    println!("Created news #{}: {}", item.id, item.title);
    Ok(())
}

pub async fn update(
    config: &AppConfig,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<()> {
    let patch = NewsPatch {
        title,
        description,
        image_url,
    };
    if patch.is_empty() {
        return Err(anyhow!("Nothing to update; pass --title, --description or --image-url"));
    }

    let backend = Backend::connect(config).await?;
    let item = backend.news.update(id, &patch).await?;
    println!("Updated news #{}: {}", item.id, item.title);
    Ok(())
}

pub async fn delete(config: &AppConfig, id: i64, yes: bool) -> Result<()> {
    let backend = Backend::connect(config).await?;

    if !yes {
        let item = backend.news.get(id).await?;
        print!("Delete \"{}\"? [y/N] ", item.title);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    backend.news.delete(id).await?;
    println!("Deleted news #{}", id);
    Ok(())
}

fn print_summary(item: &NewsItem) {
    println!("  #{} {} ({})", item.id, item.title, item.author());
    for line in truncate_description(&item.description, 2) {
        println!("    {}", line);
    }
    if let Some(created) = item.created_at {
        println!("    {}", created.format("%Y-%m-%d %H:%M"));
    }
    println!();
}
