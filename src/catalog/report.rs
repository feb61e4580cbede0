//! # 结果输出
//!
//! 把结构化结果渲染成文本或 JSON，不参与任何数据库操作

use std::fmt::Write;

use super::runner::RunReport;
use super::types::*;
use crate::error::CatalogResult;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 按指定格式渲染演示结果
pub fn render(report: &RunReport, format: OutputFormat) -> CatalogResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// 种子写入结果
pub fn render_seed(outcome: &SeedOutcome, total: u64) -> String {
    format!(
        "Inserted {} book(s); collection now holds {} document(s)\n",
        outcome.inserted, total
    )
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n=== {} ===", title);
}

fn listing(out: &mut String, books: &[BookListing]) {
    if books.is_empty() {
        let _ = writeln!(out, "  (no results)");
    }
    for book in books {
        let _ = writeln!(out, "  {} by {} - ${:.2}", book.title, book.author, book.price);
    }
}

fn prices(out: &mut String, books: &[BookPrice]) {
    for book in books {
        let _ = writeln!(out, "  ${:>6.2}  {}", book.price, book.title);
    }
}

fn explain(out: &mut String, label: &str, summary: &ExplainSummary) {
    let _ = writeln!(
        out,
        "  {:<9} plan={} index={} docsExamined={} keysExamined={} time={}ms",
        label,
        summary.winning_plan,
        summary.index_name.as_deref().unwrap_or("-"),
        summary.docs_examined,
        summary.keys_examined,
        summary.execution_time_ms
    );
}

/// 人类可读的文本格式
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    heading(&mut out, "Books by genre");
    listing(&mut out, &report.by_genre);

    heading(&mut out, "Books published after threshold");
    for book in &report.published_after {
        let _ = writeln!(out, "  {} ({})", book.title, book.published_year);
    }

    heading(&mut out, "Books by author");
    for book in &report.by_author {
        let _ = writeln!(out, "  {} [{}] - ${:.2}", book.title, book.genre, book.price);
    }

    heading(&mut out, "In stock and recent");
    listing(&mut out, &report.in_stock_recent);

    heading(&mut out, "All books");
    for book in &report.all_books {
        let stock = if book.in_stock { "in stock" } else { "out of stock" };
        let _ = writeln!(
            out,
            "  {} by {} [{}] - ${:.2} ({})",
            book.title, book.author, book.genre, book.price, stock
        );
    }

    heading(&mut out, "Sorted by price (ascending)");
    prices(&mut out, &report.cheapest_first);
    heading(&mut out, "Sorted by price (descending)");
    prices(&mut out, &report.most_expensive_first);

    for page in &report.pages {
        heading(&mut out, &format!("Page {}", page.page));
        for book in &page.books {
            let _ = writeln!(out, "  {} - {}", book.title, book.author);
        }
    }

    heading(&mut out, "Update price");
    match &report.update.updated {
        Some(book) => {
            let _ = writeln!(out, "  {} now costs ${:.2}", book.title, book.price);
        }
        None => {
            let _ = writeln!(out, "  No document found with title '{}'", report.update.title);
        }
    }

    heading(&mut out, "Delete by title");
    let _ = writeln!(
        out,
        "  Deleted {} document(s) titled '{}'",
        report.delete.deleted_count, report.delete.title
    );

    heading(&mut out, "Average price by genre");
    for stats in &report.genre_prices {
        let avg = stats
            .avg_price
            .map(|avg| format!("${:.2}", avg))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(out, "  {:<10} avg {} over {} book(s)", stats.genre, avg, stats.count);
    }

    heading(&mut out, "Author with most books");
    match &report.top_author {
        Some(top) => {
            let _ = writeln!(out, "  {} ({} books)", top.author, top.count);
        }
        None => {
            let _ = writeln!(out, "  (collection is empty)");
        }
    }

    heading(&mut out, "Books by decade");
    for bucket in &report.decades {
        let _ = writeln!(
            out,
            "  {}s: {} - {}",
            bucket.decade,
            bucket.count,
            bucket.titles.join(", ")
        );
    }

    heading(&mut out, "Index comparison");
    explain(&mut out, "before", &report.indexes.before);
    explain(&mut out, "after", &report.indexes.after);
    explain(&mut out, "compound", &report.indexes.compound);
    let _ = writeln!(out, "  created: {}", report.indexes.created_indexes.join(", "));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::runner::{DeleteResult, PageResult, UpdateResult};

    fn sample_report() -> RunReport {
        RunReport {
            by_genre: vec![BookListing {
                title: "The Silent Orchard".to_string(),
                author: "Amara Lindqvist".to_string(),
                price: 14.99,
            }],
            published_after: vec![],
            by_author: vec![],
            in_stock_recent: vec![],
            all_books: vec![],
            cheapest_first: vec![],
            most_expensive_first: vec![],
            pages: vec![PageResult {
                page: 1,
                books: vec![BookTitleAuthor {
                    title: "A Brief History of Lanterns".to_string(),
                    author: "Tomas Reyes".to_string(),
                }],
            }],
            update: UpdateResult {
                title: "Missing Title".to_string(),
                price: 12.49,
                updated: None,
            },
            delete: DeleteResult {
                title: "Memoirs of a Voyager".to_string(),
                deleted_count: 1,
            },
            genre_prices: vec![GenrePriceStats {
                genre: "Poetry".to_string(),
                avg_price: None,
                count: 1,
            }],
            top_author: None,
            decades: vec![DecadeBucket {
                decade: 1990,
                count: 1,
                titles: vec!["A Brief History of Lanterns".to_string()],
            }],
            indexes: IndexComparison {
                before: ExplainSummary {
                    docs_examined: 12,
                    winning_plan: "COLLSCAN".to_string(),
                    ..ExplainSummary::default()
                },
                after: ExplainSummary {
                    docs_examined: 1,
                    keys_examined: 1,
                    winning_plan: "FETCH > IXSCAN".to_string(),
                    index_name: Some("title_1".to_string()),
                    ..ExplainSummary::default()
                },
                compound: ExplainSummary::default(),
                created_indexes: vec![
                    "title_1".to_string(),
                    "author_1_published_year_-1".to_string(),
                ],
            },
        }
    }

    #[test]
    fn test_text_report_sections() {
        let text = render_text(&sample_report());

        assert!(text.contains("The Silent Orchard by Amara Lindqvist - $14.99"));
        assert!(text.contains("No document found with title 'Missing Title'"));
        assert!(text.contains("Deleted 1 document(s) titled 'Memoirs of a Voyager'"));
        assert!(text.contains("avg n/a over 1 book(s)"));
        assert!(text.contains("1990s: 1 - A Brief History of Lanterns"));
        assert!(text.contains("plan=COLLSCAN index=- docsExamined=12"));
        assert!(text.contains("plan=FETCH > IXSCAN index=title_1"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["update"]["updated"].is_null());
        assert_eq!(value["delete"]["deleted_count"], 1);
        assert_eq!(value["decades"][0]["decade"], 1990);
        assert!(value["decades"][0].get("_id").is_none());
        assert_eq!(value["genre_prices"][0]["genre"], "Poetry");
        assert_eq!(value["indexes"]["after"]["index_name"], "title_1");
    }

    #[test]
    fn test_seed_summary() {
        let text = render_seed(&SeedOutcome { inserted: 12 }, 24);
        assert_eq!(text, "Inserted 12 book(s); collection now holds 24 document(s)\n");
    }
}
