//! Display functions for command results

use super::formatters::{create_progress_bar, format_bytes, format_chain, format_ms};
use crate::commands::{BenchmarkResult, InspectResult, PrepResult, PuzzleRun, SolveResult};
use crate::wordlists::{Loaded, Origin};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

/// Print where the dictionary came from
pub fn print_load_summary(loaded: &Loaded, words: &Path) {
    match loaded.origin {
        Origin::Cache => println!(
            "{} {} words from cache",
            "Loaded".green(),
            loaded.db.len()
        ),
        Origin::Rebuilt => println!(
            "{} {} ({} words)",
            "Indexed".yellow(),
            words.display(),
            loaded.db.len()
        ),
    }
}

/// Print the result of solving a puzzle
///
/// `preload` is the time spent loading the dictionary.
pub fn print_solve_result(result: &SolveResult, preload: Duration) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Puzzle: {}",
        result.sides.to_string().to_uppercase().bright_yellow().bold()
    );
    println!(
        "Playable words: {} of {}",
        result.playable_words.to_string().bright_cyan(),
        result.dictionary_words
    );
    println!("{}", "─".repeat(60).cyan());

    println!(
        "\n{} possible solutions\n{}",
        result.total_solutions.to_string().green().bold(),
        "=".repeat(16)
    );
    for (first, second) in &result.chains {
        println!("    {}", format_chain(first, second));
    }
    let hidden = result.total_solutions - result.chains.len();
    if hidden > 0 {
        println!("    {}", format!("... and {hidden} more").bright_black());
    }

    if result.total_solutions == 0 {
        println!("{}", "No two-word chain covers this puzzle".red().bold());
    }

    println!(
        "\npreload_time: {}  solution time: {}  total_time: {}",
        format_ms(preload),
        format_ms(result.duration),
        format_ms(preload + result.duration)
    );
}

/// Print the result of rebuilding a cache
pub fn print_prep_result(result: &PrepResult) {
    println!(
        "{} {} to {}",
        "Pre-processed".green().bold(),
        result.words.display(),
        result.cache.display()
    );
    println!("   Words:  {}", result.word_count);
    println!("   Size:   {}", format_bytes(result.cache_bytes));
    println!("   Time:   {}", format_ms(result.duration));
}

/// Print a per-letter breakdown of the dictionary
pub fn print_inspect_result(result: &InspectResult) {
    println!("\n{}", "═".repeat(60).cyan());
    match &result.sides {
        Some(sides) => println!(
            " {} {} ",
            "DICTIONARY FOR".bright_cyan().bold(),
            sides.to_string().to_uppercase().bright_yellow().bold()
        ),
        None => println!(" {} ", "DICTIONARY".bright_cyan().bold()),
    }
    println!("{}", "═".repeat(60).cyan());

    let most = result.rows.iter().map(|r| r.words).max().unwrap_or(0);
    for row in result.rows.iter().filter(|r| r.words > 0) {
        let bar = create_progress_bar(row.words as f64, most as f64, 30);
        println!(
            "   {}: {} {:7} words {:>10}",
            row.letter.to_string().bright_yellow(),
            bar.green(),
            row.words,
            format_bytes(row.bytes)
        );
    }

    println!("\n   Total words:     {}", result.total_words.to_string().bold());
    println!("   Text size:       {}", format_bytes(result.total_bytes));
    println!("   Average length:  {:.2}", result.average_length);
    if let Some(longest) = &result.longest {
        println!("   Longest word:    {} ({})", longest.bright_yellow(), longest.len());
    }
}

fn print_run(label: &str, run: Option<&PuzzleRun>) {
    if let Some(run) = run {
        println!(
            "   {label:<18}{}  {} solutions, {} playable, {}",
            run.sides.to_string().bright_yellow(),
            run.solutions,
            run.playable_words,
            format_ms(run.duration)
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Puzzles:          {}", result.puzzles);
    println!(
        "   Avg solutions:    {}",
        format!("{:.1}", result.average_solutions)
            .bright_yellow()
            .bold()
    );
    println!("   Avg playable:     {:.1}", result.average_playable);
    println!(
        "   Unsolvable:       {}",
        format!("{}", result.unsolvable).red()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Puzzles/second:   {:.1}", result.puzzles_per_second);

    println!("\n⏱  {}", "Extremes:".bright_cyan().bold());
    print_run("Fastest:", result.fastest.as_ref());
    print_run("Slowest:", result.slowest.as_ref());
    print_run("Most solutions:", result.richest.as_ref());

    if !result.top_openers.is_empty() {
        println!("\n📈 {}", "Top opening words:".bright_cyan().bold());
        let most = result.top_openers[0].1;
        for (word, count) in &result.top_openers {
            let bar = create_progress_bar(*count as f64, most as f64, 20);
            println!("   {word:<16} {} {count}", bar.green());
        }
    }
}
